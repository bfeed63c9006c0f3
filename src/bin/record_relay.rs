use lambda_runtime::{run, service_fn, LambdaEvent};
use share_relay::{event::StreamEvent, relay::Summary, Config, RecordRelay, ShareBackend, ShareClient};
use std::sync::Arc;
use tracing::{info_span, Instrument, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::new()?;
    let share: Arc<dyn ShareBackend> = Arc::new(ShareClient::new(&config)?);
    let relay = RecordRelay::new(share);

    run(service_fn(|event: LambdaEvent<StreamEvent>| {
        handler(relay.clone(), event)
    }))
    .await
}

async fn handler(
    relay: RecordRelay,
    event: LambdaEvent<StreamEvent>,
) -> Result<Summary, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("record_relay", request_id = %context.request_id);

    relay
        .handle(payload)
        .instrument(span)
        .await
        .map_err(lambda_runtime::Error::from)
}
