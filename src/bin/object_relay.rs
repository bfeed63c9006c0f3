use lambda_runtime::{run, service_fn, LambdaEvent};
use share_relay::{
    event::S3Event, Config, ObjectRelay, ObjectStore, S3Store, ShareBackend, ShareClient,
};
use std::collections::HashMap;
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
    let store: Arc<dyn ObjectStore> = Arc::new(S3Store::from_config(&config).await);
    let relay = ObjectRelay::new(share, store);

    run(service_fn(|event: LambdaEvent<S3Event>| {
        handler(relay.clone(), event)
    }))
    .await
}

async fn handler(
    relay: ObjectRelay,
    event: LambdaEvent<S3Event>,
) -> Result<HashMap<String, bool>, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("object_relay", request_id = %context.request_id);

    relay
        .handle(payload)
        .instrument(span)
        .await
        .map_err(lambda_runtime::Error::from)
}
