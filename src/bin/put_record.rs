use aws_sdk_dynamodb::{config::Builder as ConfigBuilder, types::AttributeValue, Client};
use chrono::Utc;
use share_relay::{vaccine::KEY_EMAIL, ENV_DYNAMODB_ENDPOINT_URL};
use std::collections::HashMap;
use std::env;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;
use ulid::Ulid;

const TABLE: &str = "VaccineRecords";

/// Puts a sample vaccine record. Pass an email to overwrite an existing row
/// (a MODIFY on the stream); without one a fresh row is inserted.
#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let url =
        env::var(ENV_DYNAMODB_ENDPOINT_URL).expect("env DYNAMODB_ENDPOINT_URL is required");
    let config = ConfigBuilder::from(&aws_config::load_from_env().await)
        .endpoint_url(url)
        .build();
    let client = Client::from_conf(config);

    let email = env::args()
        .nth(1)
        .unwrap_or_else(|| format!("{}@example.com", Ulid::new().to_string().to_lowercase()));
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let first_dose: HashMap<String, AttributeValue> = [
        ("manufacturer", "Pfizer"),
        ("lotNumber", "EL9261"),
        ("administeredBy", "Clinic A"),
        ("administrationDate", today.as_str()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), AttributeValue::S(v.to_string())))
    .collect();

    match client
        .put_item()
        .table_name(TABLE)
        .item(KEY_EMAIL, AttributeValue::S(email.clone()))
        .item("image", AttributeValue::S(format!("cards/{email}.png")))
        .item("status", AttributeValue::S("PARTIAL".into()))
        .item("lastUpdated", AttributeValue::S(today.clone()))
        .item("firstDose", AttributeValue::M(first_dose))
        .send()
        .await
    {
        Ok(_) => info!("Put vaccine record for {email}"),
        Err(err) => error!("{:#?}", err),
    }
}
