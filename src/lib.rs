pub mod config;
pub mod error;
pub mod event;
pub mod relay;
pub mod share;
pub mod storage;
pub mod vaccine;

mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use relay::{ObjectRelay, RecordRelay};
pub use share::{ShareBackend, ShareClient};
pub use storage::{ObjectStore, S3Store};

pub const ENV_SHARE_NODE_URL: &str = "SHARE_NODE_URL";
pub const ENV_SHARE_NODE_API_KEY: &str = "SHARE_NODE_API_KEY";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_CONFIG_PATH: &str = "SHARE_RELAY_CONFIG";
pub const ENV_DYNAMODB_ENDPOINT_URL: &str = "DYNAMODB_ENDPOINT_URL";
