mod client;
#[cfg(test)]
mod mock;
mod query;
mod schema;

use crate::error::{Error, Result};
use crate::event::ObjectRef;
use crate::vaccine::VaccineRecord;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::ShareClient;
#[cfg(test)]
pub use mock::{Call, MockShare};
pub use schema::Schema;

/// Operations the relays need from the Share node.
#[async_trait]
pub trait ShareBackend: Send + Sync {
    async fn write_attachment(&self, input: &AttachmentInput) -> Result<MutationResult>;
    async fn add_vaccine_record(&self, record: &VaccineRecord) -> Result<MutationResult>;
    async fn find_vaccine_record(&self, email: &str) -> Result<RecordLookup>;
    async fn put_vaccine_record(&self, id: &str, record: &VaccineRecord)
        -> Result<MutationResult>;
    async fn remove_vaccine_record(&self, id: &str) -> Result<MutationResult>;
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInput {
    pub source_bucket: String,
    pub source_key: String,
    pub source_region: String,
    pub destination_key: String,
}

impl From<&ObjectRef> for AttachmentInput {
    fn from(obj: &ObjectRef) -> AttachmentInput {
        AttachmentInput {
            source_bucket: obj.bucket.clone(),
            source_key: obj.key.clone(),
            source_region: obj.region.clone(),
            destination_key: obj.key.clone(),
        }
    }
}

/// Payload of every `*_async` mutation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MutationResult {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub result: Option<TxResult>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct TxResult {
    pub id: String,
    pub node_owner: Option<String>,
    pub submission_time: Option<String>,
    pub tx_id: Option<String>,
}

impl MutationResult {
    pub fn accepted<T: Into<String>>(id: T) -> Self {
        Self {
            error: None,
            result: Some(TxResult {
                id: id.into(),
                ..TxResult::default()
            }),
        }
    }

    /// Turns an `error` reported inside the payload into `Error::Rejected`.
    pub fn into_accepted(self, operation: &str) -> Result<Self> {
        match self.error.as_ref() {
            None | Some(serde_json::Value::Null) => Ok(self),
            Some(serde_json::Value::String(message)) => Err(Error::Rejected {
                operation: operation.into(),
                message: message.clone(),
            }),
            Some(other) => Err(Error::Rejected {
                operation: operation.into(),
                message: other.to_string(),
            }),
        }
    }

    pub fn tx_id(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| r.tx_id.as_deref())
    }
}

/// Outcome of resolving a Share node id by email.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RecordLookup {
    Found(String),
    NotFound,
}

impl RecordLookup {
    pub fn found(self, email: &str) -> Result<String> {
        match self {
            Self::Found(id) => Ok(id),
            Self::NotFound => Err(Error::RecordNotFound(email.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_attachment_input_with_the_source_key_as_destination() {
        let obj = ObjectRef::new("cards", "uploads/a.png", "us-east-1");
        let json = serde_json::to_value(AttachmentInput::from(&obj)).unwrap();
        let expected = serde_json::json!({
            "sourceBucket": "cards",
            "sourceKey": "uploads/a.png",
            "sourceRegion": "us-east-1",
            "destinationKey": "uploads/a.png"
        });
        assert_eq!(json, expected);
    }

    #[test]
    fn it_accepts_mutation_results_without_error() {
        let result: MutationResult = serde_json::from_value(serde_json::json!({
            "error": null,
            "result": {
                "id": "0185e2f0",
                "node_owner": "Node-1",
                "submission_time": "2021-01-01T00:00:00Z",
                "tx_id": "tx-1"
            }
        }))
        .unwrap();

        let result = result.into_accepted("add_File_async").unwrap();
        assert_eq!(result.tx_id(), Some("tx-1"));
    }

    #[test]
    fn it_rejects_mutation_results_with_error() {
        let result: MutationResult = serde_json::from_value(serde_json::json!({
            "error": "bucket not readable",
            "result": null
        }))
        .unwrap();

        match result.into_accepted("add_File_async") {
            Err(err) => {
                assert_eq!(
                    format!("{err}"),
                    "Share node rejected `add_File_async`: bucket not readable"
                );
            }
            Ok(_) => {
                unreachable!("The result shoud be an error");
            }
        }
    }

    #[test]
    fn it_turns_not_found_into_an_error() {
        assert_eq!(
            RecordLookup::Found("id-1".into()).found("a@x.com").unwrap(),
            "id-1"
        );
        assert!(matches!(
            RecordLookup::NotFound.found("a@x.com"),
            Err(Error::RecordNotFound(email)) if email == "a@x.com"
        ));
    }
}
