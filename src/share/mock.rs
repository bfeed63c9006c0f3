use super::{AttachmentInput, MutationResult, RecordLookup, ShareBackend};
use crate::error::{Error, Result};
use crate::vaccine::VaccineRecord;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    WriteAttachment(AttachmentInput),
    AddVaccineRecord(VaccineRecord),
    FindVaccineRecord(String),
    PutVaccineRecord(String, VaccineRecord),
    RemoveVaccineRecord(String),
}

/// In-memory Share node recording every call it receives.
#[derive(Debug, Default)]
pub struct MockShare {
    calls: Mutex<Vec<Call>>,
    ids: HashMap<String, Vec<String>>,
    unreachable_keys: Vec<String>,
    rejected_keys: Vec<String>,
}

impl MockShare {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record<E: Into<String>, I: Into<String>>(mut self, email: E, id: I) -> Self {
        self.ids
            .entry(email.into())
            .or_default()
            .push(id.into());
        self
    }

    /// `write_attachment` fails with a GraphQL error for this key.
    pub fn unreachable_for<T: Into<String>>(mut self, key: T) -> Self {
        self.unreachable_keys.push(key.into());
        self
    }

    /// `write_attachment` answers with a non-null `error` for this key.
    pub fn rejecting<T: Into<String>>(mut self, key: T) -> Self {
        self.rejected_keys.push(key.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ShareBackend for MockShare {
    async fn write_attachment(&self, input: &AttachmentInput) -> Result<MutationResult> {
        self.record(Call::WriteAttachment(input.clone()));

        if self.unreachable_keys.contains(&input.source_key) {
            return Err(Error::Graphql("Service Unavailable".into()));
        }
        if self.rejected_keys.contains(&input.source_key) {
            return Ok(MutationResult {
                error: Some(serde_json::json!("Access Denied")),
                result: None,
            });
        }
        Ok(MutationResult::accepted(format!("file-{}", input.source_key)))
    }

    async fn add_vaccine_record(&self, record: &VaccineRecord) -> Result<MutationResult> {
        self.record(Call::AddVaccineRecord(record.clone()));
        Ok(MutationResult::accepted(format!("new-{}", record.email)))
    }

    async fn find_vaccine_record(&self, email: &str) -> Result<RecordLookup> {
        self.record(Call::FindVaccineRecord(email.into()));

        Ok(self
            .ids
            .get(email)
            .and_then(|ids| ids.first())
            .map(|id| RecordLookup::Found(id.clone()))
            .unwrap_or(RecordLookup::NotFound))
    }

    async fn put_vaccine_record(
        &self,
        id: &str,
        record: &VaccineRecord,
    ) -> Result<MutationResult> {
        self.record(Call::PutVaccineRecord(id.into(), record.clone()));
        Ok(MutationResult::accepted(id))
    }

    async fn remove_vaccine_record(&self, id: &str) -> Result<MutationResult> {
        self.record(Call::RemoveVaccineRecord(id.into()));
        Ok(MutationResult::accepted(id))
    }
}
