use crate::error::Result;
use crate::event::StreamEvent;
use crate::share::ShareBackend;
use crate::vaccine::{Change, VaccineRecord};

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

const ADD_RECORD: &str = "addRecord";
const UPDATE_RECORD: &str = "updateVaccineRecord";
const REMOVE_RECORD: &str = "removeRecord";

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub inserted: usize,
    pub modified: usize,
    pub removed: usize,
    pub skipped: usize,
}

/// Mirrors vaccine record changes from a DynamoDB stream into the Share node.
#[derive(Clone)]
pub struct RecordRelay {
    share: Arc<dyn ShareBackend>,
}

impl RecordRelay {
    pub fn new(share: Arc<dyn ShareBackend>) -> Self {
        Self { share }
    }

    /// Applies each change in batch order. Any failure, including an update
    /// or delete of an email the Share node does not know, fails the
    /// invocation so the stream redelivers the batch.
    pub async fn handle(&self, event: StreamEvent) -> Result<Summary> {
        info!("Received {} stream records", event.records.len());

        let mut summary = Summary::default();

        for record in event.records {
            let label = record.event_id.clone();
            let change = Change::try_from(record).map_err(|err| {
                error!("Record {label}: {err}");
                err
            })?;

            match change {
                Change::Insert(vaccine) => {
                    self.create(&vaccine).await?;
                    summary.inserted += 1;
                }
                Change::Modify(vaccine) => {
                    self.update(&vaccine).await?;
                    summary.modified += 1;
                }
                Change::Remove { email } => {
                    self.delete(&email).await?;
                    summary.removed += 1;
                }
                Change::Unknown(name) => {
                    error!("Record {label}: we don't handle {name} yet");
                    summary.skipped += 1;
                }
            }
        }

        info!("{:?}", summary);
        Ok(summary)
    }

    async fn create(&self, vaccine: &VaccineRecord) -> Result<()> {
        let result = self
            .share
            .add_vaccine_record(vaccine)
            .await?
            .into_accepted(ADD_RECORD)?;

        info!(
            "Added vaccine record for {} (tx: {})",
            vaccine.email,
            result.tx_id().unwrap_or("-")
        );
        Ok(())
    }

    /// First match wins when several Share node records carry the email.
    async fn update(&self, vaccine: &VaccineRecord) -> Result<()> {
        let id = self
            .share
            .find_vaccine_record(&vaccine.email)
            .await?
            .found(&vaccine.email)?;

        self.share
            .put_vaccine_record(&id, vaccine)
            .await?
            .into_accepted(UPDATE_RECORD)?;

        info!("Updated vaccine record {id} for {}", vaccine.email);
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<()> {
        let id = self
            .share
            .find_vaccine_record(email)
            .await?
            .found(email)?;

        self.share
            .remove_vaccine_record(&id)
            .await?
            .into_accepted(REMOVE_RECORD)?;

        info!("Removed vaccine record {id} for {email}");
        Ok(())
    }
}
