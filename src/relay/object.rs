use crate::error::{Error, Result};
use crate::event::{object_refs, ObjectRef, S3Event};
use crate::share::{AttachmentInput, ShareBackend};
use crate::storage::ObjectStore;

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use ulid::Ulid;

const WRITE_ATTACHMENT: &str = "writeAttachment";

/// Registers objects from S3 put notifications as Share node files.
#[derive(Clone)]
pub struct ObjectRelay {
    share: Arc<dyn ShareBackend>,
    store: Arc<dyn ObjectStore>,
    scratch_dir: PathBuf,
}

impl ObjectRelay {
    pub fn new(share: Arc<dyn ShareBackend>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            share,
            store,
            scratch_dir: env::temp_dir(),
        }
    }

    pub fn scratch_dir<P: Into<PathBuf>>(self, dir: P) -> Self {
        Self {
            scratch_dir: dir.into(),
            ..self
        }
    }

    /// Relays every record in order and returns the outcome per object key.
    ///
    /// A malformed record or an object that cannot be downloaded fails the
    /// whole invocation. A failed registration only marks its key `false`.
    pub async fn handle(&self, event: S3Event) -> Result<HashMap<String, bool>> {
        info!("Received {} S3 records", event.records.len());

        let objects = object_refs(event).map_err(|err| {
            error!("{err}");
            err
        })?;

        let mut results: HashMap<String, bool> = HashMap::new();

        for obj in objects {
            self.fetch(&obj).await.map_err(|err| {
                error!("{err}");
                err
            })?;

            let registered = self.register(&obj).await;
            results.insert(obj.key, registered);
        }

        Ok(results)
    }

    /// Downloads the object into a throwaway directory to prove it is readable.
    async fn fetch(&self, obj: &ObjectRef) -> Result<u64> {
        let file_name = obj.file_name()?;
        let dir = self.scratch_dir.join(format!("share-relay-{}", Ulid::new()));

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| Error::download(obj.to_string(), err))?;

        let dest = dir.join(file_name);
        let result = self.store.download(obj, &dest).await;

        if let Err(err) = tokio::fs::remove_dir_all(&dir).await {
            warn!("Failed to clean up {}: {err}", dir.display());
        }

        let size = result?;
        info!(
            "Successful download of {obj} ({size} bytes) to {} for processing",
            dest.display()
        );
        Ok(size)
    }

    async fn register(&self, obj: &ObjectRef) -> bool {
        let input = AttachmentInput::from(obj);

        let result = self
            .share
            .write_attachment(&input)
            .await
            .and_then(|r| r.into_accepted(WRITE_ATTACHMENT));

        match result {
            Ok(result) => {
                info!(
                    "Successful upload of {} to Share node file storage (tx: {})",
                    obj.key,
                    result.tx_id().unwrap_or("-")
                );
                true
            }
            Err(err) => {
                error!(
                    "Could not write {} to Share node file storage: {err}",
                    obj.key
                );
                false
            }
        }
    }
}
