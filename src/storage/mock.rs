use super::ObjectStore;
use crate::error::{Error, Result};
use crate::event::ObjectRef;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Bucket contents keyed by `s3://bucket/key`.
#[derive(Debug, Default)]
pub struct MockStore {
    objects: HashMap<String, Vec<u8>>,
    downloads: Mutex<Vec<PathBuf>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object<B: AsRef<[u8]>>(mut self, obj: &ObjectRef, body: B) -> Self {
        self.objects.insert(obj.to_string(), body.as_ref().to_vec());
        self
    }

    pub fn downloads(&self) -> Vec<PathBuf> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn download(&self, obj: &ObjectRef, dest: &Path) -> Result<u64> {
        let location = obj.to_string();
        let body = self
            .objects
            .get(&location)
            .ok_or_else(|| Error::download(&location, anyhow::anyhow!("NoSuchKey")))?;

        tokio::fs::write(dest, body)
            .await
            .map_err(|err| Error::download(&location, err))?;
        self.downloads.lock().unwrap().push(dest.to_path_buf());

        Ok(body.len() as u64)
    }
}
