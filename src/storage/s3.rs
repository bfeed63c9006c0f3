use super::ObjectStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::ObjectRef;

use async_trait::async_trait;
use aws_sdk_s3::{config::Region, Client};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::from_env();
        if let Some(region) = config.aws_region() {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn download(&self, obj: &ObjectRef, dest: &Path) -> Result<u64> {
        let location = obj.to_string();

        let output = self
            .client
            .get_object()
            .bucket(&obj.bucket)
            .key(&obj.key)
            .send()
            .await
            .map_err(|err| Error::download(&location, err))?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| Error::download(&location, err))?
            .into_bytes();

        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|err| Error::download(&location, err))?;

        debug!("Wrote {} bytes of {location} to {}", bytes.len(), dest.display());
        Ok(bytes.len() as u64)
    }
}
