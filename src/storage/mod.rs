#[cfg(test)]
mod mock;
mod s3;

use crate::error::Result;
use crate::event::ObjectRef;

use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Copies the object to `dest` and returns the number of bytes written.
    async fn download(&self, obj: &ObjectRef, dest: &Path) -> Result<u64>;
}

#[cfg(test)]
pub use mock::MockStore;
pub use s3::S3Store;
