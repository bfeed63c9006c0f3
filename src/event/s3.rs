use super::{S3Event, S3EventRecord};
use crate::error::{Error, Result};
use crate::validate::{validated, FromValidate};

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Validates every entry up front. One malformed entry fails the batch.
pub fn object_refs(event: S3Event) -> Result<Vec<ObjectRef>> {
    event
        .records
        .into_iter()
        .map(|record| validated::<ObjectRef>(RawObjectRef::from(record)))
        .collect()
}

/// The parts of a notification record the relay needs, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RawObjectRef {
    #[validate(required, length(min = 1))]
    pub bucket: Option<String>,
    #[validate(required, length(min = 1))]
    pub key: Option<String>,
    #[validate(required, length(min = 1))]
    pub region: Option<String>,
}

impl From<S3EventRecord> for RawObjectRef {
    fn from(record: S3EventRecord) -> RawObjectRef {
        RawObjectRef {
            bucket: record.s3.bucket.name,
            key: record.s3.object.key,
            region: record.aws_region,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
    pub region: String,
}

impl ObjectRef {
    pub fn new<B, K, R>(bucket: B, key: K, region: R) -> Self
    where
        B: Into<String>,
        K: Into<String>,
        R: Into<String>,
    {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            region: region.into(),
        }
    }

    /// Last path segment of the key.
    pub fn file_name(&self) -> Result<&str> {
        self.key
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::invalid_event(format!("object key `{}` has no file name", self.key)))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

impl FromValidate for ObjectRef {
    type Validatable = RawObjectRef;

    fn from(value: RawObjectRef) -> Result<ObjectRef> {
        let bucket = value
            .bucket
            .ok_or_else(|| Error::invalid_event("`s3.bucket.name` is missing"))?;
        let key = value
            .key
            .ok_or_else(|| Error::invalid_event("`s3.object.key` is missing"))?;
        let region = value
            .region
            .ok_or_else(|| Error::invalid_event("`awsRegion` is missing"))?;

        Ok(ObjectRef::new(bucket, key, region))
    }
}
