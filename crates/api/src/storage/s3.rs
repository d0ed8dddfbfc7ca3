//! S3-backed object store.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use super::{check_key, ObjectStore, StorageError, CACHE_CONTROL};

/// Status S3 answers a conditional put with when the key is taken.
const PRECONDITION_FAILED: u16 = 412;

/// Stores objects in a single S3 bucket.
///
/// Puts are conditional (`If-None-Match: *`), so an existing object is never
/// replaced.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: &str) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .cache_control(CACHE_CONTROL)
            .if_none_match("*")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                if e.raw_response().map(|r| r.status().as_u16()) == Some(PRECONDITION_FAILED) {
                    StorageError::AlreadyExists(key.to_string())
                } else {
                    StorageError::Backend(DisplayErrorContext(e).to_string())
                }
            })?;

        tracing::debug!(bucket = %self.bucket, key, size, "Stored object in S3");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;

        // S3 reports success for keys that do not exist.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(e).to_string()))?;

        Ok(())
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}
