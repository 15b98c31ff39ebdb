use std::io::Cursor;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use super::error::StorageError;
use super::key::validate_key;
use super::traits::{BoxReader, ObjectStore};

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct S3Config {
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint, e.g. `http://localhost:9000` for MinIO.
    pub endpoint: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    #[serde(default = "default_path_style")]
    pub path_style: bool,
}

fn default_region() -> String {
    "us-east-1".into()
}
fn default_path_style() -> bool {
    true
}

/// Object store backed by an S3-compatible bucket.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    max_size: u64,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config, max_size: u64) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket, max_size })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_stream(&self, key: &str, reader: BoxReader) -> Result<u64, StorageError> {
        let key = validate_key(key)?;

        // Read one byte past the limit so oversize objects are detected without
        // buffering them whole.
        let mut data = Vec::new();
        reader.take(self.max_size + 1).read_to_end(&mut data).await?;
        let size = data.len() as u64;
        if size > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: size,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket
            .put_object(key, &data)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        match response.status_code() {
            200..=299 => Ok(size),
            code => Err(StorageError::Backend(format!(
                "upload of {key} failed with status {code}"
            ))),
        }
    }

    async fn get_stream(&self, key: &str) -> Result<BoxReader, StorageError> {
        let key = validate_key(key)?;
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        match response.status_code() {
            200..=299 => Ok(Box::new(Cursor::new(response.bytes().to_vec()))),
            404 => Err(StorageError::NotFound(key.to_string())),
            code => Err(StorageError::Backend(format!(
                "download of {key} failed with status {code}"
            ))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let key = validate_key(key)?;
        let (_, code) = self
            .bucket
            .head_object(key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok((200..300).contains(&code))
    }
}
