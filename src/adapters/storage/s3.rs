use super::encode_key;
use crate::config::S3StorageConfig;
use crate::ports::storage::BlobStore;
use crate::ports::PortResult;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use std::path::Path;
use tracing::{debug, info};

/// S3Adapter implements BlobStore for any S3-compatible bucket, including the
/// Cloud Storage interoperability endpoint behind Firebase Storage.
#[derive(Clone)]
pub struct S3Adapter {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Adapter {
    pub fn new(client: Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }

    /// Builds the client session from explicit configuration.
    pub fn from_config(config: &S3StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "clipbatch",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self::new(
            Client::from_conf(sdk_config),
            config.bucket.clone(),
            config.public_base_url.clone(),
        )
    }

    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            self.bucket,
            encode_key(key)
        )
    }
}

#[async_trait]
impl BlobStore for S3Adapter {
    async fn publish(&self, local_path: &Path, key: &str) -> PortResult<String> {
        debug!(file = %local_path.display(), key, "Uploading");
        let body = ByteStream::from_path(local_path).await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type_for(local_path))
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| format!("put_object {}: {}", key, DisplayErrorContext(&e)))?;

        let url = self.public_url(key);
        info!(key, url = %url, "Upload complete");
        Ok(url)
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        _ => "application/octet-stream",
    }
}
