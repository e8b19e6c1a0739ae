use super::PortResult;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a local file under `key`, make it publicly readable and return
    /// its public URL.
    async fn publish(&self, local_path: &Path, key: &str) -> PortResult<String>;
}
