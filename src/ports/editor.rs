use super::PortResult;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoEditor: Send + Sync {
    /// Write `source` from `offset` to the end into `dest`, re-encoded with
    /// web-compatible codecs.
    async fn trim(&self, source: &Path, dest: &Path, offset: Duration) -> PortResult<()>;
}
