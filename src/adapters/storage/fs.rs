use super::encode_key;
use crate::ports::storage::BlobStore;
use crate::ports::PortResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// A local directory standing in for a bucket. Published files are copied
/// under `root/<key>` and addressed as `<base_url>/<key>`.
#[derive(Clone, Debug)]
pub struct FsAdapter {
    root: PathBuf,
    base_url: String,
}

impl FsAdapter {
    pub fn new(root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        let root = root.into();
        let base_url = base_url.unwrap_or_else(|| {
            let absolute = std::path::absolute(&root).unwrap_or_else(|_| root.clone());
            format!("file://{}", absolute.display())
        });
        Self { root, base_url }
    }
}

#[async_trait]
impl BlobStore for FsAdapter {
    async fn publish(&self, local_path: &Path, key: &str) -> PortResult<String> {
        let dest = self.root.join(key);
        if dest != local_path {
            if let Some(parent) = dest.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::copy(local_path, &dest).await?;
        }

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), encode_key(key));
        info!(file = %local_path.display(), url = %url, "Published to local store");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_publish_copies_under_key() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("clip_edited.mp4");
        std::fs::write(&source, b"video").unwrap();

        let store = FsAdapter::new(
            dir.path().join("bucket"),
            Some("http://localhost:9000/bucket/".to_string()),
        );
        let url = store
            .publish(&source, "lingobot-clipes/clip 1.mp4")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:9000/bucket/lingobot-clipes/clip%201.mp4");
        let copied = dir.path().join("bucket/lingobot-clipes/clip 1.mp4");
        assert_eq!(std::fs::read(copied).unwrap(), b"video");
    }

    #[tokio::test]
    async fn test_publish_missing_file_fails() {
        let dir = tempdir().unwrap();
        let store = FsAdapter::new(dir.path().join("bucket"), None);
        let result = store.publish(&dir.path().join("nope.mp4"), "x/nope.mp4").await;
        assert!(result.is_err());
    }
}
