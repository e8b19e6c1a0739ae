use crate::error::{StageError, StageResult};
use crate::ports::storage::BlobStore;
use std::path::Path;
use tracing::info;

/// Publishes edited clips to the blob store.
pub struct UploadStage<S> {
    store: S,
}

impl<S: BlobStore> UploadStage<S> {
    /// `store` must already be configured; building it is the fatal setup step.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// `remote_folder + (remote_name or basename(local_path))`, concatenated
    /// as-is.
    pub fn remote_key(local_path: &Path, remote_folder: &str, remote_name: Option<&str>) -> String {
        let name = match remote_name {
            Some(name) => name.to_string(),
            None => local_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        format!("{}{}", remote_folder, name)
    }

    pub async fn publish(
        &self,
        local_path: &Path,
        remote_folder: &str,
        remote_name: Option<&str>,
    ) -> StageResult<String> {
        if !tokio::fs::try_exists(local_path).await.unwrap_or(false) {
            return Err(StageError::NotFound(local_path.to_path_buf()));
        }

        let key = Self::remote_key(local_path, remote_folder, remote_name);
        info!(file = %local_path.display(), key = %key, "Uploading");
        self.store
            .publish(local_path, &key)
            .await
            .map_err(|e| StageError::Upload(e.to_string()))
    }
}
