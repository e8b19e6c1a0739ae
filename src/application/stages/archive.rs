use crate::config::CleanupPolicy;
use crate::domain::work_item::WorkItem;
use crate::error::{StageError, StageResult};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Applies the cleanup policy to the edited clip of a finished item.
pub async fn finish_item(
    policy: &CleanupPolicy,
    item: &WorkItem,
    edited: &Path,
    description: Option<&str>,
) -> StageResult<()> {
    match policy {
        CleanupPolicy::Delete => {
            fs::remove_file(edited).await.map_err(StageError::Cleanup)?;
            info!(file = %edited.display(), "Temporary file removed");
            Ok(())
        }
        CleanupPolicy::Archive { root } => archive(root, item, edited, description)
            .await
            .map_err(StageError::Archive),
    }
}

async fn archive(
    root: &Path,
    item: &WorkItem,
    edited: &Path,
    description: Option<&str>,
) -> std::io::Result<()> {
    let dir = item.archive_dir(root);
    fs::create_dir_all(&dir).await?;

    let target = item.archived_media_path(root);
    move_file(edited, &target).await?;
    info!(file = %target.display(), "Edited clip archived");

    if let Some(description) = description.filter(|d| !d.is_empty()) {
        let sidecar = item.description_path(root);
        fs::write(&sidecar, description).await?;
        info!(file = %sidecar.display(), "Description saved");
    }
    Ok(())
}

/// Rename, falling back to copy + remove when the archive root sits on
/// another filesystem.
async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            warn!(from = %from.display(), "Rename failed ({}), copying instead", rename_err);
            fs::copy(from, to).await?;
            fs::remove_file(from).await
        }
    }
}
