use crate::error::{StageError, StageResult};
use crate::ports::editor::VideoEditor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Produces the trimmed temporary clip for a work item.
pub struct EditStage<E> {
    editor: E,
    trim_offset: Duration,
}

impl<E: VideoEditor> EditStage<E> {
    pub fn new(editor: E, trim_offset: Duration) -> Self {
        Self {
            editor,
            trim_offset,
        }
    }

    /// Writes `source` minus the configured offset to `dest`. A failed edit
    /// leaves no partial file behind. An existing file at `dest` is never
    /// overwritten.
    pub async fn prepare(&self, source: &Path, dest: &Path) -> StageResult<PathBuf> {
        if !tokio::fs::try_exists(source).await.unwrap_or(false) {
            return Err(StageError::NotFound(source.to_path_buf()));
        }
        if tokio::fs::symlink_metadata(dest).await.is_ok() {
            return Err(StageError::OutputExists(dest.to_path_buf()));
        }

        info!(file = %source.display(), "Editing");
        match self.editor.trim(source, dest, self.trim_offset).await {
            Ok(()) => {
                info!(dest = %dest.display(), "Edit complete");
                Ok(dest.to_path_buf())
            }
            Err(e) => {
                if tokio::fs::try_exists(dest).await.unwrap_or(false) {
                    if let Err(rm) = tokio::fs::remove_file(dest).await {
                        warn!(dest = %dest.display(), "Could not remove partial output: {}", rm);
                    }
                }
                Err(StageError::Edit(e.to_string()))
            }
        }
    }
}
