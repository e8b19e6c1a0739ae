use super::discover::discover;
use super::stages::{finish_item, EditStage, MetadataStage, UploadStage};
use crate::adapters::catalog::CatalogStore;
use crate::config::PipelineConfig;
use crate::domain::outcome::{ItemOutcome, RunReport};
use crate::domain::work_item::WorkItem;
use crate::error::PipelineResult;
use crate::ports::captioner::CaptionGenerator;
use crate::ports::editor::VideoEditor;
use crate::ports::storage::BlobStore;
use tracing::{error, info, warn};

/// Drives every new source clip through edit, upload, metadata and cleanup,
/// one item at a time.
pub struct BatchPipeline<E, S, G> {
    config: PipelineConfig,
    catalog: CatalogStore,
    edit: EditStage<E>,
    upload: UploadStage<S>,
    metadata: MetadataStage<G>,
}

impl<E, S, G> BatchPipeline<E, S, G>
where
    E: VideoEditor,
    S: BlobStore,
    G: CaptionGenerator,
{
    pub fn new(config: PipelineConfig, editor: E, store: S, captioner: G) -> Self {
        Self {
            catalog: CatalogStore::new(&config.catalog_path),
            edit: EditStage::new(editor, config.trim_offset),
            upload: UploadStage::new(store),
            metadata: MetadataStage::new(captioner),
            config,
        }
    }

    pub fn catalog(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    /// Runs one batch. Errors returned here are fatal (unreadable catalog,
    /// failed enumeration); per-item failures are reported in the `RunReport`.
    pub async fn run(&mut self) -> PipelineResult<RunReport> {
        info!("Starting batch");

        let mut processed = self.catalog.processed_filenames()?;
        info!(count = processed.len(), "Clips already catalogued");

        let sources = discover(&self.config.source_pattern)?;
        info!(
            count = sources.len(),
            pattern = %self.config.source_pattern,
            "Source clips found"
        );
        if sources.is_empty() {
            warn!(pattern = %self.config.source_pattern, "Nothing matches the source pattern");
        }

        let mut report = RunReport::default();
        for source in sources {
            let Some(item) = WorkItem::from_source(&source) else {
                warn!(file = %source.display(), "Skipping path without a UTF-8 filename");
                continue;
            };

            if processed.contains(&item.file_name) {
                info!(file = %item.file_name, "Skipping, already processed");
                report.push(source, ItemOutcome::Skipped);
                continue;
            }

            info!(file = %item.file_name, category = %item.category, "Processing new clip");
            let outcome = self.process_item(&item).await;
            if outcome.is_recorded() {
                processed.insert(item.file_name.clone());
            }
            report.push(source, outcome);
        }

        info!(
            recorded = report.recorded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Batch complete"
        );
        Ok(report)
    }

    async fn process_item(&mut self, item: &WorkItem) -> ItemOutcome {
        let edited = match self.edit.prepare(&item.source, &item.edited_path).await {
            Ok(path) => path,
            Err(e) => {
                error!(file = %item.file_name, "{}", e);
                return ItemOutcome::EditFailed(e.to_string());
            }
        };

        let published = self
            .upload
            .publish(&edited, &self.config.remote_folder, Some(&item.file_name))
            .await;

        let (outcome, description) = match published {
            Err(e) => {
                error!(file = %item.file_name, "{}", e);
                (ItemOutcome::UploadFailed(e.to_string()), None)
            }
            Ok(url) => {
                match self
                    .metadata
                    .describe_and_record(&mut self.catalog, &url, &item.file_name, &item.category)
                    .await
                {
                    Ok(description) => (
                        ItemOutcome::Recorded {
                            url,
                            description: description.clone(),
                        },
                        Some(description),
                    ),
                    Err(e) => {
                        error!(
                            file = %item.file_name,
                            url = %url,
                            "Uploaded but not catalogued: {}",
                            e
                        );
                        (
                            ItemOutcome::UploadedWithoutMetadata {
                                url,
                                reason: e.to_string(),
                            },
                            None,
                        )
                    }
                }
            }
        };

        if let Err(e) = finish_item(&self.config.cleanup, item, &edited, description.as_deref()).await {
            warn!(file = %item.file_name, "{}", e);
        }

        outcome
    }
}
