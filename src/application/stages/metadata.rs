use crate::adapters::catalog::CatalogStore;
use crate::domain::caption::{caption_prompt, clean_caption, phrase_from_filename};
use crate::domain::catalog::CatalogEntry;
use crate::error::{StageError, StageResult};
use crate::ports::captioner::CaptionGenerator;
use tracing::info;

/// Captions an uploaded clip and records it in the catalog.
pub struct MetadataStage<G> {
    captioner: G,
}

impl<G: CaptionGenerator> MetadataStage<G> {
    pub fn new(captioner: G) -> Self {
        Self { captioner }
    }

    pub async fn describe(&self, original_filename: &str) -> StageResult<String> {
        let phrase = phrase_from_filename(original_filename);
        info!(phrase = %phrase, "Generating description");

        let raw = self
            .captioner
            .generate(&caption_prompt(&phrase))
            .await
            .map_err(|e| StageError::Caption(e.to_string()))?;
        let description = clean_caption(&raw);
        if description.is_empty() {
            return Err(StageError::Caption("empty caption".to_string()));
        }
        Ok(description)
    }

    /// Returns the generated description once its entry is on disk.
    pub async fn describe_and_record(
        &self,
        catalog: &mut CatalogStore,
        url: &str,
        original_filename: &str,
        category: &str,
    ) -> StageResult<String> {
        let description = self.describe(original_filename).await?;
        info!(description = %description, "Description generated");

        catalog.append(CatalogEntry::new(url, description.clone(), category))?;
        info!(catalog = %catalog.path().display(), "Metadata saved");
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::captioner::MockCaptionGenerator;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_records_entry_with_generated_caption() {
        let dir = tempdir().unwrap();
        let mut catalog = CatalogStore::new(dir.path().join("videos.json"));

        let mut captioner = MockCaptionGenerator::new();
        captioner
            .expect_generate()
            .withf(|prompt| prompt.contains("'eating lunch'"))
            .times(1)
            .returning(|_| Ok("\"Lingobot is eating his lunch.\"".to_string()));

        let stage = MetadataStage::new(captioner);
        let description = stage
            .describe_and_record(
                &mut catalog,
                "https://cdn.test/b/lingobot-clipes/eating-lunch.mp4",
                "eating-lunch.mp4",
                "Viajando",
            )
            .await
            .unwrap();

        assert_eq!(description, "Lingobot is eating his lunch.");
        let entries = catalog.load().unwrap();
        assert_eq!(
            entries,
            &[CatalogEntry::new(
                "https://cdn.test/b/lingobot-clipes/eating-lunch.mp4",
                "Lingobot is eating his lunch.",
                "Viajando"
            )]
        );
    }

    #[tokio::test]
    async fn test_generation_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        let mut catalog = CatalogStore::new(&path);

        let mut captioner = MockCaptionGenerator::new();
        captioner
            .expect_generate()
            .returning(|_| Err("quota exceeded".into()));

        let stage = MetadataStage::new(captioner);
        let result = stage
            .describe_and_record(&mut catalog, "https://x/y/a.mp4", "a.mp4", "c")
            .await;
        assert!(matches!(result, Err(StageError::Caption(_))));
        assert!(!path.exists());
    }
}
