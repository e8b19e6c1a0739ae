use std::path::PathBuf;

/// What happened to a single work item during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Filename already present in the catalog.
    Skipped,
    /// The edit stage failed; nothing was uploaded.
    EditFailed(String),
    /// The clip was edited but could not be published.
    UploadFailed(String),
    /// Uploaded, captioned and recorded in the catalog.
    Recorded { url: String, description: String },
    /// Uploaded, but no catalog entry could be written. The remote object is
    /// orphaned until the entry is added by hand.
    UploadedWithoutMetadata { url: String, reason: String },
}

impl ItemOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, ItemOutcome::Recorded { .. })
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, ItemOutcome::Recorded { .. } | ItemOutcome::Skipped)
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub items: Vec<(PathBuf, ItemOutcome)>,
}

impl RunReport {
    pub fn push(&mut self, source: PathBuf, outcome: ItemOutcome) {
        self.items.push((source, outcome));
    }

    pub fn recorded(&self) -> usize {
        self.items.iter().filter(|(_, o)| o.is_recorded()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, o)| matches!(o, ItemOutcome::Skipped))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|(_, o)| o.is_failure()).count()
    }

    pub fn outcome_for(&self, source: &std::path::Path) -> Option<&ItemOutcome> {
        self.items
            .iter()
            .find(|(path, _)| path == source)
            .map(|(_, outcome)| outcome)
    }
}
