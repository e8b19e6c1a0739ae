use std::path::{Path, PathBuf};

const DEFAULT_CATEGORY: &str = "uncategorized";

/// One source clip and the paths derived from it for a single pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub source: PathBuf,
    /// Base filename of the source; also the remote object name.
    pub file_name: String,
    /// File stem, used as the archive title.
    pub title: String,
    /// Parent directory name of the source.
    pub category: String,
    /// Sibling path where the trimmed clip is written.
    pub edited_path: PathBuf,
}

impl WorkItem {
    /// Derives a work item from a source path. Returns `None` for paths without
    /// a UTF-8 filename.
    pub fn from_source(source: impl Into<PathBuf>) -> Option<Self> {
        let source = source.into();
        let file_name = source.file_name()?.to_str()?.to_string();
        let title = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&file_name)
            .to_string();
        let category = source
            .parent()
            .and_then(|parent| parent.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        let edited_name = match source.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{}_edited.{}", title, ext),
            None => format!("{}_edited", title),
        };
        let edited_path = source.with_file_name(edited_name);

        Some(Self {
            source,
            file_name,
            title,
            category,
            edited_path,
        })
    }

    /// `root/<category>/<title>/`
    pub fn archive_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.category).join(&self.title)
    }

    /// Final location of the edited clip under the archive root.
    pub fn archived_media_path(&self, root: &Path) -> PathBuf {
        let edited_name = self
            .edited_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.file_name));
        self.archive_dir(root).join(edited_name)
    }

    /// `root/<category>/<title>/<title>_description.txt`
    pub fn description_path(&self, root: &Path) -> PathBuf {
        self.archive_dir(root)
            .join(format!("{}_description.txt", self.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_paths_from_source() {
        let item = WorkItem::from_source("clipes/Viajando/eating-lunch.mp4").unwrap();
        assert_eq!(item.file_name, "eating-lunch.mp4");
        assert_eq!(item.title, "eating-lunch");
        assert_eq!(item.category, "Viajando");
        assert_eq!(
            item.edited_path,
            PathBuf::from("clipes/Viajando/eating-lunch_edited.mp4")
        );
    }

    #[test]
    fn test_archive_layout() {
        let item = WorkItem::from_source("clipes/Viajando/eating-lunch.mp4").unwrap();
        let root = Path::new("clipes_editados");
        assert_eq!(
            item.archived_media_path(root),
            PathBuf::from("clipes_editados/Viajando/eating-lunch/eating-lunch_edited.mp4")
        );
        assert_eq!(
            item.description_path(root),
            PathBuf::from("clipes_editados/Viajando/eating-lunch/eating-lunch_description.txt")
        );
    }

    #[test]
    fn test_source_without_parent_or_extension() {
        let item = WorkItem::from_source("intro").unwrap();
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.edited_path, PathBuf::from("intro_edited"));
    }
}
