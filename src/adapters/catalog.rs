//! JSON catalog of processed clips.
//!
//! The catalog is a single JSON array on disk. It is read once per run and
//! cached; every append rewrites the whole document through a temporary file
//! in the same directory followed by a rename, so readers never observe a
//! truncated catalog.

use crate::domain::catalog::CatalogEntry;
use crate::error::CatalogError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stored elements as read from disk, plus their typed view. Rewrites start
/// from `raw`, so keys and values this crate does not model are preserved.
struct Loaded {
    raw: Vec<Value>,
    entries: Vec<CatalogEntry>,
}

pub struct CatalogStore {
    path: PathBuf,
    loaded: Option<Loaded>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn loaded(&mut self) -> Result<&mut Loaded, CatalogError> {
        let loaded = match self.loaded.take() {
            Some(loaded) => loaded,
            None => {
                let raw = read_values(&self.path)?;
                let entries = raw.iter().map(CatalogEntry::from_value).collect();
                debug!(path = %self.path.display(), count = raw.len(), "Catalog loaded");
                Loaded { raw, entries }
            }
        };
        Ok(self.loaded.insert(loaded))
    }

    /// All entries, in file order. A missing or empty file is an empty catalog;
    /// a non-empty file that is not a JSON array is an error.
    pub fn load(&mut self) -> Result<&[CatalogEntry], CatalogError> {
        Ok(&self.loaded()?.entries)
    }

    /// Filenames already accounted for, taken from each non-empty `video_url`.
    pub fn processed_filenames(&mut self) -> Result<HashSet<String>, CatalogError> {
        Ok(self
            .load()?
            .iter()
            .filter_map(CatalogEntry::processed_filename)
            .collect())
    }

    /// Appends one entry and rewrites the catalog file.
    pub fn append(&mut self, entry: CatalogEntry) -> Result<(), CatalogError> {
        let path = self.path.clone();
        let value = serde_json::to_value(&entry).map_err(|source| CatalogError::Serialize {
            path: path.clone(),
            source,
        })?;

        let loaded = self.loaded()?;
        let mut raw = loaded.raw.clone();
        raw.push(value);
        write_values(&path, &raw)?;

        loaded.raw = raw;
        loaded.entries.push(entry);
        Ok(())
    }
}

fn read_values(path: &Path) -> Result<Vec<Value>, CatalogError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_values(path: &Path, values: &[Value]) -> Result<(), CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    // Four-space indent; serde_json leaves non-ASCII characters unescaped.
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    values
        .serialize(&mut serializer)
        .map_err(|source| CatalogError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&buf).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|source| CatalogError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(url: &str) -> CatalogEntry {
        CatalogEntry::new(url, "Lingobot's making a pizza.", "Cozinha")
    }

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = tempdir().unwrap();
        let mut store = CatalogStore::new(dir.path().join("clipes_json/videos.json"));
        assert!(store.load().unwrap().is_empty());
        assert!(store.processed_filenames().unwrap().is_empty());
    }

    #[test]
    fn test_zero_length_catalog_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(&path, "").unwrap();
        let mut store = CatalogStore::new(&path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = CatalogStore::new(&path);
        assert!(matches!(store.load(), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clipes_json/videos.json");
        let mut store = CatalogStore::new(&path);
        store.append(entry("https://host/b/lingobot-clipes/clip_0.mp4")).unwrap();
        let before = store.load().unwrap().len();

        let new_entry = entry("https://host/b/lingobot-clipes/clip_1.mp4");
        store.append(new_entry.clone()).unwrap();

        // A fresh store reads what is on disk, not the cache.
        let mut reread = CatalogStore::new(&path);
        let entries = reread.load().unwrap();
        assert_eq!(entries.len(), before + 1);
        assert_eq!(entries.last(), Some(&new_entry));
    }

    #[test]
    fn test_processed_filenames_skip_empty_urls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(
            &path,
            r#"[
                {"video_url": "https://host/b/lingobot-clipes/clip_1.mp4", "video_description": "x", "category": "a"},
                {"video_url": "", "video_description": "y", "category": "a"}
            ]"#,
        )
        .unwrap();
        let mut store = CatalogStore::new(&path);
        let names = store.processed_filenames().unwrap();
        assert_eq!(names.len(), 1);
        assert!(names.contains("clip_1.mp4"));
        assert!(!names.contains("clip_2.mp4"));
    }

    #[test]
    fn test_written_catalog_is_indented_and_keeps_unicode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        let mut store = CatalogStore::new(&path);
        store
            .append(CatalogEntry::new("https://host/b/c.mp4", "Olá, Lingobot!", "Cultura-mundial"))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Olá, Lingobot!"));
        assert!(text.contains("\n        \"video_url\""));
        assert!(!dir
            .path()
            .read_dir()
            .unwrap()
            .any(|e| e.unwrap().file_name() != "videos.json"));
    }

    #[test]
    fn test_whitespace_only_catalog_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(&path, " \n\t\n").unwrap();
        let mut store = CatalogStore::new(&path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_non_array_catalog_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(&path, r#"{"video_url": "https://host/b/a.mp4"}"#).unwrap();
        let mut store = CatalogStore::new(&path);
        assert!(matches!(store.load(), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_null_and_missing_fields_load_leniently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(
            &path,
            r#"[
                {"video_url": "https://host/b/lingobot-clipes/clip_1.mp4", "video_description": null, "category": "a"},
                {"video_url": null},
                {"video_description": "no url at all"},
                {"video_url": 17, "category": ["x"]},
                "stray"
            ]"#,
        )
        .unwrap();
        let mut store = CatalogStore::new(&path);
        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].video_description, "");
        assert_eq!(entries[2].video_url, "");

        let names = store.processed_filenames().unwrap();
        assert_eq!(names, HashSet::from(["clip_1.mp4".to_string()]));
    }

    #[test]
    fn test_append_keeps_unknown_keys_and_original_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(
            &path,
            r#"[{"video_url": "https://host/b/clip_1.mp4", "video_description": null, "category": "a", "views": 42}]"#,
        )
        .unwrap();

        let mut store = CatalogStore::new(&path);
        store.append(entry("https://host/b/clip_2.mp4")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let written: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0]["views"], serde_json::json!(42));
        assert!(written[0]["video_description"].is_null());
        assert_eq!(written[1]["video_url"], "https://host/b/clip_2.mp4");
        assert_eq!(written[1]["category"], "Cozinha");
    }
}
