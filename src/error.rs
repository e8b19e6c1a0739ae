//! Error taxonomy for the batch pipeline.
//!
//! `PipelineError` aborts the whole run. `StageError` is scoped to a single
//! work item: the orchestrator logs it and moves on to the next file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while setting up or enumerating a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to enumerate '{pattern}': {source}")]
    Discovery {
        pattern: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid source pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Storage setup failed: {0}")]
    Storage(String),
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Errors raised by the JSON catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error on catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Catalog {path} is not a valid entry list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize catalog {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to replace catalog {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Recoverable, per-item stage failures.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Edited output already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Edit failed: {0}")]
    Edit(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Caption generation failed: {0}")]
    Caption(String),

    #[error("Failed to record catalog entry: {0}")]
    Record(#[from] CatalogError),

    #[error("Archive failed: {0}")]
    Archive(#[source] io::Error),

    #[error("Cleanup failed: {0}")]
    Cleanup(#[source] io::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
pub type StageResult<T> = Result<T, StageError>;
