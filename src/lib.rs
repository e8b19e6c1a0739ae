//! clipbatch - Batch clip publishing pipeline
//!
//! Trims short clips, publishes them to object storage, asks Gemini for a
//! caption and records the result in a JSON catalog.
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (catalog entries, work items, captions)
//! - ports/: Trait definitions for the external collaborators
//! - adapters/: Concrete implementations (ffmpeg, S3/local storage, Gemini, JSON catalog)
//! - application/: Discovery, stages and the batch orchestrator
//! - config: Environment configuration
//!
//! # Features
//! - `native-duration`: read clip durations through libav instead of `ffprobe`

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::catalog::CatalogStore;
pub use application::pipeline::BatchPipeline;
pub use config::{CaptionConfig, CleanupPolicy, PipelineConfig, StorageConfig};
pub use error::{PipelineError, StageError};
