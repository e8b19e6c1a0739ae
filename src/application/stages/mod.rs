//! Pipeline stages. Each returns a `StageResult`; failures stay scoped to the
//! current work item.

pub mod archive;
pub mod edit;
pub mod metadata;
pub mod upload;

pub use archive::finish_item;
pub use edit::EditStage;
pub use metadata::MetadataStage;
pub use upload::UploadStage;
