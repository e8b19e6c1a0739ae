//! Application layer - Batch orchestration over the ports.

pub mod discover;
pub mod pipeline;
pub mod stages;
