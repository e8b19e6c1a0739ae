//! Ports - Trait definitions for the external collaborators.

use std::error::Error;

pub mod captioner;
pub mod editor;
pub mod storage;

pub type PortResult<T> = Result<T, Box<dyn Error + Send + Sync>>;
