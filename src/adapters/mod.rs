//! Adapters - Concrete implementations of ports.

pub mod catalog;
pub mod ffmpeg;
pub mod gemini;
pub mod storage;
