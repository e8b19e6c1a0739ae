//! Source enumeration from a glob pattern.
//!
//! Wildcards match within a single path component and, like shell globs, do
//! not match names starting with a dot unless the pattern component does.

use crate::error::{PipelineError, PipelineResult};
use glob::MatchOptions;
use std::path::PathBuf;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Files matching `pattern`, sorted by path. A missing directory yields no
/// matches; an unreadable one is fatal.
pub fn discover(pattern: &str) -> PipelineResult<Vec<PathBuf>> {
    let paths =
        glob::glob_with(pattern, MATCH_OPTIONS).map_err(|source| PipelineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(|e| PipelineError::Discovery {
            pattern: pattern.to_string(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
