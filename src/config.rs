//! Configuration loaded from the environment (and `.env`).

use crate::error::{PipelineError, PipelineResult};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// What happens to the edited clip once the item has been uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// Delete the temporary edited file.
    Delete,
    /// Move the edited file to `root/<category>/<title>/` with a caption sidecar.
    Archive { root: PathBuf },
}

/// Settings for a batch run.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Glob pattern selecting source clips, e.g. `clipes/Cultura-mundial/*`
    pub source_pattern: String,
    /// JSON catalog of processed clips
    pub catalog_path: PathBuf,
    /// Remote folder prefix, concatenated verbatim with the object name
    pub remote_folder: String,
    /// Amount cut from the start of every clip
    pub trim_offset: Duration,
    pub cleanup: CleanupPolicy,
}

#[derive(Clone, Debug)]
pub struct S3StorageConfig {
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint_url: String,
    pub region: String,
    pub public_base_url: String,
}

#[derive(Clone, Debug)]
pub enum StorageConfig {
    S3(S3StorageConfig),
    Local {
        root: PathBuf,
        public_base_url: Option<String>,
    },
}

#[derive(Clone, Debug)]
pub struct CaptionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Loads `.env` into the process environment, if present.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

impl PipelineConfig {
    pub fn from_env() -> PipelineResult<Self> {
        let trim_secs: f64 = parse_var("TRIM_SECONDS", 1.5)?;
        let trim_offset = Duration::try_from_secs_f64(trim_secs)
            .map_err(|_| PipelineError::config(format!("TRIM_SECONDS must be >= 0, got {}", trim_secs)))?;

        let archive_root = PathBuf::from(var_or("ARCHIVE_ROOT", "clipes_editados"));
        let cleanup = CleanupPolicy::parse(&var_or("CLEANUP_POLICY", "delete"), archive_root)?;

        Ok(Self {
            source_pattern: var_or("SOURCE_PATTERN", "clipes/*/*"),
            catalog_path: PathBuf::from(var_or("CATALOG_PATH", "clipes_json/videos.json")),
            remote_folder: var_or("REMOTE_FOLDER", "lingobot-clipes/"),
            trim_offset,
            cleanup,
        })
    }
}

impl CleanupPolicy {
    pub fn parse(name: &str, archive_root: PathBuf) -> PipelineResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(CleanupPolicy::Delete),
            "archive" => Ok(CleanupPolicy::Archive { root: archive_root }),
            other => Err(PipelineError::config(format!(
                "unknown cleanup policy '{}', expected 'delete' or 'archive'",
                other
            ))),
        }
    }
}

impl StorageConfig {
    /// Fails when the selected backend is missing required settings.
    pub fn from_env() -> PipelineResult<Self> {
        match var_or("STORAGE_BACKEND", "s3").to_ascii_lowercase().as_str() {
            "s3" => {
                let endpoint_url = var_or("STORAGE_ENDPOINT", DEFAULT_STORAGE_ENDPOINT);
                Ok(StorageConfig::S3(S3StorageConfig {
                    bucket: required("STORAGE_BUCKET")?,
                    access_key_id: required("STORAGE_ACCESS_KEY_ID")?,
                    secret_access_key: required("STORAGE_SECRET_ACCESS_KEY")?,
                    region: var_or("STORAGE_REGION", "auto"),
                    public_base_url: var_or("STORAGE_PUBLIC_BASE_URL", &endpoint_url),
                    endpoint_url,
                }))
            }
            "local" => Ok(StorageConfig::Local {
                root: PathBuf::from(required("STORAGE_LOCAL_ROOT")?),
                public_base_url: optional("STORAGE_PUBLIC_BASE_URL"),
            }),
            other => Err(PipelineError::config(format!(
                "unknown STORAGE_BACKEND '{}', expected 's3' or 'local'",
                other
            ))),
        }
    }
}

impl CaptionConfig {
    pub fn from_env() -> PipelineResult<Self> {
        Ok(Self {
            api_key: required("GEMINI_API_KEY")?,
            model: var_or("GEMINI_MODEL", "gemini-1.5-flash"),
            base_url: var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_URL),
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn required(key: &str) -> PipelineResult<String> {
    optional(key).ok_or_else(|| PipelineError::config(format!("{} must be set", key)))
}

fn parse_var<T: FromStr>(key: &str, default: T) -> PipelineResult<T> {
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PipelineError::config(format!("{} has an invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cleanup_policy() {
        let root = PathBuf::from("clipes_editados");
        assert_eq!(
            CleanupPolicy::parse("delete", root.clone()).unwrap(),
            CleanupPolicy::Delete
        );
        assert_eq!(
            CleanupPolicy::parse(" Archive ", root.clone()).unwrap(),
            CleanupPolicy::Archive { root: root.clone() }
        );
        assert!(matches!(
            CleanupPolicy::parse("shred", root),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_missing_required_variable() {
        let err = required("CLIPBATCH_TEST_SURELY_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: CLIPBATCH_TEST_SURELY_UNSET_VARIABLE must be set"
        );
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: f64 = parse_var("CLIPBATCH_TEST_SURELY_UNSET_NUMBER", 1.5).unwrap();
        assert_eq!(value, 1.5);
    }
}
