//! Blob-store adapters.

pub mod fs;
pub mod s3;

/// Percent-encodes each segment of an object key, keeping `/` separators.
pub(crate) fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
