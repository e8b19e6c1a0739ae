use serde::Serialize;
use serde_json::Value;

/// One processed clip, as persisted in the JSON catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub video_url: String,
    pub video_description: String,
    pub category: String,
}

impl CatalogEntry {
    pub fn new(
        video_url: impl Into<String>,
        video_description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            video_url: video_url.into(),
            video_description: video_description.into(),
            category: category.into(),
        }
    }

    /// Typed view of a stored catalog element. Missing, null or non-string
    /// fields read as empty strings; non-object elements read as empty entries.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            video_url: field("video_url"),
            video_description: field("video_description"),
            category: field("category"),
        }
    }

    /// Filename this entry accounts for, taken from the last segment of its URL.
    pub fn processed_filename(&self) -> Option<String> {
        filename_from_url(&self.video_url)
    }
}

/// Last path segment of a public URL, percent-decoded.
///
/// Query strings and fragments are ignored. Returns `None` for empty URLs or
/// URLs ending in a separator.
pub fn filename_from_url(url: &str) -> Option<String> {
    let url = url.trim();
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(segment)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}
