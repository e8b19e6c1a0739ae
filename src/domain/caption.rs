//! Caption prompt construction.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

static SEPARATORS: OnceLock<Regex> = OnceLock::new();

/// Turns a clip filename into a readable phrase: `eating-lunch.mp4` -> `eating lunch`.
///
/// Everything after the first dot is dropped, dashes and underscores become
/// single spaces.
pub fn phrase_from_filename(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);
    let stem = base.split('.').next().unwrap_or(base);

    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-_\s]+").unwrap());
    separators.replace_all(stem, " ").trim().to_string()
}

/// Prompt sent to the text-generation service for a given phrase.
pub fn caption_prompt(phrase: &str) -> String {
    format!(
        r#"Your task is to write a very short caption for a TikTok video.
The video shows a character named Lingobot. The audience is learning intermediate English.
Based on the filename '{phrase}', describe what Lingobot is doing in a simple, clear, and casual sentence.
The sentence should be around 5 to 7 words long. Use common contractions.

Example for filename 'making pizza': "Look! Lingobot's making a pizza."
Example for filename 'running in the park': "Lingobot is going for a run."
Example for filename 'programming': "He's focused on his coding.""#
    )
}

/// Strips whitespace and wrapping quotes the model sometimes adds.
pub fn clean_caption(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_from_dashed_filename() {
        assert_eq!(phrase_from_filename("eating-lunch.mp4"), "eating lunch");
    }

    #[test]
    fn test_phrase_keeps_only_first_dot_segment() {
        assert_eq!(phrase_from_filename("clipes/x/going_to--school.v2.mp4"), "going to school");
    }

    #[test]
    fn test_prompt_embeds_phrase() {
        let prompt = caption_prompt("making pizza");
        assert!(prompt.contains("Based on the filename 'making pizza'"));
        assert!(prompt.contains("5 to 7 words"));
    }

    #[test]
    fn test_clean_caption() {
        assert_eq!(clean_caption("  \"Lingobot is eating his lunch.\"\n"), "Lingobot is eating his lunch.");
    }
}
