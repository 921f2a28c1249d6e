//! Cleanup of display strings coming out of the ingestion pipeline.
//!
//! Uploaded images get a short hex token appended to their title (and
//! sometimes description) to keep them unique in storage. The token is noise
//! to a visitor and is removed before anything is shown.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing 6-8 hex digits, optionally preceded by one whitespace character.
static HEX_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s?[A-Fa-f0-9]{6,8}$").expect("hex suffix pattern is valid"));

/// Strip every trailing hex suffix from `text`.
///
/// Suffixes are removed repeatedly until none remains, trimming whitespace
/// between passes, so `clean_display_text(clean_display_text(s))` always
/// equals `clean_display_text(s)`.
pub fn clean_display_text(text: &str) -> String {
    let mut rest = text.trim();
    while let Some(m) = HEX_SUFFIX.find(rest) {
        rest = rest[..m.start()].trim_end();
    }
    rest.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_suffix_from_title() {
        assert_eq!(clean_display_text("Sunset Over Lake A1B2C3"), "Sunset Over Lake");
        assert_eq!(clean_display_text("Heron 9f8e7d6c"), "Heron");
        assert_eq!(clean_display_text("Heron9f8e7d"), "Heron");
    }

    #[test]
    fn test_keeps_clean_titles() {
        assert_eq!(clean_display_text("Morning Fog"), "Morning Fog");
        assert_eq!(clean_display_text("Trail 12345"), "Trail 12345");
        assert_eq!(clean_display_text(""), "");
    }

    #[test]
    fn test_strips_stacked_suffixes() {
        assert_eq!(clean_display_text("Harbor  abc123 DEF456"), "Harbor");
        assert_eq!(clean_display_text("  Dunes A1B2C3  "), "Dunes");
    }

    #[test]
    fn test_long_hex_run_leaves_prefix() {
        // Only the last 8 digits form a suffix; the remaining two are not one.
        assert_eq!(clean_display_text("Code A1B2C3D4E5"), "Code A1");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Sunset Over Lake A1B2C3",
            "Harbor  abc123 DEF456",
            "abcdef  ",
            "  x ffffff\t",
            "Code A1B2C3D4E5",
            "deadbeef",
            "Plain title",
            "\u{00a0}cafe12",
        ];
        for sample in samples {
            let once = clean_display_text(sample);
            assert_eq!(clean_display_text(&once), once, "input {:?}", sample);
        }
    }
}
