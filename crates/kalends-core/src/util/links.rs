//! Link extraction for event descriptions.
//!
//! ## Summary
//! Finds URL-like substrings in free text and recognises the ones that point
//! at a video conferencing provider.

use std::sync::LazyLock;

use regex::Regex;

/// Regex for extracting URLs from text.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'\)\]]+"#).expect("Invalid URL regex"));

/// Substrings identifying conferencing providers, matched against the
/// lowercase form of a URL.
pub const CONFERENCE_MARKERS: &[&str] = &[
    "zoom",
    "meet",
    "teams",
    "skype",
    "webex",
    "whereby",
    "gotomeeting",
    "jitsi",
    "bluejeans",
    "chime",
];

/// Extracts all URLs from the given text, in order of appearance.
///
/// Trailing sentence punctuation is not part of the returned URL.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string())
        .collect()
}

/// Returns whether the URL belongs to a known conferencing provider.
#[must_use]
pub fn is_conference_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    CONFERENCE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Returns the first conferencing URL found in the text.
#[must_use]
pub fn find_conference_url(text: &str) -> Option<String> {
    extract_urls(text)
        .into_iter()
        .find(|url| is_conference_url(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_order() {
        let text = "Agenda at https://example.com/agenda, then join https://zoom.us/j/123.";
        assert_eq!(
            extract_urls(text),
            vec!["https://example.com/agenda", "https://zoom.us/j/123"]
        );
    }

    #[test]
    fn ignores_plain_text() {
        assert!(extract_urls("no links here, just text").is_empty());
    }

    #[test]
    fn stops_at_delimiters() {
        let text = "<https://meet.google.com/abc-defg-hij> (http://example.org/x)";
        assert_eq!(
            extract_urls(text),
            vec!["https://meet.google.com/abc-defg-hij", "http://example.org/x"]
        );
    }

    #[test]
    fn conference_detection_is_case_insensitive() {
        assert!(is_conference_url("https://Teams.Microsoft.com/l/meetup-join/1"));
        assert!(is_conference_url("https://us02web.ZOOM.us/j/1"));
        assert!(!is_conference_url("https://example.com/docs"));
    }

    #[test]
    fn first_conference_url_wins() {
        let text = "Docs: https://example.com/docs\nJoin: https://meet.google.com/x\nBackup: https://zoom.us/j/9";
        assert_eq!(
            find_conference_url(text).as_deref(),
            Some("https://meet.google.com/x")
        );
        assert_eq!(find_conference_url("https://example.com"), None);
    }
}
