//! Small helpers shared by the normalizers.
//!
//! - String truncation for log lines and error excerpts
//! - JSON error classification for detecting truncated payloads
//! - API key redaction for URLs that end up in logs and errors

use url::Url;

/// Query parameters whose values never appear in logs or errors.
pub const SECRET_PARAMS: &[&str] = &["key"];

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to the nearest
/// character boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// A forecast body cut short by the transport fails with an EOF error
/// rather than a syntax error; the distinction only matters for logging.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Replace the value of every secret query parameter in `url` with `REDACTED`.
///
/// A string that does not parse as a URL is kept only if it has no query
/// part; otherwise it is replaced by `<unparseable url>`.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return if url.contains('?') {
            "<unparseable url>".to_string()
        } else {
            url.to_string()
        };
    };
    if parsed.query().is_none() {
        return parsed.to_string();
    }
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET_PARAMS.contains(&k.as_ref()) {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        // "°" is two bytes; cutting at 2 would split the first one
        let s = "2°3°4°";
        assert_eq!(truncate_for_log(s, 2), "2…(+8 bytes)");
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"{"field": "value"#;
        let err = serde_json::from_str::<serde_json::Value>(json_eof).unwrap_err();
        assert!(looks_truncated(&err));

        let json_syntax = r#"{"field" "value"}"#;
        let err = serde_json::from_str::<serde_json::Value>(json_syntax).unwrap_err();
        assert!(!looks_truncated(&err));
    }

    #[test]
    fn test_redact_url_hides_key() {
        let url = "https://api.apixu.com/v1/forecast.json?key=SECRET&q=New%20York&days=10";
        let redacted = redact_url(url);
        assert!(!redacted.contains("SECRET"));
        assert!(redacted.contains("key=REDACTED"));
        assert!(redacted.contains("q=New+York"));
        assert!(redacted.contains("days=10"));
    }

    #[test]
    fn test_redact_url_without_key_or_query() {
        assert_eq!(
            redact_url("https://www.google.com/search?q=Yokohama%20weather&hl=en"),
            "https://www.google.com/search?q=Yokohama+weather&hl=en"
        );
        assert_eq!(redact_url("https://example.com/a"), "https://example.com/a");
        assert_eq!(redact_url("<client>"), "<client>");
        assert_eq!(redact_url("not a url?key=SECRET"), "<unparseable url>");
    }
}
