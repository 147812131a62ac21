//! Log hygiene helpers shared by the executor and the lead service

use once_cell::sync::Lazy;
use regex::Regex;

static REDACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"Bearer [A-Za-z0-9\-_.]+", "Bearer [REDACTED]"),
        (r"(?i)api[_-]?key[=:]\s*[A-Za-z0-9\-_]+", "api_key=[REDACTED]"),
        (r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}", "[EMAIL]"),
        (r"(?:\+\d{1,3}[ .\-]?|\b0)[1-9](?:[ .\-]?\d{2}){4}\b", "[PHONE]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Mask bearer tokens, API keys, e-mail addresses and phone numbers
pub fn sanitize_for_logging(s: &str) -> String {
    REDACTIONS
        .iter()
        .fold(s.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Random identifier correlating the log lines of one call
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Cut `s` to at most `max_chars` characters, ending in `...` when shortened
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("équipement", 5), "éq...");
    }

    #[test]
    fn test_sanitize_for_logging() {
        let output = sanitize_for_logging("Authorization: Bearer abc123xyz");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("abc123xyz"));

        let output = sanitize_for_logging(r#"{"email":"jean.dupont@garage.fr","phone":"06 12 34 56 78"}"#);
        assert!(!output.contains("jean.dupont"));
        assert!(!output.contains("06 12 34 56 78"));
        assert!(output.contains("[EMAIL]"));
        assert!(output.contains("[PHONE]"));

        let output = sanitize_for_logging(r#"{"mobile":"+33 6 12 34 56 78","fixe":"01.42.00.00.00"}"#);
        assert_eq!(output, r#"{"mobile":"[PHONE]","fixe":"[PHONE]"}"#);
    }

    #[test]
    fn test_sanitize_keeps_identifiers() {
        let input = r#"{"siren":"798044129","supplierIds":["sup-001"],"ref":"1234567890123"}"#;
        assert_eq!(sanitize_for_logging(input), input);
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
