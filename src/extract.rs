//! Response text extraction.
//!
//! The generativelanguage API wraps the model answer in a nested JSON
//! envelope (`candidates[].content.parts[].text`), and the body is not
//! guaranteed to be well-formed across API versions. Extraction therefore
//! never runs a full JSON parse; it recovers the `"text"` string values
//! directly from the raw body with two strategies:
//!
//! 1. A regex scan over every `"text"` key, concatenating all fragments
//!    in document order.
//! 2. A structural walk (candidates → content → parts → text) used only
//!    when the scan yields nothing.
//!
//! Every failure path resolves to a typed [`ExtractError`]; nothing
//! panics or escapes this boundary.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

/// A `"text"` key with a quoted value. The value span tolerates escaped
/// quotes and backslashes (two-level escape scanning).
static TEXT_FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""text":\s*"((?:\\.|[^\\"])*?)""#).expect("text fragment pattern"));

/// Extraction failure outcomes.
///
/// The `Display` strings double as the user-facing result text: a missing
/// answer is an expected outcome of a non-guaranteed API shape, not a
/// process error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Neither strategy located any text content.
    #[error("Failed to extract text from API response. Response format might have changed.")]
    NotFound,

    /// The response carried structure that broke mid-way. Includes a
    /// bounded prefix of the raw body for debugging.
    #[error("Error processing API response: {reason}\nResponse received: {preview}...")]
    Malformed { reason: String, preview: String },
}

impl ExtractError {
    fn malformed(reason: &str, response: &str) -> Self {
        ExtractError::Malformed {
            reason: reason.to_string(),
            preview: preview(response),
        }
    }
}

/// First 100 characters of the raw response, for diagnostics.
fn preview(response: &str) -> String {
    response.chars().take(100).collect()
}

/// Recover the model answer embedded in a raw response body.
///
/// Returns the concatenation of all unescaped text fragments in document
/// order. An empty concatenation counts as failure and falls through to
/// the structural walk.
pub fn extract_text(response: &str) -> Result<String, ExtractError> {
    let mut result = String::new();
    let mut fragments = 0usize;

    for caps in TEXT_FRAGMENT_RE.captures_iter(response) {
        if let Some(m) = caps.get(1) {
            result.push_str(&unescape(m.as_str()));
            fragments += 1;
        }
    }

    if !result.is_empty() {
        trace!(fragments, "extracted text via fragment scan");
        return Ok(result);
    }

    debug!("fragment scan found nothing, falling back to structural walk");
    extract_structural(response)
}

/// Fallback: walk the expected envelope keys in order and capture the
/// first text value by hand.
fn extract_structural(response: &str) -> Result<String, ExtractError> {
    let candidates = response.find("\"candidates\"").ok_or(ExtractError::NotFound)?;
    let content = find_from(response, "\"content\"", candidates).ok_or(ExtractError::NotFound)?;
    let parts = find_from(response, "\"parts\"", content).ok_or(ExtractError::NotFound)?;
    let text_key = find_from(response, "\"text\"", parts).ok_or(ExtractError::NotFound)?;

    let colon = find_byte(response, b':', text_key + "\"text\"".len())
        .ok_or_else(|| ExtractError::malformed("missing ':' after \"text\" key", response))?;
    let open = find_byte(response, b'"', colon + 1)
        .ok_or_else(|| ExtractError::malformed("missing opening quote for text value", response))?;

    let value_start = open + 1;
    let value_end = closing_quote(response, value_start).ok_or(ExtractError::NotFound)?;
    let raw = response
        .get(value_start..value_end)
        .ok_or_else(|| ExtractError::malformed("text value span out of bounds", response))?;

    if raw.is_empty() {
        return Err(ExtractError::NotFound);
    }

    trace!(len = raw.len(), "extracted text via structural walk");
    Ok(unescape(raw))
}

/// Substring search starting at a byte offset.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| from + i)
}

/// First occurrence of an ASCII byte at or after `from`. Byte-wise so an
/// offset landing inside a multi-byte character cannot fault.
fn find_byte(haystack: &str, byte: u8, from: usize) -> Option<usize> {
    let bytes = haystack.as_bytes();
    if from >= bytes.len() {
        return None;
    }
    bytes[from..].iter().position(|&b| b == byte).map(|i| from + i)
}

/// Position of the terminating quote of a string value starting at
/// `start`. A backslash escapes exactly the next character.
fn closing_quote(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Resolve JSON string escapes in a single pass.
///
/// `\\` is checked before the other sequences so a literal backslash
/// followed by `n` is never re-read as a newline escape. Unrecognized
/// escapes are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(text: &str) -> String {
        format!(r#"{{"candidates":[{{"content":{{"parts":[{{"text":"{}"}}]}}}}]}}"#, text)
    }

    #[test]
    fn extracts_simple_text() {
        let response = envelope("Hello world");
        assert_eq!(extract_text(&response).unwrap(), "Hello world");
    }

    #[test]
    fn unescapes_newlines_and_tabs() {
        let response = envelope(r"Line one\nLine two\tindented");
        assert_eq!(extract_text(&response).unwrap(), "Line one\nLine two\tindented");
    }

    #[test]
    fn round_trips_escaped_quotes_and_backslashes() {
        let response = envelope(r#"He said \"hi\" and used C:\\path"#);
        assert_eq!(extract_text(&response).unwrap(), "He said \"hi\" and used C:\\path");
    }

    #[test]
    fn escaped_backslash_before_n_stays_literal() {
        // \\n in the body is an escaped backslash followed by a plain 'n',
        // not a newline.
        let response = envelope(r"a\\nb");
        assert_eq!(extract_text(&response).unwrap(), "a\\nb");
    }

    #[test]
    fn unknown_escape_kept_verbatim() {
        let response = envelope(r"weird \q escape");
        assert_eq!(extract_text(&response).unwrap(), "weird \\q escape");
    }

    #[test]
    fn concatenates_multiple_fragments_in_order() {
        let response =
            r#"{"candidates":[{"content":{"parts":[{"text":"first "},{"text":"second"}]}}]}"#;
        assert_eq!(extract_text(response).unwrap(), "first second");
    }

    #[test]
    fn carriage_returns_unescaped() {
        let response = envelope(r"a\r\nb");
        assert_eq!(extract_text(&response).unwrap(), "a\r\nb");
    }

    #[test]
    fn missing_text_key_is_not_found() {
        let response = r#"{"error":{"code":429,"message":"quota exceeded"}}"#;
        assert_eq!(extract_text(response), Err(ExtractError::NotFound));
    }

    #[test]
    fn empty_response_is_not_found() {
        assert_eq!(extract_text(""), Err(ExtractError::NotFound));
    }

    #[test]
    fn empty_text_value_is_not_found() {
        // An empty answer is a failure outcome, not a silent success.
        let response = envelope("");
        assert_eq!(extract_text(&response), Err(ExtractError::NotFound));
    }

    #[test]
    fn structural_walk_handles_space_before_colon() {
        // The fragment scan requires the colon right after the key; the
        // structural walk tolerates this shape.
        let response = r#"{"candidates":[{"content":{"parts":[{"text" : "hello"}]}}]}"#;
        assert_eq!(extract_text(response).unwrap(), "hello");
    }

    #[test]
    fn structural_walk_unescapes() {
        let response = r#"{"candidates":[{"content":{"parts":[{"text" : "say \"hi\"\nnow"}]}}]}"#;
        assert_eq!(extract_text(response).unwrap(), "say \"hi\"\nnow");
    }

    #[test]
    fn structural_walk_requires_candidates() {
        let response = r#"{"results":[{"content":{"parts":[{"text" : "hi"}]}}]}"#;
        assert_eq!(extract_text(response), Err(ExtractError::NotFound));
    }

    #[test]
    fn structural_walk_requires_key_order() {
        // "content" appears before "candidates", so the walk cannot chain.
        let response = r#"{"content":{"parts":[{"text" : "hi"}]},"candidates":[]}"#;
        assert_eq!(extract_text(response), Err(ExtractError::NotFound));
    }

    #[test]
    fn unterminated_value_is_not_found() {
        let response = r#"{"candidates":[{"content":{"parts":[{"text" : "never ends"#;
        assert_eq!(extract_text(response), Err(ExtractError::NotFound));
    }

    #[test]
    fn broken_structure_is_malformed() {
        let response = r#"{"candidates":[{"content":{"parts":[{"text"}]}}]}"#;
        match extract_text(response) {
            Err(ExtractError::Malformed { reason, .. }) => {
                assert!(reason.contains("':'"));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn malformed_preview_is_bounded() {
        let padding = "x".repeat(300);
        let response = format!(
            r#"{{"pad":"{}","candidates":[{{"content":{{"parts":[{{"text"}}]}}}}]}}"#,
            padding
        );
        match extract_text(&response) {
            Err(ExtractError::Malformed { preview, .. }) => {
                assert_eq!(preview.chars().count(), 100);
                assert!(response.starts_with(&preview));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn malformed_message_embeds_preview() {
        let response = r#"{"candidates":[{"content":{"parts":[{"text"}]}}]}"#;
        let err = extract_text(response).unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("Error processing API response:"));
        assert!(message.contains("Response received:"));
        assert!(message.ends_with("..."));
    }

    #[test]
    fn not_found_has_fixed_message() {
        assert_eq!(
            ExtractError::NotFound.to_string(),
            "Failed to extract text from API response. Response format might have changed."
        );
    }

    #[test]
    fn multibyte_content_survives() {
        let response = envelope(r"複雑さは O(n²) です\n終わり");
        assert_eq!(extract_text(&response).unwrap(), "複雑さは O(n²) です\n終わり");
    }
}
