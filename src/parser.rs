//! Heuristic field parsing of analysis text.
//!
//! Model output has no fixed schema; the complexity parser is best-effort
//! section detection with layered fallbacks. Correctness here means never
//! dropping information: every field ends up populated, with the whole
//! text standing in for the explanation when no section boundary is found.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{AnalysisRecord, NOT_SPECIFIED};

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Time\s+Complexity\s*:?\s*([^\n]+)").expect("time pattern"));
static SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Space\s+Complexity\s*:?\s*([^\n]+)").expect("space pattern"));

/// Bytes skipped past the later complexity header before looking for the
/// newline that ends its value line. Approximates "past the complexity
/// value"; unusually long values can push the real boundary further out.
const HEADER_VALUE_SKIP: usize = 20;

/// Split analysis text into time/space/explanation fields.
///
/// The complexity fields fall back to [`NOT_SPECIFIED`], the explanation
/// to the entire text, so the returned record is always fully populated.
pub fn parse_complexity_analysis(text: &str, language: &str, code: &str) -> AnalysisRecord {
    let time_complexity = capture_value(&TIME_RE, text);
    let space_complexity = capture_value(&SPACE_RE, text);

    let explanation = match explanation_start(text) {
        Some(start) => {
            let section = text[start..].trim();
            if section.is_empty() {
                // A boundary that leaves nothing behind loses the answer;
                // keep the whole text instead.
                text.trim().to_string()
            } else {
                section.to_string()
            }
        }
        None => text.trim().to_string(),
    };

    AnalysisRecord {
        language: language.to_string(),
        code: code.to_string(),
        time_complexity,
        space_complexity,
        explanation,
        optimization_suggestions: None,
    }
}

/// Normalize optimization text: trim only. The model's own formatting is
/// presented verbatim.
pub fn parse_optimization_suggestions(text: &str) -> String {
    text.trim().to_string()
}

fn capture_value(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Byte offset where the explanation section begins, if a boundary can be
/// located.
///
/// Precedence: an explicit `Explanation` header (text starts after its
/// colon, or after its newline when no colon precedes one); otherwise the
/// line following the later of the two complexity headers; otherwise none.
fn explanation_start(text: &str) -> Option<usize> {
    if let Some(header) = text.find("Explanation") {
        let colon = find_byte(text, b':', header);
        let newline = find_byte(text, b'\n', header);

        match (colon, newline) {
            (Some(c), Some(n)) if c < n => return Some(c + 1),
            (Some(c), None) => return Some(c + 1),
            (_, Some(n)) => return Some(n + 1),
            (None, None) => {} // bare header at end of text, keep looking
        }
    }

    let time = text.find("Time Complexity");
    let space = text.find("Space Complexity");
    if let (Some(t), Some(s)) = (time, space) {
        let later = t.max(s);
        if let Some(n) = find_byte(text, b'\n', later + HEADER_VALUE_SKIP) {
            return Some(n + 1);
        }
    }

    None
}

/// First occurrence of an ASCII byte at or after `from`. Byte-wise so the
/// fixed skip offset cannot land this on a char-boundary fault.
fn find_byte(text: &str, byte: u8, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if from >= bytes.len() {
        return None;
    }
    bytes[from..].iter().position(|&b| b == byte).map(|i| from + i)
}
