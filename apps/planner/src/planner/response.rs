//! Raw model text → JSON document, with one fallback pass for fenced output.
//!
//! The fallback trims backticks from both ends, then any run of the characters
//! `j`, `s`, `o`, `n` from both ends, then whitespace. It is a blunt heuristic:
//! a bare JSON string such as `"json"` loses its content under it. Clean objects and
//! arrays start and end with brackets, so they pass through unchanged.

use serde_json::Value;
use thiserror::Error;

/// Both parse attempts failed; carries the untouched model text.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct ParseFailure {
    pub reason: String,
    pub raw: String,
}

/// Which pass produced the document. Logged by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePass {
    Direct,
    Fallback,
}

/// Strips a markdown code fence and its `json` language tag from the edges.
pub fn strip_code_fence(text: &str) -> &str {
    text.trim_matches('`')
        .trim_matches(|c: char| matches!(c, 'j' | 's' | 'o' | 'n'))
        .trim()
}

/// Parses model output as JSON, retrying once on the fence-stripped text.
pub fn parse_model_json(raw: &str) -> Result<(Value, ParsePass), ParseFailure> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok((value, ParsePass::Direct)),
        Err(_) => serde_json::from_str(strip_code_fence(raw))
            .map(|value| (value, ParsePass::Fallback))
            .map_err(|e| ParseFailure {
                reason: e.to_string(),
                raw: raw.to_string(),
            }),
    }
}
