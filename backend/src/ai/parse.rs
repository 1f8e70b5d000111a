//! Extraction of JSON payloads from model replies
//!
//! Models wrap JSON in prose or code fences. The first span opening with
//! `{` or `[` (whichever comes first) running greedily to the last matching
//! closer is taken as the payload.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

static OBJECT_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("object regex is valid"));
static ARRAY_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("array regex is valid"));

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reply contains no JSON")]
    NoJson,
    #[error("reply JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("reply JSON failed validation: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// First JSON-looking span of `text`
pub fn extract_json_span(text: &str) -> Option<&str> {
    let object = OBJECT_SPAN.find(text);
    let array = ARRAY_SPAN.find(text);

    let span = match (object, array) {
        (Some(o), Some(a)) => {
            if a.start() < o.start() {
                a
            } else {
                o
            }
        }
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    Some(span.as_str())
}

/// Extract, deserialize and validate a payload
pub fn parse_payload<T>(text: &str) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let span = extract_json_span(text).ok_or(ParseError::NoJson)?;
    let value: T = serde_json::from_str(span)?;
    value.validate()?;
    Ok(value)
}
