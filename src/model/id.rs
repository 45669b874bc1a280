//! Record ids: integers in the store and on output, digit strings or numbers on input.

use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("static id pattern"));

/// Parse a textual id (path segment or legacy string field). Only ASCII digits are accepted.
pub fn parse_id(s: &str) -> Result<i64, AppError> {
    if !DIGITS.is_match(s) {
        return Err(AppError::BadRequest(format!("invalid id '{}': digits only", s)));
    }
    s.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}': out of range", s)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

/// serde helper for `Option<i64>` id fields that also accepts `"123"`.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WireId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WireId::Number(n)) if n >= 0 => Ok(Some(n)),
        Some(WireId::Number(n)) => Err(D::Error::custom(format!("invalid id {}: must not be negative", n))),
        Some(WireId::Text(s)) => parse_id(&s).map(Some).map_err(D::Error::custom),
    }
}
