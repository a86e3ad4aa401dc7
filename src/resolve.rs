//! Keyword resolution for the `Action`, `On` and yes/no attributes, plus the
//! identifier and integer attribute parsers.

use regex::Regex;
use std::sync::LazyLock;

use crate::enums::{ActionKind, SchemaVersion, Timing, YesNo};
use crate::error::Diagnostic;
use crate::messages;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap());

pub const MAX_IDENTIFIER_LENGTH: usize = 72;

/// State of an enumerated attribute after the scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved<T> {
    Absent,
    /// Present but not a legal keyword; already reported.
    Illegal,
    Value(T),
}

impl<T> Default for Resolved<T> {
    fn default() -> Self {
        Resolved::Absent
    }
}

impl<T: Copy> Resolved<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Resolved::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn or_default_with(self, default: T) -> Resolved<T> {
        match self {
            Resolved::Absent => Resolved::Value(default),
            other => other,
        }
    }
}

/// Resolve the `Action` attribute against the actions legal in `version`.
pub fn resolve_action(
    element: &str,
    text: &str,
    version: SchemaVersion,
) -> Result<ActionKind, Diagnostic> {
    version
        .actions()
        .iter()
        .copied()
        .find(|a| a.keyword() == text)
        .ok_or_else(|| {
            let allowed: Vec<&str> = version.actions().iter().map(|a| a.keyword()).collect();
            messages::illegal_attribute_value(element, "Action", text, &allowed)
        })
}

/// Resolve the `On` attribute.
pub fn resolve_timing(element: &str, text: &str) -> Result<Timing, Diagnostic> {
    Timing::ALL
        .into_iter()
        .find(|t| t.keyword() == text)
        .ok_or_else(|| {
            let allowed: Vec<&str> = Timing::ALL.iter().map(|t| t.keyword()).collect();
            messages::illegal_attribute_value(element, "On", text, &allowed)
        })
}

/// Resolve a `yes`/`no` attribute.
pub fn resolve_yes_no(element: &str, attribute: &str, text: &str) -> Result<YesNo, Diagnostic> {
    YesNo::parse(text)
        .ok_or_else(|| messages::illegal_attribute_value(element, attribute, text, &["yes", "no"]))
}

/// Validate an `Id` attribute value.
pub fn resolve_identifier(element: &str, attribute: &str, text: &str) -> Result<String, Diagnostic> {
    if text.len() <= MAX_IDENTIFIER_LENGTH && IDENTIFIER_RE.is_match(text) {
        Ok(text.to_string())
    } else {
        Err(messages::illegal_identifier(element, attribute, text))
    }
}

/// Lenient integer parse: empty or unparsable text yields `None`.
pub fn parse_nullable_int(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

/// Strict integer parse with a lower bound, reporting malformed values.
pub fn parse_bounded_int(
    element: &str,
    attribute: &str,
    text: &str,
    min: i32,
) -> Result<i32, Diagnostic> {
    match text.trim().parse::<i32>() {
        Ok(n) if n >= min => Ok(n),
        _ => Err(messages::illegal_integer_value(
            element,
            attribute,
            text,
            i64::from(min),
        )),
    }
}
