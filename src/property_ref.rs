//! Casing lint for property references embedded in formatted fields.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::Diagnostic;
use crate::messages::{self, ELEMENT_NAME};

/// Non-greedy `[...]` token; nested brackets are not understood.
static PROPERTY_REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// Sigils marking file, component, directory and environment references.
const RESERVED_SIGILS: [char; 4] = ['#', '!', '$', '%'];

/// Every bracketed token in `text`, in order of appearance.
pub fn property_references(text: &str) -> impl Iterator<Item = &str> {
    PROPERTY_REF_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
}

/// Whether a token names a plain property (as opposed to a sigil reference
/// or an escaped bracket).
pub fn is_plain_property(token: &str) -> bool {
    !token.starts_with(RESERVED_SIGILS) && token != r"\[" && token != r"\]"
}

/// Warn on every plain property reference in `text` that is not uppercase.
/// Diagnostics are tagged with `attribute`.
pub fn check_property_references(text: &str, attribute: &str) -> Vec<Diagnostic> {
    property_references(text)
        .filter(|token| is_plain_property(token))
        .filter(|token| *token != token.to_uppercase())
        .map(|token| messages::property_reference_should_be_uppercase(ELEMENT_NAME, attribute, token))
        .collect()
}
