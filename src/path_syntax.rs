//! Heuristic linting of `ElementPath` values.
//!
//! This is not a JSONPath or JSONPointer parser. Each check looks for one
//! common authoring mistake and reports a warning; false positives and false
//! negatives are both possible, and nothing here ever produces an error.
//!
//! The path text is an MSI formatted field, so a bare `[...]` is read as a
//! property substitution before the runtime ever sees the JSONPath. Literal
//! brackets have to be written as `[\[]` and `[\]]`.

use crate::enums::ActionKind;
use crate::error::Diagnostic;
use crate::messages::{self, ELEMENT_NAME};

/// Escape sequence for a literal `[` in a formatted field.
pub const ESCAPED_OPEN: &str = r"[\[]";
/// Escape sequence for a literal `]` in a formatted field.
pub const ESCAPED_CLOSE: &str = r"[\]]";

/// Lint an element path for the given action.
///
/// `createJsonPointerValue` expects JSONPointer (`/a/b`); every other action
/// expects JSONPath (`$.a.b`). Paths that look like JSONPointer never receive
/// the JSONPath-specific checks.
pub fn check_element_path(path: &str, action: ActionKind) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let is_pointer = path.starts_with('/');

    if action.expects_pointer() {
        if !is_pointer {
            diagnostics.push(messages::element_path_should_start_with_slash(
                ELEMENT_NAME,
                action.keyword(),
            ));
        }
    } else {
        if is_pointer || !path.starts_with('$') {
            diagnostics.push(messages::element_path_should_start_with_dollar(ELEMENT_NAME));
        }
        if contains_unescaped_brackets(path) {
            diagnostics.push(messages::unescaped_brackets_in_element_path(
                ELEMENT_NAME,
                path,
            ));
        }
    }

    if !is_pointer && path.starts_with('$') {
        check_basic_json_path(path, &mut diagnostics);
    }

    diagnostics
}

/// Whether the path contains a `[...]` that looks like a JSONPath selector
/// (array index, wildcard or filter) rather than a property reference.
///
/// Escape sequences are skipped whole so their inner brackets never trigger.
pub fn contains_unescaped_brackets(path: &str) -> bool {
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' {
            let rest = &path[i..];
            if rest.starts_with(ESCAPED_OPEN) || rest.starts_with(ESCAPED_CLOSE) {
                i += ESCAPED_OPEN.len();
                continue;
            }
            if let Some(close) = path[i + 1..].find(']') {
                let content = &path[i + 1..i + 1 + close];
                if looks_like_selector(content) {
                    return true;
                }
            }
        }
        i += 1;
    }
    false
}

/// Numeric index, `*` wildcard, or `?(@...)` filter.
fn looks_like_selector(content: &str) -> bool {
    let is_index = !content.is_empty() && content.bytes().all(|b| b.is_ascii_digit());
    let is_filter = content.starts_with('?') && content.contains('@');
    is_index || content == "*" || is_filter
}

fn check_basic_json_path(path: &str, diagnostics: &mut Vec<Diagnostic>) {
    if let Some(next) = path[1..].chars().next()
        && next != '.'
        && next != '['
    {
        diagnostics.push(messages::invalid_json_path_syntax(
            ELEMENT_NAME,
            path,
            "JSONPath should start with $ followed by . or [",
        ));
    }

    if has_bad_recursive_descent(path) {
        diagnostics.push(messages::invalid_json_path_syntax(
            ELEMENT_NAME,
            path,
            "Recursive descent (..) should be followed by a property name, bracket, or wildcard",
        ));
    }

    if bracket_balance(path) != 0 {
        diagnostics.push(messages::unmatched_brackets_in_element_path(ELEMENT_NAME));
    }
}

/// Any `..` whose following character is not a letter, `.`, `[`, `*` or `$`.
/// A trailing `..` is not flagged.
fn has_bad_recursive_descent(path: &str) -> bool {
    path.match_indices("..").any(|(idx, _)| {
        path[idx + 2..]
            .chars()
            .next()
            .is_some_and(|c| !matches!(c, '.' | '[' | '*' | '$') && !c.is_alphabetic())
    })
}

/// Net `[` minus `]`, ignoring brackets immediately preceded by a backslash.
///
/// The escape flag toggles on each backslash and is cleared after every other
/// character. Runs of backslashes are therefore treated as alternating
/// escape/literal, with no knowledge of the formatted-field escape layer.
pub fn bracket_balance(path: &str) -> i64 {
    let mut open: i64 = 0;
    let mut in_escape = false;
    for c in path.chars() {
        if c == '\\' {
            in_escape = !in_escape;
            continue;
        }
        if !in_escape {
            match c {
                '[' => open += 1,
                ']' => open -= 1,
                _ => {}
            }
        }
        in_escape = false;
    }
    open
}
