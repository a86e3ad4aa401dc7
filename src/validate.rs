//! Cross-field validation of a scanned `JsonFile` element.
//!
//! Returns **all** diagnostics, not just the first, and never looks at the
//! order attributes appeared in. Diagnostics carry no location; the caller
//! attaches the element's.

use crate::enums::ActionKind;
use crate::error::Diagnostic;
use crate::flags::Modifiers;
use crate::messages::{self, ELEMENT_NAME};
use crate::path_syntax::check_element_path;
use crate::property_ref::check_property_references;
use crate::types::{RawDirective, non_empty};

/// Validate a scanned directive.
///
/// An action that failed to resolve is treated as absent: action-specific
/// requirements are skipped and the path is linted as JSONPath.
pub fn validate_directive(raw: &RawDirective) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let action = raw.action();

    check_read_property(raw, action, &mut diagnostics);
    check_required_value(raw, action, &mut diagnostics);
    check_required_fields(raw, &mut diagnostics);
    check_element_path_syntax(raw, action, &mut diagnostics);
    check_formatted_fields(raw, &mut diagnostics);
    check_schema_file(raw, &mut diagnostics);
    check_index(raw, action, &mut diagnostics);

    diagnostics
}

// ─── Action-dependent requiredness ──────────────────────────────────────────

fn check_read_property(
    raw: &RawDirective,
    action: Option<ActionKind>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if action != Some(ActionKind::Read) {
        return;
    }
    match non_empty(&raw.property) {
        None => diagnostics.push(messages::expected_attribute_when(
            ELEMENT_NAME,
            "Property",
            "Action",
            ActionKind::Read.keyword(),
        )),
        // Windows Installer convention, not a hard rule.
        Some(property) if property != property.to_uppercase() => diagnostics.push(
            messages::property_name_should_be_uppercase(ELEMENT_NAME, property),
        ),
        Some(_) => {}
    }
}

fn check_required_value(
    raw: &RawDirective,
    action: Option<ActionKind>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Some(action) = action
        && action.requires_value()
        && non_empty(&raw.value).is_none()
    {
        diagnostics.push(messages::expected_attribute_when(
            ELEMENT_NAME,
            "Value",
            "Action",
            action.keyword(),
        ));
    }
}

fn check_required_fields(raw: &RawDirective, diagnostics: &mut Vec<Diagnostic>) {
    if non_empty(&raw.file).is_none() {
        diagnostics.push(messages::expected_attribute(ELEMENT_NAME, "File"));
    }
    if non_empty(&raw.element_path).is_none() {
        diagnostics.push(messages::expected_attribute(ELEMENT_NAME, "ElementPath"));
    }
}

// ─── Heuristic lints ────────────────────────────────────────────────────────

fn check_element_path_syntax(
    raw: &RawDirective,
    action: Option<ActionKind>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Some(path) = non_empty(&raw.element_path) {
        let action = action.unwrap_or(ActionKind::Set);
        diagnostics.extend(check_element_path(path, action));
    }
}

fn check_formatted_fields(raw: &RawDirective, diagnostics: &mut Vec<Diagnostic>) {
    let fields = [
        ("Value", &raw.value),
        ("File", &raw.file),
        ("DefaultValue", &raw.default_value),
        ("SchemaFile", &raw.schema_file),
    ];
    for (attribute, field) in fields {
        if let Some(text) = non_empty(field) {
            diagnostics.extend(check_property_references(text, attribute));
        }
    }
}

// ─── Extended columns ───────────────────────────────────────────────────────

fn check_schema_file(raw: &RawDirective, diagnostics: &mut Vec<Diagnostic>) {
    let validating = raw.modifiers.contains(Modifiers::VALIDATE_SCHEMA);
    let has_schema = non_empty(&raw.schema_file).is_some();
    if validating && !has_schema {
        diagnostics.push(messages::expected_attribute_when(
            ELEMENT_NAME,
            "SchemaFile",
            "ValidateSchema",
            "yes",
        ));
    } else if has_schema && !validating {
        diagnostics.push(messages::schema_file_unused(ELEMENT_NAME));
    }
}

fn check_index(raw: &RawDirective, action: Option<ActionKind>, diagnostics: &mut Vec<Diagnostic>) {
    if raw.index.is_some()
        && let Some(action) = action
        && action != ActionKind::InsertArray
    {
        diagnostics.push(messages::index_ignored(ELEMENT_NAME, action.keyword()));
    }
}
