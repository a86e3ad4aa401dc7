//! `JsonFile` element compilation.
//!
//! One run per element:
//!
//! ```text
//! scan attributes → resolve action/timing → reject children → validate
//!                 → emit Directive + HandlerReference   (no errors)
//!                 → suppress                            (any error)
//! ```
//!
//! Every diagnostic for an element is collected before the emission decision,
//! and an element with errors never affects its siblings.

use sha2::{Digest, Sha256};
use tracing::{debug, debug_span, trace};

use crate::enums::{ActionKind, YesNo};
use crate::error::Diagnostic;
use crate::flags::{FlagSet, Modifiers};
use crate::messages::{self, ELEMENT_NAME};
use crate::resolve::{self, Resolved};
use crate::types::*;
use crate::validate::validate_directive;

/// Sequence used when the `Sequence` attribute is omitted.
pub const DEFAULT_SEQUENCE: i32 = 1;

/// Prefix of generated directive identifiers.
pub const GENERATED_ID_PREFIX: &str = "jsf";

const DIRECTORY_ELEMENTS: [&str; 3] = ["Directory", "DirectoryRef", "StandardDirectory"];

/// Parent name reported for an extension element at the document root.
pub const DOCUMENT_PARENT: &str = "<document>";

/// Compile one `JsonFile` element owned by `context`.
pub fn compile_element(
    element: &SourceElement,
    context: &ComponentContext,
    options: &CompileOptions,
) -> ElementOutcome {
    let (mut raw, mut diagnostics) = scan_attributes(element, options);

    // Applied once, after the scan, so an absent Action never masks other errors.
    raw.action = raw.action.or_default_with(ActionKind::Set);

    check_children(element, options, &mut diagnostics);
    diagnostics.extend(validate_directive(&raw));

    let diagnostics: Vec<Diagnostic> = diagnostics
        .into_iter()
        .map(|d| d.at(&element.location))
        .collect();

    let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
    if error_count > 0 {
        debug!(
            component = %context.component_id,
            location = %element.location,
            errors = error_count,
            "suppressed JsonFile directive"
        );
        return ElementOutcome {
            compiled: None,
            diagnostics,
        };
    }

    let compiled = emit(raw, element, context, options);
    if let Some(c) = &compiled {
        debug!(
            component = %context.component_id,
            id = %c.directive.id,
            action = %c.directive.action(),
            handler = %c.handler.decorated_name(),
            "emitted JsonFile directive"
        );
    }
    ElementOutcome {
        compiled,
        diagnostics,
    }
}

/// Compile an extension element found under `parent`.
///
/// Only `JsonFile` directly under `Component` is accepted; anything else is
/// reported as an unexpected element. Elements outside the extension
/// namespace belong to the host and produce an empty outcome.
pub fn compile_child(
    parent: &SourceElement,
    element: &SourceElement,
    context: &ComponentContext,
    options: &CompileOptions,
) -> ElementOutcome {
    if !element.name.in_namespace(&options.extension_namespace) {
        return ElementOutcome::default();
    }
    if parent.name.local == "Component" && element.name.local == ELEMENT_NAME {
        return compile_element(element, context, options);
    }
    ElementOutcome {
        compiled: None,
        diagnostics: vec![
            messages::unexpected_element(&parent.name.local, &element.name.to_string())
                .at(&element.location),
        ],
    }
}

/// Compile every extension element in a document tree.
///
/// Diagnostics are returned sorted by source location; directives keep
/// document order. An extension element cannot be the root.
pub fn compile_document(root: &SourceElement, options: &CompileOptions) -> Compilation {
    let mut compilation = Compilation::default();
    if root.name.in_namespace(&options.extension_namespace) {
        compilation.diagnostics.push(
            messages::unexpected_element(DOCUMENT_PARENT, &root.name.to_string())
                .at(&root.location),
        );
    } else {
        walk(root, None, options, &mut compilation);
    }
    compilation
        .diagnostics
        .sort_by(|a, b| a.location.cmp(&b.location));
    compilation
}

fn walk(
    element: &SourceElement,
    directory: Option<&str>,
    options: &CompileOptions,
    out: &mut Compilation,
) {
    let ext = options.extension_namespace.as_str();

    let directory = if DIRECTORY_ELEMENTS.contains(&element.name.local.as_str()) {
        element.attribute("Id").or(directory)
    } else {
        directory
    };

    if element.name.local == "Component" {
        compile_component(element, directory, options, out);
        return;
    }

    for child in &element.children {
        if child.name.in_namespace(ext) {
            out.diagnostics.push(
                messages::unexpected_element(&element.name.local, &child.name.to_string())
                    .at(&child.location),
            );
        } else {
            walk(child, directory, options, out);
        }
    }
}

fn compile_component(
    component: &SourceElement,
    directory: Option<&str>,
    options: &CompileOptions,
    out: &mut Compilation,
) {
    let ext = options.extension_namespace.as_str();
    let has_extension_children = component.children.iter().any(|c| c.name.in_namespace(ext));

    let context = match component.attribute("Id").filter(|id| !id.is_empty()) {
        Some(id) => Some(ComponentContext {
            component_id: id.to_string(),
            directory_id: component
                .attribute("Directory")
                .or(directory)
                .map(str::to_string),
        }),
        None => {
            if has_extension_children {
                out.diagnostics
                    .push(messages::expected_attribute("Component", "Id").at(&component.location));
            }
            None
        }
    };

    let span = debug_span!(
        "component",
        id = context.as_ref().map(|c| c.component_id.as_str()).unwrap_or("")
    );
    let _guard = span.enter();

    for child in &component.children {
        if !child.name.in_namespace(ext) {
            walk(child, directory, options, out);
            continue;
        }
        let Some(context) = &context else {
            // The directive cannot be emitted, but a misplaced element is
            // still reported.
            if child.name.local != ELEMENT_NAME {
                out.diagnostics.push(
                    messages::unexpected_element(&component.name.local, &child.name.to_string())
                        .at(&child.location),
                );
            }
            continue;
        };
        let outcome = compile_child(component, child, context, options);
        out.diagnostics.extend(outcome.diagnostics);
        out.directives.extend(outcome.compiled);
    }
}

// ─── Attribute scan ─────────────────────────────────────────────────────────

/// Fold the element's attributes into a raw directive.
///
/// Unknown attributes, foreign-namespace attributes and illegal values are
/// reported; the offending field is left absent (or `Resolved::Illegal`).
pub fn scan_attributes(
    element: &SourceElement,
    options: &CompileOptions,
) -> (RawDirective, Vec<Diagnostic>) {
    let mut raw = RawDirective {
        sequence: Some(DEFAULT_SEQUENCE),
        ..RawDirective::default()
    };
    let mut diagnostics = Vec::new();
    let element_name = element.name.local.as_str();
    let version = options.schema_version;
    let extended = version.has_extended_columns();
    let property_columns = version.has_property_columns();

    for attribute in &element.attributes {
        let ours = match attribute.name.namespace.as_deref() {
            None => true,
            Some(ns) => ns == options.extension_namespace,
        };
        if !ours {
            diagnostics.push(messages::unsupported_extension_attribute(
                element_name,
                &attribute.name.to_string(),
            ));
            continue;
        }

        let value = attribute.value.as_str();
        match attribute.name.local.as_str() {
            "Id" => match resolve::resolve_identifier(element_name, "Id", value) {
                Ok(id) => raw.id = Some(id),
                Err(d) => diagnostics.push(d),
            },
            "File" => raw.file = Some(value.to_string()),
            "ElementPath" => raw.element_path = Some(value.to_string()),
            "Value" => raw.value = Some(value.to_string()),
            "DefaultValue" if property_columns => raw.default_value = Some(value.to_string()),
            "Property" if property_columns => raw.property = Some(value.to_string()),
            "Action" => {
                raw.action = match resolve::resolve_action(element_name, value, version) {
                    Ok(action) => Resolved::Value(action),
                    Err(d) => {
                        diagnostics.push(d);
                        Resolved::Illegal
                    }
                }
            }
            "On" => {
                raw.timing = match resolve::resolve_timing(element_name, value) {
                    Ok(timing) => Resolved::Value(timing),
                    Err(d) => {
                        diagnostics.push(d);
                        Resolved::Illegal
                    }
                }
            }
            "Sequence" => raw.sequence = resolve::parse_nullable_int(value),
            "Index" if extended => match resolve::parse_bounded_int(element_name, "Index", value, -1)
            {
                Ok(index) => raw.index = Some(index),
                Err(d) => diagnostics.push(d),
            },
            "SchemaFile" if extended => raw.schema_file = Some(value.to_string()),
            name @ ("ValidateSchema" | "DistinctValues" | "OnlyIfExists") if extended => {
                let modifier = match name {
                    "ValidateSchema" => Modifiers::VALIDATE_SCHEMA,
                    "DistinctValues" => Modifiers::DISTINCT_VALUES,
                    _ => Modifiers::ONLY_IF_EXISTS,
                };
                match resolve::resolve_yes_no(element_name, name, value) {
                    Ok(YesNo::Yes) => raw.modifiers |= modifier,
                    Ok(YesNo::No) => {}
                    Err(d) => diagnostics.push(d),
                }
            }
            other => diagnostics.push(messages::unexpected_attribute(element_name, other)),
        }
    }

    (raw, diagnostics)
}

fn check_children(
    element: &SourceElement,
    options: &CompileOptions,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for child in &element.children {
        let child_name = child.name.to_string();
        let d = if child.name.in_namespace(&options.extension_namespace) {
            messages::unexpected_element(&element.name.local, &child_name)
        } else {
            messages::unsupported_extension_element(&element.name.local, &child_name)
        };
        diagnostics.push(d.at(&child.location));
    }
}

// ─── Emission ───────────────────────────────────────────────────────────────

fn emit(
    raw: RawDirective,
    element: &SourceElement,
    context: &ComponentContext,
    options: &CompileOptions,
) -> Option<CompiledDirective> {
    let action = raw.action()?;
    let file = non_empty(&raw.file)?.to_string();
    let element_path = non_empty(&raw.element_path)?.to_string();

    let flags = FlagSet {
        action,
        timing: raw.timing.value().unwrap_or_default(),
        modifiers: raw.modifiers,
    };
    trace!(action = %action, timing = %flags.timing, mask = flags.encode(), "resolved flags");

    let value = non_empty(&raw.value).map(str::to_string);
    let id = match raw.id {
        Some(id) => id,
        None => generated_identifier(
            &context.component_id,
            &file,
            &element_path,
            value.as_deref(),
            flags.encode(),
        ),
    };

    let directive = Directive {
        id,
        file,
        element_path,
        value,
        default_value: non_empty(&raw.default_value).map(str::to_string),
        property: if action == ActionKind::Read {
            non_empty(&raw.property).map(str::to_string)
        } else {
            None
        },
        component_ref: context.component_id.clone(),
        sequence: raw.sequence,
        flags,
        index: raw.index,
        schema_file: non_empty(&raw.schema_file).map(str::to_string),
        location: element.location.clone(),
    };

    Some(CompiledDirective {
        handler: HandlerReference::for_action(action, options.platform),
        directive,
    })
}

/// Stable identifier derived from the directive's key fields.
pub fn generated_identifier(
    component: &str,
    file: &str,
    element_path: &str,
    value: Option<&str>,
    flags: u32,
) -> String {
    let mut hasher = Sha256::new();
    for part in [component, file, element_path, value.unwrap_or("")] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(flags.to_le_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}{}", GENERATED_ID_PREFIX, &digest[..32])
}

