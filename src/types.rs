use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::*;
use crate::error::{Diagnostic, JsonFileError, SourceLocation};
use crate::flags::{FlagSet, Modifiers};
use crate::resolve::Resolved;

/// Namespace owned by this extension.
pub const EXTENSION_NAMESPACE: &str = "http://schemas.hegsie.com/wix/JsonExtension";

// ─── Source model ───────────────────────────────────────────────────────────

/// Namespace-qualified XML name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn local(local: &str) -> Self {
        QName {
            namespace: None,
            local: local.to_string(),
        }
    }

    pub fn qualified(namespace: &str, local: &str) -> Self {
        QName {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// One attribute as supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttribute {
    pub name: QName,
    pub value: String,
}

impl SourceAttribute {
    pub fn new(local: &str, value: &str) -> Self {
        SourceAttribute {
            name: QName::local(local),
            value: value.to_string(),
        }
    }
}

/// One element as supplied by the host, with its children in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceElement {
    pub name: QName,
    #[serde(default)]
    pub attributes: Vec<SourceAttribute>,
    #[serde(default)]
    pub children: Vec<SourceElement>,
    pub location: SourceLocation,
}

impl SourceElement {
    pub fn new(name: QName, location: SourceLocation) -> Self {
        SourceElement {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            location,
        }
    }

    pub fn with_attribute(mut self, local: &str, value: &str) -> Self {
        self.attributes.push(SourceAttribute::new(local, value));
        self
    }

    pub fn with_child(mut self, child: SourceElement) -> Self {
        self.children.push(child);
        self
    }

    /// Value of an unqualified attribute.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.local == local)
            .map(|a| a.value.as_str())
    }
}

/// Information about the owning `Component` element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentContext {
    pub component_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<String>,
}

impl ComponentContext {
    pub fn new(component_id: &str) -> Self {
        ComponentContext {
            component_id: component_id.to_string(),
            directory_id: None,
        }
    }
}

// ─── Configuration ──────────────────────────────────────────────────────────

/// Compiler settings supplied by the host toolset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub schema_version: SchemaVersion,
    pub platform: Platform,
    pub extension_namespace: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            schema_version: SchemaVersion::default(),
            platform: Platform::default(),
            extension_namespace: EXTENSION_NAMESPACE.to_string(),
        }
    }
}

impl CompileOptions {
    /// Read options from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(input: &str) -> Result<CompileOptions, JsonFileError> {
        if input.trim().is_empty() {
            return Ok(CompileOptions::default());
        }
        serde_saphyr::from_str(input).map_err(|e| JsonFileError::Config(e.to_string()))
    }
}

// ─── Accumulator ────────────────────────────────────────────────────────────

/// Raw attribute values gathered from one element before validation.
///
/// Every field is set independently of attribute order; modifiers are OR-ed
/// together, so folding attributes in any order yields the same value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDirective {
    pub id: Option<String>,
    pub file: Option<String>,
    pub element_path: Option<String>,
    pub value: Option<String>,
    pub default_value: Option<String>,
    pub property: Option<String>,
    pub sequence: Option<i32>,
    pub index: Option<i32>,
    pub schema_file: Option<String>,
    pub action: Resolved<ActionKind>,
    pub timing: Resolved<Timing>,
    pub modifiers: Modifiers,
}

impl RawDirective {
    /// The resolved action, if the attribute was legal or defaulted.
    pub fn action(&self) -> Option<ActionKind> {
        self.action.value()
    }
}

/// Treat empty strings as absent.
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ─── Output ─────────────────────────────────────────────────────────────────

/// One compiled JSON-file modification. Immutable once emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub id: String,
    pub file: String,
    pub element_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub component_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
    pub flags: FlagSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_file: Option<String>,
    pub location: SourceLocation,
}

impl Directive {
    pub fn action(&self) -> ActionKind {
        self.flags.action
    }

    /// Integer stored in the `Flags` column.
    pub fn encoded_flags(&self) -> u32 {
        self.flags.encode()
    }
}

/// Reference to the runtime handler that executes a directive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerReference {
    pub name: String,
    pub platform: Platform,
}

impl HandlerReference {
    pub const READ_HANDLER: &'static str = "WixPropertyJsonFile";
    pub const SCHEDULE_HANDLER: &'static str = "WixSchedJsonFile";

    /// `Read` pulls a value into a property; everything else is scheduled.
    pub fn for_action(action: ActionKind, platform: Platform) -> Self {
        let name = match action {
            ActionKind::Read => Self::READ_HANDLER,
            _ => Self::SCHEDULE_HANDLER,
        };
        HandlerReference {
            name: name.to_string(),
            platform,
        }
    }

    /// Platform-specific binary entry point, e.g. `WixSchedJsonFile_X64`.
    pub fn decorated_name(&self) -> String {
        format!("{}_{}", self.name, self.platform.suffix())
    }
}

/// An emitted directive plus the handler it needs at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledDirective {
    pub directive: Directive,
    pub handler: HandlerReference,
}

/// Result of compiling one element.
#[derive(Clone, Debug, Default)]
pub struct ElementOutcome {
    /// `None` when any error-level diagnostic was raised.
    pub compiled: Option<CompiledDirective>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ElementOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn directive(&self) -> Option<&Directive> {
        self.compiled.as_ref().map(|c| &c.directive)
    }
}

/// Result of compiling a whole document.
#[derive(Clone, Debug, Default)]
pub struct Compilation {
    pub directives: Vec<CompiledDirective>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Distinct handler references, in first-use order.
    pub fn handlers(&self) -> Vec<&HandlerReference> {
        let mut seen: Vec<&HandlerReference> = Vec::new();
        for compiled in &self.directives {
            if !seen.contains(&&compiled.handler) {
                seen.push(&compiled.handler);
            }
        }
        seen
    }
}
