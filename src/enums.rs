//! Closed enumerations used throughout the directive model.
//!
//! Every enum here maps one-to-one onto the keyword set accepted in authored
//! source; the serde names are those keywords.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The modification a directive performs. Exactly one per directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    #[serde(rename = "deleteValue")]
    Delete,
    #[serde(rename = "setValue")]
    Set,
    ReplaceJsonValue,
    CreateJsonPointerValue,
    #[serde(rename = "readValue")]
    Read,
    AppendArray,
    InsertArray,
    RemoveArrayElement,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Delete,
        ActionKind::Set,
        ActionKind::ReplaceJsonValue,
        ActionKind::CreateJsonPointerValue,
        ActionKind::Read,
        ActionKind::AppendArray,
        ActionKind::InsertArray,
        ActionKind::RemoveArrayElement,
    ];

    /// Keyword used for this action in the `Action` attribute.
    pub fn keyword(self) -> &'static str {
        match self {
            ActionKind::Delete => "deleteValue",
            ActionKind::Set => "setValue",
            ActionKind::ReplaceJsonValue => "replaceJsonValue",
            ActionKind::CreateJsonPointerValue => "createJsonPointerValue",
            ActionKind::Read => "readValue",
            ActionKind::AppendArray => "appendArray",
            ActionKind::InsertArray => "insertArray",
            ActionKind::RemoveArrayElement => "removeArrayElement",
        }
    }

    /// Bit this action occupies in the persisted flags column.
    pub fn bit(self) -> u32 {
        match self {
            ActionKind::Delete => 1,
            ActionKind::Set => 1 << 1,
            ActionKind::ReplaceJsonValue => 1 << 2,
            ActionKind::CreateJsonPointerValue => 1 << 3,
            ActionKind::Read => 1 << 4,
            ActionKind::AppendArray => 1 << 5,
            ActionKind::InsertArray => 1 << 6,
            ActionKind::RemoveArrayElement => 1 << 7,
        }
    }

    pub fn from_bit(bit: u32) -> Option<ActionKind> {
        ActionKind::ALL.into_iter().find(|a| a.bit() == bit)
    }

    /// Actions that cannot be emitted without a `Value`.
    pub fn requires_value(self) -> bool {
        matches!(
            self,
            ActionKind::Set
                | ActionKind::ReplaceJsonValue
                | ActionKind::CreateJsonPointerValue
                | ActionKind::AppendArray
                | ActionKind::InsertArray
        )
    }

    /// Only `createJsonPointerValue` addresses its target with JSONPointer.
    pub fn expects_pointer(self) -> bool {
        self == ActionKind::CreateJsonPointerValue
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// When a directive runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    #[default]
    Install,
    Uninstall,
    Both,
}

impl Timing {
    pub const ALL: [Timing; 3] = [Timing::Install, Timing::Uninstall, Timing::Both];

    pub fn keyword(self) -> &'static str {
        match self {
            Timing::Install => "install",
            Timing::Uninstall => "uninstall",
            Timing::Both => "both",
        }
    }

    pub fn runs_on_install(self) -> bool {
        matches!(self, Timing::Install | Timing::Both)
    }

    pub fn runs_on_uninstall(self) -> bool {
        matches!(self, Timing::Uninstall | Timing::Both)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

const CORE_ACTIONS: [ActionKind; 4] = [
    ActionKind::Delete,
    ActionKind::Set,
    ActionKind::ReplaceJsonValue,
    ActionKind::CreateJsonPointerValue,
];

const BASIC_ACTIONS: [ActionKind; 5] = [
    ActionKind::Delete,
    ActionKind::Set,
    ActionKind::ReplaceJsonValue,
    ActionKind::CreateJsonPointerValue,
    ActionKind::Read,
];

/// Version of the persisted table layout being targeted.
///
/// `Core` is the seven-column layout with no `DefaultValue` or `Property`
/// column, so `readValue` cannot be expressed. `Basic` adds both columns and
/// the read action; `Extended` adds the array actions, the modifier
/// attributes and the `Index`/`SchemaFile` columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    Core,
    Basic,
    #[default]
    Extended,
}

impl SchemaVersion {
    pub fn actions(self) -> &'static [ActionKind] {
        match self {
            SchemaVersion::Core => &CORE_ACTIONS,
            SchemaVersion::Basic => &BASIC_ACTIONS,
            SchemaVersion::Extended => &ActionKind::ALL,
        }
    }

    pub fn allows_action(self, action: ActionKind) -> bool {
        self.actions().contains(&action)
    }

    /// Whether the `DefaultValue` and `Property` columns exist.
    pub fn has_property_columns(self) -> bool {
        self != SchemaVersion::Core
    }

    /// Whether `Index`, `SchemaFile` and the modifier attributes are legal.
    pub fn has_extended_columns(self) -> bool {
        self == SchemaVersion::Extended
    }
}

/// Target platform of the runtime handler binary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    X86,
    #[default]
    X64,
    Arm64,
}

impl Platform {
    pub fn suffix(self) -> &'static str {
        match self {
            Platform::X86 => "X86",
            Platform::X64 => "X64",
            Platform::Arm64 => "A64",
        }
    }
}

/// `yes`/`no` attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn parse(text: &str) -> Option<YesNo> {
        match text {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }
}
