use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Position of an element or attribute in the authored source.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        SourceLocation {
            file: None,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}({},{})", file, self.line, self.column),
            None => write!(f, "({},{})", self.line, self.column),
        }
    }
}

/// A structured message produced while compiling a `JsonFile` element.
///
/// Checkers build diagnostics without a location; the validator stamps the
/// element's location on everything it collects before handing it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Attribute that produced the diagnostic, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Error,
            code: code.to_string(),
            location: None,
            attribute: None,
            message: message.into(),
        }
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Warning,
            code: code.to_string(),
            location: None,
            attribute: None,
            message: message.into(),
        }
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attribute = Some(attribute.to_string());
        self
    }

    /// Attach a location unless one is already set.
    pub fn at(mut self, location: &SourceLocation) -> Self {
        if self.location.is_none() {
            self.location = Some(location.clone());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        match &self.location {
            Some(loc) => write!(f, "{} : {} {}: {}", loc, level, self.code, self.message),
            None => write!(f, "{} {}: {}", level, self.code, self.message),
        }
    }
}

/// Error kind for source parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    Encoding,
    UnknownPrefix,
}

/// Produced by `parse` when the authored XML cannot be read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{}:{}: {}", line, col, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Produced by `FlagSet::decode` when a persisted mask is not a valid encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagsError {
    MissingAction(u32),
    MultipleActions(u32),
    UnknownBits(u32),
    NoTiming(u32),
}

impl fmt::Display for FlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagsError::MissingAction(mask) => write!(f, "flags {} carry no action bit", mask),
            FlagsError::MultipleActions(mask) => {
                write!(f, "flags {} carry more than one action bit", mask)
            }
            FlagsError::UnknownBits(bits) => write!(f, "unknown flag bits {:#x}", bits),
            FlagsError::NoTiming(mask) => {
                write!(f, "flags {} skip install without running on uninstall", mask)
            }
        }
    }
}

impl std::error::Error for FlagsError {}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}

/// Combined error type for the `compile_str` entry point.
#[derive(Clone, Debug)]
pub enum JsonFileError {
    Parse(ParseError),
    Config(String),
}

impl fmt::Display for JsonFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonFileError::Parse(e) => write!(f, "Parse error: {}", e),
            JsonFileError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for JsonFileError {}

impl From<ParseError> for JsonFileError {
    fn from(e: ParseError) -> Self {
        JsonFileError::Parse(e)
    }
}
