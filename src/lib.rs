//! Compiler front end for `JsonFile` installer directives.
//!
//! A `JsonFile` element, authored as a child of a `Component`, describes one
//! modification to a JSON file made at install or uninstall time. This crate
//! turns such elements into immutable [`Directive`] records for the
//! installer-table binder, plus a reference to the runtime handler each one
//! needs. The JSON document itself is never read here.
//!
//! ```text
//! parse(xml) → SourceElement → compile_document → Compilation
//!                                                  ├─ directives → table::rows → serialize
//!                                                  └─ diagnostics
//! ```
//!
//! `ElementPath`, `Value`, `File`, `DefaultValue` and `SchemaFile` are linted
//! with heuristic checks (JSONPath/JSONPointer shape, MSI bracket escaping,
//! property-reference casing). Those produce warnings only; an element with
//! any error is never emitted.
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "xml")]
//! # {
//! let xml = r#"
//! <Wix xmlns="http://wixtoolset.org/schemas/v4/wxs"
//!      xmlns:json="http://schemas.hegsie.com/wix/JsonExtension">
//!   <Component Id="AppSettings">
//!     <json:JsonFile File="[INSTALLFOLDER]appsettings.json"
//!                    ElementPath="$.Logging.LogLevel.Default"
//!                    Value="Warning" />
//!   </Component>
//! </Wix>
//! "#;
//!
//! let compilation = jsonfile::compile_str(xml, &jsonfile::CompileOptions::default())
//!     .expect("well-formed XML");
//! assert!(!compilation.has_errors());
//! assert_eq!(compilation.directives.len(), 1);
//! # }
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `xml`   | yes     | XML source parsing via `quick_xml`. Enables `parse()` and `compile_str`. |

pub mod compile;
pub mod enums;
pub mod error;
pub mod flags;
pub mod messages;
#[cfg(feature = "xml")]
pub mod parse;
pub mod path_syntax;
pub mod property_ref;
pub mod resolve;
pub mod serialize;
pub mod table;
pub mod types;
pub mod validate;

pub use enums::*;
pub use error::*;
pub use flags::{FlagSet, Modifiers};
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use compile::{compile_child, compile_document, compile_element};
#[cfg(feature = "xml")]
pub use parse::parse;
pub use path_syntax::check_element_path;
pub use property_ref::check_property_references;
pub use serialize::serialize;
pub use validate::validate_directive;

/// Convenience entry point composing parse → compile_document.
///
/// Only unreadable XML is an `Err`; compile errors are reported as
/// diagnostics in the returned [`Compilation`].
///
/// # Errors
///
/// Returns [`JsonFileError::Parse`] if the input is not well-formed XML.
#[cfg(feature = "xml")]
pub fn compile_str(input: &str, options: &CompileOptions) -> Result<Compilation, JsonFileError> {
    let root = parse::parse(input)?;
    Ok(compile::compile_document(&root, options))
}
