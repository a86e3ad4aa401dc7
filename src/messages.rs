//! Diagnostic codes and message text.
//!
//! Errors are `E-0xx`, heuristic warnings are `W-0xx`. Message wording names
//! the element and attribute the way authors see them in source.

use crate::error::Diagnostic;

pub const UNEXPECTED_ATTRIBUTE: &str = "E-001";
pub const UNSUPPORTED_EXTENSION_ATTRIBUTE: &str = "E-002";
pub const UNEXPECTED_ELEMENT: &str = "E-003";
pub const UNSUPPORTED_EXTENSION_ELEMENT: &str = "E-004";
pub const ILLEGAL_ATTRIBUTE_VALUE: &str = "E-005";
pub const EXPECTED_ATTRIBUTE: &str = "E-006";
pub const ILLEGAL_IDENTIFIER: &str = "E-007";
pub const ILLEGAL_INTEGER_VALUE: &str = "E-008";

pub const PROPERTY_NAME_SHOULD_BE_UPPERCASE: &str = "W-001";
pub const PROPERTY_REFERENCE_SHOULD_BE_UPPERCASE: &str = "W-002";
pub const UNESCAPED_BRACKETS_IN_ELEMENT_PATH: &str = "W-003";
pub const ELEMENT_PATH_SHOULD_START_WITH_DOLLAR: &str = "W-004";
pub const ELEMENT_PATH_SHOULD_START_WITH_SLASH: &str = "W-005";
pub const INVALID_JSON_PATH_SYNTAX: &str = "W-006";
pub const UNMATCHED_BRACKETS_IN_ELEMENT_PATH: &str = "W-007";
pub const INDEX_IGNORED: &str = "W-008";
pub const SCHEMA_FILE_UNUSED: &str = "W-009";

/// Name of the element this crate compiles.
pub const ELEMENT_NAME: &str = "JsonFile";

// ─── Errors ─────────────────────────────────────────────────────────────────

pub fn unexpected_attribute(element: &str, attribute: &str) -> Diagnostic {
    Diagnostic::error(
        UNEXPECTED_ATTRIBUTE,
        format!(
            "The {} element contains an unexpected attribute '{}'.",
            element, attribute
        ),
    )
    .with_attribute(attribute)
}

pub fn unsupported_extension_attribute(element: &str, attribute: &str) -> Diagnostic {
    Diagnostic::error(
        UNSUPPORTED_EXTENSION_ATTRIBUTE,
        format!(
            "The {} element contains an unsupported extension attribute '{}'. Make sure the extension that defines this namespace is loaded.",
            element, attribute
        ),
    )
    .with_attribute(attribute)
}

pub fn unexpected_element(parent: &str, child: &str) -> Diagnostic {
    Diagnostic::error(
        UNEXPECTED_ELEMENT,
        format!(
            "The {} element contains an unexpected child element '{}'.",
            parent, child
        ),
    )
}

pub fn unsupported_extension_element(parent: &str, child: &str) -> Diagnostic {
    Diagnostic::error(
        UNSUPPORTED_EXTENSION_ELEMENT,
        format!(
            "The {} element contains an unsupported extension element '{}'. Make sure the extension that defines this namespace is loaded.",
            parent, child
        ),
    )
}

pub fn illegal_attribute_value(
    element: &str,
    attribute: &str,
    value: &str,
    allowed: &[&str],
) -> Diagnostic {
    Diagnostic::error(
        ILLEGAL_ATTRIBUTE_VALUE,
        format!(
            "The {}/@{} attribute's value, '{}', is not one of the legal options: '{}'.",
            element,
            attribute,
            value,
            allowed.join("', '")
        ),
    )
    .with_attribute(attribute)
}

pub fn expected_attribute(element: &str, attribute: &str) -> Diagnostic {
    Diagnostic::error(
        EXPECTED_ATTRIBUTE,
        format!(
            "The {}/@{} attribute was not found; it is required.",
            element, attribute
        ),
    )
    .with_attribute(attribute)
}

/// Missing attribute that is only required because another attribute has a given value.
pub fn expected_attribute_when(
    element: &str,
    attribute: &str,
    other_attribute: &str,
    other_value: &str,
) -> Diagnostic {
    Diagnostic::error(
        EXPECTED_ATTRIBUTE,
        format!(
            "The {}/@{} attribute was not found; it is required when attribute {} has a value of '{}'.",
            element, attribute, other_attribute, other_value
        ),
    )
    .with_attribute(attribute)
}

pub fn illegal_identifier(element: &str, attribute: &str, value: &str) -> Diagnostic {
    Diagnostic::error(
        ILLEGAL_IDENTIFIER,
        format!(
            "The {}/@{} attribute's value, '{}', is not a legal identifier. Identifiers must begin with a letter or underscore, contain only letters, digits, underscores and periods, and be at most 72 characters long.",
            element, attribute, value
        ),
    )
    .with_attribute(attribute)
}

pub fn illegal_integer_value(element: &str, attribute: &str, value: &str, min: i64) -> Diagnostic {
    Diagnostic::error(
        ILLEGAL_INTEGER_VALUE,
        format!(
            "The {}/@{} attribute's value, '{}', is not a legal integer value. Legal integer values are from {} to {}.",
            element,
            attribute,
            value,
            min,
            i32::MAX
        ),
    )
    .with_attribute(attribute)
}

// ─── Warnings ───────────────────────────────────────────────────────────────

pub fn property_name_should_be_uppercase(element: &str, property: &str) -> Diagnostic {
    Diagnostic::warning(
        PROPERTY_NAME_SHOULD_BE_UPPERCASE,
        format!(
            "The Property attribute '{}' in {} element should be uppercase according to Windows Installer conventions. Consider using '{}' instead.",
            property,
            element,
            property.to_uppercase()
        ),
    )
    .with_attribute("Property")
}

pub fn property_reference_should_be_uppercase(
    element: &str,
    attribute: &str,
    reference: &str,
) -> Diagnostic {
    Diagnostic::warning(
        PROPERTY_REFERENCE_SHOULD_BE_UPPERCASE,
        format!(
            "The property reference '[{}]' in {} element's {} attribute should be uppercase. Consider using '[{}]' instead.",
            reference,
            element,
            attribute,
            reference.to_uppercase()
        ),
    )
    .with_attribute(attribute)
}

pub fn unescaped_brackets_in_element_path(element: &str, path: &str) -> Diagnostic {
    Diagnostic::warning(
        UNESCAPED_BRACKETS_IN_ELEMENT_PATH,
        format!(
            r"The ElementPath attribute in {} element may contain unescaped square brackets. Square brackets must be escaped as [\[] and [\]] for MSI property formatting. Path: {}",
            element, path
        ),
    )
    .with_attribute("ElementPath")
}

pub fn element_path_should_start_with_dollar(element: &str) -> Diagnostic {
    Diagnostic::warning(
        ELEMENT_PATH_SHOULD_START_WITH_DOLLAR,
        format!(
            "The ElementPath attribute in {} element should start with '$' for JSONPath syntax (e.g., '$.propertyName').",
            element
        ),
    )
    .with_attribute("ElementPath")
}

pub fn element_path_should_start_with_slash(element: &str, action: &str) -> Diagnostic {
    Diagnostic::warning(
        ELEMENT_PATH_SHOULD_START_WITH_SLASH,
        format!(
            "The ElementPath attribute in {} element should start with '/' for JSONPointer syntax when using Action='{}' (e.g., '/propertyName').",
            element, action
        ),
    )
    .with_attribute("ElementPath")
}

pub fn invalid_json_path_syntax(element: &str, path: &str, reason: &str) -> Diagnostic {
    Diagnostic::warning(
        INVALID_JSON_PATH_SYNTAX,
        format!(
            "The ElementPath attribute in {} element may have invalid JSONPath syntax. Path: {}. Reason: {}",
            element, path, reason
        ),
    )
    .with_attribute("ElementPath")
}

pub fn unmatched_brackets_in_element_path(element: &str) -> Diagnostic {
    Diagnostic::warning(
        UNMATCHED_BRACKETS_IN_ELEMENT_PATH,
        format!(
            "The ElementPath attribute in {} element has unmatched brackets. Ensure all '[' have a corresponding ']'.",
            element
        ),
    )
    .with_attribute("ElementPath")
}

pub fn index_ignored(element: &str, action: &str) -> Diagnostic {
    Diagnostic::warning(
        INDEX_IGNORED,
        format!(
            "The Index attribute in {} element is only used with Action='insertArray' and will be ignored for Action='{}'.",
            element, action
        ),
    )
    .with_attribute("Index")
}

pub fn schema_file_unused(element: &str) -> Diagnostic {
    Diagnostic::warning(
        SCHEMA_FILE_UNUSED,
        format!(
            "The SchemaFile attribute in {} element has no effect unless ValidateSchema='yes'.",
            element
        ),
    )
    .with_attribute("SchemaFile")
}
