//! Persisted row layout consumed by the installer-table binder.

use serde::Serialize;

use crate::enums::SchemaVersion;
use crate::types::Directive;

/// Name of the installer table rows are written to.
pub const TABLE_NAME: &str = "Wix4JsonFile";

/// How the binder treats a column's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnCategory {
    Identifier,
    /// May contain `[PROPERTY]` references resolved at install time.
    Formatted,
    Integer,
}

/// One column of the persisted table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub category: ColumnCategory,
    pub nullable: bool,
    pub primary_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_table: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

const fn column(name: &'static str, category: ColumnCategory, nullable: bool) -> ColumnDefinition {
    ColumnDefinition {
        name,
        category,
        nullable,
        primary_key: false,
        key_table: None,
        max_value: None,
    }
}

/// Columns of the table for a schema version, in persisted order.
pub fn columns(version: SchemaVersion) -> Vec<ColumnDefinition> {
    let property_columns = version.has_property_columns();
    let mut cols = vec![
        ColumnDefinition {
            primary_key: true,
            ..column("JsonConfig", ColumnCategory::Identifier, false)
        },
        column("File", ColumnCategory::Formatted, true),
        column("ElementPath", ColumnCategory::Formatted, false),
        column("Value", ColumnCategory::Formatted, true),
    ];
    if property_columns {
        cols.push(column("DefaultValue", ColumnCategory::Formatted, true));
    }
    cols.extend([
        ColumnDefinition {
            max_value: Some(65536),
            ..column("Flags", ColumnCategory::Integer, false)
        },
        ColumnDefinition {
            key_table: Some("Component"),
            ..column("Component_", ColumnCategory::Identifier, false)
        },
        column("Sequence", ColumnCategory::Integer, true),
    ]);
    if property_columns {
        cols.push(column("Property", ColumnCategory::Identifier, true));
    }
    if version.has_extended_columns() {
        cols.push(column("Index", ColumnCategory::Integer, true));
        cols.push(column("SchemaFile", ColumnCategory::Formatted, true));
    }
    cols
}

/// One row as persisted. Columns the target version lacks are `None` and
/// left out of the serialized row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JsonFileRow {
    #[serde(rename = "JsonConfig")]
    pub json_config: String,
    #[serde(rename = "File")]
    pub file: Option<String>,
    #[serde(rename = "ElementPath")]
    pub element_path: String,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "DefaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Option<String>>,
    #[serde(rename = "Flags")]
    pub flags: u32,
    #[serde(rename = "Component_")]
    pub component: String,
    #[serde(rename = "Sequence")]
    pub sequence: Option<i32>,
    #[serde(rename = "Property", skip_serializing_if = "Option::is_none")]
    pub property: Option<Option<String>>,
    #[serde(rename = "Index", skip_serializing_if = "Option::is_none")]
    pub index: Option<Option<i32>>,
    #[serde(rename = "SchemaFile", skip_serializing_if = "Option::is_none")]
    pub schema_file: Option<Option<String>>,
}

impl JsonFileRow {
    pub fn from_directive(directive: &Directive, version: SchemaVersion) -> Self {
        let extended = version.has_extended_columns();
        let property_columns = version.has_property_columns();
        JsonFileRow {
            json_config: directive.id.clone(),
            file: Some(directive.file.clone()),
            element_path: directive.element_path.clone(),
            value: directive.value.clone(),
            default_value: property_columns.then(|| directive.default_value.clone()),
            flags: directive.encoded_flags(),
            component: directive.component_ref.clone(),
            sequence: directive.sequence,
            property: property_columns.then(|| directive.property.clone()),
            index: extended.then_some(directive.index),
            schema_file: extended.then(|| directive.schema_file.clone()),
        }
    }
}

/// Rows for a set of directives, ordered the way the runtime reads them:
/// by file, then by sequence (absent sequences first).
pub fn rows<'a>(
    directives: impl IntoIterator<Item = &'a Directive>,
    version: SchemaVersion,
) -> Vec<JsonFileRow> {
    let mut rows: Vec<JsonFileRow> = directives
        .into_iter()
        .map(|d| JsonFileRow::from_directive(d, version))
        .collect();
    rows.sort_by(|a, b| a.file.cmp(&b.file).then(a.sequence.cmp(&b.sequence)));
    rows
}
