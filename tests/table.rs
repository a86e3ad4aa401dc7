#![cfg(feature = "xml")]

use jsonfile::serialize::serialize_json;
use jsonfile::table::{self, ColumnCategory, JsonFileRow};
use jsonfile::*;

fn directives(xml_body: &str) -> Vec<Directive> {
    let xml = format!(
        "<Wix xmlns:json=\"{}\">\n{}\n</Wix>",
        EXTENSION_NAMESPACE, xml_body
    );
    compile_str(&xml, &CompileOptions::default())
        .unwrap()
        .directives
        .into_iter()
        .map(|c| c.directive)
        .collect()
}

const MIXED: &str = r#"<Component Id="C1">
  <json:JsonFile File="b.json" ElementPath="$.x" Value="1" Sequence="3" />
  <json:JsonFile File="a.json" ElementPath="$.y" Value="2" Sequence="2" />
  <json:JsonFile File="b.json" ElementPath="$.z" Value="3" Sequence="1" />
  <json:JsonFile File="a.json" ElementPath="$.items" Action="insertArray" Value="4" Index="0" Sequence="x" />
</Component>"#;

// ─── Columns ────────────────────────────────────────────────────────────────

#[test]
fn basic_layout_has_nine_columns() {
    let names: Vec<_> = table::columns(SchemaVersion::Basic)
        .iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "JsonConfig",
            "File",
            "ElementPath",
            "Value",
            "DefaultValue",
            "Flags",
            "Component_",
            "Sequence",
            "Property",
        ]
    );
}

#[test]
fn core_layout_has_seven_columns() {
    let names: Vec<_> = table::columns(SchemaVersion::Core)
        .iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "JsonConfig",
            "File",
            "ElementPath",
            "Value",
            "Flags",
            "Component_",
            "Sequence",
        ]
    );
}

#[test]
fn extended_layout_appends_index_and_schema_file() {
    let cols = table::columns(SchemaVersion::Extended);
    assert_eq!(cols.len(), 11);
    assert_eq!(cols[9].name, "Index");
    assert_eq!(cols[9].category, ColumnCategory::Integer);
    assert_eq!(cols[10].name, "SchemaFile");
    assert_eq!(cols[10].category, ColumnCategory::Formatted);
}

#[test]
fn key_columns_are_marked() {
    let cols = table::columns(SchemaVersion::Basic);
    assert!(cols[0].primary_key);
    assert!(!cols[0].nullable);
    let component = cols.iter().find(|c| c.name == "Component_").unwrap();
    assert_eq!(component.key_table, Some("Component"));
    let flags = cols.iter().find(|c| c.name == "Flags").unwrap();
    assert_eq!(flags.max_value, Some(65536));
}

// ─── Rows ───────────────────────────────────────────────────────────────────

#[test]
fn rows_are_ordered_by_file_then_sequence() {
    let rows = table::rows(&directives(MIXED), SchemaVersion::Extended);
    let order: Vec<(&str, Option<i32>)> = rows
        .iter()
        .map(|r| (r.file.as_deref().unwrap_or(""), r.sequence))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a.json", None),
            ("a.json", Some(2)),
            ("b.json", Some(1)),
            ("b.json", Some(3)),
        ]
    );
}

#[test]
fn row_copies_directive_fields() {
    let directives = directives(MIXED);
    let row = JsonFileRow::from_directive(&directives[3], SchemaVersion::Extended);
    assert_eq!(row.json_config, directives[3].id);
    assert_eq!(row.element_path, "$.items");
    assert_eq!(row.flags, 64);
    assert_eq!(row.component, "C1");
    assert_eq!(row.index, Some(Some(0)));
    assert_eq!(row.schema_file, Some(None));
    assert_eq!(row.default_value, Some(None));
    assert_eq!(row.property, Some(None));
}

#[test]
fn core_rows_omit_property_columns() {
    let directives = directives(MIXED);
    let row = JsonFileRow::from_directive(&directives[0], SchemaVersion::Core);
    assert_eq!(row.default_value, None);
    assert_eq!(row.property, None);
    assert_eq!(row.index, None);
}

#[test]
fn basic_rows_omit_extended_columns() {
    let directives = directives(MIXED);
    let row = JsonFileRow::from_directive(&directives[0], SchemaVersion::Basic);
    assert_eq!(row.index, None);
    assert_eq!(row.schema_file, None);
}

// ─── Serialization ──────────────────────────────────────────────────────────

#[test]
fn json_uses_column_names() {
    let rows = table::rows(&directives(MIXED), SchemaVersion::Extended);
    let json = serialize_json(&rows).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];
    assert_eq!(first["File"], "a.json");
    assert_eq!(first["Component_"], "C1");
    assert_eq!(first["Flags"], 64);
    assert_eq!(first["Index"], 0);
    assert!(first["SchemaFile"].is_null());
    assert!(first.as_object().unwrap().contains_key("SchemaFile"));
}

#[test]
fn basic_json_has_no_extended_keys() {
    let rows = table::rows(&directives(MIXED), SchemaVersion::Basic);
    let json = serialize_json(&rows).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for row in value.as_array().unwrap() {
        let obj = row.as_object().unwrap();
        assert!(!obj.contains_key("Index"));
        assert!(!obj.contains_key("SchemaFile"));
    }
}

#[test]
fn core_json_keys_match_core_columns() {
    let rows = table::rows(&directives(MIXED), SchemaVersion::Core);
    let json = serialize_json(&rows).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let expected: Vec<&str> = table::columns(SchemaVersion::Core)
        .iter()
        .map(|c| c.name)
        .collect();
    for row in value.as_array().unwrap() {
        let keys: Vec<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, expected);
    }
}

#[test]
fn yaml_output_lists_every_row() {
    let rows = table::rows(&directives(MIXED), SchemaVersion::Extended);
    let yaml = serialize(&rows).unwrap();
    assert_eq!(yaml.matches("JsonConfig:").count(), 4, "{}", yaml);
    assert!(yaml.contains("$.items"), "{}", yaml);
}

// ─── Options ────────────────────────────────────────────────────────────────

#[test]
fn options_default_to_extended_x64() {
    let options = CompileOptions::from_yaml("").unwrap();
    assert_eq!(options, CompileOptions::default());
    assert_eq!(options.schema_version, SchemaVersion::Extended);
    assert_eq!(options.platform, Platform::X64);
    assert_eq!(options.extension_namespace, EXTENSION_NAMESPACE);
}

#[test]
fn options_read_from_yaml() {
    let options = CompileOptions::from_yaml("schema_version: basic\nplatform: arm64\n").unwrap();
    assert_eq!(options.schema_version, SchemaVersion::Basic);
    assert_eq!(options.platform, Platform::Arm64);
    assert_eq!(options.extension_namespace, EXTENSION_NAMESPACE);

    let options = CompileOptions::from_yaml("schema_version: core\n").unwrap();
    assert_eq!(options.schema_version, SchemaVersion::Core);
}

#[test]
fn unknown_option_value_is_a_config_error() {
    let err = CompileOptions::from_yaml("schema_version: legacy\n").unwrap_err();
    assert!(matches!(err, JsonFileError::Config(_)), "{:?}", err);
}
