#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonfile::compile::compile_element;
use jsonfile::*;
use libfuzzer_sys::fuzz_target;

const ATTRIBUTES: [&str; 15] = [
    "Id",
    "File",
    "ElementPath",
    "Value",
    "DefaultValue",
    "Property",
    "Action",
    "On",
    "Sequence",
    "Index",
    "SchemaFile",
    "ValidateSchema",
    "DistinctValues",
    "OnlyIfExists",
    "Bogus",
];

const VERSIONS: [SchemaVersion; 3] = [
    SchemaVersion::Core,
    SchemaVersion::Basic,
    SchemaVersion::Extended,
];

/// Generate a `JsonFile` element with known attribute names and arbitrary values.
fn arbitrary_element(u: &mut Unstructured<'_>) -> arbitrary::Result<SourceElement> {
    let mut element = SourceElement::new(
        QName::qualified(EXTENSION_NAMESPACE, "JsonFile"),
        SourceLocation::new(1, 1),
    );
    let count = u.int_in_range(0..=8)?;
    for _ in 0..count {
        let name = *u.choose(&ATTRIBUTES)?;
        let value = String::arbitrary(u)?;
        element = element.with_attribute(name, &value);
    }
    Ok(element)
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let options = match u.choose(&VERSIONS) {
        Ok(&schema_version) => CompileOptions {
            schema_version,
            ..CompileOptions::default()
        },
        Err(_) => return,
    };
    let element = match arbitrary_element(&mut u) {
        Ok(e) => e,
        Err(_) => return,
    };

    let outcome = compile_element(&element, &ComponentContext::new("C"), &options);
    assert_eq!(outcome.compiled.is_some(), !outcome.has_errors());
    if let Some(compiled) = &outcome.compiled {
        assert!(options.schema_version.allows_action(compiled.directive.action()));
    }
});
