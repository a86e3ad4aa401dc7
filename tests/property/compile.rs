use jsonfile::compile::compile_element;
use jsonfile::*;
use proptest::prelude::*;

fn element(attrs: &[(String, String)]) -> SourceElement {
    attrs.iter().fold(
        SourceElement::new(
            QName::qualified(EXTENSION_NAMESPACE, "JsonFile"),
            SourceLocation::new(1, 1),
        ),
        |el, (name, value)| el.with_attribute(name, value),
    )
}

/// Diagnostics in a canonical order, independent of attribute order.
fn canonical(diagnostics: &[Diagnostic]) -> Vec<Diagnostic> {
    let mut sorted = diagnostics.to_vec();
    sorted.sort_by(|a, b| (&a.code, &a.attribute, &a.message).cmp(&(&b.code, &b.attribute, &b.message)));
    sorted
}

fn compile(attrs: &[(String, String)]) -> ElementOutcome {
    compile_element(
        &element(attrs),
        &ComponentContext::new("Comp"),
        &CompileOptions::default(),
    )
}

/// Attribute sets mixing legal, illegal and unknown names and values.
fn arb_attributes() -> impl Strategy<Value = Vec<(String, String)>> {
    let name = proptest::sample::select(vec![
        "File",
        "ElementPath",
        "Value",
        "Action",
        "On",
        "Property",
        "Sequence",
        "Index",
        "DefaultValue",
        "DistinctValues",
        "Foo",
    ]);
    let value = prop_oneof![
        Just("setValue".to_string()),
        Just("readValue".to_string()),
        Just("insertArray".to_string()),
        Just("both".to_string()),
        Just("yes".to_string()),
        Just("$.a[0]".to_string()),
        Just("/a/b".to_string()),
        Just("[prop]".to_string()),
        Just("".to_string()),
        "[a-zA-Z0-9$./]{1,8}",
    ];
    proptest::collection::btree_map(name, value, 0..8).prop_map(|attrs| {
        attrs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Emitted iff no error-level diagnostic
    #[test]
    fn emission_iff_no_errors(attrs in arb_attributes()) {
        let outcome = compile(&attrs);
        prop_assert_eq!(outcome.compiled.is_some(), !outcome.has_errors(),
            "{:?}", outcome.diagnostics);
    }

    // Every emitted directive carries exactly one action bit, a file and a path
    #[test]
    fn emitted_directives_are_well_formed(attrs in arb_attributes()) {
        let outcome = compile(&attrs);
        if let Some(compiled) = &outcome.compiled {
            let d = &compiled.directive;
            prop_assert!(!d.file.is_empty());
            prop_assert!(!d.element_path.is_empty());
            prop_assert_eq!(FlagSet::decode(d.encoded_flags()), Ok(d.flags));
            prop_assert_eq!(d.property.is_some(), d.action() == ActionKind::Read);
            let expected_handler = if d.action() == ActionKind::Read {
                HandlerReference::READ_HANDLER
            } else {
                HandlerReference::SCHEDULE_HANDLER
            };
            prop_assert_eq!(compiled.handler.name.as_str(), expected_handler);
        }
    }

    // Reordering attributes changes nothing
    #[test]
    fn attribute_order_is_irrelevant(attrs in arb_attributes()) {
        let forward = compile(&attrs);
        let mut reversed = attrs.clone();
        reversed.reverse();
        let backward = compile(&reversed);
        prop_assert_eq!(forward.compiled, backward.compiled);
        prop_assert_eq!(canonical(&forward.diagnostics), canonical(&backward.diagnostics));
    }

    // Compilation is deterministic
    #[test]
    fn compilation_is_deterministic(attrs in arb_attributes()) {
        let a = compile(&attrs);
        let b = compile(&attrs);
        prop_assert_eq!(a.compiled, b.compiled);
        prop_assert_eq!(a.diagnostics, b.diagnostics);
    }
}
