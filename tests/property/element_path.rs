use jsonfile::path_syntax::bracket_balance;
use jsonfile::*;
use proptest::prelude::*;

fn arb_action() -> impl Strategy<Value = ActionKind> {
    proptest::sample::select(ActionKind::ALL.to_vec())
}

/// Dotted JSONPath built from plain property names.
fn arb_dotted_path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z][A-Za-z0-9_]{0,8}", 1..5)
        .prop_map(|parts| format!("$.{}", parts.join(".")))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // The path lint is advisory: it never produces an error
    #[test]
    fn element_path_lint_never_errors(path in ".{0,40}", action in arb_action()) {
        for d in check_element_path(&path, action) {
            prop_assert_eq!(d.severity, DiagnosticSeverity::Warning, "{:?}: {}", path, d);
        }
    }

    // Plain dotted paths are clean for every JSONPath action
    #[test]
    fn dotted_paths_are_clean(path in arb_dotted_path(), action in arb_action()) {
        prop_assume!(!action.expects_pointer());
        let diagnostics = check_element_path(&path, action);
        prop_assert!(diagnostics.is_empty(), "{}: {:?}", path, diagnostics);
    }

    // Property references never unbalance a path
    #[test]
    fn property_references_keep_brackets_balanced(
        path in arb_dotted_path(),
        property in "[A-Z][A-Z0-9_]{0,8}",
    ) {
        let with_ref = format!("{}.[{}]", path, property);
        prop_assert_eq!(bracket_balance(&with_ref), 0);
        prop_assert!(check_element_path(&with_ref, ActionKind::Set).is_empty());
    }

    // Uppercase references never warn
    #[test]
    fn uppercase_references_are_clean(name in "[A-Z_][A-Z0-9_.]{0,16}") {
        let text = format!("prefix [{}] suffix", name);
        prop_assert!(check_property_references(&text, "Value").is_empty());
    }

    // A lowercase plain reference always warns exactly once
    #[test]
    fn lowercase_reference_warns_once(name in "[a-z][a-z0-9_]{0,16}") {
        let text = format!("[{}]", name);
        let diagnostics = check_property_references(&text, "Value");
        prop_assert_eq!(diagnostics.len(), 1);
        let expected = format!("[{}]", name.to_uppercase());
        prop_assert!(diagnostics[0].message.contains(&expected));
    }
}
