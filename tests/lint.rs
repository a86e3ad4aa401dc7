use jsonfile::messages;
use jsonfile::path_syntax::{bracket_balance, check_element_path, contains_unescaped_brackets};
use jsonfile::property_ref::{check_property_references, is_plain_property, property_references};
use jsonfile::{ActionKind, DiagnosticSeverity};

fn path_codes(path: &str, action: ActionKind) -> Vec<String> {
    check_element_path(path, action)
        .into_iter()
        .map(|d| d.code)
        .collect()
}

fn assert_path(path: &str, action: ActionKind, expected: &[&str]) {
    assert_eq!(
        path_codes(path, action),
        expected,
        "path {:?} with {}",
        path,
        action
    );
}

// ─── ElementPath: prefix ────────────────────────────────────────────────────

#[test]
fn plain_json_paths_are_clean() {
    let cases = [
        "$",
        "$.a",
        "$.Logging.LogLevel.Default",
        "$['key']",
        "$..name",
        "$..*",
        "$.a..",
        "$.[PROPERTY]",
    ];
    for path in cases {
        assert_path(path, ActionKind::Set, &[]);
    }
}

#[test]
fn json_path_without_dollar_warns() {
    assert_path("a.b", ActionKind::Set, &[messages::ELEMENT_PATH_SHOULD_START_WITH_DOLLAR]);
    assert_path("/a/b", ActionKind::Delete, &[messages::ELEMENT_PATH_SHOULD_START_WITH_DOLLAR]);
}

#[test]
fn pointer_path_is_expected_for_create() {
    assert_path("/a/b", ActionKind::CreateJsonPointerValue, &[]);
    assert_path("/", ActionKind::CreateJsonPointerValue, &[]);
    assert_path(
        "$.a",
        ActionKind::CreateJsonPointerValue,
        &[messages::ELEMENT_PATH_SHOULD_START_WITH_SLASH],
    );
}

#[test]
fn pointer_path_skips_bracket_checks() {
    // Brackets in a pointer are neither selectors nor unbalanced-bracket errors.
    assert_path("/a[0", ActionKind::CreateJsonPointerValue, &[]);
}

#[test]
fn create_with_json_path_still_gets_basic_checks() {
    assert_path(
        "$a",
        ActionKind::CreateJsonPointerValue,
        &[
            messages::ELEMENT_PATH_SHOULD_START_WITH_SLASH,
            messages::INVALID_JSON_PATH_SYNTAX,
        ],
    );
}

// ─── ElementPath: unescaped brackets ────────────────────────────────────────

#[test]
fn selectors_in_brackets_warn_once() {
    for path in ["$.a[0]", "$.a[*]", "$.a[?(@.x==1)]", "$.a[0].b[1]", "$..[0]"] {
        assert_path(path, ActionKind::Set, &[messages::UNESCAPED_BRACKETS_IN_ELEMENT_PATH]);
    }
}

#[test]
fn escaped_brackets_do_not_warn() {
    assert_path(r"$.a[\[]0[\]]", ActionKind::Set, &[]);
    assert_path(r"$.a[\[]*[\]]", ActionKind::Set, &[]);
    assert!(!contains_unescaped_brackets(r"[\[]0[\]]"));
}

#[test]
fn property_like_brackets_are_not_selectors() {
    assert!(!contains_unescaped_brackets("$.[INSTALLFOLDER]"));
    assert!(!contains_unescaped_brackets("$.a[]"));
    assert!(!contains_unescaped_brackets("$.a[?x]"));
    assert!(contains_unescaped_brackets("$.a[12]"));
}

#[test]
fn unescaped_bracket_message_shows_escapes() {
    let diagnostics = check_element_path("$.a[0]", ActionKind::Set);
    assert!(diagnostics[0].message.contains(r"[\[]"), "{}", diagnostics[0].message);
    assert!(diagnostics[0].message.contains("$.a[0]"));
}

// ─── ElementPath: basic JSONPath syntax ─────────────────────────────────────

#[test]
fn dollar_must_be_followed_by_dot_or_bracket() {
    assert_path("$a", ActionKind::Set, &[messages::INVALID_JSON_PATH_SYNTAX]);
    assert_path("$ .a", ActionKind::Set, &[messages::INVALID_JSON_PATH_SYNTAX]);
}

#[test]
fn bad_recursive_descent_warns_once() {
    assert_path("$..1", ActionKind::Set, &[messages::INVALID_JSON_PATH_SYNTAX]);
    assert_path("$..1..2", ActionKind::Set, &[messages::INVALID_JSON_PATH_SYNTAX]);
    // Only the second occurrence is malformed.
    assert_path("$..a..#", ActionKind::Set, &[messages::INVALID_JSON_PATH_SYNTAX]);
}

#[test]
fn recursive_descent_reason_is_reported() {
    let diagnostics = check_element_path("$..-", ActionKind::Set);
    assert_eq!(diagnostics.len(), 1);
    assert!(
        diagnostics[0].message.contains("Recursive descent"),
        "{}",
        diagnostics[0].message
    );
}

#[test]
fn unmatched_brackets_warn() {
    assert_path("$.a[0", ActionKind::Set, &[messages::UNMATCHED_BRACKETS_IN_ELEMENT_PATH]);
    assert_path("$.a]", ActionKind::Set, &[messages::UNMATCHED_BRACKETS_IN_ELEMENT_PATH]);
}

#[test]
fn bracket_balance_honours_backslash() {
    assert_eq!(bracket_balance("[["), 2);
    assert_eq!(bracket_balance("[]"), 0);
    assert_eq!(bracket_balance(r"\["), 0);
    assert_eq!(bracket_balance(r"[\]"), 1);
}

#[test]
fn double_backslash_leaves_bracket_counted() {
    assert_eq!(bracket_balance(r"\\["), 1);
    assert_path(r"$.a\\[", ActionKind::Set, &[messages::UNMATCHED_BRACKETS_IN_ELEMENT_PATH]);
}

#[test]
fn path_lints_are_never_errors() {
    let paths = ["", "$", "$$", "[", "]", "$..", "/[", r"\", "$.a[?(@", "😀[0]"];
    for path in paths {
        for action in ActionKind::ALL {
            for d in check_element_path(path, action) {
                assert_eq!(d.severity, DiagnosticSeverity::Warning, "{:?}: {}", path, d);
            }
        }
    }
}

// ─── Property references ────────────────────────────────────────────────────

#[test]
fn references_are_extracted_in_order() {
    let refs: Vec<&str> = property_references("[A]x[#b]y[]z[c d]").collect();
    assert_eq!(refs, vec!["A", "#b", "c d"]);
}

#[test]
fn lowercase_reference_suggests_uppercase() {
    let diagnostics = check_property_references("prefix [myprop] suffix", "Value");
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.code, messages::PROPERTY_REFERENCE_SHOULD_BE_UPPERCASE);
    assert_eq!(d.severity, DiagnosticSeverity::Warning);
    assert_eq!(d.attribute.as_deref(), Some("Value"));
    assert!(d.message.contains("'[myprop]'"), "{}", d.message);
    assert!(d.message.contains("'[MYPROP]'"), "{}", d.message);
}

#[test]
fn sigil_references_are_exempt() {
    for text in ["[#MyFile.exe]", "[!MyFile.exe]", "[$MyComponent]", "[%TEMP]"] {
        assert!(check_property_references(text, "Value").is_empty(), "{}", text);
    }
}

#[test]
fn escaped_brackets_are_not_references() {
    assert!(!is_plain_property(r"\["));
    assert!(!is_plain_property(r"\]"));
    assert!(check_property_references(r"[\[]0[\]]", "Value").is_empty());
}

#[test]
fn each_offending_reference_warns() {
    let diagnostics = check_property_references("[INSTALLFOLDER][sub]\\[Mixed_Case]", "File");
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.attribute.as_deref() == Some("File")));
}

#[test]
fn uppercase_and_symbol_only_references_pass() {
    for text in ["[INSTALLFOLDER]", "[MY_PROP.2]", "[123]", "[_]"] {
        assert!(check_property_references(text, "Value").is_empty(), "{}", text);
    }
}
