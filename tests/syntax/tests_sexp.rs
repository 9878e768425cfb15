//! S-expression rendering consumed by validation tooling

use rstest::rstest;

use crate::helpers::source_fixtures::*;

#[rstest]
#[case("", "(source_file)")]
#[case("// only a comment\n", "(source_file (comment))")]
#[case("/* a */ /* b */", "(source_file (comment) (comment))")]
#[case(
    "let s = 'tab\\there'",
    "(source_file (variable_declaration (variable_declarator name: (identifier) value: (expression (string_literal (escape_sequence))))))"
)]
#[case(
    "x = 1 // trailing",
    "(source_file (statement (expression_statement (expression (assignment_expression left: (identifier) right: (expression (numeric_literal)))))) (comment))"
)]
#[case(
    "import router from '@ohos.router'",
    "(source_file (import_declaration (identifier) source: (string_literal)))"
)]
#[case(
    "x = 1",
    "(source_file (statement (expression_statement (expression (assignment_expression left: (identifier) right: (expression (numeric_literal)))))))"
)]
fn test_exact_rendering(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(arkts::parse(source).to_sexp(), expected);
}

#[test]
fn test_component_rendering() {
    let sexp = arkts::parse(HELLO_COMPONENT).to_sexp();
    assert!(sexp.starts_with("(source_file (component_declaration decorator: (decorator) name: (identifier) body: (component_body (build_method body: (build_body"));
    assert!(sexp.contains("(arkts_ui_element (ui_component"));
    assert!(!sexp.contains("ERROR"));
}

#[test]
fn test_error_marker_is_substring() {
    let sexp = arkts::parse(UNCLOSED_CALL).to_sexp();
    assert!(sexp.contains("(ERROR"));
    let sexp = arkts::parse(UNCLOSED_STRUCT).to_sexp();
    assert!(sexp.contains("(MISSING \"}\")"));
}

#[test]
fn test_node_rendering_matches_subtree() {
    let tree = arkts::parse(HELLO_COMPONENT);
    let root = tree.root_node();
    let component = root.named_child(0).unwrap();
    assert!(tree.to_sexp().contains(&component.to_sexp()));
}

#[test]
fn test_every_fixture_balances_parentheses() {
    for source in WELL_FORMED {
        let sexp = arkts::parse(source).to_sexp();
        let opens = sexp.matches('(').count();
        let closes = sexp.matches(')').count();
        assert_eq!(opens, closes, "{sexp}");
    }
}
