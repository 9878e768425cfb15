//! Error tolerance: malformed input still yields a full tree

#![allow(clippy::unwrap_used)]

use arkts::ErrorCode;
use proptest::prelude::*;
use rstest::rstest;

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_assertions::{assert_lossless, find, find_all};

#[test]
fn test_unclosed_call_keeps_component() {
    let tree = arkts::parse(UNCLOSED_CALL);
    assert!(tree.has_error());
    assert!(tree.root_node().named_child_count() > 0);

    let component = find(&tree, "component_declaration");
    assert_eq!(component.child_by_field_name("name").unwrap().text(), "Broken");
    assert!(component.has_error());

    let error = find(&tree, "ERROR");
    assert!(error.is_error());
    assert_eq!(error.text(), "Text('Hello'");
    assert_eq!(error.parent().unwrap().type_name(), "build_body");
    assert!(tree.errors().iter().any(|e| e.code == ErrorCode::E0203));
    assert_lossless(&tree, UNCLOSED_CALL);
}

#[test]
fn test_unclosed_struct_gets_missing_brace() {
    let tree = arkts::parse(UNCLOSED_STRUCT);
    let missing: Vec<_> = tree
        .root_node()
        .descendants()
        .filter(|n| n.is_missing())
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].type_name(), "}");
    assert!(missing[0].byte_range().is_empty());
    assert_eq!(missing[0].parent().unwrap().type_name(), "component_body");
    assert_eq!(tree.errors().len(), 1);
    assert_eq!(tree.errors()[0].code, ErrorCode::E0202);
    assert!(tree.to_sexp().contains("(MISSING \"}\")"));
}

#[test]
fn test_stray_braces_are_skipped_one_by_one() {
    let tree = arkts::parse(STRAY_BRACES);
    assert_eq!(find_all(&tree, "ERROR").len(), 3);
    assert_eq!(tree.errors().len(), 3);
    assert!(tree.errors().iter().all(|e| e.code == ErrorCode::E0205));
    assert_eq!(find_all(&tree, "variable_declaration").len(), 1);
}

#[test]
fn test_recovery_resumes_at_next_member() {
    let source = "@Component\nstruct A {\n  @State = 1\n  @Prop title: string = ''\n  build() {}\n}\n";
    let tree = arkts::parse(source);
    assert!(tree.has_error());
    let properties = find_all(&tree, "property_declaration");
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].child_by_field_name("name").unwrap().text(), "title");
    assert_eq!(find_all(&tree, "build_method").len(), 1);
}

#[test]
fn test_undecorated_struct_keeps_declaration() {
    let tree = arkts::parse(UNDECORATED_UNCLOSED_CALL);
    let component = find(&tree, "component_declaration");
    assert_eq!(component.child_by_field_name("name").unwrap().text(), "A");
    assert_eq!(find_all(&tree, "build_method").len(), 1);
    assert!(find_all(&tree, "expression_statement").is_empty());

    let error = find(&tree, "ERROR");
    assert_eq!(error.text(), "Text('Hello'");
    assert_eq!(error.parent().unwrap().type_name(), "build_body");
    assert_lossless(&tree, UNDECORATED_UNCLOSED_CALL);
}

#[test]
fn test_class_method_with_error_stays_a_method() {
    let tree = arkts::parse(CLASS_METHOD_ERROR);
    assert_eq!(tree.errors().len(), 1);
    assert!(find_all(&tree, "property_declaration").is_empty());

    let methods = find_all(&tree, "method_declaration");
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].child_by_field_name("name").unwrap().text(), "foo");
    assert!(methods[0].has_error());
    assert!(!methods[1].has_error());

    let error = find(&tree, "ERROR");
    assert_eq!(error.parent().unwrap().type_name(), "block_statement");
    assert_eq!(error.parent().unwrap().parent().unwrap().type_name(), "method_declaration");
    assert_lossless(&tree, CLASS_METHOD_ERROR);
}

#[test]
fn test_component_method_with_error_stays_a_method() {
    let tree = arkts::parse(COMPONENT_METHOD_ERROR);
    assert_eq!(tree.errors().len(), 1);
    assert_eq!(find_all(&tree, "component_declaration").len(), 1);
    assert_eq!(find_all(&tree, "build_method").len(), 1);
    assert!(find_all(&tree, "property_declaration").is_empty());

    let method = find(&tree, "method_declaration");
    assert_eq!(method.child_by_field_name("name").unwrap().text(), "helper");
    assert!(method.has_error());
    assert_eq!(method.parent().unwrap().type_name(), "component_body");
    assert_lossless(&tree, COMPONENT_METHOD_ERROR);
}

#[test]
fn test_interface_member_error_keeps_interface() {
    let tree = arkts::parse(INTERFACE_MEMBER_ERROR);
    assert_eq!(tree.errors().len(), 1);
    let interface = find(&tree, "interface_declaration");
    assert_eq!(interface.child_by_field_name("name").unwrap().text(), "I");
    assert_eq!(find_all(&tree, "type_member").len(), 1);

    let error = find(&tree, "ERROR");
    assert_eq!(error.text(), "b:");
    assert_eq!(error.parent().unwrap().type_name(), "object_type");
    assert_lossless(&tree, INTERFACE_MEMBER_ERROR);
}

fn nested_columns(depth: usize) -> String {
    let mut source = String::from("@Component\nstruct Deep {\n  build() {\n");
    source.push_str(&"Column() {\n".repeat(depth));
    source.push_str(&"}\n".repeat(depth));
    source.push_str("  }\n}\n");
    source
}

fn nested_parens(depth: usize) -> String {
    format!("let a = {}1{}\n", "(".repeat(depth), ")".repeat(depth))
}

fn assert_too_deep(tree: &arkts::Tree, source: &str) {
    assert!(tree.has_error());
    assert!(tree.errors().iter().any(|e| e.code == ErrorCode::E0206));
    assert!(!find_all(tree, "ERROR").is_empty());
    assert_lossless(tree, source);
}

#[test]
fn test_deep_nesting_on_small_stack() {
    let worker = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let columns = nested_columns(300);
            let tree = arkts::parse(&columns);
            assert_eq!(find_all(&tree, "component_declaration").len(), 1);
            assert_eq!(find_all(&tree, "build_method").len(), 1);
            assert_too_deep(&tree, &columns);

            let parens = nested_parens(1000);
            assert_too_deep(&arkts::parse(&parens), &parens);
        })
        .unwrap();
    worker.join().unwrap();
}

#[test]
fn test_deep_nesting_in_batch() {
    let columns = nested_columns(300);
    let parens = nested_parens(1000);
    let trees = arkts::parse_batch(&[columns.as_str(), parens.as_str(), HELLO_COMPONENT]);
    assert_too_deep(&trees[0], &columns);
    assert_too_deep(&trees[1], &parens);
    assert!(!trees[2].has_error());
}

#[test]
fn test_nesting_below_limit_parses_clean() {
    let tree = arkts::parse(&nested_columns(40));
    assert!(!tree.has_error(), "{}", tree.to_sexp());
    assert_eq!(find_all(&tree, "container_content_body").len(), 40);
}

#[test]
fn test_error_messages_point_into_source() {
    let tree = arkts::parse(UNCLOSED_CALL);
    for error in tree.errors() {
        assert!(usize::from(error.range.end()) <= UNCLOSED_CALL.len());
        assert!(!error.message.is_empty());
        assert!(error.format().contains(error.code.as_str()));
    }
}

#[rstest]
#[case::unclosed_call(UNCLOSED_CALL)]
#[case::unclosed_struct(UNCLOSED_STRUCT)]
#[case::stray_braces(STRAY_BRACES)]
#[case::undecorated_unclosed_call(UNDECORATED_UNCLOSED_CALL)]
#[case::class_method_error(CLASS_METHOD_ERROR)]
#[case::component_method_error(COMPONENT_METHOD_ERROR)]
#[case::interface_member_error(INTERFACE_MEMBER_ERROR)]
#[case::lone_decorator("@")]
#[case::unterminated_string("let s = 'abc")]
#[case::unterminated_template("let s = `abc ${x")]
#[case::invalid_character("let a = 1 # 2")]
#[case::dangling_operator("a + ")]
#[case::unclosed_comment("/* never closed")]
#[case::struct_without_body("struct A extends {")]
fn test_malformed_input_yields_tree(#[case] source: &str) {
    let tree = arkts::parse(source);
    assert!(tree.has_error(), "{}", tree.to_sexp());
    assert!(tree.root_node().child_count() > 0);
    assert!(tree.to_sexp().contains("ERROR") || tree.to_sexp().contains("MISSING"));
    assert_lossless(&tree, source);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_parse_is_total(input in "[a-z{}()\\[\\];.,@=+*'` \n]{0,48}") {
        let tree = arkts::parse(&input);
        prop_assert_eq!(tree.root_node().type_name(), "source_file");
        prop_assert_eq!(tree.syntax().text().to_string(), input.clone());
        if !input.is_empty() {
            prop_assert!(tree.syntax().children_with_tokens().count() > 0);
        }
        prop_assert_eq!(tree.has_error(), !tree.errors().is_empty());
    }
}
