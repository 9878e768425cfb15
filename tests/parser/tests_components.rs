//! Declarative UI parsing: components, decorators, build bodies, modifier
//! chains and UI control flow

#![allow(clippy::unwrap_used)]

use arkts::parser::ast::{AstNode, Item, SourceFile};
use rstest::rstest;

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_assertions::{contains, find, find_all, parse_clean};

fn source_file(source: &str) -> SourceFile {
    SourceFile::cast(arkts::parse(source).syntax()).unwrap()
}

// ============================================================================
// Decorators
// ============================================================================

#[rstest]
#[case("@Component\nstruct A {\n  build() {}\n}\n", 1)]
#[case("@Entry\n@Component\nstruct A {\n  build() {}\n}\n", 2)]
#[case("@Entry\n@Component\n@Preview\nstruct A {\n  build() {}\n}\n", 3)]
#[case("@Entry @Component @CustomDialog @Reusable struct A { build() {} }", 4)]
fn test_decorators_attach_to_one_component(#[case] source: &str, #[case] count: usize) {
    let tree = parse_clean(source);
    let components = find_all(&tree, "component_declaration");
    assert_eq!(components.len(), 1);
    let decorators = components[0].children_by_field_name("decorator");
    assert_eq!(decorators.len(), count);
    assert!(decorators.iter().all(|d| d.type_name() == "decorator"));
}

#[test]
fn test_decorator_with_arguments() {
    let tree = parse_clean(
        "@Component\nstruct A {\n  @Watch('onCount') @State count: number = 0\n  build() {}\n}\n",
    );
    let property = find(&tree, "property_declaration");
    let decorators = property.children_by_field_name("decorator");
    assert_eq!(decorators.len(), 2);
    assert_eq!(decorators[0].text(), "@Watch('onCount')");
    assert_eq!(
        decorators[0].child_by_field_name("name").unwrap().text(),
        "Watch"
    );
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_component_fields() {
    let tree = parse_clean(HELLO_COMPONENT);
    let component = find(&tree, "component_declaration");
    assert_eq!(component.child_by_field_name("name").unwrap().text(), "Hello");
    let body = component.child_by_field_name("body").unwrap();
    assert_eq!(body.type_name(), "component_body");
    let build = body.named_child(0).unwrap();
    assert_eq!(build.type_name(), "build_method");
    assert_eq!(
        build.child_by_field_name("body").unwrap().type_name(),
        "build_body"
    );
}

#[rstest]
#[case::counter(COUNTER_PAGE)]
#[case::list(LIST_PAGE)]
#[case::plain(PLAIN_SCRIPT)]
fn test_fixture_parses_cleanly(#[case] source: &str) {
    let tree = parse_clean(source);
    assert_eq!(tree.root_node().type_name(), "source_file");
    assert!(tree.errors().is_empty());
}

#[test]
fn test_counter_page_structure() {
    let file = source_file(COUNTER_PAGE);
    assert_eq!(file.imports().count(), 1);

    let component = file.components().next().unwrap();
    assert!(component.is_entry());
    assert_eq!(component.name().unwrap().text(), "Counter");

    let body = component.body().unwrap();
    let names: Vec<_> = body
        .properties()
        .filter_map(|p| p.name())
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(names, ["count", "label"]);
    assert_eq!(body.methods().count(), 1);
    assert!(body.build_method().is_some());
}

#[test]
fn test_items_in_source_order() {
    let file = source_file(PLAIN_SCRIPT);
    let kinds: Vec<_> = file
        .items()
        .map(|item| match item {
            Item::Import(_) => "import",
            Item::Component(_) => "component",
            Item::Class(_) => "class",
            Item::Function(_) => "function",
            Item::Interface(_) => "interface",
            Item::Enum(_) => "enum",
        })
        .collect();
    assert_eq!(kinds, ["interface", "enum", "class", "function"]);
}

// ============================================================================
// Modifier chains
// ============================================================================

#[test]
fn test_modifier_chain_is_greedy() {
    let tree = parse_clean(
        "@Component\nstruct A {\n  build() {\n    Text('hi').fontSize(12).fontColor('#ff0000')\n  }\n}\n",
    );
    let elements = find_all(&tree, "ui_element_with_modifiers");
    assert_eq!(elements.len(), 1);
    let element = &elements[0];
    assert_eq!(
        element.child_by_field_name("component").unwrap().text(),
        "Text('hi')"
    );
    let segments: Vec<_> = element
        .descendants()
        .filter(|n| n.type_name() == "modifier_chain_expression")
        .collect();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].child_by_field_name("name").unwrap().text(), "fontSize");
    assert_eq!(segments[1].child_by_field_name("name").unwrap().text(), "fontColor");
    assert!(!contains(element, "member_expression"));
}

#[test]
fn test_modifiers_after_container_block() {
    let tree = parse_clean(
        "@Component\nstruct A {\n  build() {\n    Column() {\n      Text('a')\n    }\n    .width('100%')\n  }\n}\n",
    );
    let element = find(&tree, "ui_element_with_modifiers");
    let component = element.child_by_field_name("component").unwrap();
    assert_eq!(component.type_name(), "ui_component");
    assert_eq!(
        component.child_by_field_name("body").unwrap().type_name(),
        "container_content_body"
    );
    assert_eq!(
        element
            .child_by_field_name("modifiers")
            .unwrap()
            .child_by_field_name("name")
            .unwrap()
            .text(),
        "width"
    );
}

#[test]
fn test_bare_component_without_modifiers() {
    let tree = parse_clean(HELLO_COMPONENT);
    let element = find(&tree, "arkts_ui_element");
    assert_eq!(element.named_child(0).unwrap().type_name(), "ui_component");
    assert!(find_all(&tree, "ui_element_with_modifiers").is_empty());
}

// ============================================================================
// UI control flow
// ============================================================================

#[test]
fn test_for_each_fields() {
    let tree = parse_clean(COUNTER_PAGE);
    let for_each = find(&tree, "for_each_statement");
    assert_eq!(for_each.parent().unwrap().type_name(), "ui_control_flow");
    assert_eq!(
        for_each.child_by_field_name("source").unwrap().text(),
        "this.items"
    );
    assert_eq!(
        for_each.child_by_field_name("generator").unwrap().type_name(),
        "arrow_function"
    );
    assert_eq!(
        for_each.child_by_field_name("key").unwrap().text(),
        "(item: string) => item"
    );
}

#[test]
fn test_ui_if_else() {
    let tree = parse_clean(COUNTER_PAGE);
    let branch = find(&tree, "ui_if_statement");
    assert_eq!(
        branch.child_by_field_name("condition").unwrap().text(),
        "this.count > 3"
    );
    assert_eq!(
        find_all(&tree, "ui_component")
            .iter()
            .filter(|c| c.text().starts_with("Text('"))
            .count(),
        2
    );
}

#[rstest]
#[case("Text('x')", "ui_component")]
#[case("Button('ok') {\n      Text('x')\n    }", "ui_component")]
#[case("MyCard({ title: 'x' })", "ui_component")]
#[case("this.helper()", "expression_statement")]
#[case("if (a) {\n      Text('x')\n    }", "ui_control_flow")]
fn test_build_body_items(#[case] item: &str, #[case] expected: &str) {
    let source = format!("@Component\nstruct A {{\n  build() {{\n    {item}\n  }}\n}}\n");
    let tree = parse_clean(&source);
    let body = find(&tree, "build_body");
    let first = body.named_child(0).unwrap();
    let first = if first.type_name() == "arkts_ui_element" {
        first.named_child(0).unwrap()
    } else {
        first
    };
    assert_eq!(first.type_name(), expected, "{}", tree.to_sexp());
}

#[test]
fn test_component_parameters() {
    let tree = parse_clean(
        "@Component\nstruct A {\n  build() {\n    MyCard({ title: 'x', count: 2 })\n  }\n}\n",
    );
    let parameters = find_all(&tree, "component_parameter");
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[1].child_by_field_name("name").unwrap().text(), "count");
    assert!(find_all(&tree, "object_literal").is_empty());
}

#[test]
fn test_builder_function_takes_build_body() {
    let tree = parse_clean("@Builder\nfunction header(title: string) {\n  Text(title)\n}\n");
    let function = find(&tree, "function_declaration");
    assert_eq!(
        function.child_by_field_name("body").unwrap().type_name(),
        "build_body"
    );
}

#[test]
fn test_extend_function_takes_modifier_body() {
    let tree = parse_clean("@Extend(Text)\nfunction fancy() {\n  .fontSize(20)\n  .fontColor(Color.Red)\n}\n");
    let function = find(&tree, "function_declaration");
    assert_eq!(
        function.child_by_field_name("body").unwrap().type_name(),
        "extend_function_body"
    );
}

#[test]
fn test_plain_function_takes_block() {
    let tree = parse_clean("function f() {\n  g()\n}\n");
    let function = find(&tree, "function_declaration");
    assert_eq!(
        function.child_by_field_name("body").unwrap().type_name(),
        "block_statement"
    );
}
