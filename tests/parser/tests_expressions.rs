//! Expression parsing and operator precedence
//!
//! Binary operators group by the level ladder; assignment and the
//! conditional operator group to the right.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::tree_assertions::{assert_lossless, contains, find, parse_clean};

/// Operator text of the top binary expression and whether its left and
/// right operands hold another binary expression
fn top_binary(source: &str) -> (String, bool, bool) {
    let tree = parse_clean(source);
    let top = find(&tree, "binary_expression");
    let operator = top.child_by_field_name("operator").unwrap().text().to_string();
    let left = top.child_by_field_name("left").unwrap();
    let right = top.child_by_field_name("right").unwrap();
    (
        operator,
        contains(&left, "binary_expression"),
        contains(&right, "binary_expression"),
    )
}

#[rstest]
#[case::higher_on_right("a + b * c", "+", false, true)]
#[case::higher_on_left("a * b + c", "+", true, false)]
#[case::left_assoc_additive("a - b - c", "-", true, false)]
#[case::left_assoc_multiplicative("a / b % c", "%", true, false)]
#[case::logical("a || b && c", "||", false, true)]
#[case::bitwise("a | b ^ c & d", "|", false, true)]
#[case::equality_over_relational("a == b < c", "==", false, true)]
#[case::shift_over_relational("a < b << c", "<", false, true)]
#[case::exponent_groups_left("a ** b ** c", "**", true, false)]
#[case::instanceof("a instanceof B && c", "&&", true, false)]
fn test_binary_precedence(
    #[case] source: &str,
    #[case] operator: &str,
    #[case] nested_left: bool,
    #[case] nested_right: bool,
) {
    assert_eq!(
        top_binary(source),
        (operator.to_string(), nested_left, nested_right)
    );
}

#[test]
fn test_assignment_is_right_associative() {
    let tree = parse_clean("a = b = c");
    let top = find(&tree, "assignment_expression");
    assert_eq!(top.child_by_field_name("left").unwrap().text(), "a");
    let right = top.child_by_field_name("right").unwrap();
    assert_eq!(right.text(), "b = c");
    assert!(contains(&right, "assignment_expression"));
}

#[test]
fn test_compound_assignment() {
    let tree = parse_clean("this.count += 1");
    let top = find(&tree, "assignment_expression");
    assert_eq!(top.child_by_field_name("operator").unwrap().text(), "+=");
    assert_eq!(
        top.child_by_field_name("left").unwrap().type_name(),
        "member_expression"
    );
}

#[test]
fn test_assignment_binds_looser_than_binary() {
    let tree = parse_clean("x = a + b");
    let top = find(&tree, "assignment_expression");
    assert!(contains(&top.child_by_field_name("right").unwrap(), "binary_expression"));
}

#[test]
fn test_conditional_is_right_associative() {
    let tree = parse_clean("a ? b : c ? d : e");
    let top = find(&tree, "conditional_expression");
    assert_eq!(top.child_by_field_name("condition").unwrap().text(), "a");
    let alternative = top.child_by_field_name("alternative").unwrap();
    assert_eq!(alternative.text(), "c ? d : e");
    assert!(contains(&alternative, "conditional_expression"));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let tree = parse_clean("-a * b");
    let top = find(&tree, "binary_expression");
    assert!(contains(&top.child_by_field_name("left").unwrap(), "unary_expression"));
}

#[test]
fn test_postfix_chain() {
    let tree = parse_clean("router.pushUrl({ url: 'pages/Second' }).then(done)[0]");
    let subscript = find(&tree, "subscript_expression");
    let object = subscript.child_by_field_name("object").unwrap();
    let call = object.named_child(0).unwrap();
    assert_eq!(call.type_name(), "call_expression");
    assert_eq!(
        call.child_by_field_name("function").unwrap().text(),
        "router.pushUrl({ url: 'pages/Second' }).then"
    );
}

#[rstest]
#[case("$r('app.string.title')", "resource_expression")]
#[case("$count", "state_binding_expression")]
#[case("new Map()", "new_expression")]
#[case("(a, b) => a + b", "arrow_function")]
#[case("async () => { await(x) }", "arrow_function")]
#[case("[1, ...rest, 3]", "array_literal")]
#[case("`total: ${a + b}`", "template_literal")]
#[case("value as string", "as_expression")]
#[case("i++", "update_expression")]
#[case("typeof x", "unary_expression")]
fn test_expression_forms(#[case] expression: &str, #[case] expected: &str) {
    let source = format!("let v = {expression}");
    let tree = parse_clean(&source);
    let value = find(&tree, "variable_declarator")
        .child_by_field_name("value")
        .unwrap();
    assert_eq!(value.text(), expression);
    assert_eq!(value.named_child(0).unwrap().type_name(), expected);
    assert_lossless(&tree, &source);
}

#[test]
fn test_template_substitution_reenters_expressions() {
    let tree = parse_clean("let s = `a ${x ? `b ${y}` : 'c'} d`");
    let substitutions: Vec<_> = tree
        .root_node()
        .descendants()
        .filter(|n| n.type_name() == "template_substitution")
        .collect();
    assert_eq!(substitutions.len(), 2);
    assert!(contains(&substitutions[0], "conditional_expression"));
}

#[test]
fn test_object_literal_as_argument() {
    let tree = parse_clean("f({ a: 1, b, ...rest })");
    let object = find(&tree, "object_literal");
    assert_eq!(
        object
            .named_children()
            .iter()
            .map(|n| n.type_name())
            .collect::<Vec<_>>(),
        ["property_assignment", "property_assignment", "spread_element"]
    );
}
