//! Node view over parsed trees: spans, children, fields, errors

#![allow(clippy::unwrap_used)]

use arkts::{Point, Span};

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_assertions::{assert_lossless, find, find_all, parse_clean};

#[test]
fn test_root_covers_source() {
    for source in WELL_FORMED {
        let tree = arkts::parse(source);
        assert_lossless(&tree, source);
        assert_eq!(tree.text(), *source);
        assert!(tree.root_node().parent().is_none());
    }
}

#[test]
fn test_children_are_ordered_and_contiguous() {
    let tree = parse_clean(COUNTER_PAGE);
    for node in tree.root_node().descendants() {
        let children = node.children();
        for pair in children.windows(2) {
            assert!(pair[0].end_byte() <= pair[1].start_byte());
        }
        for child in &children {
            assert!(node.start_byte() <= child.start_byte());
            assert!(child.end_byte() <= node.end_byte());
            assert_eq!(child.parent().as_ref(), Some(&node));
        }
    }
}

#[test]
fn test_named_children_skip_punctuation() {
    let tree = parse_clean("let a = 1, b = 2;");
    let declaration = find(&tree, "variable_declaration");
    assert_eq!(declaration.child_count(), 5);
    assert_eq!(declaration.named_child_count(), 2);
    assert!(declaration.named_children().iter().all(|n| n.type_name() == "variable_declarator"));
    assert_eq!(declaration.child(4).unwrap().type_name(), ";");
}

#[test]
fn test_repeated_field() {
    let tree = parse_clean(COUNTER_PAGE);
    let component = find(&tree, "component_declaration");
    let decorators = component.children_by_field_name("decorator");
    let names: Vec<_> = decorators
        .iter()
        .map(|d| d.child_by_field_name("name").unwrap().text())
        .collect();
    assert_eq!(names, ["Entry", "Component"]);
    assert!(component.child_by_field_name("nonexistent").is_none());
}

#[test]
fn test_positions() {
    let tree = parse_clean(HELLO_COMPONENT);
    let text = find(&tree, "ui_component");
    assert_eq!(text.start_position(), Point::new(3, 4));
    assert_eq!(text.end_position(), Point::new(3, 14));
    assert_eq!(text.span(), Span::new(Point::new(3, 4), Point::new(3, 14)));
    assert_eq!(text.text(), "Text('hi')");
    assert_eq!(
        tree.line_index().offset(Point::new(3, 4)),
        Some(arkts::TextSize::from(text.start_byte() as u32))
    );
}

#[test]
fn test_has_error_is_recursive() {
    let tree = arkts::parse(UNCLOSED_CALL);
    let root = tree.root_node();
    assert!(root.has_error());
    let component = find(&tree, "component_declaration");
    assert!(component.has_error());
    let name = component.child_by_field_name("name").unwrap();
    assert!(!name.has_error());
    let decorator = find(&tree, "decorator");
    assert!(!decorator.has_error());
}

#[test]
fn test_descendants_skip_field_wrappers() {
    let tree = parse_clean(LIST_PAGE);
    assert!(
        tree.root_node()
            .descendants()
            .all(|n| !n.kind().is_field() && !n.kind().is_trivia())
    );
    assert_eq!(find_all(&tree, "ui_component").len(), 5);
}

#[test]
fn test_clone_shares_structure() {
    let tree = arkts::parse(COUNTER_PAGE);
    let copy = tree.clone();
    assert!(tree.structurally_eq(&copy));
    assert_eq!(tree.green(), copy.green());
    assert_eq!(tree.to_sexp(), copy.to_sexp());
}

#[test]
fn test_trees_are_shareable_across_threads() {
    let tree = std::sync::Arc::new(arkts::parse(COUNTER_PAGE));
    let expected = tree.to_sexp();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || tree.to_sexp())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
