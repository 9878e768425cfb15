//! S-expression rendering
//!
//! The format is the one tree-sitter prints: named nodes only, each as
//! `(type child...)`, with `field: ` in front of a child that fills a field.
//! Recovered spans render as `(ERROR ...)` and zero-width placeholders as
//! `(MISSING "}")`.

use super::tree::Node;

pub(crate) fn render(node: &Node<'_>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node<'_>, out: &mut String) {
    if node.is_missing() {
        out.push_str("(MISSING \"");
        out.push_str(&node.type_name());
        out.push_str("\")");
        return;
    }

    out.push('(');
    out.push_str(&node.type_name());
    let shown = node
        .children()
        .into_iter()
        .filter(|child| child.is_named() || child.is_missing());
    for child in shown {
        out.push(' ');
        if let Some(field) = child.field_name() {
            out.push_str(field);
            out.push_str(": ");
        }
        write_node(&child, out);
    }
    out.push(')');
}
