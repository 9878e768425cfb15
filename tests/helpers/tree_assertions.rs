//! Tree assertion helpers.

use arkts::{Node, Tree};

/// Parse and assert the tree is free of errors.
pub fn parse_clean(source: &str) -> Tree {
    let tree = arkts::parse(source);
    assert!(
        !tree.has_error(),
        "Expected a clean parse, got:\n{}\nErrors: {:?}",
        tree.to_sexp(),
        tree.errors()
    );
    tree
}

/// First node of the given type in preorder.
pub fn find<'t>(tree: &'t Tree, type_name: &str) -> Node<'t> {
    tree.root_node()
        .descendants()
        .find(|n| n.type_name() == type_name)
        .unwrap_or_else(|| panic!("no `{type_name}` in:\n{}", tree.to_sexp()))
}

/// Every node of the given type in preorder.
pub fn find_all<'t>(tree: &'t Tree, type_name: &str) -> Vec<Node<'t>> {
    tree.root_node()
        .descendants()
        .filter(|n| n.type_name() == type_name)
        .collect()
}

/// Whether `node` has a descendant (or is itself) of the given type.
pub fn contains(node: &Node<'_>, type_name: &str) -> bool {
    node.descendants().any(|n| n.type_name() == type_name)
}

/// Assert the root spans the whole source and its text is the source.
pub fn assert_lossless(tree: &Tree, source: &str) {
    assert_eq!(tree.root_node().byte_range(), 0..source.len());
    assert_eq!(tree.syntax().text().to_string(), source);
}
