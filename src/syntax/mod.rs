// Parsed trees and the edits that feed incremental reparsing
mod edit;
mod sexp;
mod tree;

pub use edit::Edit;
pub use tree::{Node, Tree};
