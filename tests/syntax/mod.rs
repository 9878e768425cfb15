mod tests_sexp;
mod tests_tree;
