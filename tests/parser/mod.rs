mod tests_components;
mod tests_expressions;
mod tests_lexer;
mod tests_recovery;
