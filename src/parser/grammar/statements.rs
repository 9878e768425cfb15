//! Statements and blocks

use super::{
    Productions, Rule, braced, choice, comma_sep1, conflict, expr, field, ident, kw, opt, r, seq,
    t, words,
};
use crate::parser::errors::ParseContext;
use crate::parser::precedence::ConflictGroup;
use crate::parser::SyntaxKind::*;

const DECLARATION_WORDS: &[&str] = &["var", "let", "const"];

/// Body of `if`, `else` and loops: a bare block or any statement
fn clause() -> Rule {
    choice([r("block_statement"), r("statement")])
}

pub(super) fn define(p: &mut Productions) {
    p.node(
        "statement",
        STATEMENT,
        conflict(
            ConflictGroup::BlockOrObject,
            [
                r("block_statement"),
                r("expression_statement"),
                r("if_statement"),
                r("variable_declaration"),
                r("return_statement"),
                r("try_statement"),
                r("throw_statement"),
                r("for_statement"),
                r("for_in_statement"),
                r("while_statement"),
                r("break_statement"),
                r("continue_statement"),
                r("labeled_statement"),
                r("function_declaration"),
                r("empty_statement"),
            ],
        ),
    );

    p.node("empty_statement", EMPTY_STATEMENT, t(SEMICOLON));
    p.node(
        "expression_statement",
        EXPRESSION_STATEMENT,
        seq([expr(), opt(t(SEMICOLON))]),
    );
    p.node(
        "block_statement",
        BLOCK_STATEMENT,
        braced(r("statement"), ParseContext::Block),
    );

    p.node(
        "if_statement",
        IF_STATEMENT,
        seq([
            kw("if"),
            t(L_PAREN),
            field(CONDITION_FIELD, expr()),
            t(R_PAREN),
            field(CONSEQUENCE_FIELD, clause()),
            opt(seq([
                kw("else"),
                field(
                    ALTERNATIVE_FIELD,
                    choice([r("if_statement"), r("block_statement"), r("statement")]),
                ),
            ])),
        ]),
    );

    p.node(
        "variable_declaration",
        VARIABLE_DECLARATION,
        seq([
            words(DECLARATION_WORDS),
            comma_sep1(r("variable_declarator")),
            opt(t(SEMICOLON)),
        ]),
    );
    // The `for (init; ...)` initializer: a declaration that owns no `;`
    p.node(
        "lexical_declaration",
        VARIABLE_DECLARATION,
        seq([words(DECLARATION_WORDS), comma_sep1(r("variable_declarator"))]),
    );
    p.node(
        "variable_declarator",
        VARIABLE_DECLARATOR,
        seq([
            field(NAME_FIELD, ident()),
            opt(t(BANG)),
            opt(seq([t(COLON), field(TYPE_FIELD, r("type_annotation"))])),
            opt(seq([t(EQ), field(VALUE_FIELD, expr())])),
        ]),
    );

    p.node(
        "return_statement",
        RETURN_STATEMENT,
        seq([kw("return"), opt(expr()), opt(t(SEMICOLON))]),
    );
    p.node(
        "throw_statement",
        THROW_STATEMENT,
        seq([kw("throw"), expr(), opt(t(SEMICOLON))]),
    );

    p.node(
        "try_statement",
        TRY_STATEMENT,
        seq([
            kw("try"),
            field(BODY_FIELD, r("block_statement")),
            choice([
                seq([
                    field(HANDLER_FIELD, r("catch_clause")),
                    opt(field(FINALIZER_FIELD, r("finally_clause"))),
                ]),
                field(FINALIZER_FIELD, r("finally_clause")),
            ]),
        ]),
    );
    p.node(
        "catch_clause",
        CATCH_CLAUSE,
        seq([
            kw("catch"),
            opt(seq([
                t(L_PAREN),
                field(PARAMETER_FIELD, ident()),
                opt(seq([t(COLON), field(TYPE_FIELD, r("type_annotation"))])),
                t(R_PAREN),
            ])),
            field(BODY_FIELD, r("block_statement")),
        ]),
    );
    p.node(
        "finally_clause",
        FINALLY_CLAUSE,
        seq([kw("finally"), field(BODY_FIELD, r("block_statement"))]),
    );

    p.node(
        "for_statement",
        FOR_STATEMENT,
        seq([
            kw("for"),
            t(L_PAREN),
            opt(field(
                INITIALIZER_FIELD,
                choice([r("lexical_declaration"), expr()]),
            )),
            t(SEMICOLON),
            opt(field(CONDITION_FIELD, expr())),
            t(SEMICOLON),
            opt(field(INCREMENT_FIELD, expr())),
            t(R_PAREN),
            field(BODY_FIELD, clause()),
        ]),
    );
    p.node(
        "for_in_statement",
        FOR_IN_STATEMENT,
        seq([
            kw("for"),
            t(L_PAREN),
            words(DECLARATION_WORDS),
            field(LEFT_FIELD, ident()),
            field(OPERATOR_FIELD, words(&["of", "in"])),
            field(RIGHT_FIELD, expr()),
            t(R_PAREN),
            field(BODY_FIELD, clause()),
        ]),
    );
    p.node(
        "while_statement",
        WHILE_STATEMENT,
        seq([
            kw("while"),
            t(L_PAREN),
            field(CONDITION_FIELD, expr()),
            t(R_PAREN),
            field(BODY_FIELD, clause()),
        ]),
    );

    p.node(
        "break_statement",
        BREAK_STATEMENT,
        seq([kw("break"), opt(field(LABEL_FIELD, ident())), opt(t(SEMICOLON))]),
    );
    p.node(
        "continue_statement",
        CONTINUE_STATEMENT,
        seq([kw("continue"), opt(field(LABEL_FIELD, ident())), opt(t(SEMICOLON))]),
    );
    p.node(
        "labeled_statement",
        LABELED_STATEMENT,
        seq([
            field(LABEL_FIELD, ident()),
            t(COLON),
            field(BODY_FIELD, r("statement")),
        ]),
    );
}
