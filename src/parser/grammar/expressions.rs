//! Expression primaries
//!
//! Binary, assignment, conditional, member, call, subscript and `as`
//! forms are not productions: the engine builds them by precedence
//! climbing around the primaries listed in `_primary_expression`.

use super::{
    ARGUMENTS, PRIMARY, Productions, Rule, choice, comma_list, conflict, expr, field, ident, kw,
    lit, name, operand, opt, prec_right, r, rep, seq, t, words,
};
use crate::parser::precedence::{ConflictGroup, Operand, level};
use crate::parser::SyntaxKind::*;

fn element() -> Rule {
    choice([r("spread_element"), expr()])
}

pub(super) fn define(p: &mut Productions) {
    p.hidden(
        PRIMARY,
        choice([
            r("arrow_function"),
            r("resource_expression"),
            r("state_binding_expression"),
            r("new_expression"),
            r("unary_expression"),
            r("prefix_update_expression"),
            ident(),
            lit("true", BOOLEAN_LITERAL),
            lit("false", BOOLEAN_LITERAL),
            lit("null", NULL_LITERAL),
            t(NUMBER),
            t(STRING),
            r("template_literal"),
            r("array_literal"),
            r("object_literal"),
            r("parenthesized_expression"),
            r("modifier_chain_expression"),
            r("at_expression"),
        ]),
    );
    p.hidden(ARGUMENTS, seq([t(L_PAREN), comma_list(element()), t(R_PAREN)]));

    p.node(
        "arrow_function",
        ARROW_FUNCTION,
        prec_right(
            level::ASSIGNMENT,
            seq([
                opt(kw("async")),
                field(PARAMETERS_FIELD, choice([ident(), r("parameter_list")])),
                opt(seq([t(COLON), field(RETURN_TYPE_FIELD, r("type_annotation"))])),
                t(FAT_ARROW),
                field(
                    BODY_FIELD,
                    conflict(ConflictGroup::BlockOrObject, [r("block_statement"), expr()]),
                ),
            ]),
        ),
    );

    p.node(
        "unary_expression",
        UNARY_EXPRESSION,
        seq([
            field(
                OPERATOR_FIELD,
                choice([
                    t(BANG),
                    t(MINUS),
                    t(PLUS),
                    t(TILDE),
                    words(&["typeof", "void", "delete"]),
                ]),
            ),
            field(ARGUMENT_FIELD, operand(Operand::at(level::UNARY))),
        ]),
    );
    p.node(
        "prefix_update_expression",
        UPDATE_EXPRESSION,
        seq([
            field(OPERATOR_FIELD, choice([t(PLUS_PLUS), t(MINUS_MINUS)])),
            field(ARGUMENT_FIELD, operand(Operand::at(level::UPDATE))),
        ]),
    );

    p.node(
        "new_expression",
        NEW_EXPRESSION,
        seq([
            kw("new"),
            field(CONSTRUCTOR_FIELD, operand(Operand::MEMBER_PATH)),
            opt(r(ARGUMENTS)),
        ]),
    );

    p.node(
        "state_binding_expression",
        STATE_BINDING_EXPRESSION,
        seq([t(DOLLAR), field(ARGUMENT_FIELD, operand(Operand::MEMBER_PATH))]),
    );
    p.node(
        "resource_expression",
        RESOURCE_EXPRESSION,
        seq([
            t(DOLLAR),
            words(&["r", "rawfile"]),
            t(L_PAREN),
            field(ARGUMENT_FIELD, t(STRING)),
            t(R_PAREN),
        ]),
    );
    p.node("at_expression", AT_EXPRESSION, seq([t(AT), expr()]));

    p.node(
        "parenthesized_expression",
        PARENTHESIZED_EXPRESSION,
        seq([t(L_PAREN), expr(), t(R_PAREN)]),
    );

    p.node(
        "array_literal",
        ARRAY_LITERAL,
        seq([
            t(L_BRACKET),
            opt(element()),
            rep(seq([t(COMMA), opt(element())])),
            t(R_BRACKET),
        ]),
    );
    p.node(
        "spread_element",
        SPREAD_ELEMENT,
        seq([t(ELLIPSIS), expr()]),
    );

    p.node(
        "object_literal",
        OBJECT_LITERAL,
        seq([
            t(L_BRACE),
            comma_list(choice([r("property_assignment"), r("spread_element")])),
            t(R_BRACE),
        ]),
    );
    p.node(
        "property_assignment",
        PROPERTY_ASSIGNMENT,
        choice([
            seq([
                field(KEY_FIELD, r("property_name")),
                t(COLON),
                field(VALUE_FIELD, expr()),
            ]),
            field(KEY_FIELD, ident()),
        ]),
    );
    p.node(
        "property_name",
        PROPERTY_NAME,
        choice([
            name(),
            t(STRING),
            t(NUMBER),
            seq([t(L_BRACKET), expr(), t(R_BRACKET)]),
        ]),
    );

    p.node(
        "template_literal",
        TEMPLATE_LITERAL,
        seq([
            t(BACKTICK),
            rep(choice([t(TEMPLATE_CHARS), r("template_substitution")])),
            t(BACKTICK),
        ]),
    );
    p.node(
        "template_substitution",
        TEMPLATE_SUBSTITUTION,
        seq([t(DOLLAR_L_BRACE), expr(), t(R_BRACE)]),
    );
}
