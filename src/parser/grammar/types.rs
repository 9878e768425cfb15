//! Type annotations

use super::{
    Productions, Rule, choice, comma_sep1, field, ident, kw, lit, name, opt, r, rep, rep1, seq, t,
    words,
};
use crate::parser::SyntaxKind::*;

const PRIMITIVES: &[&str] = &[
    "number", "string", "boolean", "void", "any", "object", "undefined", "never", "unknown",
];

fn element_type() -> Rule {
    choice([words(PRIMITIVES), r("generic_type"), ident()])
}

pub(super) fn define(p: &mut Productions) {
    p.node(
        "type_annotation",
        TYPE_ANNOTATION,
        choice([r("union_type"), r("_primary_type")]),
    );
    p.hidden(
        "_primary_type",
        choice([
            words(PRIMITIVES),
            lit("null", NULL_LITERAL),
            r("array_type"),
            r("generic_type"),
            r("function_type"),
            r("object_type"),
            ident(),
            t(STRING),
            t(NUMBER),
            seq([t(L_PAREN), r("type_annotation"), t(R_PAREN)]),
        ]),
    );

    p.node(
        "array_type",
        ARRAY_TYPE,
        seq([element_type(), rep1(seq([t(L_BRACKET), t(R_BRACKET)]))]),
    );
    p.node(
        "generic_type",
        GENERIC_TYPE,
        seq([field(NAME_FIELD, ident()), r("type_arguments")]),
    );
    p.node(
        "type_arguments",
        TYPE_ARGUMENTS,
        seq([t(LT), comma_sep1(r("type_annotation")), t(GT)]),
    );
    p.node(
        "union_type",
        UNION_TYPE,
        seq([r("_primary_type"), rep1(seq([t(PIPE), r("_primary_type")]))]),
    );
    p.node(
        "function_type",
        FUNCTION_TYPE,
        seq([
            field(PARAMETERS_FIELD, r("parameter_list")),
            t(FAT_ARROW),
            field(RETURN_TYPE_FIELD, r("type_annotation")),
        ]),
    );

    p.node(
        "object_type",
        OBJECT_TYPE,
        seq([
            t(L_BRACE),
            rep(seq([
                choice([r("method_signature"), r("type_member")]),
                opt(choice([t(COMMA), t(SEMICOLON)])),
            ])),
            t(R_BRACE),
        ]),
    );
    p.node(
        "type_member",
        TYPE_MEMBER,
        seq([
            opt(kw("readonly")),
            field(NAME_FIELD, name()),
            opt(t(QUESTION)),
            t(COLON),
            field(TYPE_FIELD, r("type_annotation")),
        ]),
    );
    p.node(
        "method_signature",
        METHOD_SIGNATURE,
        seq([
            field(NAME_FIELD, name()),
            opt(t(QUESTION)),
            field(PARAMETERS_FIELD, r("parameter_list")),
            opt(seq([t(COLON), field(RETURN_TYPE_FIELD, r("type_annotation"))])),
        ]),
    );

    p.node(
        "type_parameters",
        TYPE_PARAMETERS,
        seq([t(LT), comma_sep1(ident()), t(GT)]),
    );
}
