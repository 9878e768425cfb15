//! Top-level and member declarations

use super::{
    Productions, Rule, braced, choice, comma_list, comma_sep1, conflict, expr, field, ident,
    items, kw, name, opt, r, rep, rep1, seq, t, words,
};
use crate::parser::errors::ParseContext;
use crate::parser::precedence::ConflictGroup;
use crate::parser::SyntaxKind::*;

/// Fixed decorator vocabulary; any other identifier is a custom decorator
pub const DECORATOR_NAMES: &[&str] = &[
    "Entry",
    "Component",
    "State",
    "Prop",
    "Link",
    "Provide",
    "Consume",
    "Builder",
    "Styles",
    "Extend",
    "AnimatableExtend",
    "Watch",
    "StorageLink",
    "StorageProp",
    "LocalStorageLink",
    "LocalStorageProp",
    "ObjectLink",
    "Observed",
];

const ACCESS: &[&str] = &["private", "public", "protected"];

fn decorators() -> Rule {
    rep(field(DECORATOR_FIELD, r("decorator")))
}

fn export_prefix() -> Rule {
    opt(seq([kw("export"), opt(kw("default"))]))
}

fn return_type() -> Rule {
    opt(seq([t(COLON), field(RETURN_TYPE_FIELD, r("type_annotation"))]))
}

/// Body of a function or method; the decorators decide its shape
fn function_body() -> Rule {
    conflict(
        ConflictGroup::DecoratedBody,
        [
            r("extend_function_body"),
            r("build_body"),
            r("block_statement"),
        ],
    )
}

pub(super) fn define(p: &mut Productions) {
    p.node(
        "source_file",
        SOURCE_FILE,
        items(r("_top_level_item"), ParseContext::TopLevel),
    );
    p.hidden(
        "_top_level_item",
        conflict(
            ConflictGroup::DecoratorOrExpression,
            [
                r("import_declaration"),
                r("export_declaration"),
                r("component_declaration"),
                r("interface_declaration"),
                r("type_declaration"),
                r("enum_declaration"),
                r("class_declaration"),
                r("function_declaration"),
                r("variable_declaration"),
                r("statement"),
            ],
        ),
    );

    let source = || field(SOURCE_FIELD, t(STRING));
    p.node(
        "import_declaration",
        IMPORT_DECLARATION,
        seq([
            kw("import"),
            choice([
                seq([ident(), kw("from"), source()]),
                seq([t(L_BRACE), comma_list(ident()), t(R_BRACE), kw("from"), source()]),
                seq([t(STAR), kw("as"), ident(), kw("from"), source()]),
                source(),
            ]),
            opt(t(SEMICOLON)),
        ]),
    );

    p.node(
        "export_declaration",
        EXPORT_DECLARATION,
        seq([
            kw("export"),
            choice([
                r("component_declaration"),
                r("interface_declaration"),
                r("type_declaration"),
                r("enum_declaration"),
                r("class_declaration"),
                r("function_declaration"),
                r("variable_declaration"),
                seq([
                    kw("default"),
                    choice([
                        r("component_declaration"),
                        r("class_declaration"),
                        r("function_declaration"),
                        seq([expr(), opt(t(SEMICOLON))]),
                    ]),
                ]),
            ]),
        ]),
    );

    p.node(
        "decorator",
        DECORATOR,
        seq([
            t(AT),
            field(NAME_FIELD, choice([words(DECORATOR_NAMES), ident()])),
            opt(seq([t(L_PAREN), comma_list(expr()), t(R_PAREN)])),
        ]),
    );

    p.node(
        "component_declaration",
        COMPONENT_DECLARATION,
        seq([
            decorators(),
            export_prefix(),
            kw("struct"),
            field(NAME_FIELD, ident()),
            opt(field(TYPE_PARAMETERS_FIELD, r("type_parameters"))),
            field(BODY_FIELD, r("component_body")),
        ]),
    );
    p.node(
        "component_body",
        COMPONENT_BODY,
        braced(
            conflict(
                ConflictGroup::BuildOrMethod,
                [
                    r("build_method"),
                    r("method_declaration"),
                    r("property_declaration"),
                ],
            ),
            ParseContext::ComponentBody,
        ),
    );

    p.node(
        "property_declaration",
        PROPERTY_DECLARATION,
        seq([
            decorators(),
            rep(words(&["private", "public", "protected", "static", "readonly"])),
            field(NAME_FIELD, ident()),
            opt(choice([t(QUESTION), t(BANG)])),
            opt(seq([t(COLON), field(TYPE_FIELD, r("type_annotation"))])),
            opt(seq([t(EQ), field(VALUE_FIELD, expr())])),
            opt(t(SEMICOLON)),
        ]),
    );

    p.node(
        "method_declaration",
        METHOD_DECLARATION,
        seq([
            decorators(),
            rep(words(&["private", "public", "protected", "static", "async"])),
            field(NAME_FIELD, ident()),
            opt(field(TYPE_PARAMETERS_FIELD, r("type_parameters"))),
            field(PARAMETERS_FIELD, r("parameter_list")),
            return_type(),
            choice([field(BODY_FIELD, function_body()), t(SEMICOLON)]),
        ]),
    );

    p.node(
        "build_method",
        BUILD_METHOD,
        seq([
            kw("build"),
            t(L_PAREN),
            t(R_PAREN),
            return_type(),
            field(BODY_FIELD, r("build_body")),
        ]),
    );

    p.node(
        "constructor_declaration",
        CONSTRUCTOR_DECLARATION,
        seq([
            opt(words(ACCESS)),
            kw("constructor"),
            field(PARAMETERS_FIELD, r("parameter_list")),
            field(BODY_FIELD, r("block_statement")),
        ]),
    );

    p.node(
        "function_declaration",
        FUNCTION_DECLARATION,
        seq([
            decorators(),
            opt(kw("async")),
            kw("function"),
            field(NAME_FIELD, ident()),
            opt(field(TYPE_PARAMETERS_FIELD, r("type_parameters"))),
            field(PARAMETERS_FIELD, r("parameter_list")),
            return_type(),
            field(BODY_FIELD, function_body()),
        ]),
    );

    p.node(
        "extend_function_body",
        EXTEND_FUNCTION_BODY,
        seq([
            t(L_BRACE),
            rep1(seq([r("modifier_chain_expression"), opt(t(SEMICOLON))])),
            t(R_BRACE),
        ]),
    );

    p.node(
        "class_declaration",
        CLASS_DECLARATION,
        seq([
            decorators(),
            export_prefix(),
            opt(kw("abstract")),
            kw("class"),
            field(NAME_FIELD, ident()),
            opt(field(TYPE_PARAMETERS_FIELD, r("type_parameters"))),
            opt(seq([kw("extends"), field(SUPERCLASS_FIELD, r("type_annotation"))])),
            opt(seq([kw("implements"), comma_sep1(r("type_annotation"))])),
            field(BODY_FIELD, r("class_body")),
        ]),
    );
    p.node(
        "class_body",
        CLASS_BODY,
        braced(
            conflict(
                ConflictGroup::ConstructorOrMethod,
                [
                    r("constructor_declaration"),
                    r("method_declaration"),
                    r("property_declaration"),
                ],
            ),
            ParseContext::ClassBody,
        ),
    );

    p.node(
        "interface_declaration",
        INTERFACE_DECLARATION,
        seq([
            kw("interface"),
            field(NAME_FIELD, ident()),
            opt(field(TYPE_PARAMETERS_FIELD, r("type_parameters"))),
            opt(seq([kw("extends"), comma_sep1(r("type_annotation"))])),
            field(BODY_FIELD, r("interface_body")),
        ]),
    );
    // an `object_type` whose members recover one at a time
    p.node(
        "interface_body",
        OBJECT_TYPE,
        braced(
            seq([
                choice([r("method_signature"), r("type_member")]),
                opt(choice([t(COMMA), t(SEMICOLON)])),
            ]),
            ParseContext::InterfaceBody,
        ),
    );

    p.node(
        "type_declaration",
        TYPE_DECLARATION,
        seq([
            kw("type"),
            field(NAME_FIELD, ident()),
            opt(field(TYPE_PARAMETERS_FIELD, r("type_parameters"))),
            t(EQ),
            field(VALUE_FIELD, r("type_annotation")),
            opt(t(SEMICOLON)),
        ]),
    );

    p.node(
        "enum_declaration",
        ENUM_DECLARATION,
        seq([
            opt(kw("const")),
            kw("enum"),
            field(NAME_FIELD, ident()),
            field(BODY_FIELD, r("enum_body")),
        ]),
    );
    p.node(
        "enum_body",
        ENUM_BODY,
        seq([t(L_BRACE), comma_list(r("enum_member")), t(R_BRACE)]),
    );
    p.node(
        "enum_member",
        ENUM_MEMBER,
        seq([
            field(NAME_FIELD, choice([name(), t(STRING)])),
            opt(seq([t(EQ), field(VALUE_FIELD, expr())])),
        ]),
    );

    p.node(
        "parameter_list",
        PARAMETER_LIST,
        seq([t(L_PAREN), comma_list(r("parameter")), t(R_PAREN)]),
    );
    p.node(
        "parameter",
        PARAMETER,
        seq([
            opt(t(ELLIPSIS)),
            field(NAME_FIELD, ident()),
            opt(t(QUESTION)),
            opt(seq([t(COLON), field(TYPE_FIELD, r("type_annotation"))])),
            opt(seq([t(EQ), field(VALUE_FIELD, expr())])),
        ]),
    );
}
