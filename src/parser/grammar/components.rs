//! Declarative UI: build bodies, component calls, modifier chains and UI
//! control flow

use super::{
    Productions, Rule, braced, choice, comma_list, conflict, expr, field, ident, kw, name, opt,
    prec, prec_right, r, seq, t, words,
};
use crate::parser::errors::ParseContext;
use crate::parser::precedence::ConflictGroup;
use crate::parser::SyntaxKind::*;

/// Component names with a dedicated call shape
pub const BUILTIN_COMPONENTS: &[&str] = &[
    "Text",
    "Button",
    "Image",
    "TextInput",
    "TextArea",
    "Column",
    "Row",
    "Stack",
    "Flex",
    "Grid",
    "GridRow",
    "GridCol",
    "List",
    "ScrollList",
    "ListItem",
    "GridItem",
];

const CONTAINERS: &[&str] = &[
    "Column",
    "Row",
    "Stack",
    "Flex",
    "Grid",
    "GridRow",
    "GridCol",
    "List",
    "ScrollList",
];

const ITEM_CONTAINERS: &[&str] = &["ListItem", "GridItem"];

fn ui_item() -> Rule {
    conflict(
        ConflictGroup::UiElementOrExpression,
        [
            r("ui_control_flow"),
            r("arkts_ui_element"),
            r("expression_statement"),
            t(SEMICOLON),
        ],
    )
}

fn child_block() -> Rule {
    opt(field(BODY_FIELD, r("container_content_body")))
}

fn arguments() -> Rule {
    r("_component_arguments")
}

pub(super) fn define(p: &mut Productions) {
    p.node(
        "build_body",
        BUILD_BODY,
        braced(ui_item(), ParseContext::BuildBody),
    );
    p.node(
        "container_content_body",
        CONTAINER_CONTENT_BODY,
        braced(ui_item(), ParseContext::ContainerBody),
    );

    p.node(
        "arkts_ui_element",
        ARKTS_UI_ELEMENT,
        conflict(
            ConflictGroup::ModifierChainOrMember,
            [r("ui_element_with_modifiers"), r("ui_component")],
        ),
    );
    p.node(
        "ui_element_with_modifiers",
        UI_ELEMENT_WITH_MODIFIERS,
        prec(
            15,
            seq([
                field(COMPONENT_FIELD, r("ui_component")),
                opt(field(MODIFIERS_FIELD, r("modifier_chain_expression"))),
            ]),
        ),
    );

    p.node(
        "ui_component",
        UI_COMPONENT,
        prec(
            3,
            choice([
                seq([
                    kw("Text"),
                    t(L_PAREN),
                    expr(),
                    opt(seq([t(COMMA), r("_component_argument")])),
                    t(R_PAREN),
                ]),
                seq([kw("Button"), arguments(), child_block()]),
                seq([kw("Image"), t(L_PAREN), expr(), t(R_PAREN)]),
                seq([words(&["TextInput", "TextArea"]), arguments()]),
                seq([words(CONTAINERS), arguments(), child_block()]),
                seq([words(ITEM_CONTAINERS), arguments(), child_block()]),
                seq([field(NAME_FIELD, ident()), arguments(), child_block()]),
            ]),
        ),
    );
    p.hidden(
        "_component_arguments",
        seq([t(L_PAREN), comma_list(r("_component_argument")), t(R_PAREN)]),
    );
    p.hidden(
        "_component_argument",
        conflict(
            ConflictGroup::ParametersOrObject,
            [r("component_parameters"), expr()],
        ),
    );
    p.node(
        "component_parameters",
        COMPONENT_PARAMETERS,
        seq([t(L_BRACE), comma_list(r("component_parameter")), t(R_BRACE)]),
    );
    p.node(
        "component_parameter",
        COMPONENT_PARAMETER,
        prec(
            2,
            seq([
                field(NAME_FIELD, name()),
                t(COLON),
                field(VALUE_FIELD, expr()),
            ]),
        ),
    );

    p.node(
        "modifier_chain_expression",
        MODIFIER_CHAIN_EXPRESSION,
        prec_right(
            20,
            seq([
                t(DOT),
                field(NAME_FIELD, name()),
                opt(seq([t(L_PAREN), comma_list(expr()), t(R_PAREN)])),
                opt(r("modifier_chain_expression")),
            ]),
        ),
    );

    p.node(
        "ui_control_flow",
        UI_CONTROL_FLOW,
        choice([r("ui_if_statement"), r("for_each_statement")]),
    );
    p.node(
        "ui_if_statement",
        UI_IF_STATEMENT,
        seq([
            kw("if"),
            t(L_PAREN),
            field(CONDITION_FIELD, expr()),
            t(R_PAREN),
            braced(ui_item(), ParseContext::UiIfBody),
            opt(seq([
                kw("else"),
                choice([
                    field(ALTERNATIVE_FIELD, r("ui_if_statement")),
                    braced(ui_item(), ParseContext::UiIfBody),
                ]),
            ])),
        ]),
    );
    p.node(
        "for_each_statement",
        FOR_EACH_STATEMENT,
        seq([
            words(&["ForEach", "LazyForEach"]),
            t(L_PAREN),
            field(SOURCE_FIELD, expr()),
            t(COMMA),
            field(GENERATOR_FIELD, r("arrow_function")),
            opt(seq([t(COMMA), field(KEY_FIELD, expr())])),
            opt(t(COMMA)),
            t(R_PAREN),
        ]),
    );
}
