//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines every token kind, node kind and field kind that can
//! appear in an ArkTS syntax tree. Node kinds carry the tree-sitter style
//! type names (`component_declaration`, `build_body`, ...) used by the
//! S-expression rendering and the `Node` API.

/// All syntax kinds (tokens, nodes and fields) in ArkTS
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, bodies, expressions).
/// Field kinds label a single child with its role and are never visible
/// through the `Node` API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS AND WORDS
    // =========================================================================
    IDENT,           // identifier
    NUMBER,          // 42, 3.14, 1e10
    STRING,          // "hello" or 'hello'
    TEMPLATE_CHARS,  // literal run inside `...`
    KEYWORD,         // contextual keyword, re-tagged from IDENT by the grammar
    BOOLEAN_LITERAL, // true / false, re-tagged from IDENT
    NULL_LITERAL,    // null, re-tagged from IDENT
    QUOTE,           // opening or closing quote of a string literal
    STRING_FRAGMENT, // run of plain characters inside a string literal
    ESCAPE_SEQUENCE, // \n, \x41, \u0041 inside a string literal

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,        // {
    R_BRACE,        // }
    L_BRACKET,      // [
    R_BRACKET,      // ]
    L_PAREN,        // (
    R_PAREN,        // )
    SEMICOLON,      // ;
    COLON,          // :
    DOT,            // .
    ELLIPSIS,       // ...
    COMMA,          // ,
    QUESTION,       // ?
    EQ,             // =
    EQ_EQ,          // ==
    EQ_EQ_EQ,       // ===
    BANG_EQ,        // !=
    BANG_EQ_EQ,     // !==
    LT,             // <
    GT,             // >
    LT_EQ,          // <=
    GT_EQ,          // >=
    LT_LT,          // <<
    GT_GT,          // >>
    GT_GT_GT,       // >>>
    PLUS,           // +
    MINUS,          // -
    STAR,           // *
    STAR_STAR,      // **
    SLASH,          // /
    PERCENT,        // %
    PLUS_PLUS,      // ++
    MINUS_MINUS,    // --
    AMP,            // &
    PIPE,           // |
    CARET,          // ^
    TILDE,          // ~
    BANG,           // !
    AMP_AMP,        // &&
    PIPE_PIPE,      // ||
    PLUS_EQ,        // +=
    MINUS_EQ,       // -=
    STAR_EQ,        // *=
    STAR_STAR_EQ,   // **=
    SLASH_EQ,       // /=
    PERCENT_EQ,     // %=
    AMP_EQ,         // &=
    PIPE_EQ,        // |=
    CARET_EQ,       // ^=
    LT_LT_EQ,       // <<=
    GT_GT_EQ,       // >>=
    GT_GT_GT_EQ,    // >>>=
    FAT_ARROW,      // =>
    AT,             // @
    DOLLAR,         // $
    BACKTICK,       // `
    DOLLAR_L_BRACE, // ${

    // =========================================================================
    // NODES - declarations
    // =========================================================================
    SOURCE_FILE,
    IMPORT_DECLARATION,
    EXPORT_DECLARATION,
    DECORATOR,
    COMPONENT_DECLARATION,
    COMPONENT_BODY,
    PROPERTY_DECLARATION,
    METHOD_DECLARATION,
    CONSTRUCTOR_DECLARATION,
    BUILD_METHOD,
    BUILD_BODY,
    FUNCTION_DECLARATION,
    EXTEND_FUNCTION_BODY,
    CLASS_DECLARATION,
    CLASS_BODY,
    INTERFACE_DECLARATION,
    OBJECT_TYPE,
    TYPE_MEMBER,
    METHOD_SIGNATURE,
    TYPE_DECLARATION,
    ENUM_DECLARATION,
    ENUM_BODY,
    ENUM_MEMBER,
    PARAMETER_LIST,
    PARAMETER,
    TYPE_PARAMETERS,

    // =========================================================================
    // NODES - UI description
    // =========================================================================
    ARKTS_UI_ELEMENT,
    UI_ELEMENT_WITH_MODIFIERS,
    UI_COMPONENT,
    MODIFIER_CHAIN_EXPRESSION,
    CONTAINER_CONTENT_BODY,
    COMPONENT_PARAMETERS,
    COMPONENT_PARAMETER,
    UI_CONTROL_FLOW,
    UI_IF_STATEMENT,
    FOR_EACH_STATEMENT,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    STATEMENT,
    EXPRESSION_STATEMENT,
    EMPTY_STATEMENT,
    IF_STATEMENT,
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    RETURN_STATEMENT,
    BLOCK_STATEMENT,
    TRY_STATEMENT,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    THROW_STATEMENT,
    FOR_STATEMENT,
    FOR_IN_STATEMENT,
    WHILE_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    LABELED_STATEMENT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    EXPRESSION,
    BINARY_EXPRESSION,
    UNARY_EXPRESSION,
    UPDATE_EXPRESSION,
    ASSIGNMENT_EXPRESSION,
    CONDITIONAL_EXPRESSION,
    CALL_EXPRESSION,
    MEMBER_EXPRESSION,
    SUBSCRIPT_EXPRESSION,
    NEW_EXPRESSION,
    AS_EXPRESSION,
    ARROW_FUNCTION,
    PARENTHESIZED_EXPRESSION,
    ARRAY_LITERAL,
    OBJECT_LITERAL,
    PROPERTY_ASSIGNMENT,
    PROPERTY_NAME,
    SPREAD_ELEMENT,
    TEMPLATE_LITERAL,
    TEMPLATE_SUBSTITUTION,
    STATE_BINDING_EXPRESSION,
    RESOURCE_EXPRESSION,
    AT_EXPRESSION,

    // =========================================================================
    // NODES - types
    // =========================================================================
    TYPE_ANNOTATION,
    ARRAY_TYPE,
    GENERIC_TYPE,
    TYPE_ARGUMENTS,
    UNION_TYPE,
    FUNCTION_TYPE,

    // =========================================================================
    // FIELDS (transparent single-child wrappers)
    // =========================================================================
    DECORATOR_FIELD,
    NAME_FIELD,
    TYPE_PARAMETERS_FIELD,
    BODY_FIELD,
    PARAMETERS_FIELD,
    PARAMETER_FIELD,
    RETURN_TYPE_FIELD,
    TYPE_FIELD,
    VALUE_FIELD,
    KEY_FIELD,
    LEFT_FIELD,
    OPERATOR_FIELD,
    RIGHT_FIELD,
    ARGUMENT_FIELD,
    CONDITION_FIELD,
    CONSEQUENCE_FIELD,
    ALTERNATIVE_FIELD,
    FUNCTION_FIELD,
    OBJECT_FIELD,
    PROPERTY_FIELD,
    INDEX_FIELD,
    CONSTRUCTOR_FIELD,
    COMPONENT_FIELD,
    MODIFIERS_FIELD,
    SOURCE_FIELD,
    GENERATOR_FIELD,
    LABEL_FIELD,
    HANDLER_FIELD,
    FINALIZER_FIELD,
    INITIALIZER_FIELD,
    INCREMENT_FIELD,
    SUPERCLASS_FIELD,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Recovered span, or a token no terminal matched
    ERROR,
    /// Zero-width placeholder for an expected closing token
    MISSING,

    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | LINE_COMMENT | BLOCK_COMMENT)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (L_BRACE as u16) && (self as u16) <= (DOLLAR_L_BRACE as u16)
    }

    /// Check if this is a field wrapper kind
    pub fn is_field(self) -> bool {
        (self as u16) >= (DECORATOR_FIELD as u16) && (self as u16) <= (SUPERCLASS_FIELD as u16)
    }

    /// Check if this kind only ever labels tokens
    pub fn is_token(self) -> bool {
        (self as u16) < (SOURCE_FILE as u16)
    }

    /// Named kinds show up in S-expressions; anonymous ones (punctuation,
    /// keywords) only show up in `Node::children`.
    pub fn is_named(self) -> bool {
        if self.is_field() || self == __LAST {
            return false;
        }
        !(self.is_punct() || matches!(self, KEYWORD | WHITESPACE | QUOTE | STRING_FRAGMENT))
    }

    /// The kind the scanner produced for a token the grammar may have re-tagged
    pub fn lexical(self) -> SyntaxKind {
        match self {
            KEYWORD | BOOLEAN_LITERAL | NULL_LITERAL => IDENT,
            other => other,
        }
    }

    /// Field role of a field wrapper kind, e.g. `NAME_FIELD` -> `"name"`
    pub fn field_name(self) -> Option<&'static str> {
        let name = match self {
            DECORATOR_FIELD => "decorator",
            NAME_FIELD => "name",
            TYPE_PARAMETERS_FIELD => "type_parameters",
            BODY_FIELD => "body",
            PARAMETERS_FIELD => "parameters",
            PARAMETER_FIELD => "parameter",
            RETURN_TYPE_FIELD => "return_type",
            TYPE_FIELD => "type",
            VALUE_FIELD => "value",
            KEY_FIELD => "key",
            LEFT_FIELD => "left",
            OPERATOR_FIELD => "operator",
            RIGHT_FIELD => "right",
            ARGUMENT_FIELD => "argument",
            CONDITION_FIELD => "condition",
            CONSEQUENCE_FIELD => "consequence",
            ALTERNATIVE_FIELD => "alternative",
            FUNCTION_FIELD => "function",
            OBJECT_FIELD => "object",
            PROPERTY_FIELD => "property",
            INDEX_FIELD => "index",
            CONSTRUCTOR_FIELD => "constructor",
            COMPONENT_FIELD => "component",
            MODIFIERS_FIELD => "modifiers",
            SOURCE_FIELD => "source",
            GENERATOR_FIELD => "generator",
            LABEL_FIELD => "label",
            HANDLER_FIELD => "handler",
            FINALIZER_FIELD => "finalizer",
            INITIALIZER_FIELD => "initializer",
            INCREMENT_FIELD => "increment",
            SUPERCLASS_FIELD => "superclass",
            _ => return None,
        };
        Some(name)
    }

    /// Type name as rendered in S-expressions
    ///
    /// Anonymous tokens with a fixed spelling return that spelling;
    /// `KEYWORD` has none and returns `"keyword"` (the `Node` API uses the
    /// token text instead).
    pub fn name(self) -> &'static str {
        match self {
            WHITESPACE => "whitespace",
            LINE_COMMENT | BLOCK_COMMENT => "comment",
            IDENT => "identifier",
            NUMBER => "numeric_literal",
            STRING => "string_literal",
            TEMPLATE_CHARS => "template_chars",
            KEYWORD => "keyword",
            BOOLEAN_LITERAL => "boolean_literal",
            NULL_LITERAL => "null_literal",
            QUOTE => "quote",
            STRING_FRAGMENT => "string_fragment",
            ESCAPE_SEQUENCE => "escape_sequence",
            L_BRACE => "{",
            R_BRACE => "}",
            L_BRACKET => "[",
            R_BRACKET => "]",
            L_PAREN => "(",
            R_PAREN => ")",
            SEMICOLON => ";",
            COLON => ":",
            DOT => ".",
            ELLIPSIS => "...",
            COMMA => ",",
            QUESTION => "?",
            EQ => "=",
            EQ_EQ => "==",
            EQ_EQ_EQ => "===",
            BANG_EQ => "!=",
            BANG_EQ_EQ => "!==",
            LT => "<",
            GT => ">",
            LT_EQ => "<=",
            GT_EQ => ">=",
            LT_LT => "<<",
            GT_GT => ">>",
            GT_GT_GT => ">>>",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            STAR_STAR => "**",
            SLASH => "/",
            PERCENT => "%",
            PLUS_PLUS => "++",
            MINUS_MINUS => "--",
            AMP => "&",
            PIPE => "|",
            CARET => "^",
            TILDE => "~",
            BANG => "!",
            AMP_AMP => "&&",
            PIPE_PIPE => "||",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            STAR_STAR_EQ => "**=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            AMP_EQ => "&=",
            PIPE_EQ => "|=",
            CARET_EQ => "^=",
            LT_LT_EQ => "<<=",
            GT_GT_EQ => ">>=",
            GT_GT_GT_EQ => ">>>=",
            FAT_ARROW => "=>",
            AT => "@",
            DOLLAR => "$",
            BACKTICK => "`",
            DOLLAR_L_BRACE => "${",

            SOURCE_FILE => "source_file",
            IMPORT_DECLARATION => "import_declaration",
            EXPORT_DECLARATION => "export_declaration",
            DECORATOR => "decorator",
            COMPONENT_DECLARATION => "component_declaration",
            COMPONENT_BODY => "component_body",
            PROPERTY_DECLARATION => "property_declaration",
            METHOD_DECLARATION => "method_declaration",
            CONSTRUCTOR_DECLARATION => "constructor_declaration",
            BUILD_METHOD => "build_method",
            BUILD_BODY => "build_body",
            FUNCTION_DECLARATION => "function_declaration",
            EXTEND_FUNCTION_BODY => "extend_function_body",
            CLASS_DECLARATION => "class_declaration",
            CLASS_BODY => "class_body",
            INTERFACE_DECLARATION => "interface_declaration",
            OBJECT_TYPE => "object_type",
            TYPE_MEMBER => "type_member",
            METHOD_SIGNATURE => "method_signature",
            TYPE_DECLARATION => "type_declaration",
            ENUM_DECLARATION => "enum_declaration",
            ENUM_BODY => "enum_body",
            ENUM_MEMBER => "enum_member",
            PARAMETER_LIST => "parameter_list",
            PARAMETER => "parameter",
            TYPE_PARAMETERS => "type_parameters",

            ARKTS_UI_ELEMENT => "arkts_ui_element",
            UI_ELEMENT_WITH_MODIFIERS => "ui_element_with_modifiers",
            UI_COMPONENT => "ui_component",
            MODIFIER_CHAIN_EXPRESSION => "modifier_chain_expression",
            CONTAINER_CONTENT_BODY => "container_content_body",
            COMPONENT_PARAMETERS => "component_parameters",
            COMPONENT_PARAMETER => "component_parameter",
            UI_CONTROL_FLOW => "ui_control_flow",
            UI_IF_STATEMENT => "ui_if_statement",
            FOR_EACH_STATEMENT => "for_each_statement",

            STATEMENT => "statement",
            EXPRESSION_STATEMENT => "expression_statement",
            EMPTY_STATEMENT => "empty_statement",
            IF_STATEMENT => "if_statement",
            VARIABLE_DECLARATION => "variable_declaration",
            VARIABLE_DECLARATOR => "variable_declarator",
            RETURN_STATEMENT => "return_statement",
            BLOCK_STATEMENT => "block_statement",
            TRY_STATEMENT => "try_statement",
            CATCH_CLAUSE => "catch_clause",
            FINALLY_CLAUSE => "finally_clause",
            THROW_STATEMENT => "throw_statement",
            FOR_STATEMENT => "for_statement",
            FOR_IN_STATEMENT => "for_in_statement",
            WHILE_STATEMENT => "while_statement",
            BREAK_STATEMENT => "break_statement",
            CONTINUE_STATEMENT => "continue_statement",
            LABELED_STATEMENT => "labeled_statement",

            EXPRESSION => "expression",
            BINARY_EXPRESSION => "binary_expression",
            UNARY_EXPRESSION => "unary_expression",
            UPDATE_EXPRESSION => "update_expression",
            ASSIGNMENT_EXPRESSION => "assignment_expression",
            CONDITIONAL_EXPRESSION => "conditional_expression",
            CALL_EXPRESSION => "call_expression",
            MEMBER_EXPRESSION => "member_expression",
            SUBSCRIPT_EXPRESSION => "subscript_expression",
            NEW_EXPRESSION => "new_expression",
            AS_EXPRESSION => "as_expression",
            ARROW_FUNCTION => "arrow_function",
            PARENTHESIZED_EXPRESSION => "parenthesized_expression",
            ARRAY_LITERAL => "array_literal",
            OBJECT_LITERAL => "object_literal",
            PROPERTY_ASSIGNMENT => "property_assignment",
            PROPERTY_NAME => "property_name",
            SPREAD_ELEMENT => "spread_element",
            TEMPLATE_LITERAL => "template_literal",
            TEMPLATE_SUBSTITUTION => "template_substitution",
            STATE_BINDING_EXPRESSION => "state_binding_expression",
            RESOURCE_EXPRESSION => "resource_expression",
            AT_EXPRESSION => "at_expression",

            TYPE_ANNOTATION => "type_annotation",
            ARRAY_TYPE => "array_type",
            GENERIC_TYPE => "generic_type",
            TYPE_ARGUMENTS => "type_arguments",
            UNION_TYPE => "union_type",
            FUNCTION_TYPE => "function_type",

            ERROR => "ERROR",
            MISSING => "MISSING",
            kind => kind.field_name().unwrap_or("__LAST"),
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArkTSLanguage {}

impl rowan::Language for ArkTSLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ArkTSLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ArkTSLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ArkTSLanguage>;
