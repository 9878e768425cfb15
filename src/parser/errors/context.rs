//! Parse context tracking for context-aware error messages
//!
//! Every recovering body in the grammar names the context it parses in.
//! The context picks the synchronisation set used by error recovery and the
//! wording of the diagnostic.

use crate::parser::SyntaxKind;

/// The kind of body a recovering repetition is parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level of a file
    TopLevel,
    /// Inside a `struct` body
    ComponentBody,
    /// Inside a `class` body
    ClassBody,
    /// Inside `build() { ... }` or a `@Builder` body
    BuildBody,
    /// Inside the child block of a container component
    ContainerBody,
    /// Inside a branch of an `if` in UI code
    UiIfBody,
    /// Inside a statement block
    Block,
    /// Inside the member list of an `interface`
    InterfaceBody,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::ComponentBody => "in component body",
            Self::ClassBody => "in class body",
            Self::BuildBody => "in build body",
            Self::ContainerBody => "in container body",
            Self::UiIfBody => "in UI if branch",
            Self::Block => "in block",
            Self::InterfaceBody => "in interface body",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "an import, export, declaration, or statement",
            Self::ComponentBody => "a property, method, or build method",
            Self::ClassBody => "a property, method, or constructor",
            Self::BuildBody | Self::ContainerBody | Self::UiIfBody => {
                "a UI element, if/ForEach, or expression"
            }
            Self::Block => "a statement",
            Self::InterfaceBody => "a property or method signature",
        }
    }

    /// Identifier spellings that start a fresh item in this context
    ///
    /// Keywords are contextual, so synchronisation looks at identifier text.
    pub fn recovery_words(&self) -> &'static [&'static str] {
        match self {
            Self::TopLevel => &[
                "import", "export", "struct", "class", "interface", "type", "enum", "function",
                "const", "let", "var",
            ],
            Self::ComponentBody => &[
                "build", "private", "public", "protected", "static", "struct", "class",
            ],
            Self::ClassBody => &[
                "constructor", "private", "public", "protected", "static", "readonly", "async",
                "struct", "class",
            ],
            Self::BuildBody | Self::ContainerBody | Self::UiIfBody => &["if", "ForEach", "LazyForEach"],
            Self::Block => &[
                "if", "for", "while", "return", "const", "let", "var", "try", "throw", "break",
                "continue",
            ],
            Self::InterfaceBody => &["readonly"],
        }
    }

    /// Token kinds that start a fresh item in this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::TopLevel | Self::ComponentBody | Self::ClassBody => &[SyntaxKind::AT],
            Self::BuildBody
            | Self::ContainerBody
            | Self::UiIfBody
            | Self::Block
            | Self::InterfaceBody => &[],
        }
    }

    /// Check if this context holds UI description items
    pub fn is_ui(&self) -> bool {
        matches!(self, Self::BuildBody | Self::ContainerBody | Self::UiIfBody)
    }
}
