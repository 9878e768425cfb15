//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for the ArkTS declarations
//! and UI nodes. Each struct wraps a SyntaxNode and reads its children,
//! looking through the field wrapper nodes the parser emits.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Field access
// ============================================================================

/// Nodes filling field `field` of `node`
fn field_nodes(node: &SyntaxNode, field: SyntaxKind) -> impl Iterator<Item = SyntaxNode> + '_ {
    node.children()
        .filter(move |child| child.kind() == field)
        .flat_map(|wrapper| wrapper.children().collect::<Vec<_>>())
}

fn field_node<N: AstNode>(node: &SyntaxNode, field: SyntaxKind) -> Option<N> {
    field_nodes(node, field).find_map(N::cast)
}

/// The first token filling field `field` of `node`
fn field_token(node: &SyntaxNode, field: SyntaxKind) -> Option<SyntaxToken> {
    node.children()
        .filter(|child| child.kind() == field)
        .flat_map(|wrapper| wrapper.children_with_tokens().collect::<Vec<_>>())
        .find_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
}

fn decorators_of(node: &SyntaxNode) -> impl Iterator<Item = Decorator> + '_ {
    field_nodes(node, SyntaxKind::DECORATOR_FIELD).filter_map(Decorator::cast)
}

fn has_keyword(node: &SyntaxNode, word: &str) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == SyntaxKind::KEYWORD && t.text() == word)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentDeclaration> + '_ {
        self.0.children().filter_map(ComponentDeclaration::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDeclaration> + '_ {
        self.0.children().filter_map(ImportDeclaration::cast)
    }
}

// ============================================================================
// Top-level items
// ============================================================================

/// A declaration at the top level of a file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Import(ImportDeclaration),
    Component(ComponentDeclaration),
    Class(ClassDeclaration),
    Function(FunctionDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
}

impl AstNode for Item {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::IMPORT_DECLARATION
                | SyntaxKind::COMPONENT_DECLARATION
                | SyntaxKind::CLASS_DECLARATION
                | SyntaxKind::FUNCTION_DECLARATION
                | SyntaxKind::INTERFACE_DECLARATION
                | SyntaxKind::ENUM_DECLARATION
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IMPORT_DECLARATION => Some(Self::Import(ImportDeclaration(node))),
            SyntaxKind::COMPONENT_DECLARATION => Some(Self::Component(ComponentDeclaration(node))),
            SyntaxKind::CLASS_DECLARATION => Some(Self::Class(ClassDeclaration(node))),
            SyntaxKind::FUNCTION_DECLARATION => Some(Self::Function(FunctionDeclaration(node))),
            SyntaxKind::INTERFACE_DECLARATION => Some(Self::Interface(InterfaceDeclaration(node))),
            SyntaxKind::ENUM_DECLARATION => Some(Self::Enum(EnumDeclaration(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Import(n) => n.syntax(),
            Self::Component(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
        }
    }
}

ast_node!(ImportDeclaration, IMPORT_DECLARATION);

impl ImportDeclaration {
    /// The module specifier's `string_literal` node, quotes included
    pub fn source(&self) -> Option<SyntaxNode> {
        field_nodes(&self.0, SyntaxKind::SOURCE_FIELD).find(|n| n.kind() == SyntaxKind::STRING)
    }
}

ast_node!(Decorator, DECORATOR);

impl Decorator {
    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    pub fn has_arguments(&self) -> bool {
        self.0
            .children_with_tokens()
            .any(|e| e.kind() == SyntaxKind::L_PAREN)
    }
}

// ============================================================================
// Components
// ============================================================================

ast_node!(ComponentDeclaration, COMPONENT_DECLARATION);

impl ComponentDeclaration {
    pub fn decorators(&self) -> impl Iterator<Item = Decorator> + '_ {
        decorators_of(&self.0)
    }

    /// Whether the component carries `@Entry`
    pub fn is_entry(&self) -> bool {
        self.decorators()
            .any(|d| d.name().is_some_and(|name| name.text() == "Entry"))
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    pub fn body(&self) -> Option<ComponentBody> {
        field_node(&self.0, SyntaxKind::BODY_FIELD)
    }

    pub fn build_method(&self) -> Option<BuildMethod> {
        self.body()?.build_method()
    }
}

ast_node!(ComponentBody, COMPONENT_BODY);

impl ComponentBody {
    pub fn properties(&self) -> impl Iterator<Item = PropertyDeclaration> + '_ {
        self.0.children().filter_map(PropertyDeclaration::cast)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDeclaration> + '_ {
        self.0.children().filter_map(MethodDeclaration::cast)
    }

    pub fn build_method(&self) -> Option<BuildMethod> {
        self.0.children().find_map(BuildMethod::cast)
    }
}

ast_node!(PropertyDeclaration, PROPERTY_DECLARATION);

impl PropertyDeclaration {
    pub fn decorators(&self) -> impl Iterator<Item = Decorator> + '_ {
        decorators_of(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    /// The declared type, if written
    pub fn ty(&self) -> Option<SyntaxNode> {
        field_nodes(&self.0, SyntaxKind::TYPE_FIELD).next()
    }

    /// The initializer, if any
    pub fn value(&self) -> Option<SyntaxNode> {
        field_nodes(&self.0, SyntaxKind::VALUE_FIELD).next()
    }
}

ast_node!(MethodDeclaration, METHOD_DECLARATION);

impl MethodDeclaration {
    pub fn decorators(&self) -> impl Iterator<Item = Decorator> + '_ {
        decorators_of(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    pub fn is_static(&self) -> bool {
        has_keyword(&self.0, "static")
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        field_nodes(&self.0, SyntaxKind::BODY_FIELD).next()
    }
}

ast_node!(BuildMethod, BUILD_METHOD);

impl BuildMethod {
    pub fn body(&self) -> Option<BuildBody> {
        field_node(&self.0, SyntaxKind::BODY_FIELD)
    }
}

ast_node!(BuildBody, BUILD_BODY);

impl BuildBody {
    /// UI elements at the top of the body, control flow excluded
    pub fn elements(&self) -> impl Iterator<Item = UiElement> + '_ {
        self.0.children().filter_map(UiElement::cast)
    }
}

// ============================================================================
// UI elements
// ============================================================================

ast_node!(UiElement, ARKTS_UI_ELEMENT);

impl UiElement {
    /// The component call, with or without modifiers
    pub fn component(&self) -> Option<UiComponent> {
        self.0.children().find_map(|child| match child.kind() {
            SyntaxKind::UI_COMPONENT => UiComponent::cast(child),
            SyntaxKind::UI_ELEMENT_WITH_MODIFIERS => {
                field_node(&child, SyntaxKind::COMPONENT_FIELD)
            }
            _ => None,
        })
    }

    /// The first link of the modifier chain, if any
    pub fn modifiers(&self) -> Option<ModifierChain> {
        let with = self
            .0
            .children()
            .find(|child| child.kind() == SyntaxKind::UI_ELEMENT_WITH_MODIFIERS)?;
        field_node(&with, SyntaxKind::MODIFIERS_FIELD)
    }

    /// Modifier names in call order
    pub fn modifier_names(&self) -> Vec<String> {
        self.modifiers()
            .map(|chain| {
                chain
                    .segments()
                    .filter_map(|segment| segment.name())
                    .map(|name| name.text().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

ast_node!(UiComponent, UI_COMPONENT);

impl UiComponent {
    /// `Text`, `Column`, or the name of a custom component
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::KEYWORD)
            .or_else(|| field_token(&self.0, SyntaxKind::NAME_FIELD))
    }

    pub fn is_builtin(&self) -> bool {
        self.name()
            .is_some_and(|name| super::grammar::BUILTIN_COMPONENTS.contains(&name.text()))
    }

    /// The `{ ... }` block of a container
    pub fn content(&self) -> Option<ContainerContentBody> {
        field_node(&self.0, SyntaxKind::BODY_FIELD)
    }
}

ast_node!(ModifierChain, MODIFIER_CHAIN_EXPRESSION);

impl ModifierChain {
    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    /// The modifier applied after this one
    pub fn next_modifier(&self) -> Option<ModifierChain> {
        self.0.children().find_map(ModifierChain::cast)
    }

    /// This link and every one after it
    pub fn segments(&self) -> impl Iterator<Item = ModifierChain> {
        std::iter::successors(Some(self.clone()), ModifierChain::next_modifier)
    }
}

ast_node!(ContainerContentBody, CONTAINER_CONTENT_BODY);

impl ContainerContentBody {
    pub fn elements(&self) -> impl Iterator<Item = UiElement> + '_ {
        self.0.children().filter_map(UiElement::cast)
    }
}

// ============================================================================
// Other declarations
// ============================================================================

ast_node!(ClassDeclaration, CLASS_DECLARATION);

impl ClassDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    pub fn superclass(&self) -> Option<SyntaxNode> {
        field_nodes(&self.0, SyntaxKind::SUPERCLASS_FIELD).next()
    }
}

ast_node!(FunctionDeclaration, FUNCTION_DECLARATION);

impl FunctionDeclaration {
    pub fn decorators(&self) -> impl Iterator<Item = Decorator> + '_ {
        decorators_of(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    pub fn is_async(&self) -> bool {
        has_keyword(&self.0, "async")
    }

    /// `block_statement`, `build_body` or `extend_function_body`
    pub fn body(&self) -> Option<SyntaxNode> {
        field_nodes(&self.0, SyntaxKind::BODY_FIELD).next()
    }
}

ast_node!(InterfaceDeclaration, INTERFACE_DECLARATION);

impl InterfaceDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }
}

ast_node!(EnumDeclaration, ENUM_DECLARATION);

impl EnumDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }

    pub fn members(&self) -> impl Iterator<Item = EnumMember> {
        field_nodes(&self.0, SyntaxKind::BODY_FIELD)
            .flat_map(|body| body.children().collect::<Vec<_>>())
            .filter_map(EnumMember::cast)
            .collect::<Vec<_>>()
            .into_iter()
    }
}

ast_node!(EnumMember, ENUM_MEMBER);

impl EnumMember {
    pub fn name(&self) -> Option<SyntaxToken> {
        field_token(&self.0, SyntaxKind::NAME_FIELD)
    }
}
