//! Node structs, one per [`Tree`](super::Tree) variant.
//!
//! Every struct carries its [`TreeMetaData`] in `meta`. Child fields hold
//! other trees, tokens or primitive values; never indices.

use std::fmt;
use std::sync::Arc;

use super::metadata::TreeMetaData;
use super::operators::{
    AssignmentOperator, BinaryOperator, JumpKind, LoopKind, ModifierKind, UnaryOperator,
};
use super::{Expected, Tree};
use crate::base::{TextRange, Token};

/// Opaque, front-end-defined tag on a [`NativeTree`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeKind(Arc<str>);

impl NativeKind {
    pub fn new(tag: impl Into<Arc<str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NativeKind {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierTree {
    pub meta: TreeMetaData,
    pub name: String,
}

/// The `_` wildcard some languages allow where a name is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceHolderTree {
    pub meta: TreeMetaData,
    pub name: String,
    pub placeholder_token: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralTree {
    pub meta: TreeMetaData,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteralTree {
    pub meta: TreeMetaData,
    pub value: String,
}

impl IntegerLiteralTree {
    /// Radix implied by the literal prefix.
    pub fn base(&self) -> u32 {
        let lower = self.value.to_ascii_lowercase();
        if lower.starts_with("0x") {
            16
        } else if lower.starts_with("0b") {
            2
        } else if lower.starts_with("0o") || (lower.len() > 1 && lower.starts_with('0')) {
            8
        } else {
            10
        }
    }

    /// The digits without their radix prefix.
    pub fn numeric_part(&self) -> &str {
        let prefix = match self.base() {
            16 | 2 => 2,
            8 if self.value[1..].starts_with(['o', 'O']) => 2,
            8 => 1,
            _ => 0,
        };
        &self.value[prefix..]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteralTree {
    pub meta: TreeMetaData,
    pub value: String,
}

impl StringLiteralTree {
    /// The literal without its surrounding quotes.
    pub fn content(&self) -> &str {
        let mut chars = self.value.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open), Some(close)) if open == close && matches!(open, '"' | '\'' | '`') => {
                &self.value[open.len_utf8()..self.value.len() - close.len_utf8()]
            }
            _ => &self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpressionTree {
    pub meta: TreeMetaData,
    pub operator: UnaryOperator,
    pub operand: Box<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpressionTree {
    pub meta: TreeMetaData,
    pub operator: BinaryOperator,
    pub operator_token: Token,
    pub left_operand: Box<Tree>,
    pub right_operand: Box<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpressionTree {
    pub meta: TreeMetaData,
    pub operator: AssignmentOperator,
    pub left_hand_side: Box<Tree>,
    pub statement_or_expression: Box<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTree {
    pub meta: TreeMetaData,
    pub statement_or_expressions: Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfTree {
    pub meta: TreeMetaData,
    pub if_keyword: Token,
    pub condition: Box<Tree>,
    pub then_branch: Box<Tree>,
    pub else_keyword: Option<Token>,
    pub else_branch: Option<Box<Tree>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopTree {
    pub meta: TreeMetaData,
    pub kind: LoopKind,
    pub keyword: Token,
    pub condition: Option<Box<Tree>>,
    pub body: Box<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTree {
    pub meta: TreeMetaData,
    pub keyword: Token,
    pub expression: Option<Box<Tree>>,
    /// Only [`Tree::MatchCase`] nodes.
    pub cases: Vec<Tree>,
}

/// One arm of a match. A missing expression marks the default arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCaseTree {
    pub meta: TreeMetaData,
    pub expression: Option<Box<Tree>>,
    pub body: Option<Box<Tree>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryTree {
    pub meta: TreeMetaData,
    pub try_keyword: Token,
    /// A [`Tree::Block`].
    pub try_block: Box<Tree>,
    /// Only [`Tree::Catch`] nodes.
    pub catch_blocks: Vec<Tree>,
    pub finally_keyword: Option<Token>,
    pub finally_block: Option<Box<Tree>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchTree {
    pub meta: TreeMetaData,
    pub keyword: Token,
    pub catch_parameter: Option<Box<Tree>>,
    pub catch_block: Box<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclarationTree {
    pub meta: TreeMetaData,
    pub modifiers: Vec<Tree>,
    pub is_constructor: bool,
    pub return_type: Option<Box<Tree>>,
    pub name: Option<Box<Tree>>,
    pub formal_parameters: Vec<Tree>,
    pub body: Option<Box<Tree>>,
    /// Language-specific parts of the declaration (type parameters, receivers, ...).
    pub native_children: Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTree {
    pub meta: TreeMetaData,
    pub identifier: Box<Tree>,
    pub param_type: Option<Box<Tree>>,
    pub default_value: Option<Box<Tree>>,
    pub modifiers: Vec<Tree>,
}

/// A class declaration. The name node lives inside `class_tree`; this
/// struct only remembers where, so the identifier has a single owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclarationTree {
    pub meta: TreeMetaData,
    identifier: Option<TextRange>,
    pub class_tree: Box<Tree>,
}

impl ClassDeclarationTree {
    /// `identifier` is the range of an identifier node somewhere inside
    /// `class_tree`.
    pub fn new(meta: TreeMetaData, identifier: Option<TextRange>, class_tree: Tree) -> Self {
        Self {
            meta,
            identifier,
            class_tree: Box::new(class_tree),
        }
    }

    pub fn identifier_range(&self) -> Option<TextRange> {
        self.identifier
    }

    /// The name node, looked up inside `class_tree`.
    pub fn identifier(&self) -> Option<&Tree> {
        let range = self.identifier?;
        self.class_tree.find_descendant(range, Expected::Identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDeclarationTree {
    pub meta: TreeMetaData,
    pub children: Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclarationTree {
    pub meta: TreeMetaData,
    pub children: Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierTree {
    pub meta: TreeMetaData,
    pub kind: ModifierKind,
}

/// Escape hatch for syntax with no dedicated variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTree {
    pub meta: TreeMetaData,
    pub native_kind: NativeKind,
    pub children: Vec<Tree>,
}

/// Root of a file. Its range may be empty (an empty file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelTree {
    pub meta: TreeMetaData,
    pub declarations: Vec<Tree>,
    /// First token considered by copy-paste detection, past package and
    /// import headers.
    pub first_cpd_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTree {
    pub meta: TreeMetaData,
    pub keyword: Token,
    pub body: Option<Box<Tree>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTree {
    pub meta: TreeMetaData,
    pub keyword: Token,
    pub kind: JumpKind,
    pub label: Option<Box<Tree>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowTree {
    pub meta: TreeMetaData,
    pub keyword: Token,
    pub body: Option<Box<Tree>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedExpressionTree {
    pub meta: TreeMetaData,
    pub expression: Box<Tree>,
    pub left_parenthesis: Token,
    pub right_parenthesis: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarationTree {
    pub meta: TreeMetaData,
    pub identifier: Box<Tree>,
    pub var_type: Option<Box<Tree>>,
    pub initializer: Option<Box<Tree>>,
    pub is_val: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInvocationTree {
    pub meta: TreeMetaData,
    pub member_select: Box<Tree>,
    pub arguments: Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSelectTree {
    pub meta: TreeMetaData,
    pub expression: Box<Tree>,
    pub identifier: Box<Tree>,
}
