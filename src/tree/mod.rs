//! The generic syntax tree.
//!
//! Front-ends for every source language lower their parse trees into the
//! closed [`Tree`] sum type. Nodes are built once, top-down, and never
//! mutated afterwards; all cross-references between nodes are expressed as
//! [`TextRange`]s rather than pointers.
//!
//! ```text
//! Tree ──┬── TreeMetaData ── tokens / comments / annotations (windows onto
//!        │                    the file's MetaDataProvider lists)
//!        └── kind-specific fields ── Tree | Token | primitive
//! ```

mod metadata;
mod nodes;
mod operators;

use std::fmt;

use crate::base::TextRange;

pub use metadata::{MetaDataProvider, Slice, TreeMetaData};
pub use nodes::{
    AssignmentExpressionTree, BinaryExpressionTree, BlockTree, CatchTree, ClassDeclarationTree,
    FunctionDeclarationTree, FunctionInvocationTree, IdentifierTree, IfTree,
    ImportDeclarationTree, IntegerLiteralTree, JumpTree, LiteralTree, LoopTree, MatchCaseTree,
    MatchTree, MemberSelectTree, ModifierTree, NativeKind, NativeTree, PackageDeclarationTree,
    ParameterTree, ParenthesizedExpressionTree, PlaceHolderTree, ReturnTree, StringLiteralTree,
    ThrowTree, TopLevelTree, TryTree, UnaryExpressionTree, VariableDeclarationTree,
};
pub use operators::{
    AssignmentOperator, BinaryOperator, JumpKind, LoopKind, ModifierKind, UnaryOperator,
};

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! tree_kinds {
    ($($variant:ident($node:ident)),+ $(,)?) => {
        /// A syntax tree node.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Tree {
            $($variant($node)),+
        }

        /// The variant of a [`Tree`], without its payload.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TreeKind {
            $($variant),+
        }

        impl TreeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [TreeKind] = &[$(TreeKind::$variant),+];
        }

        impl Tree {
            pub fn kind(&self) -> TreeKind {
                match self {
                    $(Tree::$variant(_) => TreeKind::$variant),+
                }
            }

            pub fn meta_data(&self) -> &TreeMetaData {
                match self {
                    $(Tree::$variant(node) => &node.meta),+
                }
            }
        }

        $(
            impl From<$node> for Tree {
                fn from(node: $node) -> Self {
                    Tree::$variant(node)
                }
            }
        )+
    };
}

tree_kinds! {
    Identifier(IdentifierTree),
    PlaceHolder(PlaceHolderTree),
    Literal(LiteralTree),
    IntegerLiteral(IntegerLiteralTree),
    StringLiteral(StringLiteralTree),
    Unary(UnaryExpressionTree),
    Binary(BinaryExpressionTree),
    Assignment(AssignmentExpressionTree),
    Block(BlockTree),
    If(IfTree),
    Loop(LoopTree),
    Match(MatchTree),
    MatchCase(MatchCaseTree),
    Try(TryTree),
    Catch(CatchTree),
    FunctionDeclaration(FunctionDeclarationTree),
    Parameter(ParameterTree),
    ClassDeclaration(ClassDeclarationTree),
    PackageDeclaration(PackageDeclarationTree),
    ImportDeclaration(ImportDeclarationTree),
    Modifier(ModifierTree),
    Native(NativeTree),
    TopLevel(TopLevelTree),
    Return(ReturnTree),
    Jump(JumpTree),
    Throw(ThrowTree),
    Parenthesized(ParenthesizedExpressionTree),
    VariableDeclaration(VariableDeclarationTree),
    FunctionInvocation(FunctionInvocationTree),
    MemberSelect(MemberSelectTree),
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl TreeKind {
    /// Identifier and its placeholder specialisation.
    pub fn is_identifier(&self) -> bool {
        matches!(self, TreeKind::Identifier | TreeKind::PlaceHolder)
    }

    /// Literal kinds whose tokens are the value itself.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TreeKind::Literal | TreeKind::IntegerLiteral | TreeKind::StringLiteral
        )
    }
}

/// The kind a field is allowed to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Any,
    Kind(TreeKind),
    /// [`TreeKind::Identifier`] or [`TreeKind::PlaceHolder`].
    Identifier,
}

impl Expected {
    pub fn accepts(&self, kind: TreeKind) -> bool {
        match self {
            Expected::Any => true,
            Expected::Kind(expected) => *expected == kind,
            Expected::Identifier => kind.is_identifier(),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Any => f.write_str("Tree"),
            Expected::Kind(kind) => write!(f, "{kind}"),
            Expected::Identifier => f.write_str("Identifier"),
        }
    }
}

// ============================================================================
// Navigation
// ============================================================================

impl Tree {
    pub fn text_range(&self) -> TextRange {
        self.meta_data().text_range()
    }

    /// Direct children in field order. Back-references such as
    /// [`ClassDeclarationTree::identifier`] are not children.
    pub fn children(&self) -> Vec<&Tree> {
        let mut children = Vec::new();
        match self {
            Tree::Identifier(_)
            | Tree::PlaceHolder(_)
            | Tree::Literal(_)
            | Tree::IntegerLiteral(_)
            | Tree::StringLiteral(_)
            | Tree::Modifier(_) => {}
            Tree::Unary(node) => children.push(&*node.operand),
            Tree::Binary(node) => {
                children.push(&*node.left_operand);
                children.push(&*node.right_operand);
            }
            Tree::Assignment(node) => {
                children.push(&*node.left_hand_side);
                children.push(&*node.statement_or_expression);
            }
            Tree::Block(node) => children.extend(&node.statement_or_expressions),
            Tree::If(node) => {
                children.push(&*node.condition);
                children.push(&*node.then_branch);
                children.extend(node.else_branch.as_deref());
            }
            Tree::Loop(node) => {
                children.extend(node.condition.as_deref());
                children.push(&*node.body);
            }
            Tree::Match(node) => {
                children.extend(node.expression.as_deref());
                children.extend(&node.cases);
            }
            Tree::MatchCase(node) => {
                children.extend(node.expression.as_deref());
                children.extend(node.body.as_deref());
            }
            Tree::Try(node) => {
                children.push(&*node.try_block);
                children.extend(&node.catch_blocks);
                children.extend(node.finally_block.as_deref());
            }
            Tree::Catch(node) => {
                children.extend(node.catch_parameter.as_deref());
                children.push(&*node.catch_block);
            }
            Tree::FunctionDeclaration(node) => {
                children.extend(&node.modifiers);
                children.extend(node.return_type.as_deref());
                children.extend(node.name.as_deref());
                children.extend(&node.formal_parameters);
                children.extend(node.body.as_deref());
                children.extend(&node.native_children);
            }
            Tree::Parameter(node) => {
                children.extend(&node.modifiers);
                children.push(&*node.identifier);
                children.extend(node.param_type.as_deref());
                children.extend(node.default_value.as_deref());
            }
            Tree::ClassDeclaration(node) => children.push(&*node.class_tree),
            Tree::PackageDeclaration(node) => children.extend(&node.children),
            Tree::ImportDeclaration(node) => children.extend(&node.children),
            Tree::Native(node) => children.extend(&node.children),
            Tree::TopLevel(node) => children.extend(&node.declarations),
            Tree::Return(node) => children.extend(node.body.as_deref()),
            Tree::Jump(node) => children.extend(node.label.as_deref()),
            Tree::Throw(node) => children.extend(node.body.as_deref()),
            Tree::Parenthesized(node) => children.push(&*node.expression),
            Tree::VariableDeclaration(node) => {
                children.push(&*node.identifier);
                children.extend(node.var_type.as_deref());
                children.extend(node.initializer.as_deref());
            }
            Tree::FunctionInvocation(node) => {
                children.push(&*node.member_select);
                children.extend(&node.arguments);
            }
            Tree::MemberSelect(node) => {
                children.push(&*node.expression);
                children.push(&*node.identifier);
            }
        }
        children
    }

    /// This node and all nodes below it, pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// The first node at or below `self` whose range is `range` and whose
    /// kind `expected` accepts.
    pub fn find_descendant(&self, range: TextRange, expected: Expected) -> Option<&Tree> {
        self.descendants()
            .find(|tree| tree.text_range() == range && expected.accepts(tree.kind()))
    }
}

/// Pre-order iterator returned by [`Tree::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Tree;

    fn next(&mut self) -> Option<&'a Tree> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().into_iter().rev());
        Some(tree)
    }
}
