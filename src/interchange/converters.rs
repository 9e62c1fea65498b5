//! Standard converters, one per tree kind.

use serde_json::{Value, json};

use super::JsonObject;
use super::address;
use super::deserialize::DeserializationContext;
use super::registry::Converter;
use super::serialize::{
    SerializationContext, nullable_range_to_json, nullable_token_to_json, token_to_json,
};
use crate::base::TextRange;
use crate::error::TreeError;
use crate::tree::{
    AssignmentExpressionTree, AssignmentOperator, BinaryExpressionTree, BinaryOperator, BlockTree,
    CatchTree, ClassDeclarationTree, Expected, FunctionDeclarationTree, FunctionInvocationTree,
    IdentifierTree, IfTree, ImportDeclarationTree, IntegerLiteralTree, JumpKind, JumpTree,
    LiteralTree, LoopKind, LoopTree, MatchCaseTree, MatchTree, MemberSelectTree, ModifierKind,
    ModifierTree, NativeKind, NativeTree, PackageDeclarationTree, ParameterTree,
    ParenthesizedExpressionTree, PlaceHolderTree, ReturnTree, StringLiteralTree, ThrowTree,
    TopLevelTree, Tree, TreeKind, TryTree, UnaryExpressionTree, UnaryOperator,
    VariableDeclarationTree,
};

// ============================================================================
// Field names
// ============================================================================

const ARGUMENTS: &str = "arguments";
const BODY: &str = "body";
const CASES: &str = "cases";
const CATCH_BLOCK: &str = "catchBlock";
const CATCH_BLOCKS: &str = "catchBlocks";
const CATCH_PARAMETER: &str = "catchParameter";
const CHILDREN: &str = "children";
const CLASS_TREE: &str = "classTree";
const CONDITION: &str = "condition";
const DECLARATIONS: &str = "declarations";
const DEFAULT_VALUE: &str = "defaultValue";
const ELSE_BRANCH: &str = "elseBranch";
const ELSE_KEYWORD: &str = "elseKeyword";
const EXPRESSION: &str = "expression";
const FINALLY_BLOCK: &str = "finallyBlock";
const FINALLY_KEYWORD: &str = "finallyKeyword";
const FIRST_CPD_TOKEN: &str = "firstCpdToken";
const FORMAL_PARAMETERS: &str = "formalParameters";
const IDENTIFIER: &str = "identifier";
const IF_KEYWORD: &str = "ifKeyword";
const INITIALIZER: &str = "initializer";
const IS_CONSTRUCTOR: &str = "isConstructor";
const IS_VAL: &str = "isVal";
const KEYWORD: &str = "keyword";
const KIND: &str = "kind";
const LABEL: &str = "label";
const LEFT_HAND_SIDE: &str = "leftHandSide";
const LEFT_OPERAND: &str = "leftOperand";
const LEFT_PARENTHESIS: &str = "leftParenthesis";
const MEMBER_SELECT: &str = "memberSelect";
const MODIFIERS: &str = "modifiers";
const NAME: &str = "name";
const NATIVE_CHILDREN: &str = "nativeChildren";
const NATIVE_KIND: &str = "nativeKind";
const OPERAND: &str = "operand";
const OPERATOR: &str = "operator";
const OPERATOR_TOKEN: &str = "operatorToken";
const PLACEHOLDER_TOKEN: &str = "placeHolderToken";
const RETURN_TYPE: &str = "returnType";
const RIGHT_OPERAND: &str = "rightOperand";
const RIGHT_PARENTHESIS: &str = "rightParenthesis";
const STATEMENT_OR_EXPRESSION: &str = "statementOrExpression";
const STATEMENT_OR_EXPRESSIONS: &str = "statementOrExpressions";
const THEN_BRANCH: &str = "thenBranch";
const TRY_BLOCK: &str = "tryBlock";
const TRY_KEYWORD: &str = "tryKeyword";
const TYPE: &str = "type";
const VALUE: &str = "value";

// ============================================================================
// Registry table
// ============================================================================

macro_rules! converter {
    ($variant:ident, $tag:literal, $encode:ident, $decode:ident) => {
        Converter {
            kind: TreeKind::$variant,
            tag: $tag,
            encode: |ctx, tree, object| match tree {
                Tree::$variant(node) => $encode(ctx, node, object),
                other => Err(TreeError::unsupported(other.kind())),
            },
            decode: $decode,
        }
    };
}

/// The standard table, in [`TreeKind`] declaration order.
pub(super) static STANDARD: &[Converter] = &[
    converter!(Identifier, "Identifier", encode_identifier, decode_identifier),
    converter!(PlaceHolder, "PlaceHolder", encode_placeholder, decode_placeholder),
    converter!(Literal, "Literal", encode_literal, decode_literal),
    converter!(IntegerLiteral, "IntegerLiteral", encode_integer_literal, decode_integer_literal),
    converter!(StringLiteral, "StringLiteral", encode_string_literal, decode_string_literal),
    converter!(Unary, "UnaryExpression", encode_unary, decode_unary),
    converter!(Binary, "BinaryExpression", encode_binary, decode_binary),
    converter!(Assignment, "AssignmentExpression", encode_assignment, decode_assignment),
    converter!(Block, "Block", encode_block, decode_block),
    converter!(If, "If", encode_if, decode_if),
    converter!(Loop, "Loop", encode_loop, decode_loop),
    converter!(Match, "Match", encode_match, decode_match),
    converter!(MatchCase, "MatchCase", encode_match_case, decode_match_case),
    converter!(Try, "Try", encode_try, decode_try),
    converter!(Catch, "Catch", encode_catch, decode_catch),
    converter!(FunctionDeclaration, "FunctionDeclaration", encode_function, decode_function),
    converter!(Parameter, "Parameter", encode_parameter, decode_parameter),
    converter!(ClassDeclaration, "ClassDeclaration", encode_class, decode_class),
    converter!(PackageDeclaration, "PackageDeclaration", encode_package, decode_package),
    converter!(ImportDeclaration, "ImportDeclaration", encode_import, decode_import),
    converter!(Modifier, "Modifier", encode_modifier, decode_modifier),
    converter!(Native, "Native", encode_native, decode_native),
    converter!(TopLevel, "TopLevel", encode_top_level, decode_top_level),
    converter!(Return, "Return", encode_return, decode_return),
    converter!(Jump, "Jump", encode_jump, decode_jump),
    converter!(Throw, "Throw", encode_throw, decode_throw),
    converter!(Parenthesized, "Parenthesized", encode_parenthesized, decode_parenthesized),
    converter!(VariableDeclaration, "VariableDeclaration", encode_variable, decode_variable),
    converter!(FunctionInvocation, "FunctionInvocation", encode_invocation, decode_invocation),
    converter!(MemberSelect, "MemberSelect", encode_member_select, decode_member_select),
];

type Encoded = Result<(), TreeError>;
type Decoded = Result<Tree, TreeError>;

fn put(object: &mut JsonObject, field: &str, value: Value) {
    object.insert(field.to_string(), value);
}

// ============================================================================
// Names and literals
// ============================================================================

fn encode_identifier(
    _: &SerializationContext<'_>,
    node: &IdentifierTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, NAME, json!(node.name));
    Ok(())
}

fn decode_identifier(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(IdentifierTree {
        meta: ctx.meta_data(object)?,
        name: ctx.field_to_string(object, NAME)?,
    }))
}

fn encode_placeholder(
    _: &SerializationContext<'_>,
    node: &PlaceHolderTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, NAME, json!(node.name));
    put(object, PLACEHOLDER_TOKEN, token_to_json(&node.placeholder_token));
    Ok(())
}

fn decode_placeholder(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(PlaceHolderTree {
        meta: ctx.meta_data(object)?,
        name: ctx.field_to_string(object, NAME)?,
        placeholder_token: ctx.field_to_token(object, PLACEHOLDER_TOKEN)?,
    }))
}

fn encode_literal(
    _: &SerializationContext<'_>,
    node: &LiteralTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, VALUE, json!(node.value));
    Ok(())
}

fn decode_literal(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(LiteralTree {
        meta: ctx.meta_data(object)?,
        value: ctx.field_to_string(object, VALUE)?,
    }))
}

fn encode_integer_literal(
    _: &SerializationContext<'_>,
    node: &IntegerLiteralTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, VALUE, json!(node.value));
    Ok(())
}

fn decode_integer_literal(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(IntegerLiteralTree {
        meta: ctx.meta_data(object)?,
        value: ctx.field_to_string(object, VALUE)?,
    }))
}

fn encode_string_literal(
    _: &SerializationContext<'_>,
    node: &StringLiteralTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, VALUE, json!(node.value));
    Ok(())
}

fn decode_string_literal(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(StringLiteralTree {
        meta: ctx.meta_data(object)?,
        value: ctx.field_to_string(object, VALUE)?,
    }))
}

// ============================================================================
// Expressions
// ============================================================================

fn encode_unary(
    ctx: &SerializationContext<'_>,
    node: &UnaryExpressionTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, OPERATOR, json!(node.operator.as_str()));
    put(object, OPERAND, ctx.tree_to_json(&node.operand)?);
    Ok(())
}

fn decode_unary(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(UnaryExpressionTree {
        meta: ctx.meta_data(object)?,
        operator: ctx.field_to_enum(object, OPERATOR, "UnaryOperator", UnaryOperator::from_name)?,
        operand: Box::new(ctx.field_to_tree(object, OPERAND, Expected::Any)?),
    }))
}

fn encode_binary(
    ctx: &SerializationContext<'_>,
    node: &BinaryExpressionTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, OPERATOR, json!(node.operator.as_str()));
    put(object, OPERATOR_TOKEN, token_to_json(&node.operator_token));
    put(object, LEFT_OPERAND, ctx.tree_to_json(&node.left_operand)?);
    put(object, RIGHT_OPERAND, ctx.tree_to_json(&node.right_operand)?);
    Ok(())
}

fn decode_binary(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(BinaryExpressionTree {
        meta: ctx.meta_data(object)?,
        operator: ctx.field_to_enum(object, OPERATOR, "BinaryOperator", BinaryOperator::from_name)?,
        operator_token: ctx.field_to_token(object, OPERATOR_TOKEN)?,
        left_operand: Box::new(ctx.field_to_tree(object, LEFT_OPERAND, Expected::Any)?),
        right_operand: Box::new(ctx.field_to_tree(object, RIGHT_OPERAND, Expected::Any)?),
    }))
}

fn encode_assignment(
    ctx: &SerializationContext<'_>,
    node: &AssignmentExpressionTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, OPERATOR, json!(node.operator.as_str()));
    put(object, LEFT_HAND_SIDE, ctx.tree_to_json(&node.left_hand_side)?);
    put(object, STATEMENT_OR_EXPRESSION, ctx.tree_to_json(&node.statement_or_expression)?);
    Ok(())
}

fn decode_assignment(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(AssignmentExpressionTree {
        meta: ctx.meta_data(object)?,
        operator: ctx.field_to_enum(
            object,
            OPERATOR,
            "AssignmentOperator",
            AssignmentOperator::from_name,
        )?,
        left_hand_side: Box::new(ctx.field_to_tree(object, LEFT_HAND_SIDE, Expected::Any)?),
        statement_or_expression: Box::new(ctx.field_to_tree(
            object,
            STATEMENT_OR_EXPRESSION,
            Expected::Any,
        )?),
    }))
}

fn encode_parenthesized(
    ctx: &SerializationContext<'_>,
    node: &ParenthesizedExpressionTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, EXPRESSION, ctx.tree_to_json(&node.expression)?);
    put(object, LEFT_PARENTHESIS, token_to_json(&node.left_parenthesis));
    put(object, RIGHT_PARENTHESIS, token_to_json(&node.right_parenthesis));
    Ok(())
}

fn decode_parenthesized(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(ParenthesizedExpressionTree {
        meta: ctx.meta_data(object)?,
        expression: Box::new(ctx.field_to_tree(object, EXPRESSION, Expected::Any)?),
        left_parenthesis: ctx.field_to_token(object, LEFT_PARENTHESIS)?,
        right_parenthesis: ctx.field_to_token(object, RIGHT_PARENTHESIS)?,
    }))
}

fn encode_invocation(
    ctx: &SerializationContext<'_>,
    node: &FunctionInvocationTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, MEMBER_SELECT, ctx.tree_to_json(&node.member_select)?);
    put(object, ARGUMENTS, ctx.trees_to_json(&node.arguments)?);
    Ok(())
}

fn decode_invocation(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(FunctionInvocationTree {
        meta: ctx.meta_data(object)?,
        member_select: Box::new(ctx.field_to_tree(object, MEMBER_SELECT, Expected::Any)?),
        arguments: ctx.field_to_trees(object, ARGUMENTS, Expected::Any)?,
    }))
}

fn encode_member_select(
    ctx: &SerializationContext<'_>,
    node: &MemberSelectTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, EXPRESSION, ctx.tree_to_json(&node.expression)?);
    put(object, IDENTIFIER, ctx.tree_to_json(&node.identifier)?);
    Ok(())
}

fn decode_member_select(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(MemberSelectTree {
        meta: ctx.meta_data(object)?,
        expression: Box::new(ctx.field_to_tree(object, EXPRESSION, Expected::Any)?),
        identifier: Box::new(ctx.field_to_tree(object, IDENTIFIER, Expected::Identifier)?),
    }))
}

// ============================================================================
// Statements
// ============================================================================

fn encode_block(
    ctx: &SerializationContext<'_>,
    node: &BlockTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, STATEMENT_OR_EXPRESSIONS, ctx.trees_to_json(&node.statement_or_expressions)?);
    Ok(())
}

fn decode_block(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(BlockTree {
        meta: ctx.meta_data(object)?,
        statement_or_expressions: ctx.field_to_trees(
            object,
            STATEMENT_OR_EXPRESSIONS,
            Expected::Any,
        )?,
    }))
}

fn encode_if(ctx: &SerializationContext<'_>, node: &IfTree, object: &mut JsonObject) -> Encoded {
    put(object, IF_KEYWORD, token_to_json(&node.if_keyword));
    put(object, CONDITION, ctx.tree_to_json(&node.condition)?);
    put(object, THEN_BRANCH, ctx.tree_to_json(&node.then_branch)?);
    put(object, ELSE_KEYWORD, nullable_token_to_json(node.else_keyword.as_ref()));
    put(object, ELSE_BRANCH, ctx.nullable_tree_to_json(node.else_branch.as_deref())?);
    Ok(())
}

fn decode_if(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(IfTree {
        meta: ctx.meta_data(object)?,
        if_keyword: ctx.field_to_token(object, IF_KEYWORD)?,
        condition: Box::new(ctx.field_to_tree(object, CONDITION, Expected::Any)?),
        then_branch: Box::new(ctx.field_to_tree(object, THEN_BRANCH, Expected::Any)?),
        else_keyword: ctx.field_to_nullable_token(object, ELSE_KEYWORD)?,
        else_branch: ctx.field_to_nullable_tree(object, ELSE_BRANCH, Expected::Any)?.map(Box::new),
    }))
}

fn encode_loop(
    ctx: &SerializationContext<'_>,
    node: &LoopTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KIND, json!(node.kind.as_str()));
    put(object, KEYWORD, token_to_json(&node.keyword));
    put(object, CONDITION, ctx.nullable_tree_to_json(node.condition.as_deref())?);
    put(object, BODY, ctx.tree_to_json(&node.body)?);
    Ok(())
}

fn decode_loop(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(LoopTree {
        meta: ctx.meta_data(object)?,
        kind: ctx.field_to_enum(object, KIND, "LoopKind", LoopKind::from_name)?,
        keyword: ctx.field_to_token(object, KEYWORD)?,
        condition: ctx.field_to_nullable_tree(object, CONDITION, Expected::Any)?.map(Box::new),
        body: Box::new(ctx.field_to_tree(object, BODY, Expected::Any)?),
    }))
}

fn encode_match(
    ctx: &SerializationContext<'_>,
    node: &MatchTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KEYWORD, token_to_json(&node.keyword));
    put(object, EXPRESSION, ctx.nullable_tree_to_json(node.expression.as_deref())?);
    put(object, CASES, ctx.trees_to_json(&node.cases)?);
    Ok(())
}

fn decode_match(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(MatchTree {
        meta: ctx.meta_data(object)?,
        keyword: ctx.field_to_token(object, KEYWORD)?,
        expression: ctx.field_to_nullable_tree(object, EXPRESSION, Expected::Any)?.map(Box::new),
        cases: ctx.field_to_trees(object, CASES, Expected::Kind(TreeKind::MatchCase))?,
    }))
}

fn encode_match_case(
    ctx: &SerializationContext<'_>,
    node: &MatchCaseTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, EXPRESSION, ctx.nullable_tree_to_json(node.expression.as_deref())?);
    put(object, BODY, ctx.nullable_tree_to_json(node.body.as_deref())?);
    Ok(())
}

fn decode_match_case(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(MatchCaseTree {
        meta: ctx.meta_data(object)?,
        expression: ctx.field_to_nullable_tree(object, EXPRESSION, Expected::Any)?.map(Box::new),
        body: ctx.field_to_nullable_tree(object, BODY, Expected::Any)?.map(Box::new),
    }))
}

fn encode_try(ctx: &SerializationContext<'_>, node: &TryTree, object: &mut JsonObject) -> Encoded {
    put(object, TRY_KEYWORD, token_to_json(&node.try_keyword));
    put(object, TRY_BLOCK, ctx.tree_to_json(&node.try_block)?);
    put(object, CATCH_BLOCKS, ctx.trees_to_json(&node.catch_blocks)?);
    put(object, FINALLY_KEYWORD, nullable_token_to_json(node.finally_keyword.as_ref()));
    put(object, FINALLY_BLOCK, ctx.nullable_tree_to_json(node.finally_block.as_deref())?);
    Ok(())
}

fn decode_try(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    let block = Expected::Kind(TreeKind::Block);
    Ok(Tree::from(TryTree {
        meta: ctx.meta_data(object)?,
        try_keyword: ctx.field_to_token(object, TRY_KEYWORD)?,
        try_block: Box::new(ctx.field_to_tree(object, TRY_BLOCK, block)?),
        catch_blocks: ctx.field_to_trees(object, CATCH_BLOCKS, Expected::Kind(TreeKind::Catch))?,
        finally_keyword: ctx.field_to_nullable_token(object, FINALLY_KEYWORD)?,
        finally_block: ctx.field_to_nullable_tree(object, FINALLY_BLOCK, block)?.map(Box::new),
    }))
}

fn encode_catch(
    ctx: &SerializationContext<'_>,
    node: &CatchTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KEYWORD, token_to_json(&node.keyword));
    put(object, CATCH_PARAMETER, ctx.nullable_tree_to_json(node.catch_parameter.as_deref())?);
    put(object, CATCH_BLOCK, ctx.tree_to_json(&node.catch_block)?);
    Ok(())
}

fn decode_catch(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(CatchTree {
        meta: ctx.meta_data(object)?,
        keyword: ctx.field_to_token(object, KEYWORD)?,
        catch_parameter: ctx
            .field_to_nullable_tree(object, CATCH_PARAMETER, Expected::Any)?
            .map(Box::new),
        catch_block: Box::new(ctx.field_to_tree(object, CATCH_BLOCK, Expected::Any)?),
    }))
}

fn encode_return(
    ctx: &SerializationContext<'_>,
    node: &ReturnTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KEYWORD, token_to_json(&node.keyword));
    put(object, BODY, ctx.nullable_tree_to_json(node.body.as_deref())?);
    Ok(())
}

fn decode_return(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(ReturnTree {
        meta: ctx.meta_data(object)?,
        keyword: ctx.field_to_token(object, KEYWORD)?,
        body: ctx.field_to_nullable_tree(object, BODY, Expected::Any)?.map(Box::new),
    }))
}

fn encode_jump(
    ctx: &SerializationContext<'_>,
    node: &JumpTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KEYWORD, token_to_json(&node.keyword));
    put(object, KIND, json!(node.kind.as_str()));
    put(object, LABEL, ctx.nullable_tree_to_json(node.label.as_deref())?);
    Ok(())
}

fn decode_jump(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(JumpTree {
        meta: ctx.meta_data(object)?,
        keyword: ctx.field_to_token(object, KEYWORD)?,
        kind: ctx.field_to_enum(object, KIND, "JumpKind", JumpKind::from_name)?,
        label: ctx.field_to_nullable_tree(object, LABEL, Expected::Identifier)?.map(Box::new),
    }))
}

fn encode_throw(
    ctx: &SerializationContext<'_>,
    node: &ThrowTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KEYWORD, token_to_json(&node.keyword));
    put(object, BODY, ctx.nullable_tree_to_json(node.body.as_deref())?);
    Ok(())
}

fn decode_throw(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(ThrowTree {
        meta: ctx.meta_data(object)?,
        keyword: ctx.field_to_token(object, KEYWORD)?,
        body: ctx.field_to_nullable_tree(object, BODY, Expected::Any)?.map(Box::new),
    }))
}

// ============================================================================
// Declarations
// ============================================================================

fn encode_function(
    ctx: &SerializationContext<'_>,
    node: &FunctionDeclarationTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, MODIFIERS, ctx.trees_to_json(&node.modifiers)?);
    put(object, IS_CONSTRUCTOR, json!(node.is_constructor));
    put(object, RETURN_TYPE, ctx.nullable_tree_to_json(node.return_type.as_deref())?);
    put(object, NAME, ctx.nullable_tree_to_json(node.name.as_deref())?);
    put(object, FORMAL_PARAMETERS, ctx.trees_to_json(&node.formal_parameters)?);
    put(object, BODY, ctx.nullable_tree_to_json(node.body.as_deref())?);
    put(object, NATIVE_CHILDREN, ctx.trees_to_json(&node.native_children)?);
    Ok(())
}

fn decode_function(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(FunctionDeclarationTree {
        meta: ctx.meta_data(object)?,
        modifiers: ctx.field_to_trees(object, MODIFIERS, Expected::Any)?,
        is_constructor: ctx.field_to_bool(object, IS_CONSTRUCTOR)?,
        return_type: ctx.field_to_nullable_tree(object, RETURN_TYPE, Expected::Any)?.map(Box::new),
        name: ctx.field_to_nullable_tree(object, NAME, Expected::Identifier)?.map(Box::new),
        formal_parameters: ctx.field_to_trees(object, FORMAL_PARAMETERS, Expected::Any)?,
        body: ctx
            .field_to_nullable_tree(object, BODY, Expected::Kind(TreeKind::Block))?
            .map(Box::new),
        native_children: ctx.field_to_trees(object, NATIVE_CHILDREN, Expected::Any)?,
    }))
}

fn encode_parameter(
    ctx: &SerializationContext<'_>,
    node: &ParameterTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, IDENTIFIER, ctx.tree_to_json(&node.identifier)?);
    put(object, TYPE, ctx.nullable_tree_to_json(node.param_type.as_deref())?);
    put(object, DEFAULT_VALUE, ctx.nullable_tree_to_json(node.default_value.as_deref())?);
    put(object, MODIFIERS, ctx.trees_to_json(&node.modifiers)?);
    Ok(())
}

fn decode_parameter(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(ParameterTree {
        meta: ctx.meta_data(object)?,
        identifier: Box::new(ctx.field_to_tree(object, IDENTIFIER, Expected::Identifier)?),
        param_type: ctx.field_to_nullable_tree(object, TYPE, Expected::Any)?.map(Box::new),
        default_value: ctx
            .field_to_nullable_tree(object, DEFAULT_VALUE, Expected::Any)?
            .map(Box::new),
        modifiers: ctx.field_to_trees(object, MODIFIERS, Expected::Any)?,
    }))
}

fn encode_class(
    ctx: &SerializationContext<'_>,
    node: &ClassDeclarationTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, IDENTIFIER, nullable_range_to_json(node.identifier_range()));
    put(object, CLASS_TREE, ctx.tree_to_json(&node.class_tree)?);
    Ok(())
}

fn decode_class(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    let meta = ctx.meta_data(object)?;
    let class_tree = ctx.field_to_tree(object, CLASS_TREE, Expected::Any)?;
    let identifier = resolve_descendant(ctx, object, IDENTIFIER, &class_tree)?;
    Ok(Tree::from(ClassDeclarationTree::new(meta, identifier, class_tree)))
}

/// Resolve an address-only field against the nodes under `parent`.
fn resolve_descendant(
    ctx: &DeserializationContext<'_>,
    object: &JsonObject,
    field: &str,
    parent: &Tree,
) -> Result<Option<TextRange>, TreeError> {
    let reference = ctx.field_to_nullable_string(object, field)?;
    address::resolve_nullable_tree(parent, reference.as_deref(), Expected::Identifier)
        .map(|tree| tree.map(Tree::text_range))
        .map_err(|err| match err {
            TreeError::UnresolvedReference { message } => TreeError::unresolved(format!(
                "{message} for field '{field}' at '{}'",
                ctx.path()
            )),
            other => ctx.locate(other, field),
        })
}

fn encode_package(
    ctx: &SerializationContext<'_>,
    node: &PackageDeclarationTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, CHILDREN, ctx.trees_to_json(&node.children)?);
    Ok(())
}

fn decode_package(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(PackageDeclarationTree {
        meta: ctx.meta_data(object)?,
        children: ctx.field_to_trees(object, CHILDREN, Expected::Any)?,
    }))
}

fn encode_import(
    ctx: &SerializationContext<'_>,
    node: &ImportDeclarationTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, CHILDREN, ctx.trees_to_json(&node.children)?);
    Ok(())
}

fn decode_import(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(ImportDeclarationTree {
        meta: ctx.meta_data(object)?,
        children: ctx.field_to_trees(object, CHILDREN, Expected::Any)?,
    }))
}

fn encode_modifier(
    _: &SerializationContext<'_>,
    node: &ModifierTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, KIND, json!(node.kind.as_str()));
    Ok(())
}

fn decode_modifier(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(ModifierTree {
        meta: ctx.meta_data(object)?,
        kind: ctx.field_to_enum(object, KIND, "ModifierKind", ModifierKind::from_name)?,
    }))
}

fn encode_variable(
    ctx: &SerializationContext<'_>,
    node: &VariableDeclarationTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, IDENTIFIER, ctx.tree_to_json(&node.identifier)?);
    put(object, TYPE, ctx.nullable_tree_to_json(node.var_type.as_deref())?);
    put(object, INITIALIZER, ctx.nullable_tree_to_json(node.initializer.as_deref())?);
    put(object, IS_VAL, json!(node.is_val));
    Ok(())
}

fn decode_variable(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(VariableDeclarationTree {
        meta: ctx.meta_data(object)?,
        identifier: Box::new(ctx.field_to_tree(object, IDENTIFIER, Expected::Identifier)?),
        var_type: ctx.field_to_nullable_tree(object, TYPE, Expected::Any)?.map(Box::new),
        initializer: ctx.field_to_nullable_tree(object, INITIALIZER, Expected::Any)?.map(Box::new),
        is_val: ctx.field_to_bool(object, IS_VAL)?,
    }))
}

// ============================================================================
// Structure
// ============================================================================

fn encode_native(
    ctx: &SerializationContext<'_>,
    node: &NativeTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, NATIVE_KIND, json!(node.native_kind.as_str()));
    put(object, CHILDREN, ctx.trees_to_json(&node.children)?);
    Ok(())
}

fn decode_native(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(NativeTree {
        meta: ctx.meta_data(object)?,
        native_kind: NativeKind::new(ctx.field_to_string(object, NATIVE_KIND)?),
        children: ctx.field_to_trees(object, CHILDREN, Expected::Any)?,
    }))
}

fn encode_top_level(
    ctx: &SerializationContext<'_>,
    node: &TopLevelTree,
    object: &mut JsonObject,
) -> Encoded {
    put(object, DECLARATIONS, ctx.trees_to_json(&node.declarations)?);
    let first_cpd_token = node.first_cpd_token.as_ref().map(|token| token.range);
    put(object, FIRST_CPD_TOKEN, nullable_range_to_json(first_cpd_token));
    Ok(())
}

fn decode_top_level(ctx: &mut DeserializationContext<'_>, object: &JsonObject) -> Decoded {
    Ok(Tree::from(TopLevelTree {
        meta: ctx.meta_data(object)?,
        declarations: ctx.field_to_trees(object, DECLARATIONS, Expected::Any)?,
        first_cpd_token: ctx.field_to_nullable_token_reference(object, FIRST_CPD_TOKEN)?,
    }))
}
