//! One test per structural violation, in fail-fast mode unless several
//! kinds are expected at once.

use gentree::tree::{AssignmentExpressionTree, AssignmentOperator, IntegerLiteralTree, LiteralTree};
use gentree::validate::{ValidationMode, Validator, ValidatorConfig, Violation, ViolationKind};
use gentree::{MetaDataProvider, TextRange, Token, Tree, TreeError};

use crate::helpers::fixture::{
    DOUBLE, Fixture, GREETER, double_program, double_sum, double_tree, greeter_tree,
};

fn fail_fast(fx: &Fixture, tree: &Tree) -> Result<Vec<Violation>, TreeError> {
    Validator::new(ValidatorConfig::default()).check("Test.kt", &fx.source, tree)
}

fn first_violation(fx: &Fixture, tree: &Tree) -> Violation {
    match fail_fast(fx, tree) {
        Err(TreeError::StructuralViolation(violation)) => *violation,
        other => panic!("expected StructuralViolation, got {other:?}"),
    }
}

fn collected_kinds(fx: &Fixture, tree: &Tree) -> Vec<ViolationKind> {
    let config = ValidatorConfig::default().with_mode(ValidationMode::CollectAndLog);
    let mut kinds: Vec<ViolationKind> = Validator::new(config)
        .check("Test.kt", &fx.source, tree)
        .expect("collect-and-log never fails")
        .into_iter()
        .map(|violation| violation.kind)
        .collect();
    kinds.sort();
    kinds
}

#[test]
fn test_well_formed_programs_pass() {
    let fx = Fixture::new(DOUBLE);
    assert_eq!(fail_fast(&fx, &double_tree(&fx)).expect("valid tree"), vec![]);

    let fx = Fixture::new(GREETER);
    assert_eq!(fail_fast(&fx, &greeter_tree(&fx)).expect("valid tree"), vec![]);
}

#[test]
fn test_token_shared_by_siblings() {
    let fx = Fixture::new(DOUBLE);
    let Tree::Binary(mut sum) = double_sum(&fx) else {
        panic!("double_sum builds a binary expression");
    };
    // right operand claims `x + x`, including the left operand's `x`
    sum.right_operand = Box::new(
        LiteralTree {
            meta: fx.meta(fx.span(("x", 1), ("x", 2))),
            value: "x + x".to_string(),
        }
        .into(),
    );
    let tree = double_program(&fx, sum.into(), fx.span(("return", 0), (";", 0)));

    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::TokenSharedBySiblings);
    assert_eq!(violation.message, "Token 'x' is shared by Identifier and Literal");
    assert_eq!(violation.file, "Test.kt");
    assert_eq!((violation.position.line, violation.position.column), (3, 9));
}

#[test]
fn test_text_mismatch_shows_both_lines() {
    let source = "x = 1\n";
    let tokens = vec![
        Token::other(TextRange::from_coords(1, 0, 1, 1), "x"),
        Token::other(TextRange::from_coords(1, 1, 1, 2), "="),
        Token::other(TextRange::from_coords(1, 2, 1, 3), "1"),
    ];
    let fx = Fixture {
        source: source.to_string(),
        provider: MetaDataProvider::new(tokens, Vec::new(), Vec::new()),
    };
    let tree: Tree = AssignmentExpressionTree {
        meta: fx.meta(TextRange::from_coords(1, 0, 1, 5)),
        operator: AssignmentOperator::Equal,
        left_hand_side: Box::new(fx.ident("x", 0)),
        statement_or_expression: Box::new(
            IntegerLiteralTree {
                meta: fx.meta(fx.tok("1", 0).range),
                value: "1".to_string(),
            }
            .into(),
        ),
    }
    .into();

    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::TextMismatch);
    assert!(violation.message.contains("actual:   'x=1'"), "{}", violation.message);
    assert!(violation.message.contains("expected: 'x = 1'"), "{}", violation.message);
    assert_eq!(violation.position.line, 1);
}

#[test]
fn test_line_count_mismatch() {
    let fx = Fixture::new("a\nb\n");
    let tree = fx.ident("a", 0);
    // the identifier claims both lines but owns only `a`
    let tree = match tree {
        Tree::Identifier(mut identifier) => {
            identifier.meta = gentree::TreeMetaData::new(
                TextRange::from_coords(1, 0, 2, 1),
                vec![fx.tok("a", 0)],
                Vec::new(),
                Vec::new(),
            );
            Tree::Identifier(identifier)
        }
        other => other,
    };
    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::LineCountMismatch);
    assert_eq!(violation.message, "Identifier reconstructs to 1 lines instead of 2");
}

#[test]
fn test_missing_tokens_and_direct_identifier_tokens() {
    let fx = Fixture::new(DOUBLE);
    let Tree::Binary(mut sum) = double_sum(&fx) else {
        panic!("double_sum builds a binary expression");
    };
    // both operands sit on the blanks around `+`
    sum.left_operand = Box::new(fx.ident_at(TextRange::from_coords(3, 10, 3, 11), "x"));
    sum.right_operand = Box::new(fx.ident_at(TextRange::from_coords(3, 12, 3, 13), "x"));
    let tree = double_program(&fx, sum.into(), fx.span(("return", 0), (";", 0)));

    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::UnexpectedDirectToken);
    assert_eq!(violation.message, "Binary directly owns token 'x'");

    assert_eq!(
        collected_kinds(&fx, &tree),
        vec![ViolationKind::MissingTokens, ViolationKind::UnexpectedDirectToken]
    );
}

#[test]
fn test_child_outside_parent() {
    let fx = Fixture::new(DOUBLE);
    let Tree::Binary(mut sum) = double_sum(&fx) else {
        panic!("double_sum builds a binary expression");
    };
    // the sum runs on to the closing brace
    sum.meta = fx.meta(fx.span(("x", 1), ("}", 0)));
    let tree = double_program(&fx, sum.into(), fx.span(("return", 0), (";", 0)));

    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::ChildOutsideParent);
    assert_eq!(
        violation.message,
        "Binary range [3:9, 4:1] is outside Return range [3:2, 3:15]"
    );
    assert_eq!(
        collected_kinds(&fx, &tree),
        vec![ViolationKind::ChildOutsideParent, ViolationKind::TokenNotInParent]
    );
}

#[test]
fn test_identifier_owning_a_keyword() {
    let fx = Fixture::new(DOUBLE);
    let tree = fx.ident("fun", 0);
    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::UnexpectedIdentifierToken);
    assert_eq!(violation.message, "Identifier contains KEYWORD token 'fun'");
}

#[test]
fn test_empty_range_is_malformed_below_the_root() {
    let fx = Fixture::new(DOUBLE);
    let Tree::Binary(mut sum) = double_sum(&fx) else {
        panic!("double_sum builds a binary expression");
    };
    sum.right_operand = Box::new(fx.ident_at(TextRange::from_coords(3, 14, 3, 14), "x"));
    let tree = double_program(&fx, sum.into(), fx.span(("return", 0), (";", 0)));

    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::UnexpectedDirectToken);
    assert!(collected_kinds(&fx, &tree).contains(&ViolationKind::RangeMalformed));
}

#[test]
fn test_token_outside_range() {
    let fx = Fixture::new(DOUBLE);
    let tree = match fx.ident("f", 0) {
        Tree::Identifier(mut identifier) => {
            identifier.meta = gentree::TreeMetaData::new(
                fx.tok("f", 0).range,
                vec![fx.tok("f", 0), fx.tok("(", 0)],
                Vec::new(),
                Vec::new(),
            );
            Tree::Identifier(identifier)
        }
        other => other,
    };
    let violation = first_violation(&fx, &tree);
    assert_eq!(violation.kind, ViolationKind::TokenOutsideRange);
    assert_eq!(
        violation.message,
        "Token '(' at [1:5, 1:6] is outside Identifier range [1:4, 1:5]"
    );
}
