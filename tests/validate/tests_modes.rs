//! Reporting modes, the misplaced-token allowlist and batch validation.

use gentree::tree::TopLevelTree;
use gentree::validate::{
    EOF_TOKEN, SourceTree, ValidationMode, Validator, ValidatorConfig, ViolationKind, reconstruct,
};
use gentree::{MetaDataProvider, TextRange, Token, Tree, TreeError};

use crate::helpers::fixture::{DOUBLE, Fixture, GREETER, double_tree, greeter_tree, lex};

fn collect_and_log() -> Validator {
    Validator::new(ValidatorConfig::default().with_mode(ValidationMode::CollectAndLog))
}

/// `DOUBLE` plus a synthetic end-of-file token on the line after the last.
fn with_eof() -> (Fixture, Tree) {
    let (mut tokens, comments) = lex(DOUBLE);
    tokens.push(Token::other(TextRange::from_coords(5, 0, 5, 0), EOF_TOKEN));
    let fx = Fixture {
        source: DOUBLE.to_string(),
        provider: MetaDataProvider::new(tokens, comments, Vec::new()),
    };
    let Tree::TopLevel(top) = double_tree(&fx) else {
        panic!("double_tree builds a top-level tree");
    };
    let tree = TopLevelTree {
        meta: fx.meta(TextRange::from_coords(1, 0, 5, 0)),
        ..top
    };
    (fx, tree.into())
}

#[test]
fn test_eof_token_is_allowed_by_default() {
    let (fx, tree) = with_eof();
    let validator = Validator::new(ValidatorConfig::default());
    assert_eq!(validator.check("Test.kt", &fx.source, &tree).expect("valid"), vec![]);
}

#[test]
fn test_eof_token_breaks_reconstruction_without_allowlist() {
    let (fx, tree) = with_eof();
    let mut config = ValidatorConfig::default();
    config.allowed_misplaced_tokens.clear();
    match Validator::new(config).check("Test.kt", &fx.source, &tree) {
        Err(TreeError::StructuralViolation(violation)) => {
            assert_eq!(violation.kind, ViolationKind::LineCountMismatch);
        }
        other => panic!("expected StructuralViolation, got {other:?}"),
    }
}

#[test]
fn test_allowlist_loaded_from_settings() {
    let (fx, tree) = with_eof();
    let config = ValidatorConfig::from_json(r#"{"allowedMisplacedTokens": ["<EOF>"]}"#)
        .expect("settings");
    assert!(Validator::new(config).check("Test.kt", &fx.source, &tree).is_ok());
}

#[test]
fn test_collect_and_log_reports_each_kind_once() {
    let fx = Fixture::new(DOUBLE);
    let tree = fx.ident("return", 0);
    let validator = collect_and_log();

    let first = validator.check("A.kt", &fx.source, &tree).expect("never fails");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].kind, ViolationKind::UnexpectedIdentifierToken);
    assert_eq!(first[0].file, "A.kt");

    let again = validator.check("B.kt", &fx.source, &tree).expect("never fails");
    assert!(again.is_empty());

    validator.reset();
    let after_reset = validator.check("C.kt", &fx.source, &tree).expect("never fails");
    assert_eq!(after_reset.len(), 1);
}

#[test]
fn test_check_all_in_parallel() {
    let double = Fixture::new(DOUBLE);
    let greeter = Fixture::new(GREETER);
    let double_ok = double_tree(&double);
    let greeter_ok = greeter_tree(&greeter);
    let broken = double.ident("fun", 0);

    let files = [
        SourceTree { path: "Double.kt", source: &double.source, tree: &double_ok },
        SourceTree { path: "Greeter.kt", source: &greeter.source, tree: &greeter_ok },
        SourceTree { path: "Broken.kt", source: &double.source, tree: &broken },
    ];

    let violations = collect_and_log().check_all(&files).expect("never fails");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].file, "Broken.kt");

    let valid = &files[..2];
    assert!(Validator::default().check_all(valid).expect("valid").is_empty());
    assert!(matches!(
        Validator::default().check_all(&files),
        Err(TreeError::StructuralViolation(_))
    ));
}

#[test]
fn test_reconstruct_root_reproduces_source() {
    let fx = Fixture::new(GREETER);
    let tree = greeter_tree(&fx);
    let meta = tree.meta_data();
    let text = reconstruct(meta.text_range(), meta.tokens(), meta.comments());
    assert_eq!(format!("{text}\n"), GREETER);

    let fx = Fixture::new(DOUBLE);
    let tree = double_tree(&fx);
    let meta = tree.meta_data();
    let text = reconstruct(meta.text_range(), meta.tokens(), meta.comments());
    assert_eq!(format!("{text}\n"), DOUBLE);
}
