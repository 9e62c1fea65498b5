//! Exact wire bytes and decode failures on corrupted documents.

use gentree::interchange::{JsonTree, TypeRegistry, token_to_json};
use gentree::tree::{IdentifierTree, ReturnTree, TopLevelTree};
use gentree::{TextRange, Token, TokenKind, Tree, TreeError, TreeKind};
use rstest::rstest;
use serde_json::{Value, json};

use crate::helpers::fixture::{DOUBLE, Fixture, GREETER, double_tree, greeter_tree};

const RETURN_PATH: &str =
    "tree/TopLevel/declarations/FunctionDeclaration/body/Block/statementOrExpressions/Return";

fn document(source: &str) -> Value {
    let fx = Fixture::new(source);
    let tree = if source == GREETER {
        greeter_tree(&fx)
    } else {
        double_tree(&fx)
    };
    JsonTree::new(&TypeRegistry::standard())
        .to_value(&tree, &fx.provider)
        .expect("encode")
}

fn decode(value: &Value) -> Result<Tree, TreeError> {
    JsonTree::new(&TypeRegistry::standard())
        .from_value(value)
        .map(|file| file.tree)
}

fn at<'v>(value: &'v mut Value, pointer: &str) -> &'v mut Value {
    value
        .pointer_mut(pointer)
        .unwrap_or_else(|| panic!("no value at {pointer}"))
}

fn schema_violation(result: Result<Tree, TreeError>) -> (String, String, String) {
    match result {
        Err(TreeError::SchemaViolation {
            message,
            path,
            fragment,
        }) => (message, path, fragment),
        other => panic!("expected SchemaViolation, got {other:?}"),
    }
}

#[test]
fn test_golden_document() {
    let fx = Fixture::new("return x; // y\n");
    let ret = ReturnTree {
        meta: fx.meta(fx.span(("return", 0), (";", 0))),
        keyword: fx.tok("return", 0),
        body: Some(Box::new(fx.ident("x", 0))),
    };
    let tree: Tree = TopLevelTree {
        meta: fx.meta(fx.span(("return", 0), (";", 0))),
        declarations: vec![ret.into()],
        first_cpd_token: Some(fx.tok("return", 0)),
    }
    .into();

    let json = JsonTree::new(&TypeRegistry::standard())
        .to_json(&tree, &fx.provider)
        .expect("encode");
    assert_eq!(
        json,
        concat!(
            r#"{"treeMetaData":{"comments":[{"text":"// y","contentText":" y","range":"1:10::14","contentRange":"1:12::14"}],"#,
            r#""tokens":[{"textRange":"1:0::6","text":"return","type":"KEYWORD"},{"textRange":"1:7::8","text":"x"},{"textRange":"1:8::9","text":";"}]},"#,
            r#""tree":{"@type":"TopLevel","metaData":"1:0::9","declarations":[{"@type":"Return","metaData":"1:0::9","#,
            r#""keyword":{"textRange":"1:0::6","text":"return","type":"KEYWORD"},"#,
            r#""body":{"@type":"Identifier","metaData":"1:7::8","name":"x"}}],"firstCpdToken":"1:0::6"}}"#,
        )
    );
}

#[test]
fn test_other_token_has_no_type_key() {
    let token = Token::other(TextRange::from_coords(3, 7, 3, 10), "foo");
    let value = token_to_json(&token);
    assert_eq!(value, json!({"textRange": "3:7::10", "text": "foo"}));

    let mut doc = document(DOUBLE);
    at(&mut doc, "/treeMetaData/tokens").as_array_mut().expect("tokens").push(value);
    let file = JsonTree::new(&TypeRegistry::standard())
        .from_value(&doc)
        .expect("decode");
    let decoded = file
        .provider
        .tokens()
        .iter()
        .find(|t| t.text() == "foo")
        .expect("decoded token");
    assert_eq!(decoded.kind, TokenKind::Other);
}

#[test]
fn test_null_required_field_names_field_and_path() {
    let mut doc = document(DOUBLE);
    *at(&mut doc, "/tree/declarations/0/body/statementOrExpressions/0/keyword") = Value::Null;
    let (message, path, fragment) = schema_violation(decode(&doc));
    assert_eq!(message, "Unexpected null value for field 'keyword'");
    assert_eq!(path, RETURN_PATH);
    assert!(fragment.chars().count() <= 80);
    assert!(fragment.ends_with("..."));
}

#[test]
fn test_missing_required_field() {
    let mut doc = document(DOUBLE);
    at(&mut doc, "/tree/declarations/0/body/statementOrExpressions/0")
        .as_object_mut()
        .expect("return object")
        .remove("keyword");
    let (message, path, _) = schema_violation(decode(&doc));
    assert_eq!(message, "Missing non-null value for field 'keyword'");
    assert_eq!(path, RETURN_PATH);
}

#[test]
fn test_null_optional_body_is_accepted() {
    let mut doc = document(DOUBLE);
    *at(&mut doc, "/tree/declarations/0/body/statementOrExpressions/0/body") = Value::Null;
    let tree = decode(&doc).expect("nullable body");
    let ret = tree
        .descendants()
        .find_map(|t| match t {
            Tree::Return(ret) => Some(ret),
            _ => None,
        })
        .expect("return statement");
    assert!(ret.body.is_none());
}

#[test]
fn test_unknown_type_tag() {
    let mut doc = document(DOUBLE);
    let tag = "/tree/declarations/0/body/statementOrExpressions/0/@type";
    *at(&mut doc, tag) = json!("UnsupportedType");
    let (message, path, fragment) = schema_violation(decode(&doc));
    assert_eq!(message, "Invalid '@type' value 'UnsupportedType'");
    assert_eq!(
        path,
        "tree/TopLevel/declarations/FunctionDeclaration/body/Block/statementOrExpressions"
    );
    assert!(fragment.starts_with(r#"{"@type":"UnsupportedType""#));
}

#[test]
fn test_illegal_enum_value() {
    let mut doc = document(DOUBLE);
    let operator = "/tree/declarations/0/body/statementOrExpressions/0/body/operator";
    *at(&mut doc, operator) = json!("POWER");
    let (message, path, fragment) = schema_violation(decode(&doc));
    assert_eq!(message, "Illegal value for BinaryOperator field 'operator': 'POWER'");
    assert_eq!(path, format!("{RETURN_PATH}/body/BinaryExpression"));
    assert_eq!(fragment, r#""POWER""#);
}

#[test]
fn test_unexpected_kind_in_typed_list() {
    let mut doc = document(GREETER);
    let cases = concat!(
        "/tree/declarations/2/classTree/children/1/body/statementOrExpressions/0",
        "/tryBlock/statementOrExpressions/0/cases"
    );
    let identifier = json!({"@type": "Identifier", "metaData": "6:12::16", "name": "name"});
    *at(&mut doc, &format!("{cases}/0")) = identifier;
    let (message, path, _) = schema_violation(decode(&doc));
    assert_eq!(message, "Unexpected 'Identifier' type, expected 'MatchCase'");
    assert!(path.ends_with("/Try/tryBlock/Block/statementOrExpressions/Match/cases"), "{path}");
}

#[test]
fn test_list_field_must_be_an_array() {
    let mut doc = document(DOUBLE);
    *at(&mut doc, "/tree/declarations") = json!({"@type": "Identifier"});
    let (message, path, _) = schema_violation(decode(&doc));
    assert_eq!(message, "Expect Array instead of Object for field 'declarations'");
    assert_eq!(path, "tree/TopLevel");
}

#[test]
fn test_unresolved_class_identifier() {
    let mut doc = document(GREETER);
    // the `class` keyword: a real token, but no identifier node sits there
    *at(&mut doc, "/tree/declarations/2/identifier") = json!("3:0::5");
    match decode(&doc) {
        Err(TreeError::UnresolvedReference { message }) => {
            assert!(message.contains("'3:0::5'"), "{message}");
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[test]
fn test_unresolved_token_reference() {
    let mut doc = document(DOUBLE);
    *at(&mut doc, "/tree/firstCpdToken") = json!("2:0::1");
    match decode(&doc) {
        Err(TreeError::UnresolvedReference { message }) => {
            assert!(message.contains("firstCpdToken"), "{message}");
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[rstest]
#[case::root_meta_data(DOUBLE, "/tree/metaData", "1:x::3", "tree/TopLevel", "metaData")]
#[case::nested_meta_data(
    DOUBLE,
    "/tree/declarations/0/metaData",
    "1:0",
    "tree/TopLevel/declarations/FunctionDeclaration",
    "metaData"
)]
#[case::token_range(
    DOUBLE,
    "/tree/declarations/0/body/statementOrExpressions/0/keyword/textRange",
    "bad",
    concat!(
        "tree/TopLevel/declarations/FunctionDeclaration/body/Block",
        "/statementOrExpressions/Return/keyword"
    ),
    "textRange"
)]
#[case::token_reference(DOUBLE, "/tree/firstCpdToken", "1:0", "tree/TopLevel", "firstCpdToken")]
#[case::class_identifier(
    GREETER,
    "/tree/declarations/2/identifier",
    "3:0",
    "tree/TopLevel/declarations/ClassDeclaration",
    "identifier"
)]
fn test_malformed_address_names_field_and_path(
    #[case] source: &str,
    #[case] pointer: &str,
    #[case] address: &str,
    #[case] expected_path: &str,
    #[case] field: &str,
) {
    let mut doc = document(source);
    *at(&mut doc, pointer) = json!(address);
    let err = decode(&doc).expect_err("malformed address");
    let shown = err.to_string();
    match err {
        TreeError::MalformedReference {
            reference,
            message,
            path,
        } => {
            assert_eq!(reference, address);
            assert_eq!(path, expected_path);
            assert!(message.ends_with(&format!("in field '{field}'")), "{message}");
            assert!(shown.contains(&format!("at '{expected_path}'")), "{shown}");
        }
        other => panic!("expected MalformedReference, got {other:?}"),
    }
}

#[test]
fn test_unregistered_kind() {
    let kinds: Vec<TreeKind> = TreeKind::ALL
        .iter()
        .copied()
        .filter(|kind| *kind != TreeKind::Return)
        .collect();
    let registry = TypeRegistry::builder().register_standard(&kinds).build();
    assert_eq!(registry.len(), TreeKind::ALL.len() - 1);

    let fx = Fixture::new(DOUBLE);
    match JsonTree::new(&registry).to_json(&double_tree(&fx), &fx.provider) {
        Err(TreeError::UnsupportedVariant { kind }) => assert_eq!(kind, TreeKind::Return),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }

    let doc = document(DOUBLE);
    let decoded = JsonTree::new(&registry).from_value(&doc).map(|file| file.tree);
    let (message, _, _) = schema_violation(decoded);
    assert_eq!(message, "Invalid '@type' value 'Return'");
}

#[test]
fn test_identifier_field_accepts_place_holder() {
    let mut doc = document(DOUBLE);
    let parameter = "/tree/declarations/0/formalParameters/0/identifier";
    *at(&mut doc, parameter) = json!({
        "@type": "PlaceHolder",
        "metaData": "1:6::7",
        "name": "x",
        "placeHolderToken": {"textRange": "1:6::7", "text": "x"},
    });
    let tree = decode(&doc).expect("place holder parameter");
    assert!(tree.descendants().any(|t| t.kind() == TreeKind::PlaceHolder));

    *at(&mut doc, parameter) = json!({"@type": "Literal", "metaData": "1:6::7", "value": "x"});
    let (message, _, _) = schema_violation(decode(&doc));
    assert_eq!(message, "Unexpected 'Literal' type, expected 'Identifier'");
}

#[test]
fn test_identifier_tree_wire_shape() {
    let fx = Fixture::new(DOUBLE);
    let tree: Tree = IdentifierTree {
        meta: fx.meta(fx.tok("f", 0).range),
        name: "f".to_string(),
    }
    .into();
    let json = gentree::interchange::Serializer::new(&TypeRegistry::standard())
        .to_json(&tree)
        .expect("encode");
    assert_eq!(json, r#"{"@type":"Identifier","metaData":"1:4::5","name":"f"}"#);
}
