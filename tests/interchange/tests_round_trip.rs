//! Whole-document round trips: decode(encode(T)) == T and stable bytes.

use std::collections::BTreeSet;

use gentree::interchange::{Deserializer, JsonTree, Serializer, TypeRegistry};
use gentree::tree::Tree;
use gentree::{Annotation, MetaDataProvider, TextRange, TreeKind};
use rstest::rstest;

use crate::helpers::fixture::{DOUBLE, Fixture, GREETER, double_tree, greeter_tree};

fn fixture_tree(source: &str) -> (Fixture, Tree) {
    let fx = Fixture::new(source);
    let tree = if source == GREETER {
        greeter_tree(&fx)
    } else {
        double_tree(&fx)
    };
    (fx, tree)
}

#[rstest]
#[case(DOUBLE)]
#[case(GREETER)]
fn test_document_round_trip(#[case] source: &str) {
    let (fx, tree) = fixture_tree(source);
    let registry = TypeRegistry::standard();
    let json = JsonTree::new(&registry)
        .to_json(&tree, &fx.provider)
        .expect("encode");
    let file = JsonTree::new(&registry).from_json(&json).expect("decode");

    assert_eq!(file.tree, tree);
    assert_eq!(file.provider, fx.provider);
}

#[rstest]
#[case(DOUBLE)]
#[case(GREETER)]
fn test_encoding_is_idempotent(#[case] source: &str) {
    let (fx, tree) = fixture_tree(source);
    let registry = TypeRegistry::standard();
    let codec = JsonTree::new(&registry);
    let first = codec.to_json(&tree, &fx.provider).expect("encode");
    let decoded = codec.from_json(&first).expect("decode");
    let second = codec
        .to_json(&decoded.tree, &decoded.provider)
        .expect("re-encode");
    assert_eq!(first, second);
}

#[test]
fn test_fixtures_cover_every_kind() {
    let (_, double) = fixture_tree(DOUBLE);
    let (_, greeter) = fixture_tree(GREETER);
    let seen: BTreeSet<TreeKind> = double
        .descendants()
        .chain(greeter.descendants())
        .map(Tree::kind)
        .collect();
    let all: BTreeSet<TreeKind> = TreeKind::ALL.iter().copied().collect();
    assert_eq!(seen, all);
}

#[test]
fn test_tree_round_trip_against_shared_provider() {
    let (fx, tree) = fixture_tree(GREETER);
    let registry = TypeRegistry::standard();
    let json = Serializer::new(&registry).to_json(&tree).expect("encode");
    let decoded = Deserializer::new(&registry, &fx.provider)
        .from_json(&json)
        .expect("decode");
    assert_eq!(decoded, tree);
}

#[test]
fn test_class_identifier_resolves_into_class_body() {
    let (fx, tree) = fixture_tree(GREETER);
    let registry = TypeRegistry::standard();
    let json = JsonTree::new(&registry)
        .to_json(&tree, &fx.provider)
        .expect("encode");
    let file = JsonTree::new(&registry).from_json(&json).expect("decode");

    let class = file
        .tree
        .descendants()
        .find_map(|tree| match tree {
            Tree::ClassDeclaration(class) => Some(class),
            _ => None,
        })
        .expect("class declaration");
    let identifier = class.identifier().expect("class name");
    assert_eq!(identifier.kind(), TreeKind::Identifier);
    assert_eq!(identifier.text_range(), fx.tok("Greeter", 0).range);
}

#[test]
fn test_first_cpd_token_is_the_provider_token() {
    let (fx, tree) = fixture_tree(DOUBLE);
    let registry = TypeRegistry::standard();
    let json = JsonTree::new(&registry)
        .to_json(&tree, &fx.provider)
        .expect("encode");
    let file = JsonTree::new(&registry).from_json(&json).expect("decode");
    let Tree::TopLevel(top) = &file.tree else {
        panic!("expected TopLevel, got {}", file.tree.kind());
    };
    assert_eq!(top.first_cpd_token.as_ref(), Some(&fx.tok("fun", 0)));
}

#[test]
fn test_annotations_round_trip() {
    let fx = Fixture::new(DOUBLE);
    let annotation = Annotation::new(
        "Suppress",
        vec!["\"unused\"".into()],
        TextRange::from_coords(1, 0, 1, 3),
    );
    let provider = MetaDataProvider::new(
        fx.provider.tokens().to_vec(),
        fx.provider.comments().to_vec(),
        vec![annotation.clone()],
    );
    let fx = Fixture {
        source: fx.source,
        provider,
    };
    let tree = double_tree(&fx);
    assert_eq!(tree.meta_data().annotations(), std::slice::from_ref(&annotation));

    let registry = TypeRegistry::standard();
    let json = JsonTree::new(&registry)
        .to_json(&tree, &fx.provider)
        .expect("encode");
    assert!(json.contains(
        r#""annotations":[{"shortName":"Suppress","argumentsText":["\"unused\""],"range":"1:0::3"}]"#
    ));
    let file = JsonTree::new(&registry).from_json(&json).expect("decode");
    assert_eq!(file.tree, tree);
    assert_eq!(file.provider.annotations(), std::slice::from_ref(&annotation));
}

#[test]
fn test_lines_of_code_survive_round_trip() {
    let (fx, tree) = fixture_tree(DOUBLE);
    let registry = TypeRegistry::standard();
    let json = JsonTree::new(&registry)
        .to_json(&tree, &fx.provider)
        .expect("encode");
    let file = JsonTree::new(&registry).from_json(&json).expect("decode");
    let lines: Vec<u32> = file.tree.meta_data().lines_of_code().into_iter().collect();
    assert_eq!(lines, vec![1, 3, 4]);
}
