// Round-trip tests: trees without nulls and without structurally significant
// scalar text survive emit → parse unchanged, and canonical text survives
// parse → emit unchanged.

use yamlite::{emit, parse, Node};

fn map(entries: Vec<(&str, Node)>) -> Node {
    Node::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn assert_tree_roundtrip(tree: &Node) {
    let text = emit(tree).unwrap();
    let reparsed = parse(&text).unwrap();
    assert_eq!(&reparsed, tree, "tree did not survive emit -> parse:\n{text}");
}

fn assert_text_roundtrip(text: &str) {
    let tree = parse(text).unwrap();
    assert_eq!(emit(&tree).unwrap(), text);
}

#[test]
fn test_tree_roundtrip_flat_mapping() {
    assert_tree_roundtrip(&map(vec![
        ("a", Node::from(1)),
        ("b", Node::from(2)),
    ]));
}

#[test]
fn test_tree_roundtrip_nested() {
    assert_tree_roundtrip(&map(vec![(
        "person",
        map(vec![
            ("name", Node::from("John Doe")),
            ("age", Node::from(30)),
            (
                "friends",
                Node::Sequence(vec![Node::from("Ann"), Node::from("Ben")]),
            ),
        ]),
    )]));
}

#[test]
fn test_tree_roundtrip_sequence_of_mappings() {
    assert_tree_roundtrip(&Node::Sequence(vec![
        map(vec![("host", Node::from("a")), ("port", Node::from(80))]),
        map(vec![("host", Node::from("b")), ("port", Node::from(443))]),
    ]));
}

#[test]
fn test_tree_roundtrip_duplicate_keys() {
    assert_tree_roundtrip(&map(vec![
        ("a", Node::from(1)),
        ("a", Node::from(2)),
    ]));
}

#[test]
fn test_tree_roundtrip_empty_scalar_value() {
    assert_tree_roundtrip(&map(vec![("a", Node::from("")), ("b", Node::from(2))]));
}

#[test]
fn test_tree_roundtrip_root_scalar() {
    assert_tree_roundtrip(&Node::from("just text"));
}

#[test]
fn test_tree_roundtrip_deep_nesting() {
    let mut tree = Node::from("leaf");
    for level in 0..16 {
        tree = map(vec![(&format!("level{level}"), tree)]);
    }
    assert_tree_roundtrip(&tree);
}

#[test]
fn test_text_roundtrip_canonical_document() {
    assert_text_roundtrip(
        "person:\n  name: John Doe\n  age: 30\n  email: john.doe@example.com\n  address:\n    street: 123 Main St\n    city: Springfield\n    zip: 12345\n",
    );
}

#[test]
fn test_text_roundtrip_sequences() {
    assert_text_roundtrip("items:\n  - one\n  - two\n  - three\n");
}
