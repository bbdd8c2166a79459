//! Loading and emitting the document tree through serde formats.

use capimig_types::{Mapping, Node, Scalar};
use pretty_assertions::assert_eq;

#[test]
fn yaml_mapping_keeps_source_key_order() {
    let node: Node = serde_yaml::from_str("zeta: 1\nalpha: 2\nmid: 3\n").expect("parse");
    let keys: Vec<&str> = node.as_mapping().expect("mapping").keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn yaml_scalars_load_as_typed_variants() {
    let node: Node = serde_yaml::from_str(
        r#"
s: hello
quoted: "600"
i: 600
neg: -3
f: 1.5
b: true
n: ~
empty:
"#,
    )
    .expect("parse");
    let m = node.as_mapping().expect("mapping");
    assert_eq!(m.get("s"), Some(&Node::from("hello")));
    assert_eq!(m.get("quoted"), Some(&Node::from("600")));
    assert_eq!(m.get("i"), Some(&Node::from(600)));
    assert_eq!(m.get("neg"), Some(&Node::from(-3)));
    assert_eq!(m.get("f"), Some(&Node::Scalar(Scalar::Float(1.5))));
    assert_eq!(m.get("b"), Some(&Node::from(true)));
    assert_eq!(m.get("n"), Some(&Node::null()));
    assert_eq!(m.get("empty"), Some(&Node::null()));
}

#[test]
fn non_string_keys_are_stringified() {
    let node: Node = serde_yaml::from_str("80: http\ntrue: yes-key\n").expect("parse");
    let keys: Vec<&str> = node.as_mapping().expect("mapping").keys().collect();
    assert_eq!(keys, vec!["80", "true"]);
}

#[test]
fn tagged_values_are_rejected() {
    let res: Result<Node, _> = serde_yaml::from_str("value: !custom thing\n");
    assert!(res.is_err());
}

#[test]
fn emitted_yaml_reloads_to_the_same_tree() {
    let mut inner = Mapping::new();
    inner.insert("name", Node::from("node-ip"));
    inner.insert("value", Node::from("600"));
    let mut root = Mapping::new();
    root.insert("kubeletExtraArgs", Node::Sequence(vec![inner.into()]));
    root.insert("replicas", Node::from(3));
    root.insert("paused", Node::from(false));
    root.insert("note", Node::null());
    let root = Node::from(root);

    let text = serde_yaml::to_string(&root).expect("emit");
    let back: Node = serde_yaml::from_str(&text).expect("reload");
    assert_eq!(back, root);
}

#[test]
fn json_emission_follows_mapping_order() {
    let m: Mapping = [("b", Node::from(1)), ("a", Node::from(2))].into_iter().collect();
    let json = serde_json::to_string(&Node::from(m)).expect("json");
    assert_eq!(json, r#"{"b":1,"a":2}"#);
}

#[test]
fn big_unsigned_integers_round_trip() {
    let node: Node = serde_yaml::from_str("a: 18446744073709551615\n").expect("parse");
    let text = serde_yaml::to_string(&node).expect("emit");
    assert_eq!(text, "a: 18446744073709551615\n");
}
