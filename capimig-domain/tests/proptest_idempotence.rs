//! Property-based checks of the rule set on generated documents.
//!
//! Invariants:
//! - Idempotence: a second transform reports no change and leaves the tree as is.
//! - Trigger-free documents are never changed.

use capimig_domain::Engine;
use capimig_types::{Mapping, Node};
use proptest::prelude::*;

/// Keys that make rules fire, plus keys the rules read or write.
const KEYS: &[&str] = &[
    "kind",
    "spec",
    "kubeletExtraArgs",
    "extraArgs",
    "infrastructureRef",
    "controlPlaneRef",
    "configRef",
    "apiVersion",
    "apiGroup",
    "controlPlaneEndpoint",
    "host",
    "machineTemplate",
    "nodeStartupTimeout",
    "unhealthyConditions",
    "maxUnhealthy",
    "remediationTemplate",
    "remediation",
    "triggerIf",
    "checks",
    "templateRef",
    "type",
    "status",
    "timeout",
    "name",
    "value",
];

const STRINGS: &[&str] = &[
    "",
    "  ",
    "10m",
    "1h",
    "300",
    "1h30m",
    "MachineHealthCheck",
    "KubeadmControlPlane",
    "KubeadmConfig",
    "HCloudMachineTemplate",
    "Secret",
    "infrastructure.cluster.x-k8s.io/v1beta1",
    "v1",
    "1.2.3.4",
];

/// Keys no rule looks at.
const PLAIN_KEYS: &[&str] = &["metadata", "labels", "replicas", "image", "items", "data"];

fn arb_scalar() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::null()),
        any::<bool>().prop_map(Node::from),
        (-1000i64..1000).prop_map(Node::from),
        prop::sample::select(STRINGS).prop_map(Node::from),
    ]
}

fn arb_tree(keys: &'static [&'static str]) -> impl Strategy<Value = Node> {
    arb_scalar().prop_recursive(5, 96, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            prop::collection::vec((prop::sample::select(keys), inner), 0..6)
                .prop_map(|entries| Node::Mapping(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn transform_is_idempotent(mut node in arb_tree(KEYS)) {
        let engine = Engine::new();
        // Documents with an unexpected extra-args shape are rejected, not migrated.
        if engine.transform(&mut node).is_err() {
            return Ok(());
        }
        let once = node.clone();
        let again = engine.transform(&mut node).expect("second pass cannot fail");
        prop_assert!(!again);
        prop_assert_eq!(node, once);
    }

    #[test]
    fn trigger_free_documents_are_unchanged(mut node in arb_tree(PLAIN_KEYS)) {
        let original = node.clone();
        let changed = Engine::new().transform(&mut node).expect("no rule can reject these");
        prop_assert!(!changed);
        prop_assert_eq!(node, original);
    }
}
