use crate::schema::{BOOTSTRAP_GROUP, CONTROLPLANE_GROUP, INFRASTRUCTURE_GROUP};
use capimig_types::Mapping;

/// Kinds whose API group is known without looking at `apiVersion`.
const KIND_GROUPS: &[(&str, &str)] = &[
    ("KubeadmControlPlane", CONTROLPLANE_GROUP),
    ("KubeadmControlPlaneTemplate", CONTROLPLANE_GROUP),
    ("KubeadmConfig", BOOTSTRAP_GROUP),
    ("KubeadmConfigTemplate", BOOTSTRAP_GROUP),
    ("KubeadmConfigTemplateList", BOOTSTRAP_GROUP),
];

/// Name fragments of the infrastructure provider's kinds.
const INFRASTRUCTURE_HINTS: &[&str] = &["HCloud", "Hetzner", "BareMetal", "BM"];

/// Infer the `apiGroup` of a reference block (`{kind, name, apiVersion?}`).
///
/// Tried in order: the group part of `apiVersion`, the static kind table, then
/// the infrastructure heuristics. Returns `None` rather than guessing.
pub fn infer_api_group(reference: &Mapping) -> Option<String> {
    if let Some((group, _version)) = reference
        .get_str("apiVersion")
        .and_then(|v| v.split_once('/'))
        .filter(|(group, _)| !group.is_empty())
    {
        return Some(group.to_string());
    }

    let kind = reference.get_str("kind")?;

    if let Some((_, group)) = KIND_GROUPS.iter().find(|(k, _)| *k == kind) {
        return Some((*group).to_string());
    }

    let infrastructure = INFRASTRUCTURE_HINTS.iter().any(|hint| kind.contains(hint))
        || kind.ends_with("Cluster")
        || kind.ends_with("MachineTemplate");
    infrastructure.then(|| INFRASTRUCTURE_GROUP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use capimig_types::Node;

    fn reference(entries: &[(&str, &str)]) -> Mapping {
        entries.iter().map(|(k, v)| (*k, Node::from(*v))).collect()
    }

    #[test]
    fn group_comes_from_api_version_first() {
        let r = reference(&[
            ("kind", "KubeadmControlPlane"),
            ("apiVersion", "example.io/v1"),
        ]);
        assert_eq!(infer_api_group(&r).as_deref(), Some("example.io"));
    }

    #[test]
    fn api_version_without_group_falls_through_to_kind() {
        let r = reference(&[("kind", "KubeadmConfigTemplate"), ("apiVersion", "v1")]);
        assert_eq!(infer_api_group(&r).as_deref(), Some(BOOTSTRAP_GROUP));
    }

    #[test]
    fn empty_group_in_api_version_is_not_used() {
        let r = reference(&[("kind", "Secret"), ("apiVersion", "/v1")]);
        assert_eq!(infer_api_group(&r), None);

        let r = reference(&[("kind", "KubeadmConfig"), ("apiVersion", "/v1")]);
        assert_eq!(infer_api_group(&r).as_deref(), Some(BOOTSTRAP_GROUP));
    }

    #[test]
    fn static_kind_table() {
        let r = reference(&[("kind", "KubeadmControlPlane")]);
        assert_eq!(infer_api_group(&r).as_deref(), Some(CONTROLPLANE_GROUP));
        let r = reference(&[("kind", "KubeadmConfig")]);
        assert_eq!(infer_api_group(&r).as_deref(), Some(BOOTSTRAP_GROUP));
    }

    #[test]
    fn infrastructure_heuristics() {
        for kind in [
            "HCloudMachineTemplate",
            "HetznerCluster",
            "HetznerBareMetalHost",
            "BMMachine",
            "DockerCluster",
            "AWSMachineTemplate",
        ] {
            let r = reference(&[("kind", kind)]);
            assert_eq!(
                infer_api_group(&r).as_deref(),
                Some(INFRASTRUCTURE_GROUP),
                "kind {kind}"
            );
        }
    }

    #[test]
    fn unknown_kind_is_not_guessed() {
        assert_eq!(infer_api_group(&reference(&[("kind", "Secret")])), None);
        assert_eq!(infer_api_group(&reference(&[("name", "x")])), None);

        let mut r = Mapping::new();
        r.insert("kind", Node::from(7));
        assert_eq!(infer_api_group(&r), None);
    }
}
