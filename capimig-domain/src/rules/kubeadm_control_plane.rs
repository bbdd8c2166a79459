use crate::error::ShapeError;
use crate::rules::{Rule, RuleMeta, has_kind};
use capimig_types::{Mapping, Node};
use tracing::debug;

/// `spec.machineTemplate.infrastructureRef` → `spec.machineTemplate.spec.infrastructureRef`.
pub struct KubeadmControlPlaneInfraRefRule;

impl KubeadmControlPlaneInfraRefRule {
    const ID: &'static str = "kubeadm-control-plane-infrastructure-ref";
    const KIND: &'static str = "KubeadmControlPlane";
    const REF: &'static str = "infrastructureRef";
}

impl Rule for KubeadmControlPlaneInfraRefRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: Self::ID,
            description: "Move the control-plane machine template's infrastructureRef under its spec",
            triggers: &[Self::KIND],
        }
    }

    fn apply(&self, node: &mut Mapping) -> Result<bool, ShapeError> {
        if !has_kind(node, Self::KIND) {
            return Ok(false);
        }
        let Some(Node::Mapping(machine_template)) = node
            .get_mut("spec")
            .and_then(Node::as_mapping_mut)
            .and_then(|spec| spec.get_mut("machineTemplate"))
        else {
            return Ok(false);
        };

        let already_moved = matches!(
            machine_template.get("spec"),
            Some(Node::Mapping(inner)) if inner.contains_key(Self::REF)
        );
        if already_moved {
            return Ok(false);
        }
        let Some(reference) = machine_template.remove(Self::REF) else {
            return Ok(false);
        };

        let mut inner = machine_template.take_mapping("spec");
        inner.insert(Self::REF, reference);
        machine_template.insert("spec", Node::Mapping(inner));
        debug!(rule = Self::ID, "moved infrastructureRef into machineTemplate.spec");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(s: &str) -> Mapping {
        match serde_yaml::from_str::<Node>(s).expect("yaml") {
            Node::Mapping(m) => m,
            other => panic!("expected mapping, got {}", other.type_name()),
        }
    }

    #[test]
    fn reference_moves_under_new_spec() {
        let mut node = yaml(
            r#"
kind: KubeadmControlPlane
spec:
  machineTemplate:
    infrastructureRef:
      kind: HCloudMachineTemplate
      name: cp
    nodeDrainTimeout: 5m
"#,
        );
        assert!(KubeadmControlPlaneInfraRefRule.apply(&mut node).unwrap());
        assert_eq!(
            node,
            yaml(
                r#"
kind: KubeadmControlPlane
spec:
  machineTemplate:
    nodeDrainTimeout: 5m
    spec:
      infrastructureRef:
        kind: HCloudMachineTemplate
        name: cp
"#
            )
        );
    }

    #[test]
    fn reference_joins_existing_spec() {
        let mut node = yaml(
            "kind: KubeadmControlPlane\nspec:\n  machineTemplate:\n    spec:\n      other: 1\n    infrastructureRef:\n      name: cp\n",
        );
        assert!(KubeadmControlPlaneInfraRefRule.apply(&mut node).unwrap());
        assert_eq!(
            node,
            yaml(
                "kind: KubeadmControlPlane\nspec:\n  machineTemplate:\n    spec:\n      other: 1\n      infrastructureRef:\n        name: cp\n"
            )
        );
    }

    #[test]
    fn existing_destination_wins() {
        let src = "kind: KubeadmControlPlane\nspec:\n  machineTemplate:\n    infrastructureRef:\n      name: old\n    spec:\n      infrastructureRef:\n        name: new\n";
        let mut node = yaml(src);
        assert!(!KubeadmControlPlaneInfraRefRule.apply(&mut node).unwrap());
        assert_eq!(node, yaml(src));
    }

    #[test]
    fn other_kinds_are_ignored() {
        let src = "kind: MachineDeployment\nspec:\n  machineTemplate:\n    infrastructureRef:\n      name: cp\n";
        let mut node = yaml(src);
        assert!(!KubeadmControlPlaneInfraRefRule.apply(&mut node).unwrap());
        assert_eq!(node, yaml(src));
    }
}
