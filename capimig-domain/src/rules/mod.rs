use crate::error::ShapeError;
use capimig_types::Mapping;

mod control_plane_endpoint;
mod extra_args;
mod kubeadm_control_plane;
mod machine_health_check;
mod references;

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    /// Stable identifier, used in logs and error messages.
    pub id: &'static str,
    pub description: &'static str,
    /// Keys (or `kind` values) whose presence makes the rule look at a mapping.
    pub triggers: &'static [&'static str],
}

/// One structural rewrite applied to a single mapping node.
///
/// Rules must be self-guarding: on a mapping already in the migrated shape
/// they return `Ok(false)` and leave it untouched.
pub trait Rule {
    fn meta(&self) -> RuleMeta;

    /// Rewrite `node` in place. Returns whether anything changed.
    fn apply(&self, node: &mut Mapping) -> Result<bool, ShapeError>;
}

/// The rule set in evaluation order.
///
/// Order matters: later rules see what earlier rules left on the same node.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(extra_args::ExtraArgsToListRule),
        Box::new(references::ReferenceApiGroupRule),
        Box::new(control_plane_endpoint::EmptyControlPlaneEndpointRule),
        Box::new(machine_health_check::MachineHealthCheckRule),
        Box::new(kubeadm_control_plane::KubeadmControlPlaneInfraRefRule),
    ]
}

fn has_kind(node: &Mapping, kind: &str) -> bool {
    node.get_str("kind") == Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn rule_ids_are_unique_and_ordered() {
        let ids: Vec<&str> = builtin_rules().iter().map(|r| r.meta().id).collect();
        assert_eq!(
            ids,
            vec![
                "extra-args-to-list",
                "reference-api-group",
                "prune-empty-control-plane-endpoint",
                "machine-health-check-v1beta2",
                "kubeadm-control-plane-infrastructure-ref",
            ]
        );
        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn every_rule_declares_triggers() {
        for rule in builtin_rules() {
            let meta = rule.meta();
            assert!(!meta.triggers.is_empty(), "{} has no triggers", meta.id);
            assert!(!meta.description.is_empty(), "{} has no description", meta.id);
        }
    }
}
