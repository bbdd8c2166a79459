use crate::duration::duration_to_seconds;
use crate::error::ShapeError;
use crate::rules::{Rule, RuleMeta, has_kind};
use capimig_types::{Mapping, Node};
use tracing::debug;

/// Reshape a `MachineHealthCheck` spec into the v1beta2 `checks` / `remediation` layout.
///
/// | v1beta1 (`spec.`)       | v1beta2 (`spec.`)                                 |
/// |-------------------------|---------------------------------------------------|
/// | `nodeStartupTimeout`    | `checks.nodeStartupTimeoutSeconds`                |
/// | `unhealthyConditions`   | `checks.unhealthyNodeConditions`                  |
/// | `maxUnhealthy`          | `remediation.triggerIf.unhealthyLessThanOrEqualTo`|
/// | `remediationTemplate`   | `remediation.templateRef`                         |
pub struct MachineHealthCheckRule;

impl MachineHealthCheckRule {
    const ID: &'static str = "machine-health-check-v1beta2";
    const KIND: &'static str = "MachineHealthCheck";
    const TEMPLATE_KEYS: &'static [&'static str] = &["kind", "name", "apiVersion"];

    /// Duration strings become seconds; strings that do not parse and
    /// non-string values are carried over as they are.
    fn seconds(value: Node) -> Node {
        match value.as_str().and_then(duration_to_seconds) {
            Some(secs) => Node::from(secs),
            None => value,
        }
    }

    fn convert_condition(condition: &Node) -> Option<Node> {
        let Node::Mapping(condition) = condition else {
            return None;
        };
        let mut out = Mapping::new();
        for key in ["type", "status"] {
            if let Some(v) = condition.get(key) {
                out.insert(key, v.clone());
            }
        }
        match condition.get("timeout") {
            None => {}
            Some(timeout) if timeout.is_null() => {}
            Some(timeout) => {
                out.insert("timeoutSeconds", Self::seconds(timeout.clone()));
            }
        }
        (!out.is_empty()).then_some(Node::Mapping(out))
    }

    fn move_checks(spec: &mut Mapping) -> bool {
        let mut changed = false;
        let had_checks = matches!(spec.get("checks"), Some(Node::Mapping(_)));
        let mut checks = spec.take_mapping("checks");

        if let Some(timeout) = spec.remove("nodeStartupTimeout") {
            checks.insert("nodeStartupTimeoutSeconds", Self::seconds(timeout));
            changed = true;
        }

        if let Some(conditions) = spec.remove("unhealthyConditions") {
            let converted: Vec<Node> = conditions
                .as_sequence()
                .unwrap_or_default()
                .iter()
                .filter_map(Self::convert_condition)
                .collect();
            if !converted.is_empty() {
                checks.insert("unhealthyNodeConditions", Node::Sequence(converted));
            }
            changed = true;
        }

        if had_checks || !checks.is_empty() {
            spec.insert("checks", Node::Mapping(checks));
        }
        changed
    }

    fn move_remediation(spec: &mut Mapping) -> bool {
        let max_unhealthy = spec.remove("maxUnhealthy");
        let template = spec.remove("remediationTemplate");
        if max_unhealthy.is_none() && template.is_none() {
            return false;
        }

        let had_remediation = matches!(spec.get("remediation"), Some(Node::Mapping(_)));
        let mut remediation = spec.take_mapping("remediation");

        if let Some(max_unhealthy) = max_unhealthy {
            let mut trigger_if = remediation.take_mapping("triggerIf");
            if !trigger_if.contains_key("unhealthyLessThanOrEqualTo") {
                trigger_if.insert("unhealthyLessThanOrEqualTo", max_unhealthy);
            }
            remediation.insert("triggerIf", Node::Mapping(trigger_if));
        }

        if let Some(Node::Mapping(template)) = template {
            let mut template_ref = remediation.take_mapping("templateRef");
            for &key in Self::TEMPLATE_KEYS {
                if !template_ref.contains_key(key)
                    && let Some(v) = template.get(key)
                {
                    template_ref.insert(key, v.clone());
                }
            }
            remediation.insert("templateRef", Node::Mapping(template_ref));
        }

        if had_remediation || !remediation.is_empty() {
            spec.insert("remediation", Node::Mapping(remediation));
        }
        true
    }
}

impl Rule for MachineHealthCheckRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: Self::ID,
            description: "Move MachineHealthCheck timeouts and remediation into checks/remediation",
            triggers: &[Self::KIND],
        }
    }

    fn apply(&self, node: &mut Mapping) -> Result<bool, ShapeError> {
        if !has_kind(node, Self::KIND) {
            return Ok(false);
        }
        let Some(Node::Mapping(spec)) = node.get_mut("spec") else {
            return Ok(false);
        };

        let checks = Self::move_checks(spec);
        let remediation = Self::move_remediation(spec);
        if checks || remediation {
            debug!(rule = Self::ID, checks, remediation, "restructured MachineHealthCheck spec");
        }
        Ok(checks || remediation)
    }
}
