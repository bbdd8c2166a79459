use crate::api_group::infer_api_group;
use crate::error::ShapeError;
use crate::rules::{Rule, RuleMeta};
use capimig_types::{Mapping, Node};
use tracing::debug;

/// Reference blocks carry `apiGroup` instead of `apiVersion` in v1beta2.
pub struct ReferenceApiGroupRule;

impl ReferenceApiGroupRule {
    const ID: &'static str = "reference-api-group";
    const KEYS: &'static [&'static str] = &["infrastructureRef", "controlPlaneRef", "configRef"];
}

impl Rule for ReferenceApiGroupRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: Self::ID,
            description: "Set apiGroup on reference blocks and drop their apiVersion",
            triggers: Self::KEYS,
        }
    }

    fn apply(&self, node: &mut Mapping) -> Result<bool, ShapeError> {
        let mut changed = false;
        for &key in Self::KEYS {
            let Some(Node::Mapping(reference)) = node.get_mut(key) else {
                continue;
            };

            if !reference.contains_key("apiGroup") {
                match infer_api_group(reference) {
                    Some(group) => {
                        debug!(rule = Self::ID, key, group = %group, "set apiGroup");
                        reference.insert("apiGroup", Node::from(group));
                        changed = true;
                    }
                    None => debug!(rule = Self::ID, key, "could not infer apiGroup"),
                }
            }

            if reference.remove("apiVersion").is_some() {
                changed = true;
            }
        }
        Ok(changed)
    }
}
