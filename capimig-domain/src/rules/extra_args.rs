use crate::error::ShapeError;
use crate::rules::{Rule, RuleMeta};
use capimig_types::{Mapping, Node};
use tracing::debug;

/// `kubeletExtraArgs: {k: v}` → `kubeletExtraArgs: [{name: k, value: v}]`, same for `extraArgs`.
pub struct ExtraArgsToListRule;

impl ExtraArgsToListRule {
    const ID: &'static str = "extra-args-to-list";
    const KEYS: &'static [&'static str] = &["kubeletExtraArgs", "extraArgs"];

    fn to_name_value_list(args: Mapping) -> Vec<Node> {
        args.into_iter()
            .map(|(name, value)| {
                let mut item = Mapping::new();
                item.insert("name", Node::from(name));
                item.insert("value", value);
                Node::Mapping(item)
            })
            .collect()
    }
}

impl Rule for ExtraArgsToListRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: Self::ID,
            description: "Convert extra-args mappings into ordered name/value lists",
            triggers: Self::KEYS,
        }
    }

    fn apply(&self, node: &mut Mapping) -> Result<bool, ShapeError> {
        let mut changed = false;
        for &key in Self::KEYS {
            let Some(value) = node.get_mut(key) else {
                continue;
            };
            match value {
                Node::Mapping(args) => {
                    let list = Self::to_name_value_list(std::mem::take(args));
                    debug!(rule = Self::ID, key, entries = list.len(), "converted mapping to list");
                    *value = Node::Sequence(list);
                    changed = true;
                }
                Node::Sequence(_) => {}
                Node::Scalar(_) => {
                    return Err(ShapeError::ExpectedMappingOrSequence {
                        key,
                        found: value.type_name(),
                    });
                }
            }
        }
        Ok(changed)
    }
}
