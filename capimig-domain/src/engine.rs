//! Recursive walk applying the rule set to every mapping of a document.

use crate::error::TransformError;
use crate::rules::{Rule, RuleMeta, builtin_rules};
use capimig_types::Node;
use std::fmt;
use tracing::trace;

/// Applies an ordered rule set to a whole document tree.
pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine running [`builtin_rules`].
    pub fn new() -> Self {
        Self::with_rules(builtin_rules())
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Metadata of the rules, in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = RuleMeta> + '_ {
        self.rules.iter().map(|r| r.meta())
    }

    /// Rewrite `root` in place. Returns whether any node changed.
    ///
    /// Every mapping first gets all rules applied in order, then its values are
    /// visited in key order. A rule error aborts the walk; the tree may then be
    /// partially rewritten and should be discarded.
    pub fn transform(&self, root: &mut Node) -> Result<bool, TransformError> {
        let mut path = NodePath::default();
        self.walk(root, &mut path)
    }

    fn walk(&self, node: &mut Node, path: &mut NodePath) -> Result<bool, TransformError> {
        match node {
            Node::Scalar(_) => Ok(false),
            Node::Sequence(items) => {
                let mut changed = false;
                for (idx, item) in items.iter_mut().enumerate() {
                    path.push(Segment::Index(idx));
                    changed |= self.walk(item, path)?;
                    path.pop();
                }
                Ok(changed)
            }
            Node::Mapping(map) => {
                let mut changed = false;
                for rule in &self.rules {
                    let fired = rule.apply(map).map_err(|source| TransformError {
                        rule: rule.meta().id,
                        path: path.to_string(),
                        source,
                    })?;
                    if fired {
                        trace!(rule = rule.meta().id, path = %path, "rule fired");
                        changed = true;
                    }
                }
                for (key, value) in map.iter_mut() {
                    path.push(Segment::Key(key.to_string()));
                    changed |= self.walk(value, path)?;
                    path.pop();
                }
                Ok(changed)
            }
        }
    }
}

/// Run the built-in rule set over one document.
pub fn transform(root: &mut Node) -> Result<bool, TransformError> {
    Engine::new().transform(root)
}

enum Segment {
    Key(String),
    Index(usize),
}

/// Location of the node being visited, rendered as `$.spec.items[0]`.
#[derive(Default)]
struct NodePath(Vec<Segment>);

impl NodePath {
    fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}
