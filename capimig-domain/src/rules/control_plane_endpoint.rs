use crate::error::ShapeError;
use crate::rules::{Rule, RuleMeta};
use capimig_types::{Mapping, Node, Scalar};
use tracing::debug;

/// Drop `controlPlaneEndpoint` blocks whose host is missing or blank.
pub struct EmptyControlPlaneEndpointRule;

impl EmptyControlPlaneEndpointRule {
    const ID: &'static str = "prune-empty-control-plane-endpoint";
    const KEY: &'static str = "controlPlaneEndpoint";

    fn host_is_empty(endpoint: &Mapping) -> bool {
        match endpoint.get("host") {
            None => true,
            Some(Node::Scalar(Scalar::String(host))) => host.trim().is_empty(),
            // An explicit null is a value, not a blank host.
            Some(_) => false,
        }
    }
}

impl Rule for EmptyControlPlaneEndpointRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: Self::ID,
            description: "Remove controlPlaneEndpoint blocks with an empty host",
            triggers: &[Self::KEY],
        }
    }

    fn apply(&self, node: &mut Mapping) -> Result<bool, ShapeError> {
        let Some(Node::Mapping(endpoint)) = node.get(Self::KEY) else {
            return Ok(false);
        };
        if !Self::host_is_empty(endpoint) {
            return Ok(false);
        }
        debug!(rule = Self::ID, "removed empty controlPlaneEndpoint");
        node.remove(Self::KEY);
        Ok(true)
    }
}
