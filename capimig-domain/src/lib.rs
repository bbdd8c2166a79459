//! Domain logic: the v1beta1 → v1beta2 structural rewrite of Cluster API manifests.
//!
//! This crate owns *what* changes in a document tree and in which order. It does
//! not read files or parse text; that is the `capimig-edit` crate.

mod api_group;
mod duration;
mod engine;
mod error;
mod rules;

pub use api_group::infer_api_group;
pub use duration::duration_to_seconds;
pub use engine::{Engine, transform};
pub use error::{ShapeError, TransformError};
pub use rules::{Rule, RuleMeta, builtin_rules};

/// API groups and schema identifiers the rules know about.
pub mod schema {
    pub const CONTROLPLANE_GROUP: &str = "controlplane.cluster.x-k8s.io";
    pub const BOOTSTRAP_GROUP: &str = "bootstrap.cluster.x-k8s.io";
    pub const INFRASTRUCTURE_GROUP: &str = "infrastructure.cluster.x-k8s.io";

    /// Raw-text identifier of the schema being migrated away from.
    pub const LEGACY_API_VERSION: &str = "cluster.x-k8s.io/v1beta1";
    /// Raw-text identifier that replaces [`LEGACY_API_VERSION`].
    pub const TARGET_API_VERSION: &str = "cluster.x-k8s.io/v1beta2";
}
