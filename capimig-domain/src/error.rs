//! Error types for the rule set and the engine.
//!
//! Only one condition is fatal: a field whose shape matches neither the legacy
//! nor the migrated form. Everything else a rule does not recognise is left
//! untouched.

use thiserror::Error;

/// A rule found a field in a shape it refuses to coerce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("unexpected `{key}` type: expected a mapping or a sequence, found {found}")]
    ExpectedMappingOrSequence {
        key: &'static str,
        found: &'static str,
    },
}

/// A [`ShapeError`] located in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rule `{rule}` rejected the node at {path}")]
pub struct TransformError {
    /// Id of the rule that refused the node.
    pub rule: &'static str,
    /// Path of the offending mapping, e.g. `$.spec.template.spec`.
    pub path: String,
    #[source]
    pub source: ShapeError,
}
