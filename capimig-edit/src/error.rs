//! Error types for capimig-edit.
//!
//! Two families, mapped to distinct exit codes:
//! - Input errors (exit code 2): the file is not valid YAML, or a document has
//!   a shape none of the migration rules accept.
//! - Runtime errors (exit code 1): reading, serializing or writing failed.

use camino::Utf8PathBuf;
use capimig_domain::TransformError;
use thiserror::Error;

/// Failure of a [`DocumentCodec`](crate::DocumentCodec).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// The top-level error type for migrating a file.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse documents")]
    Parse(#[source] CodecError),

    /// A document (zero-based `index` within the file) has an unexpected shape.
    #[error("migrate document {index}")]
    Transform {
        index: usize,
        #[source]
        source: TransformError,
    },

    #[error("serialize documents")]
    Serialize(#[source] CodecError),

    #[error("write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MigrateError {
    /// Returns true when the input itself is at fault (exit code 2).
    pub fn is_input_error(&self) -> bool {
        matches!(self, MigrateError::Parse(_) | MigrateError::Transform { .. })
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_input_error() { 2 } else { 1 }
    }
}
