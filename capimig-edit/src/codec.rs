//! Turning manifest text into document trees and back.

use crate::error::CodecError;
use capimig_types::Node;
use serde::Deserialize;

/// Parser/serializer for multi-document manifest files.
///
/// The migration only needs to read and emit [`Node`] trees; how much of the
/// original formatting survives a round trip is up to the implementation.
pub trait DocumentCodec {
    fn load_all(&self, text: &str) -> Result<Vec<Node>, CodecError>;

    fn dump_all(&self, docs: &[Node]) -> Result<String, CodecError>;
}

/// `serde_yaml`-backed codec.
///
/// Key order, scalar types and document boundaries survive; comments and
/// quoting style do not.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn load_all(&self, text: &str) -> Result<Vec<Node>, CodecError> {
        let mut docs = Vec::new();
        for de in serde_yaml::Deserializer::from_str(text) {
            docs.push(Node::deserialize(de)?);
        }
        Ok(docs)
    }

    fn dump_all(&self, docs: &[Node]) -> Result<String, CodecError> {
        let mut out = String::new();
        for (idx, doc) in docs.iter().enumerate() {
            if idx > 0 {
                out.push_str("---\n");
            }
            // An empty document stays empty instead of becoming `null`.
            if doc.is_null() {
                continue;
            }
            out.push_str(&serde_yaml::to_string(doc)?);
        }
        Ok(out)
    }
}
