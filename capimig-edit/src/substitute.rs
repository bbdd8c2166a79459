use capimig_domain::schema::{LEGACY_API_VERSION, TARGET_API_VERSION};
use std::borrow::Cow;

/// Blunt replace-all of one identifier with another over raw file text.
///
/// It runs before parsing, so it also rewrites comments and string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Default for Substitution {
    fn default() -> Self {
        Self {
            from: LEGACY_API_VERSION.to_string(),
            to: TARGET_API_VERSION.to_string(),
        }
    }
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns the rewritten text, borrowing when nothing matched.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.from.is_empty() || self.from == self.to || !text.contains(self.from.as_str()) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.replace(self.from.as_str(), &self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_everywhere_including_comments() {
        let text = "# uses cluster.x-k8s.io/v1beta1\napiVersion: cluster.x-k8s.io/v1beta1\nnote: \"see infrastructure.cluster.x-k8s.io/v1beta1\"\n";
        let out = Substitution::default().apply(text);
        assert_eq!(
            out,
            "# uses cluster.x-k8s.io/v1beta2\napiVersion: cluster.x-k8s.io/v1beta2\nnote: \"see infrastructure.cluster.x-k8s.io/v1beta2\"\n"
        );
        assert!(matches!(out, Cow::Owned(_)));
    }

    #[test]
    fn no_match_borrows() {
        let text = "apiVersion: v1\n";
        assert!(matches!(Substitution::default().apply(text), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_pattern_is_a_no_op() {
        let text = "abc";
        assert_eq!(Substitution::new("", "x").apply(text), "abc");
    }

    #[test]
    fn custom_identifiers() {
        let sub = Substitution::new("example.io/v1alpha1", "example.io/v1");
        assert_eq!(sub.apply("apiVersion: example.io/v1alpha1"), "apiVersion: example.io/v1");
    }
}
