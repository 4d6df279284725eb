//! Git identity settings applied to every generated repository.

use serde::{Deserialize, Serialize};

/// Optional identity and signing settings for a repository.
///
/// Each value is written verbatim as local git configuration. A signing key
/// also turns on commit signing and forced signing of annotated tags.
///
/// # Examples
///
/// ```
/// use cs_core::GitIdentity;
///
/// let identity = GitIdentity::new(Some("Ada".to_owned()), None, None);
/// let entries = identity.config_entries();
/// assert_eq!(entries, vec![("user.name", "Ada".to_owned())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitIdentity {
    /// Value for `user.name`.
    pub name: Option<String>,

    /// Value for `user.email`.
    pub email: Option<String>,

    /// Value for `user.signingkey`.
    pub signing_key: Option<String>,
}

impl GitIdentity {
    /// Creates a new identity from optional settings.
    #[must_use]
    pub const fn new(
        name: Option<String>,
        email: Option<String>,
        signing_key: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            signing_key,
        }
    }

    /// Returns `true` if no setting is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.signing_key.is_none()
    }

    /// Returns `true` if commits and tags will be signed.
    #[must_use]
    pub const fn enforces_signing(&self) -> bool {
        self.signing_key.is_some()
    }

    /// Returns the `git config` key/value pairs in the order they are applied.
    #[must_use]
    pub fn config_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::with_capacity(5);

        if let Some(name) = &self.name {
            entries.push(("user.name", name.clone()));
        }
        if let Some(email) = &self.email {
            entries.push(("user.email", email.clone()));
        }
        if let Some(key) = &self.signing_key {
            entries.push(("user.signingkey", key.clone()));
            entries.push(("commit.gpgsign", "true".to_owned()));
            entries.push(("tag.forceSignAnnotated", "true".to_owned()));
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_identity() {
        let identity = GitIdentity::default();
        assert!(identity.is_empty());
        assert!(!identity.enforces_signing());
        assert!(identity.config_entries().is_empty());
    }

    #[test]
    fn test_email_without_name() {
        let identity = GitIdentity::new(None, Some("ada@example.com".to_owned()), None);
        assert_eq!(
            identity.config_entries(),
            vec![("user.email", "ada@example.com".to_owned())]
        );
    }

    #[test]
    fn test_signing_key_enforces_signing() {
        let identity = GitIdentity::new(
            Some("Ada".to_owned()),
            Some("ada@example.com".to_owned()),
            Some("ABCD1234".to_owned()),
        );
        assert!(identity.enforces_signing());
        let keys: Vec<_> = identity.config_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "user.name",
                "user.email",
                "user.signingkey",
                "commit.gpgsign",
                "tag.forceSignAnnotated"
            ]
        );
    }

    #[test]
    fn test_values_are_verbatim() {
        let identity = GitIdentity::new(Some("Ada Lovelace".to_owned()), None, None);
        assert_eq!(identity.config_entries()[0].1, "Ada Lovelace");
    }
}
