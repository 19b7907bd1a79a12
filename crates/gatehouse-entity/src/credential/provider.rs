//! Credential provider discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a credential authenticates its identity.
///
/// Stored as plain text in the `provider` column so that other providers
/// can be added without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialProvider {
    /// Email address plus password.
    Email,
}

impl CredentialProvider {
    /// Return the provider as the string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
        }
    }
}

impl fmt::Display for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_and_serialized_names_match() {
        assert_eq!(CredentialProvider::Email.as_str(), "email");
        assert_eq!(CredentialProvider::Email.to_string(), "email");
        assert_eq!(
            serde_json::to_string(&CredentialProvider::Email).unwrap(),
            "\"email\""
        );
    }
}
