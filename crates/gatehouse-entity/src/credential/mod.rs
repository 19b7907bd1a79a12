//! Credential domain entities.

pub mod model;
pub mod provider;

pub use model::{Credential, CredentialLookup, NewCredential};
pub use provider::CredentialProvider;
