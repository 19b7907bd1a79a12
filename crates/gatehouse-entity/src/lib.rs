//! # gatehouse-entity
//!
//! Domain entity models for Gatehouse. Every struct in this crate
//! represents a database table row, a joined projection of rows, or the
//! input for an insert. The joined projections that queries read
//! (`CredentialLookup`, `ResolvedSession`) derive `sqlx::FromRow`.

pub mod credential;
pub mod identity;
pub mod session;

pub use credential::{Credential, CredentialLookup, CredentialProvider, NewCredential};
pub use identity::{Identity, IdentityPublic, NewIdentity};
pub use session::{NewSession, ResolvedSession, Session, SessionToken};
