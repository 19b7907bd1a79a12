//! # gatehouse-database
//!
//! Persistence for identities, credentials, and sessions.
//!
//! The [`store`] module defines the request-scoped handle traits the auth
//! service is written against. Two backends implement them: PostgreSQL via
//! sqlx ([`postgres`]) and an in-process backend ([`memory`]) with the same
//! uniqueness and expiry semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryHandle, MemoryScope, MemoryStore};
pub use postgres::{PgHandle, PgScope, PgStore};
pub use store::{IdentityStore, SessionStore, StoreHandle, StoreProvider, StoreScope};
