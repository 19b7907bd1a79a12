//! # gatehouse-auth
//!
//! Registration, authentication, and session lifecycle for Gatehouse.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and length policy
//! - `token`: Session token and row identifier generation
//! - `service`: The [`AuthService`] orchestrating the stores

pub mod password;
pub mod service;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use service::{AuthService, ClientMetadata, IssuedSession, SessionGrant};
pub use token::TokenGenerator;
