//! # gatehouse-api
//!
//! HTTP boundary for Gatehouse built on Axum.
//!
//! Translates requests into [`gatehouse_auth::AuthService`] calls, carries
//! the session token in a cookie, and maps [`gatehouse_core::AppError`]
//! onto HTTP status codes. Handlers are generic over the
//! [`gatehouse_database::StoreProvider`] so the same router serves
//! PostgreSQL in production and the in-memory store in tests.

pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
