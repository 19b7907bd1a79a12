//! PostgreSQL repositories for Gatehouse entities.
//!
//! Repositories are stateless: every method takes the connection it should
//! run on, so the same query can execute on a pooled connection or inside
//! an open transaction.

pub mod credential;
pub mod identity;
pub mod session;

pub use credential::CredentialRepository;
pub use identity::IdentityRepository;
pub use session::SessionRepository;

use gatehouse_core::error::{AppError, ConflictTarget, ErrorKind};

/// Map an INSERT failure, turning a violation of `constraint` into a
/// conflict on `target`.
pub(crate) fn map_insert_error(
    err: sqlx::Error,
    constraint: &str,
    target: ConflictTarget,
    context: &str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err)
            if db_err.is_unique_violation() && db_err.constraint() == Some(constraint) =>
        {
            AppError::conflict(target)
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}
