//! Session domain entities.

pub mod model;
pub mod token;

pub use model::{NewSession, ResolvedSession, Session};
pub use token::SessionToken;
