//! Session token and identifier generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use gatehouse_entity::SessionToken;

/// Bytes of OS randomness behind every session token.
pub const TOKEN_BYTES: usize = 32;

/// Generates bearer tokens and row identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Draw a fresh session token: 256 bits from the OS CSPRNG, URL-safe
    /// base64 without padding.
    pub fn new_token(&self) -> SessionToken {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        SessionToken::new(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Mint a random row identifier of any typed id.
    pub fn new_id<I: From<Uuid>>(&self) -> I {
        I::from(Uuid::new_v4())
    }
}
