//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential policy and password hashing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum display name length in characters.
    #[serde(default = "default_name_min")]
    pub name_min_length: usize,
    /// Argon2id work factor.
    #[serde(default)]
    pub hash: HashConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            name_min_length: default_name_min(),
            hash: HashConfig::default(),
        }
    }
}

/// Argon2id cost parameters.
///
/// Defaults follow the OWASP minimum recommendation for Argon2id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes over memory.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_password_min() -> usize {
    8
}

fn default_name_min() -> usize {
    2
}

fn default_memory_kib() -> u32 {
    19_456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
