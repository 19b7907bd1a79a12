//! Core type definitions used across the Gatehouse workspace.

pub mod id;

pub use id::*;
