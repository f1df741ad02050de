//! Cryptographic primitives for password hashing.
//!
//! Provides the scrypt parameter policy, the KDF provider abstraction,
//! and salt generation.

pub mod kdf;

pub use kdf::{KdfProvider, ScryptKdf, ScryptParams, generate_salt};

/// Length of the salt field (16 ASCII characters).
pub const SALT_LEN: usize = 16;
/// Length of the derived key (40 bytes, 80 characters once hex-encoded).
pub const KEY_LEN: usize = 40;
