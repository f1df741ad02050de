mod crypto;
mod error;
mod format;

pub use crate::crypto::{KEY_LEN, KdfProvider, SALT_LEN, ScryptKdf, ScryptParams};
pub use crate::error::HashError;
pub use crate::format::ENCODED_LEN;

use anyhow::Result;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Password-at-rest hasher built on scrypt.
///
/// Owns the current cost-parameter policy and a [`KdfProvider`], and exposes
/// the full hash lifecycle: creating encoded hashes, verifying candidate
/// secrets against stored ones, and detecting hashes produced under outdated
/// parameters so they can be re-hashed after the next successful login.
///
/// Each call is stateless and may run concurrently; one derivation uses
/// [`ScryptParams::memory_cost_bytes`] of memory, which callers should account
/// for when sizing worker pools.
pub struct ScryptHasher<K: KdfProvider = ScryptKdf> {
    kdf: K,
    params: ScryptParams,
}

impl ScryptHasher {
    /// Hasher backed by the built-in scrypt implementation.
    pub fn new(params: ScryptParams) -> Self {
        Self::with_provider(ScryptKdf, params)
    }
}

impl Default for ScryptHasher {
    fn default() -> Self {
        Self::new(ScryptParams::INTERACTIVE)
    }
}

impl<K: KdfProvider> ScryptHasher<K> {
    /// Hasher with an explicit KDF provider, for embedders with their own
    /// scrypt binding and for tests.
    pub fn with_provider(kdf: K, params: ScryptParams) -> Self {
        Self { kdf, params }
    }

    /// The current cost-parameter policy.
    pub fn params(&self) -> ScryptParams {
        self.params
    }

    /// Whether a usable scrypt implementation is present. `hash` and `verify`
    /// fail with [`HashError::KdfUnavailable`] when this is `false`.
    pub fn is_available(&self) -> bool {
        self.kdf.is_available()
    }

    /// Hashes `secret` under the current policy with a fresh random salt and
    /// returns the encoded string, the only artifact the caller must persist.
    pub fn hash(&self, secret: &[u8]) -> Result<String> {
        let salt = crypto::generate_salt()?;
        self.create_hash(secret, &salt, self.params)
    }

    /// Checks `secret` against a previously stored hash.
    ///
    /// Re-derives under the parameters and salt decoded from `stored` (not the
    /// current policy) and compares in constant time. A wrong secret is
    /// `Ok(false)`; an undecodable `stored` is [`HashError::MalformedHash`],
    /// kept distinct so callers can log and audit it separately.
    pub fn verify(&self, secret: &[u8], stored: &str) -> Result<bool> {
        let parts = format::separate(stored)?;
        let recomputed = self.create_hash(secret, parts.salt, parts.params)?;

        // Both sides are fixed 109-byte strings here, so the comparison has
        // no length or early-exit leak.
        Ok(recomputed.as_bytes().ct_eq(stored.as_bytes()).into())
    }

    /// Whether `stored` was produced under parameters that differ from the
    /// current policy.
    ///
    /// Any difference counts, even a stronger stored hash. Treating "differs
    /// from policy" rather than "weaker than policy" as the trigger lets
    /// operators tune costs down temporarily and have hashes migrate back
    /// once the policy is raised again.
    pub fn needs_upgrade(&self, stored: &str) -> Result<bool> {
        let parts = format::separate(stored)?;
        Ok(parts.params != self.params)
    }

    /// Human-readable algorithm name.
    pub fn name(&self) -> &'static str {
        "scrypt"
    }

    /// Fixed length of every encoded hash this hasher produces.
    pub fn encoded_len(&self) -> usize {
        ENCODED_LEN
    }

    /// Numeric strength score for hasher-selection policies.
    pub fn strength(&self) -> f32 {
        if self.is_available() { 4.0 } else { 0.8 }
    }

    pub fn human_readable_strength(&self) -> &'static str {
        if self.is_available() { "Great" } else { "Bad" }
    }

    /// Guidance shown when the capability check fails.
    pub fn install_instructions(&self) -> &'static str {
        "Provide a KdfProvider backed by a native scrypt library, or use the \
         built-in pure-Rust implementation."
    }

    fn create_hash(&self, secret: &[u8], salt: &str, params: ScryptParams) -> Result<String> {
        if !self.kdf.is_available() {
            return Err(HashError::KdfUnavailable.into());
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        self.kdf.derive(secret, salt.as_bytes(), &params, &mut key[..])?;

        Ok(format::combine(&params, salt, &key[..]))
    }
}
