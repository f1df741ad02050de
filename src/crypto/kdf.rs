use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use getrandom::fill;

use super::SALT_LEN;
use crate::error::HashError;

/// Raw entropy behind a salt; 12 bytes base64-encode to exactly 16 characters.
const SALT_RAW_LEN: usize = 12;

/// Scrypt cost parameters.
///
/// `log_n` is log2 of the cost factor N. Memory use of a single derivation is
/// roughly `128 * r * 2^log_n` bytes, exposed via [`memory_cost_bytes`] so
/// callers can bound worker-pool concurrency.
///
/// [`memory_cost_bytes`]: ScryptParams::memory_cost_bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    log_n: u8,
    r: u32,
    p: u32,
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::INTERACTIVE
    }
}

impl ScryptParams {
    /// Recommended interactive parameters, ~16 MiB per derivation.
    pub const INTERACTIVE: Self = Self {
        log_n: 14,
        r: 8,
        p: 1,
    };

    /// Low-cost parameters, ~512 KiB per derivation. Only for environments
    /// where a full-strength derivation is too slow.
    pub const PORTABLE: Self = Self {
        log_n: 10,
        r: 4,
        p: 1,
    };

    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self> {
        let params = Self { log_n, r, p };
        params.validate()?;
        Ok(params)
    }

    pub fn log_n(&self) -> u8 {
        self.log_n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    /// Approximate memory used by one derivation, `128 * r * 2^log_n` bytes.
    pub fn memory_cost_bytes(&self) -> u64 {
        128 * u64::from(self.r) * (1u64 << self.log_n)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_n < 1 || self.log_n >= 64 {
            anyhow::bail!("scrypt log_n must be between 1 and 63");
        }
        if self.r < 1 {
            anyhow::bail!("scrypt r must be >= 1");
        }
        if self.p < 1 {
            anyhow::bail!("scrypt p must be >= 1");
        }
        // Numeric fields are zero-padded to three digits in the encoded hash.
        if self.r > 999 || self.p > 999 {
            anyhow::bail!("scrypt r and p must fit in three decimal digits");
        }
        Ok(())
    }
}

/// A source of scrypt derivations.
///
/// The hasher depends on this seam rather than on a concrete binding, so a
/// native-library implementation can be substituted and tests can model an
/// environment without scrypt support.
pub trait KdfProvider {
    /// Whether this provider can actually derive keys in the current runtime.
    fn is_available(&self) -> bool;

    /// Fill `out` with the key derived from `secret` and `salt` under `params`.
    fn derive(
        &self,
        secret: &[u8],
        salt: &[u8],
        params: &ScryptParams,
        out: &mut [u8],
    ) -> Result<()>;
}

/// Production provider backed by the pure-Rust `scrypt` crate (RFC 7914).
pub struct ScryptKdf;

impl KdfProvider for ScryptKdf {
    fn is_available(&self) -> bool {
        true
    }

    fn derive(
        &self,
        secret: &[u8],
        salt: &[u8],
        params: &ScryptParams,
        out: &mut [u8],
    ) -> Result<()> {
        params.validate()?;

        let params = scrypt::Params::new(params.log_n(), params.r(), params.p(), out.len())
            .map_err(|e| anyhow!("invalid scrypt parameters: {e}"))?;

        scrypt::scrypt(secret, salt, &params, out)
            .map_err(|e| anyhow!("scrypt derivation failed: {e}"))
    }
}

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), HashError> {
    fill(buf).map_err(|_| HashError::EntropySource)
}

/// Generate a fresh salt of 16 printable characters from OS entropy.
pub fn generate_salt() -> Result<String, HashError> {
    let mut raw = [0u8; SALT_RAW_LEN];
    secure_random(&mut raw)?;

    let salt = STANDARD.encode(raw);
    debug_assert_eq!(salt.len(), SALT_LEN);
    Ok(salt)
}
