//! Encoded-hash format handling.
//!
//! The persisted artifact is a single pipe-delimited string:
//! ```text
//! logN (3) | r (3) | p (3) | salt (16 chars) | key (80 hex chars)
//! ```
//! Numeric fields are zero-padded to three digits so the total length is a
//! fixed 109 characters. Decoding is strict: wrong length, wrong field count,
//! non-numeric cost fields, or a bad key field are hard errors, never
//! best-effort coercions.

use crate::crypto::{KEY_LEN, SALT_LEN, ScryptParams};
use crate::error::HashError;

/// Width of each zero-padded numeric field.
const NUM_LEN: usize = 3;
/// Width of the hex-encoded derived key.
const KEY_HEX_LEN: usize = KEY_LEN * 2;
/// Total encoded length: three numeric fields, salt, key, four delimiters.
pub const ENCODED_LEN: usize = 3 * NUM_LEN + SALT_LEN + KEY_HEX_LEN + 4;

const DELIMITER: char = '|';

/// The decoded components of a stored hash.
#[derive(Debug)]
pub(crate) struct HashParts<'a> {
    pub params: ScryptParams,
    pub salt: &'a str,
    pub key: Vec<u8>,
}

/// Serializes parameters, salt, and derived key into the encoded string.
///
/// The caller is responsible for passing a salt of [`SALT_LEN`] characters
/// and a key of [`KEY_LEN`] bytes; anything else breaks the fixed length.
pub(crate) fn combine(params: &ScryptParams, salt: &str, key: &[u8]) -> String {
    debug_assert_eq!(salt.len(), SALT_LEN);
    debug_assert_eq!(key.len(), KEY_LEN);

    format!(
        "{:03}|{:03}|{:03}|{}|{}",
        params.log_n(),
        params.r(),
        params.p(),
        salt,
        hex::encode(key)
    )
}

/// Parses an encoded hash back into its components.
///
/// # Errors
///
/// Returns [`HashError::MalformedHash`] if:
/// - the total length is not exactly [`ENCODED_LEN`]
/// - there are not exactly 5 `|`-separated fields of the expected widths
/// - a cost field is not a decimal integer, or decodes to invalid parameters
/// - the key field is not lowercase hex
pub(crate) fn separate(hash: &str) -> Result<HashParts<'_>, HashError> {
    if hash.len() != ENCODED_LEN {
        return Err(malformed(format!(
            "expected {ENCODED_LEN} characters, got {}",
            hash.len()
        )));
    }

    let fields: Vec<&str> = hash.split(DELIMITER).collect();
    if fields.len() != 5 {
        return Err(malformed(format!(
            "expected 5 fields, got {}",
            fields.len()
        )));
    }

    let log_n = numeric_field(fields[0], "logN")?;
    let r = numeric_field(fields[1], "r")?;
    let p = numeric_field(fields[2], "p")?;

    if log_n > u32::from(u8::MAX) {
        return Err(malformed("logN out of range".to_string()));
    }
    let params = ScryptParams::new(log_n as u8, r, p).map_err(|e| malformed(e.to_string()))?;

    let salt = fields[3];
    if salt.len() != SALT_LEN {
        return Err(malformed("wrong salt length".to_string()));
    }
    if !salt.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(malformed("salt contains non-printable characters".to_string()));
    }

    let key_hex = fields[4];
    if key_hex.len() != KEY_HEX_LEN {
        return Err(malformed("wrong derived-key length".to_string()));
    }
    if !key_hex
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(malformed("derived key is not lowercase hex".to_string()));
    }
    let key = hex::decode(key_hex).map_err(|e| malformed(e.to_string()))?;

    Ok(HashParts { params, salt, key })
}

fn numeric_field(field: &str, name: &str) -> Result<u32, HashError> {
    if field.len() != NUM_LEN || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(format!("{name} is not a 3-digit number")));
    }

    // All-digit fields of width 3 cannot overflow u32.
    field
        .parse::<u32>()
        .map_err(|e| malformed(format!("{name}: {e}")))
}

fn malformed(reason: String) -> HashError {
    HashError::MalformedHash(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: &str = "c29tZXNhbHQhISEh";

    fn sample() -> String {
        combine(&ScryptParams::INTERACTIVE, SALT, &[0xab; KEY_LEN])
    }

    #[test]
    fn roundtrip() {
        let encoded = sample();
        assert_eq!(encoded.len(), ENCODED_LEN);

        let parts = separate(&encoded).unwrap();
        assert_eq!(parts.params, ScryptParams::INTERACTIVE);
        assert_eq!(parts.salt, SALT);
        assert_eq!(parts.key, vec![0xab; KEY_LEN]);
    }

    #[test]
    fn numeric_fields_are_zero_padded() {
        let encoded = sample();
        assert!(encoded.starts_with("014|008|001|"));
    }

    #[test]
    fn wrong_total_length_fails() {
        let mut encoded = sample();
        encoded.pop();
        assert!(separate(&encoded).is_err());

        let encoded = format!("{}0", sample());
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn wrong_field_count_fails() {
        // Same length, a delimiter swallowed into the salt field.
        let encoded = sample().replacen('|', "x", 1);
        assert!(separate(&encoded).is_err());

        // An extra delimiter splitting the key field.
        let encoded = sample().replacen("ab", "|a", 1);
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn non_numeric_cost_field_fails() {
        let encoded = sample().replacen("014", "abc", 1);
        assert!(separate(&encoded).is_err());

        // A signed value must not be accepted by a lenient parse.
        let encoded = sample().replacen("008", "+08", 1);
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn zero_cost_field_fails() {
        let encoded = sample().replacen("008", "000", 1);
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn out_of_range_log_n_fails() {
        let encoded = sample().replacen("014", "099", 1);
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn uppercase_hex_key_fails() {
        let encoded = sample().replacen("ab", "AB", 1);
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn non_hex_key_fails() {
        let encoded = sample().replacen("ab", "zz", 1);
        assert!(separate(&encoded).is_err());
    }

    #[test]
    fn reports_malformed_hash_error() {
        let err = separate("junk").unwrap_err();
        assert!(matches!(err, HashError::MalformedHash(_)));
    }
}
