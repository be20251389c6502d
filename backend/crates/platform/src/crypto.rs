//! Cryptographic Utilities
//!
//! Random material for tokens, OTP codes and upload names, plus HMAC-signed
//! values used by session and flash cookies.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Signed value errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Signed value is malformed")]
    Malformed,

    #[error("Signature does not match")]
    Mismatch,

    #[error("Invalid signing key")]
    InvalidKey,
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// URL-safe random token (activation, reset, OTP tokens).
///
/// 32 random bytes, base64url without padding: safe as a path segment.
pub fn random_token() -> String {
    URL_SAFE_NO_PAD.encode(random_bytes(32))
}

/// Non-empty and drawn from the [`random_token`] alphabet, so safe to
/// place in a URL path segment unencoded
pub fn is_url_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// String of `len` random decimal digits, leading zeros allowed.
pub fn random_digits(len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
        .collect()
}

/// Random number with exactly `digits` decimal digits (no leading zero).
///
/// `digits` is clamped to 1..=9 so the result fits a `u32`.
pub fn random_code(digits: u32) -> u32 {
    let digits = digits.clamp(1, 9);
    let low = 10u32.pow(digits - 1);
    let high = 10u32.pow(digits);
    OsRng.gen_range(low..high)
}

fn mac(key: &[u8], payload: &str) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

/// Sign `payload`, producing `<payload>.<base64url(hmac)>`.
pub fn sign(key: &[u8], payload: &str) -> Result<String, SignatureError> {
    let signature = mac(key, payload)?.finalize().into_bytes();
    Ok(format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature)))
}

/// Verify a value produced by [`sign`] and return its payload.
///
/// The signature is split at the last `.`, so payloads may contain dots.
pub fn verify_signed<'a>(key: &[u8], signed: &'a str) -> Result<&'a str, SignatureError> {
    let (payload, signature_b64) = signed.rsplit_once('.').ok_or(SignatureError::Malformed)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| SignatureError::Malformed)?;

    // verify_slice is constant-time
    mac(key, payload)?
        .verify_slice(&signature)
        .map_err(|_| SignatureError::Mismatch)?;

    Ok(payload)
}
