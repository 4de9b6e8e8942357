//! Webhook signatures: hex-encoded HMAC-SHA256.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac(key: &str, message: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    mac
}

/// Lower-case hex HMAC-SHA256 of `message` keyed with `key`.
///
/// # Examples
///
/// ```
/// use castle_sdk::signature;
///
/// let sig = signature::compute("key", "The quick brown fox jumps over the lazy dog");
/// assert_eq!(sig, "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8");
/// ```
pub fn compute(key: &str, message: &str) -> String {
    hex::encode(mac(key, message).finalize().into_bytes())
}

/// Checks a hex signature against `message` in constant time.
///
/// Malformed hex never verifies.
pub fn verify(key: &str, message: &str, expected_hex: &str) -> bool {
    match hex::decode(expected_hex.trim()) {
        Ok(expected) => mac(key, message).verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}
