//! Short code derivation.
//!
//! Codes are content fingerprints: the same long URL shortened by the same
//! user always yields the same code, and different users get different codes
//! for the same URL.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of characters in a derived short code.
pub const SHORT_CODE_LENGTH: usize = 8;

/// Number of digest bytes fed into the base64 encoder.
const DIGEST_PREFIX_BYTES: usize = 8;

/// Joins the long URL and the user identifier before hashing.
const INPUT_SEPARATOR: char = '-';

/// Derives the short code for a `(long_url, user_id)` pair.
///
/// The pair is joined as `"{long_url}-{user_id}"` and hashed with SHA-256.
/// The first 8 digest bytes are encoded with the padded URL-safe base64
/// alphabet, and the encoded string is cut to its first 8 characters.
///
/// The cut happens on encoded characters, not raw bytes, so only 48 of the
/// 64 selected bits survive. Codes produced elsewhere with the same recipe
/// must stay byte-for-byte identical, so do not change this without
/// migrating existing mappings.
///
/// # Examples
///
/// ```
/// use kv_shortener::utils::code_generator::derive_short_code;
///
/// let code = derive_short_code("https://example.com/a", "user1");
/// assert_eq!(code, "wLkJasyJ");
/// assert_ne!(code, derive_short_code("https://example.com/a", "user2"));
/// ```
pub fn derive_short_code(long_url: &str, user_id: &str) -> String {
    let input = format!("{long_url}{INPUT_SEPARATOR}{user_id}");
    let digest = Sha256::digest(input.as_bytes());

    let mut code =
        base64::engine::general_purpose::URL_SAFE.encode(&digest[..DIGEST_PREFIX_BYTES]);
    code.truncate(SHORT_CODE_LENGTH);

    code
}
