//! # Credential Derivation
//!
//! The donation API never sees the raw API key. Every call is authenticated
//! with a hashed key instead: the lowercase hex SHA-1 digest of the client
//! id (decimal) immediately followed by the API key.
//!
//! ```text
//! hashed_key = hex(sha1(format!("{client_id}{api_key}")))
//! ```
//!
//! There is no separator between the two parts, so `(1, "23")` and
//! `(12, "3")` produce the same digest. The format is dictated by the API.

use sha1::{Digest, Sha1};

/// Derive the hashed key used to authenticate API calls.
pub fn derive_hashed_key(client_id: u32, api_key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(client_id.to_string().as_bytes());
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
