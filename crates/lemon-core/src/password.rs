//! Salted credential hashing.
//!
//! A credential digest is `SHA-256(secret || salt || username)`, stored as
//! lowercase hex. The raw secret is never stored. Verification recomputes
//! the digest and compares it against the stored value in constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Computes the stored form of a credential.
pub fn hash_credential(secret: &str, salt: &str, username: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(username.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true when `presented` hashes to `stored_hash` for this account.
pub fn verify_credential(presented: &str, username: &str, stored_hash: &str, salt: &str) -> bool {
    let candidate = hash_credential(presented, salt, username);
    candidate.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}
