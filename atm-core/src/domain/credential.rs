//! Credential digests
//!
//! Secrets are reduced to an unsalted, single-round SHA-256 hex digest and
//! compared for equality. This is weak: identical secrets share a digest and
//! the digest is cheap to brute-force. A hardened store would use a salted,
//! iterated KDF (argon2) plus attempt rate limiting.

use sha2::{Digest, Sha256};

/// Username of the administrator seeded on first initialization
pub const SEED_ADMIN_USERNAME: &str = "admin";

/// Well-known default secret of the seeded administrator.
///
/// Anyone who has read this file can log in as admin until the account is
/// deleted and re-created with a different secret.
pub const SEED_ADMIN_SECRET: &str = "admin123";

/// Hex-encoded SHA-256 digest of a secret
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
