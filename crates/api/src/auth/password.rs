//! Password digests for user accounts.
//!
//! Digests are Argon2id PHC strings (`$argon2id$v=19$...`), so the salt and
//! cost parameters travel with the stored value in `users.password_hash`.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Digest a new password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a login attempt against a stored digest.
///
/// A mismatch is `Ok(false)`. `Err` means the stored digest itself is
/// unusable, which the login handler reports as an internal error.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, Error> {
    let digest = PasswordHash::new(digest)?;
    match hasher().verify_password(password.as_bytes(), &digest) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Digest of a password no account has, built on first use. `None` if
/// hashing failed.
fn dummy_digest() -> Option<&'static str> {
    static DUMMY_DIGEST: OnceLock<Option<String>> = OnceLock::new();

    DUMMY_DIGEST
        .get_or_init(|| {
            hash_password("dummy password for unknown accounts")
                .inspect_err(|e| tracing::error!(error = %e, "Failed to build dummy digest"))
                .ok()
        })
        .as_deref()
}

/// Run one full verification against the dummy digest and discard the
/// result.
///
/// Login calls this when the username is unknown, so that path costs the same
/// Argon2 work as a wrong password for a real account.
pub fn verify_against_dummy(password: &str) {
    if let Some(digest) = dummy_digest() {
        let _ = verify_password(password, digest);
    }
}
