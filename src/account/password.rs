//! Argon2id password hashing.
//!
//! Hashes are stored as the PHC string encoding, so the salt and parameters
//! travel with the hash and verification needs nothing else.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;
use std::sync::OnceLock;

static DUMMY_HASH: OnceLock<Vec<u8>> = OnceLock::new();

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Return error if Argon2 rejects the input
pub fn hash_password(password: &str) -> Result<Vec<u8>> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {err}"))?;
    Ok(hash.to_string().into_bytes())
}

/// Hash to verify against when no account matches, so unknown users cost
/// the same Argon2 work as a wrong password.
///
/// Computed on first use and reused afterwards.
pub fn dummy_hash() -> &'static [u8] {
    DUMMY_HASH.get_or_init(|| hash_password("todoapp-unknown-user").unwrap_or_default())
}

/// Check a plaintext password against a stored hash.
///
/// A stored value that is not a valid PHC string never verifies.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &[u8]) -> bool {
    let Ok(encoded) = std::str::from_utf8(stored_hash) else {
        return false;
    };
    let Ok(parsed) = PasswordHash::new(encoded) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() -> Result<()> {
        let hash = hash_password("12345678")?;
        assert!(verify_password("12345678", &hash));
        assert!(!verify_password("123456789", &hash));
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = hash_password("12345678")?;
        let second = hash_password("12345678")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn hash_is_phc_encoded() -> Result<()> {
        let hash = hash_password("12345678")?;
        let encoded = String::from_utf8(hash)?;
        assert!(encoded.starts_with("$argon2id$"));
        Ok(())
    }

    #[test]
    fn dummy_hash_is_argon2id_and_stable() -> Result<()> {
        let encoded = std::str::from_utf8(dummy_hash())?;
        assert!(encoded.starts_with("$argon2id$"));
        assert_eq!(dummy_hash(), dummy_hash());
        assert!(!verify_password("12345678", dummy_hash()));
        Ok(())
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("12345678", b"not-a-hash"));
        assert!(!verify_password("12345678", &[0xff, 0xfe]));
        assert!(!verify_password("", b""));
    }
}
