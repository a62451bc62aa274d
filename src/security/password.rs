/// Password hashing and verification using Argon2id
use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted string that encodes the algorithm, parameters,
/// and salt, so verification needs only the stored string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash.
///
/// Comparison is constant-time within Argon2. A malformed or truncated hash
/// is treated as a mismatch, never an error, so callers cannot tell a broken
/// credential apart from a wrong password.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_valid_password() {
        let password = "pw123456";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("pw123456").expect("should hash password successfully");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_hash_is_phc_formatted() {
        let hash = hash_password("pw123456").expect("should hash successfully");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        assert!(!verify_password("pw123456", "not-a-valid-hash"));
        assert!(!verify_password("pw123456", ""));
        assert!(!verify_password("pw123456", "$argon2id$truncated"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "pw123456";
        let hash1 = hash_password(password).expect("should hash successfully");
        let hash2 = hash_password(password).expect("should hash successfully");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }
}
