//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};

use quill_core::ports::{HashError, PasswordHasher};

/// Argon2-based password hasher with a per-password random salt.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| HashError::Hash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        // A hash we cannot even parse verifies as false, same as a mismatch.
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let password = "secure_password_123";

        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_mutated_hash_verifies_as_false() {
        let hasher = Argon2PasswordHasher::new();

        let mut hash = hasher.hash("secure_password_123").unwrap();
        hash.truncate(hash.len() - 4);

        assert!(!hasher.verify("secure_password_123", &hash));
    }

    #[test]
    fn test_malformed_hash_verifies_as_false() {
        let hasher = Argon2PasswordHasher::new();

        assert!(!hasher.verify("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = Argon2PasswordHasher::new();

        let first = hasher.hash("secure_password_123").unwrap();
        let second = hasher.hash("secure_password_123").unwrap();

        // random salts
        assert_ne!(first, second);
    }
}
