//! Password hashing for account credentials
//!
//! Login and registration never see a stored plaintext; accounts carry a
//! salted bcrypt hash and all comparisons go through the hasher trait.

use async_trait::async_trait;

/// Trait for password hashing implementations
#[async_trait]
pub trait PasswordHasherTrait: Send + Sync {
    /// Hash a plaintext password with a fresh salt
    ///
    /// Repeated calls for the same plaintext produce different encodings.
    async fn hash_password(&self, plaintext: &str) -> Result<String, String>;

    /// Verify a candidate password against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(String)` - Stored hash is malformed or verification failed internally
    async fn verify_password(&self, encoded: &str, candidate: &str) -> Result<bool, String>;
}

/// Bcrypt-backed password hasher
///
/// Uses the modular crypt format, so the per-password salt and the cost
/// factor travel inside the encoded string itself.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the library default cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost factor
    ///
    /// Lower costs are only appropriate for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasherTrait for BcryptPasswordHasher {
    async fn hash_password(&self, plaintext: &str) -> Result<String, String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| format!("failed to hash password: {}", e))
    }

    async fn verify_password(&self, encoded: &str, candidate: &str) -> Result<bool, String> {
        match bcrypt::verify(candidate, encoded) {
            Ok(matches) => Ok(matches),
            Err(e) => Err(format!("failed to verify password: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // MIN_COST keeps the bcrypt rounds cheap enough for unit tests
    fn test_hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(4)
    }

    #[tokio::test]
    async fn test_hash_and_verify_roundtrip() {
        let hasher = test_hasher();

        let hash = hasher.hash_password("Abcdef12").await.unwrap();
        assert!(hash.starts_with("$2"));

        let matches = hasher.verify_password(&hash, "Abcdef12").await.unwrap();
        assert!(matches);
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let hasher = test_hasher();

        let hash = hasher.hash_password("Abcdef12").await.unwrap();
        let matches = hasher.verify_password(&hash, "Abcdef13").await.unwrap();
        assert!(!matches);
    }

    #[tokio::test]
    async fn test_hash_uses_fresh_salt() {
        let hasher = test_hasher();

        let hash1 = hasher.hash_password("Abcdef12").await.unwrap();
        let hash2 = hasher.hash_password("Abcdef12").await.unwrap();
        assert_ne!(hash1, hash2);

        // Both still verify against the original plaintext
        assert!(hasher.verify_password(&hash1, "Abcdef12").await.unwrap());
        assert!(hasher.verify_password(&hash2, "Abcdef12").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_malformed_hash() {
        let hasher = test_hasher();

        let result = hasher.verify_password("not-a-bcrypt-hash", "Abcdef12").await;
        assert!(result.is_err());
    }
}
