use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// Raising any of them makes both hashing and login verification slower,
/// for legitimate users and for offline brute force alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashCost {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Smallest parameters Argon2 accepts. Suitable for tests only.
    pub const fn minimal() -> Self {
        Self::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST)
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::new(
            Params::DEFAULT_M_COST,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
        )
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters are outside the range Argon2 accepts
    pub fn with_cost(cost: HashCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The parameters encoded in the stored hash are used, so hashes created
    /// under an older cost setting keep verifying. A stored hash that cannot
    /// be parsed never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
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

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(HashCost::minimal()).expect("minimal cost is valid")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = hasher();

        let first = hasher.hash("pw123").unwrap();
        let second = hasher.hash("pw123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("pw123", &first));
        assert!(hasher.verify("pw123", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = hasher();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$m=8,t=1,p=1$garbage"));
    }

    #[test]
    fn test_verify_hash_from_other_cost() {
        let strong = PasswordHasher::with_cost(HashCost::new(64, 2, 1)).unwrap();
        let hash = strong.hash("pw123").unwrap();

        // Parameters come from the stored hash, not from the verifier
        assert!(hasher().verify("pw123", &hash));
    }

    #[test]
    fn test_hash_empty_and_unicode_passwords() {
        let hasher = hasher();

        for password in ["", "pässwörd", "密码", "emoji 🔑"] {
            let hash = hasher.hash(password).unwrap();
            assert!(hasher.verify(password, &hash));
        }
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordHasher::with_cost(HashCost::new(1, 0, 0));
        assert!(matches!(result, Err(PasswordError::InvalidCost(_))));
    }
}
