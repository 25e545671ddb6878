//! bcrypt password hashing.
//!
//! Hashes are emitted in the `$2a$` encoding, which Apache, nginx and Go's
//! `x/crypto/bcrypt` all verify. This tool never verifies passwords itself.

use crate::constants;
use bcrypt::Version;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password exceeds {max} bytes ({len} bytes given)")]
    PasswordTooLong { len: usize, max: usize },
    #[error("invalid bcrypt cost {0}")]
    InvalidCost(u32),
    #[error("hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(constants::MIN_BCRYPT_COST..=constants::MAX_BCRYPT_COST).contains(&cost) {
            return Err(HashError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted hash string. Passwords longer than bcrypt's input
    /// limit are rejected rather than truncated.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let len = password.len();
        if len > constants::MAX_PASSWORD_BYTES {
            return Err(HashError::PasswordTooLong {
                len,
                max: constants::MAX_PASSWORD_BYTES,
            });
        }
        let parts = bcrypt::hash_with_result(password, self.cost)?;
        Ok(parts.format_for_version(Version::TwoA))
    }
}
