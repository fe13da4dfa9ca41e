//! Salted password hashing for agents and clients.
//!
//! # Responsibility
//! - Produce one-way bcrypt hashes with a fresh random salt per call.
//! - Verify candidate passwords against stored hashes.
//!
//! # Invariants
//! - Plaintext passwords are never retained or logged.
//! - `verify` never errors: wrong passwords and malformed hashes are both
//!   plain `false`.
//! - `PasswordHash` never prints its contents through `Debug`.
//! - Passwords longer than `MAX_PASSWORD_BYTES` are rejected, never
//!   truncated: bcrypt only reads the first 72 bytes.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Opaque encoded bcrypt hash (`$2b$<cost>$<salt+digest>`).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a hash loaded from storage.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded form written to storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for PasswordHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[derive(Debug)]
pub enum CredentialError {
    /// Password was empty.
    EmptyPassword,
    /// Password exceeds what bcrypt can hash without truncation.
    TooLong { max_bytes: usize },
    /// bcrypt backend rejected the input (cost out of range, over-long input).
    Hashing(bcrypt::BcryptError),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::TooLong { max_bytes } => {
                write!(f, "password must be at most {max_bytes} bytes long")
            }
            Self::Hashing(err) => write!(f, "password hashing failed: {err}"),
        }
    }
}

impl Error for CredentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyPassword | Self::TooLong { .. } => None,
            Self::Hashing(err) => Some(err),
        }
    }
}

/// bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Lowest work factor bcrypt accepts.
    pub const MIN_COST: u32 = 4;

    /// bcrypt input limit.
    pub const MAX_PASSWORD_BYTES: usize = 72;

    /// Creates a hasher with an explicit work factor.
    ///
    /// Values outside bcrypt's range surface as `CredentialError::Hashing`
    /// on the first `hash` call.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `password` with a newly generated salt.
    pub fn hash(&self, password: &str) -> Result<PasswordHash, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Err(CredentialError::TooLong {
                max_bytes: Self::MAX_PASSWORD_BYTES,
            });
        }
        bcrypt::hash(password, self.cost)
            .map(PasswordHash)
            .map_err(CredentialError::Hashing)
    }

    /// Checks `password` against `hash` using the salt embedded in `hash`.
    ///
    /// Over-long candidates are a mismatch; they could otherwise match a
    /// stored password by prefix.
    pub fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        let matched = bcrypt::verify(password, hash.as_str()).unwrap_or(false);
        matched && password.len() <= Self::MAX_PASSWORD_BYTES
    }

    /// Spends the same work as a real `verify` and always returns `false`.
    ///
    /// Used when no stored hash exists, so unknown accounts take as long to
    /// reject as wrong passwords.
    pub fn verify_absent(&self, password: &str) -> bool {
        let _ = bcrypt::hash(password, self.cost);
        false
    }
}
