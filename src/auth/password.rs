use bcrypt::{hash, verify};
use thiserror::Error;

/// bcrypt work factor used for stored credentials.
pub const BCRYPT_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must be at least {0} characters")]
    TooShort(usize),
    #[error("Password must be no more than {0} characters")]
    TooLong(usize),
    #[error("Failed to hash password")]
    HashingFailed,
    #[error("Failed to verify password")]
    VerificationFailed,
}

impl PasswordError {
    /// Policy violations are caller mistakes; the rest are server faults.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            PasswordError::TooShort(_) | PasswordError::TooLong(_)
        )
    }
}

/// Password strength requirements
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            // bcrypt ignores everything past 72 bytes
            max_length: 72,
        }
    }
}

/// Validate password strength according to policy
pub fn validate_password_strength(password: &str, policy: &PasswordPolicy) -> Result<(), PasswordError> {
    let length = password.chars().count();

    if length < policy.min_length {
        return Err(PasswordError::TooShort(policy.min_length));
    }

    if password.len() > policy.max_length {
        return Err(PasswordError::TooLong(policy.max_length));
    }

    Ok(())
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password_strength(password, &PasswordPolicy::default())?;

    hash(password, BCRYPT_COST).map_err(|_| PasswordError::HashingFailed)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(|_| PasswordError::VerificationFailed)
}
