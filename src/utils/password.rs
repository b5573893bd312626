use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("failed to hash password: {}", e)))
}

/// Checks a candidate password against a stored bcrypt digest.
///
/// A malformed or unparseable digest counts as a mismatch rather than an
/// error, so callers get a plain yes/no answer.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}
