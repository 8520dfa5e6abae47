//! Password hashing with Argon2id.

use argon2::{
    Argon2,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error when the hasher rejects its inputs.
pub(crate) fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a password against a stored PHC string.
///
/// A mismatch is `Ok(false)`; `Err` means the stored hash could not be
/// processed at all.
pub(crate) fn verify_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(password_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(error) => Err(error),
    }
}
