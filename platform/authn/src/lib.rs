//! Platform authentication helpers.
//!
//! Passwords are stored as argon2 PHC strings. Hashing and verification are
//! CPU bound, so the async wrappers push them onto the blocking pool.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AuthnError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password hash is malformed")]
    MalformedHash,
    #[error("password worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A single unmet password rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRule {
    pub fn message(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "Password must be at least 8 characters long",
            PasswordRule::Uppercase => "Password must contain an uppercase letter",
            PasswordRule::Lowercase => "Password must contain a lowercase letter",
            PasswordRule::Digit => "Password must contain a digit",
            PasswordRule::Special => "Password must contain a special character",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PasswordPolicyError(pub Vec<PasswordRule>);

impl fmt::Display for PasswordPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.0.iter().map(|rule| rule.message()).collect::<Vec<_>>();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for PasswordPolicyError {}

/// Checks length >= 8 and presence of upper, lower, digit and special characters.
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    let mut unmet = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        unmet.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        unmet.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        unmet.push(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        unmet.push(PasswordRule::Digit);
    }
    if !password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        unmet.push(PasswordRule::Special);
    }
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(PasswordPolicyError(unmet))
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthnError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthnError::Hash(err.to_string()))
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthnError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthnError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub async fn hash_password_blocking(password: String) -> Result<String, AuthnError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_blocking(
    password: String,
    stored_hash: String,
) -> Result<bool, AuthnError> {
    let verified =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await??;
    if !verified {
        tracing::debug!("password verification failed");
    }
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_accepts_complex_password() {
        assert!(check_password_policy("Str0ng!Pass").is_ok());
    }

    #[test]
    fn policy_reports_every_unmet_rule() {
        let err = check_password_policy("abc").unwrap_err();
        assert_eq!(
            err.0,
            vec![
                PasswordRule::MinLength,
                PasswordRule::Uppercase,
                PasswordRule::Digit,
                PasswordRule::Special,
            ]
        );
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn policy_requires_special_character() {
        let err = check_password_policy("Abcdefg1").unwrap_err();
        assert_eq!(err.0, vec![PasswordRule::Special]);
    }

    #[test]
    fn hash_round_trips_and_rejects_wrong_password() {
        let hash = hash_password("Secr3t!pw").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Secr3t!pw", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-hash"),
            Err(AuthnError::MalformedHash)
        ));
    }

    #[tokio::test]
    async fn blocking_wrappers_agree() {
        let hash = hash_password_blocking("Secr3t!pw".into()).await.unwrap();
        assert!(
            verify_password_blocking("Secr3t!pw".into(), hash)
                .await
                .unwrap()
        );
    }
}
