// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential storage and verification.
//!
//! `UserDirectory` is the identity store behind login: it keeps Argon2id
//! password hashes keyed by normalized email and turns a username/password
//! pair into a [`Principal`]. Plaintext passwords exist only inside the
//! calling frame; they are hashed on registration and discarded, and the
//! directory never logs or returns them.

use std::collections::{BTreeSet, HashMap};

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use uuid::Uuid;

use super::claims::Principal;
use super::roles::Role;

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Credential operation failures.
///
/// Unknown username and wrong password both surface as
/// `InvalidCredentials`; callers must not be able to tell which one
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

struct UserRecord {
    id: String,
    email: String,
    password_hash: String,
    roles: BTreeSet<Role>,
}

impl UserRecord {
    fn principal(&self) -> Principal {
        Principal {
            user_id: self.id.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// In-memory identity store with Argon2id password hashes.
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
    // Valid hash of random bytes; verified against on the unknown-username
    // path so both rejection causes do comparable work.
    dummy_hash: String,
}

impl UserDirectory {
    pub fn new() -> Result<Self, CredentialError> {
        let mut noise = [0u8; 16];
        getrandom::getrandom(&mut noise).map_err(|e| CredentialError::Hashing(e.to_string()))?;
        let dummy_hash = hash_password(&noise)?;

        Ok(Self {
            users: HashMap::new(),
            dummy_hash,
        })
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Register a new account and return its principal.
    ///
    /// The email doubles as the login username and is normalized to
    /// lowercase, so `Alice@Example.com` and `alice@example.com` are the
    /// same account.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        roles: BTreeSet<Role>,
    ) -> Result<Principal, CredentialError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(CredentialError::InvalidCredentials);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(CredentialError::WeakPassword);
        }
        if self.users.contains_key(&email) {
            return Err(CredentialError::EmailTaken);
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            password_hash: hash_password(password.as_bytes())?,
            roles,
        };
        let principal = record.principal();
        self.users.insert(email, record);
        Ok(principal)
    }

    /// Validate a username/password pair.
    ///
    /// Returns a fresh [`Principal`] on success. Unknown usernames and
    /// wrong passwords produce the identical error; the unknown-username
    /// path still runs an Argon2 verification so the two are not trivially
    /// distinguishable by timing either.
    pub fn validate(&self, username: &str, password: &str) -> Result<Principal, CredentialError> {
        let email = normalize_email(username);

        match self.users.get(&email) {
            Some(record) => {
                if verify_password(&record.password_hash, password) {
                    Ok(record.principal())
                } else {
                    Err(CredentialError::InvalidCredentials)
                }
            }
            None => {
                let _ = verify_password(&self.dummy_hash, password);
                Err(CredentialError::InvalidCredentials)
            }
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &[u8]) -> Result<String, CredentialError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| CredentialError::Hashing(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| CredentialError::Hashing(e.to_string()))?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password, &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?
        .to_string();
    Ok(phc)
}

fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_roles() -> BTreeSet<Role> {
        [Role::Customer].into_iter().collect()
    }

    #[test]
    fn register_then_validate_roundtrips_principal() {
        let mut directory = UserDirectory::new().unwrap();
        let registered = directory
            .register("alice@example.com", "correct-horse", customer_roles())
            .unwrap();

        let validated = directory
            .validate("alice@example.com", "correct-horse")
            .unwrap();

        assert_eq!(validated, registered);
        assert_eq!(validated.roles, customer_roles());
    }

    #[test]
    fn unknown_user_and_wrong_password_are_indistinguishable() {
        let mut directory = UserDirectory::new().unwrap();
        directory
            .register("alice@example.com", "correct-horse", customer_roles())
            .unwrap();

        let wrong_password = directory
            .validate("alice@example.com", "battery-staple")
            .unwrap_err();
        let unknown_user = directory
            .validate("mallory@example.com", "battery-staple")
            .unwrap_err();

        assert_eq!(wrong_password, CredentialError::InvalidCredentials);
        assert_eq!(unknown_user, wrong_password);
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let mut directory = UserDirectory::new().unwrap();
        directory
            .register("Bob@Example.COM", "hunter2hunter2", customer_roles())
            .unwrap();

        let err = directory
            .register("bob@example.com", "other-password", customer_roles())
            .unwrap_err();
        assert_eq!(err, CredentialError::EmailTaken);
    }

    #[test]
    fn login_username_is_normalized() {
        let mut directory = UserDirectory::new().unwrap();
        let registered = directory
            .register("Carol@Example.com", "s3cret-enough", customer_roles())
            .unwrap();
        assert_eq!(registered.email, "carol@example.com");

        let principal = directory
            .validate("  CAROL@example.COM ", "s3cret-enough")
            .unwrap();
        assert_eq!(principal, registered);
    }

    #[test]
    fn short_password_is_rejected_at_registration() {
        let mut directory = UserDirectory::new().unwrap();
        let err = directory
            .register("dave@example.com", "short", customer_roles())
            .unwrap_err();
        assert_eq!(err, CredentialError::WeakPassword);
    }

    #[test]
    fn each_account_gets_a_distinct_user_id() {
        let mut directory = UserDirectory::new().unwrap();
        let a = directory
            .register("a@example.com", "password-a1", customer_roles())
            .unwrap();
        let b = directory
            .register("b@example.com", "password-b1", customer_roles())
            .unwrap();
        assert_ne!(a.user_id, b.user_id);
    }
}
