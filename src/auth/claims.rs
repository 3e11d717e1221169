// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the principal reconstructed from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::roles::Role;

/// Claim set carried by an issued token.
///
/// The wire form is the JSON payload of the compact token:
/// `sub` is the user's email, `uid` the stable user id, `jti` a fresh
/// random identifier per issuance, and `roles` the role set as lowercase
/// strings. `exp` is always `iat` plus the fixed token lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email address
    pub sub: String,

    /// Stable user id
    pub uid: String,

    /// Unique token id, fresh per issuance
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Role set
    pub roles: BTreeSet<Role>,
}

/// Verified identity and role set of a user.
///
/// Produced by the credential directory at login and reconstructed from
/// token claims on every authenticated request. Carries no reference back
/// to any store; two principals are equal when id, email and roles match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable user id
    pub user_id: String,

    /// Email address (also the login username)
    pub email: String,

    /// Granted roles
    pub roles: BTreeSet<Role>,
}

impl Principal {
    /// Reconstruct the principal from verified token claims.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.uid.clone(),
            email: claims.sub.clone(),
            roles: claims.roles.clone(),
        }
    }

    /// Check whether any granted role carries the required privilege.
    pub fn has_role(&self, required: Role) -> bool {
        self.roles.iter().any(|role| role.has_privilege(required))
    }

    /// Check if this principal is an administrator.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Administrator)
    }
}
