// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Token-based authentication for the bookstore API.
//!
//! ## Auth Flow
//!
//! 1. Client POSTs username/password to `/api/users/login`
//! 2. `UserDirectory` validates the pair against its Argon2id hashes
//! 3. `TokenService` signs a five-minute HMAC-SHA-256 token carrying
//!    `sub` (email), `uid`, a fresh `jti`, `iss`, `exp` and the role set
//! 4. Client sends `Authorization: Bearer <token>` on later requests
//! 5. The `Auth`/`AdminOnly` extractors verify the signature and expiry
//!    and rebuild the [`Principal`] for the authorization decision
//!
//! ## Security
//!
//! - The signing key comes from configuration and must be present and at
//!   least 32 bytes at startup; otherwise the process refuses to serve
//! - Signature is verified before any claim is read
//! - Expiry is exact: no clock-skew leeway between issuer and verifier
//! - Login failure never reveals whether the username exists

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod roles;
pub mod token;

pub use claims::{Principal, TokenClaims};
pub use credentials::{CredentialError, UserDirectory};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use roles::Role;
pub use token::{TokenService, VerifyError};
