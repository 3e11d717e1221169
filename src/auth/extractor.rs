// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated principals.
//!
//! Use the `Auth` extractor in handlers to require a valid bearer token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal is the verified identity and role set
//! }
//! ```
//!
//! `AdminOnly` additionally requires the Administrator role and rejects
//! with 403 instead of 401, so an authenticated-but-underprivileged caller
//! can tell the difference.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::claims::Principal;
use super::error::AuthError;
use crate::state::AppState;

/// Extractor for any authenticated principal.
///
/// Token verification happens here, per request: the bearer token from the
/// Authorization header is checked against the signing key and its claims
/// are turned back into a [`Principal`]. Verification is pure computation
/// over the read-only key, safe to run concurrently across requests.
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // A principal placed in extensions (e.g. by tests) wins.
        if let Some(principal) = parts.extensions.get::<Principal>().cloned() {
            return Ok(Auth(principal));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = state.tokens.verify(token.trim())?;

        Ok(Auth(Principal::from_claims(&claims)))
    }
}

/// Extractor that requires the Administrator role.
pub struct AdminOnly(pub Principal);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(principal) = Auth::from_request_parts(parts, state).await?;

        if !principal.is_admin() {
            return Err(AuthError::InsufficientRole);
        }

        Ok(AdminOnly(principal))
    }
}
