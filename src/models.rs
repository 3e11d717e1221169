// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for JSON handling and OpenAPI documentation; the same types are used by
//! the server handlers and the typed client.
//!
//! ## Model Categories
//!
//! - **Books**: catalog entries, each belonging to one author
//! - **Authors**: the people the catalog is organized around
//! - **Auth**: login/registration payloads and the token response
//!
//! The auth request types implement `Debug` by hand so a stray debug log
//! can never print a password.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Book Models
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Book {
    /// Unique identifier, assigned by the store.
    pub id: u32,
    /// Title of the book.
    pub title: String,
    /// Year of publication.
    pub year: Option<i32>,
    /// ISBN, if known.
    pub isbn: Option<String>,
    /// Short synopsis.
    pub summary: Option<String>,
    /// Cover image reference.
    pub image: Option<String>,
    /// Retail price.
    pub price: Option<f64>,
    /// Identifier of the author this book belongs to.
    pub author_id: u32,
}

/// Request to add a book to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    /// Title of the book.
    pub title: String,
    /// Year of publication.
    pub year: Option<i32>,
    /// ISBN, if known.
    pub isbn: Option<String>,
    /// Short synopsis.
    pub summary: Option<String>,
    /// Cover image reference.
    pub image: Option<String>,
    /// Retail price.
    pub price: Option<f64>,
    /// Identifier of an existing author.
    pub author_id: u32,
}

/// Request to replace an existing book record.
///
/// Carries its own `id`, which must match the path id of the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    /// Identifier of the book being updated.
    pub id: u32,
    /// Updated title.
    pub title: String,
    /// Updated year of publication.
    pub year: Option<i32>,
    /// Updated ISBN.
    pub isbn: Option<String>,
    /// Updated synopsis.
    pub summary: Option<String>,
    /// Updated cover image reference.
    pub image: Option<String>,
    /// Updated price.
    pub price: Option<f64>,
    /// Updated author identifier.
    pub author_id: u32,
}

// =============================================================================
// Author Models
// =============================================================================

/// An author in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Author {
    /// Unique identifier, assigned by the store.
    pub id: u32,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Short biography.
    pub bio: Option<String>,
}

/// Request to add an author.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAuthorRequest {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Short biography.
    pub bio: Option<String>,
}

/// Request to replace an existing author record.
///
/// Carries its own `id`, which must match the path id of the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAuthorRequest {
    /// Identifier of the author being updated.
    pub id: u32,
    /// Updated given name.
    pub firstname: String,
    /// Updated family name.
    pub lastname: String,
    /// Updated biography.
    pub bio: Option<String>,
}

// =============================================================================
// Auth Models
// =============================================================================

/// Login request body.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login name; the account's email address.
    pub username: String,
    /// Plaintext password, hashed and discarded server-side.
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request body.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Email address; becomes the login username.
    pub email: String,
    /// Plaintext password, hashed and discarded server-side.
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Compact signed token to present as a bearer credential.
    pub token: String,
}
