// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Bookstore - Book Catalog Service
//!
//! This crate provides both halves of a small two-tier book catalog: an
//! HTTP API that authenticates users with short-lived HMAC-signed bearer
//! tokens and gates catalog writes by role, and a typed client that
//! persists the session token and tracks authentication state.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification, and credential validation
//! - `client` - Session persistence, auth state, typed HTTP client
//! - `store` - In-memory book and author catalog

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
