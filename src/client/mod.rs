// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Bookstore Client
//!
//! Client-side half of the application: durable session storage, the
//! authentication state machine, and a typed HTTP client for the catalog
//! API.
//!
//! A typical client wires the three together:
//!
//! ```rust,ignore
//! let store = Arc::new(FileSessionStore::new(data_dir.join("token")));
//! let provider = Arc::new(AuthStateProvider::new(store)?);
//! let client = CatalogClient::new("http://localhost:8080", provider)?;
//!
//! client.login("alice@example.com", "password").await?;
//! let books = client.books().list().await?;
//! ```

pub mod http;
pub mod provider;
pub mod session;

pub use http::{CatalogClient, ClientError, ResourceClient};
pub use provider::{AuthState, AuthStateProvider, ProviderError};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
