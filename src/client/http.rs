// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed HTTP client for the bookstore API.
//!
//! [`CatalogClient`] owns the connection pool and the login/logout
//! endpoints; [`ResourceClient`] layers the shared list/get/create/
//! update/delete shape over one REST collection. Authentication is
//! attach-only: whatever token the provider currently holds goes out on
//! the wire, and the server's status code is the authority on whether it
//! was good.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::auth::Principal;
use crate::models::{
    Author, Book, CreateAuthorRequest, CreateBookRequest, LoginRequest, RegisterRequest,
    TokenResponse, UpdateAuthorRequest, UpdateBookRequest,
};

use super::provider::{AuthStateProvider, ProviderError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error type for API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The server rejected the username/password pair.
    #[error("login rejected")]
    LoginRejected,
    /// No token, or the server rejected the one that was sent.
    #[error("not authenticated")]
    Unauthorized,
    /// Authenticated, but the role set does not allow this operation.
    #[error("operation not allowed for this account")]
    Forbidden,
    #[error("resource not found")]
    NotFound,
    #[error("resource already exists")]
    Conflict,
    /// The server found the request malformed or unprocessable.
    #[error("invalid request")]
    InvalidRequest,
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
}

fn status_error(status: StatusCode) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::InvalidRequest,
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::CONFLICT => ClientError::Conflict,
        other => ClientError::UnexpectedStatus(other),
    }
}

/// Client for one bookstore server.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    provider: Arc<AuthStateProvider>,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        provider: Arc<AuthStateProvider>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            provider,
        })
    }

    /// The authentication state provider this client attaches tokens from.
    pub fn provider(&self) -> &Arc<AuthStateProvider> {
        &self.provider
    }

    /// Log in and store the minted token.
    ///
    /// On a 401 the credentials were wrong; the current state, whatever
    /// it was, is left alone.
    pub async fn login(&self, username: &str, password: &str) -> Result<Principal, ClientError> {
        let response = self
            .http
            .post(self.url("/api/users/login"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::LoginRejected);
        }
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let body: TokenResponse = response.json().await?;
        Ok(self.provider.apply_login(&body.token)?)
    }

    /// Register a new customer account. Does not log in.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/users/register"))
            .json(&RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    /// Drop the session locally. The server keeps no session state, so
    /// no request is made.
    pub fn logout(&self) -> Result<(), ClientError> {
        Ok(self.provider.apply_logout()?)
    }

    pub fn books(&self) -> ResourceClient<'_, Book, CreateBookRequest, UpdateBookRequest> {
        ResourceClient::new(self, "/api/books")
    }

    pub fn authors(&self) -> ResourceClient<'_, Author, CreateAuthorRequest, UpdateAuthorRequest> {
        ResourceClient::new(self, "/api/authors")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when one is held.
    ///
    /// There is no local expiry check: an expired token goes out as-is
    /// and the resulting 401 is the signal to log in again.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Typed access to one REST collection.
pub struct ResourceClient<'a, T, C, U> {
    client: &'a CatalogClient,
    base_path: &'static str,
    _resource: PhantomData<(T, C, U)>,
}

impl<'a, T, C, U> ResourceClient<'a, T, C, U>
where
    T: DeserializeOwned,
    C: Serialize,
    U: Serialize,
{
    fn new(client: &'a CatalogClient, base_path: &'static str) -> Self {
        Self {
            client,
            base_path,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        let response = self
            .client
            .authorize(self.client.http.get(self.client.url(self.base_path)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn get(&self, id: u32) -> Result<T, ClientError> {
        let response = self
            .client
            .authorize(self.client.http.get(self.item_url(id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn create(&self, request: &C) -> Result<T, ClientError> {
        let response = self
            .client
            .authorize(
                self.client
                    .http
                    .post(self.client.url(self.base_path))
                    .json(request),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn update(&self, id: u32, request: &U) -> Result<(), ClientError> {
        let response = self
            .client
            .authorize(self.client.http.put(self.item_url(id)).json(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: u32) -> Result<(), ClientError> {
        let response = self
            .client
            .authorize(self.client.http.delete(self.item_url(id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    fn item_url(&self, id: u32) -> String {
        self.client.url(&format!("{}/{id}", self.base_path))
    }
}
