// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client-side authentication state.
//!
//! [`AuthStateProvider`] is the single source of truth for whether the
//! client is logged in. It owns the persisted token, restores it on
//! construction, and tells subscribers about every transition between
//! [`AuthState::Anonymous`] and [`AuthState::Authenticated`].
//!
//! ## Ordering
//!
//! On login the token is persisted before the in-memory state flips and
//! before anyone is notified. A crash after the store write therefore
//! leaves a session that restores on the next start, never a notified
//! login that was lost.
//!
//! Subscriber channels are unbounded: a slow subscriber never blocks a
//! transition and never misses one, and because sends happen under the
//! state lock, every subscriber observes transitions in the same order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::auth::{Principal, TokenClaims};

use super::session::{SessionError, SessionStore};

/// What the client currently knows about its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No session; requests go out without a bearer token.
    Anonymous,
    /// A token is held for this principal.
    Authenticated { principal: Principal },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }
}

/// Error type for authentication state changes.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("token could not be parsed")]
    InvalidToken,
}

struct Inner {
    state: AuthState,
    token: Option<String>,
    subscribers: Vec<UnboundedSender<AuthState>>,
}

/// Owner of the client's session token and authentication state.
pub struct AuthStateProvider {
    store: Arc<dyn SessionStore>,
    inner: Mutex<Inner>,
}

impl AuthStateProvider {
    /// Build the provider and restore any persisted session.
    ///
    /// A stored token that no longer parses, or whose expiry has already
    /// passed, is cleared from the store and restoration lands on
    /// [`AuthState::Anonymous`]. Restoration itself notifies nobody;
    /// subscribers only see transitions that happen after they attach.
    pub fn new(store: Arc<dyn SessionStore>) -> Result<Self, ProviderError> {
        let mut state = AuthState::Anonymous;
        let mut token = None;

        if let Some(stored) = store.load()? {
            match parse_unverified(&stored) {
                Some(claims) if claims.exp > chrono::Utc::now().timestamp() => {
                    state = AuthState::Authenticated {
                        principal: Principal::from_claims(&claims),
                    };
                    token = Some(stored);
                }
                _ => store.clear()?,
            }
        }

        Ok(Self {
            store,
            inner: Mutex::new(Inner {
                state,
                token,
                subscribers: Vec::new(),
            }),
        })
    }

    pub fn current_state(&self) -> AuthState {
        self.lock_inner().state.clone()
    }

    /// The held token, if any. Expiry is not checked here; the server
    /// remains the authority on whether the token is still good.
    pub fn current_token(&self) -> Option<String> {
        self.lock_inner().token.clone()
    }

    /// Subscribe to authentication state transitions.
    pub fn subscribe(&self) -> UnboundedReceiver<AuthState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock_inner().subscribers.push(tx);
        rx
    }

    /// Record a successful login with the token the server minted.
    ///
    /// The token is parsed first; one that does not parse leaves the
    /// store and the state untouched. Then the token is persisted, the
    /// state flips, and subscribers are notified, in that order. A
    /// persistence failure aborts the login entirely.
    pub fn apply_login(&self, token: &str) -> Result<Principal, ProviderError> {
        let claims = parse_unverified(token).ok_or(ProviderError::InvalidToken)?;
        let principal = Principal::from_claims(&claims);

        self.store.save(token)?;

        let mut inner = self.lock_inner();
        inner.token = Some(token.to_string());
        inner.state = AuthState::Authenticated {
            principal: principal.clone(),
        };
        let snapshot = inner.state.clone();
        inner
            .subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());

        Ok(principal)
    }

    /// Forget the session.
    ///
    /// The persisted token is removed before the state flips. Logging
    /// out while already anonymous is a no-op and notifies nobody.
    pub fn apply_logout(&self) -> Result<(), ProviderError> {
        self.store.clear()?;

        let mut inner = self.lock_inner();
        if !inner.state.is_authenticated() && inner.token.is_none() {
            return Ok(());
        }

        inner.token = None;
        inner.state = AuthState::Anonymous;
        inner
            .subscribers
            .retain(|tx| tx.send(AuthState::Anonymous).is_ok());

        Ok(())
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse claims without verifying the signature.
///
/// The client never holds the signing key, so it cannot verify; the
/// server re-verifies on every request. This parse only feeds local
/// state such as the displayed identity.
fn parse_unverified(token: &str) -> Option<TokenClaims> {
    jsonwebtoken::dangerous::insecure_decode::<TokenClaims>(token)
        .ok()
        .map(|data| data.claims)
}
