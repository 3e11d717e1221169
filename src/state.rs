// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{TokenService, UserDirectory};
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogStore>>,
    pub users: Arc<RwLock<UserDirectory>>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(catalog: CatalogStore, users: UserDirectory, tokens: TokenService) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            users: Arc::new(RwLock::new(users)),
            tokens: Arc::new(tokens),
        }
    }
}
