// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::BTreeSet;

use relational_bookstore::api::router;
use relational_bookstore::auth::{Role, TokenService, UserDirectory};
use relational_bookstore::config::{self, ServerConfig};
use relational_bookstore::state::AppState;
use relational_bookstore::store::CatalogStore;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServerConfig::from_env().expect("incomplete configuration");

    // Key strength is enforced here: a short JWT_SECRET is fatal.
    let tokens = TokenService::new(&config.jwt_secret, config.issuer.clone())
        .expect("JWT_SECRET rejected");

    let mut users = UserDirectory::new().expect("credential directory init failed");
    seed_accounts(&mut users);

    let state = AppState::new(CatalogStore::new(), users, tokens);
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind server address");

    tracing::info!(%addr, "bookstore server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    let format = std::env::var(config::LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());
    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Register the accounts named by the `SEED_*` env var pairs, so a fresh
/// deployment has known accounts to log in with.
fn seed_accounts(users: &mut UserDirectory) {
    let seeds = [
        (
            config::SEED_ADMIN_EMAIL_ENV,
            config::SEED_ADMIN_PASSWORD_ENV,
            Role::Administrator,
        ),
        (
            config::SEED_CUSTOMER_EMAIL_ENV,
            config::SEED_CUSTOMER_PASSWORD_ENV,
            Role::Customer,
        ),
    ];

    for (email_env, password_env, role) in seeds {
        let Some((email, password)) = config::seed_account(email_env, password_env) else {
            continue;
        };

        match users.register(&email, &password, BTreeSet::from([role])) {
            Ok(principal) => {
                tracing::info!(user_id = %principal.user_id, %role, "seeded account");
            }
            Err(err) => {
                tracing::warn!(%err, %role, "could not seed account");
            }
        }
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    tracing::info!("shutdown signal received");
}
