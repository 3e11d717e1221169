// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and the startup
//! configuration loaded from them. Configuration is read once at startup;
//! a missing required variable aborts the boot.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC signing secret, at least 32 bytes | Required |
//! | `JWT_ISSUER` | Issuer claim stamped into minted tokens | `relational-bookstore` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD` | Bootstrap administrator account | Optional |
//! | `SEED_CUSTOMER_EMAIL` / `SEED_CUSTOMER_PASSWORD` | Bootstrap customer account | Optional |

use thiserror::Error;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the token signing secret.
///
/// The secret feeds the HMAC-SHA256 key used to sign and verify tokens.
/// It must be at least 32 bytes; the server refuses to start with a
/// shorter one.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the issuer claim of minted tokens.
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Environment variable names for the optional bootstrap accounts.
///
/// When both halves of a pair are present, the account is registered at
/// startup so a fresh deployment has something to log in with.
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";
pub const SEED_CUSTOMER_EMAIL_ENV: &str = "SEED_CUSTOMER_EMAIL";
pub const SEED_CUSTOMER_PASSWORD_ENV: &str = "SEED_CUSTOMER_PASSWORD";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_ISSUER: &str = "relational-bookstore";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Startup configuration for the server binary.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Secret feeding the token signing key. Strength is checked when
    /// the key is constructed, not here.
    pub jwt_secret: String,
    /// Issuer claim stamped into minted tokens.
    pub issuer: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default(HOST_ENV, DEFAULT_HOST);
        let port = env_or_default(PORT_ENV, DEFAULT_PORT).parse().unwrap_or(8080);
        let jwt_secret = env_required(JWT_SECRET_ENV)?;
        let issuer = env_or_default(JWT_ISSUER_ENV, DEFAULT_ISSUER);

        Ok(Self {
            host,
            port,
            jwt_secret,
            issuer,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Reads a seed account from an env var pair. Returns `None` unless both
/// halves are present and non-empty.
pub fn seed_account(email_env: &'static str, password_env: &'static str) -> Option<(String, String)> {
    let email = env_optional(email_env)?;
    let password = env_optional(password_env)?;
    Some((email, password))
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    env_optional(name).ok_or(ConfigError::MissingVar(name))
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
