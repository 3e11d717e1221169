// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall status, always `ok` while the process serves requests.
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Catalog store reachability.
    pub catalog: String,
    /// Account directory state: `ok`, or `empty` when no account has
    /// been registered or seeded yet.
    pub accounts: String,
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running. Does not check
/// dependencies; use readiness for that.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler.
///
/// The catalog and account directory live in process memory, so readiness
/// only reports their state rather than gating on external dependencies.
/// An `empty` account directory still serves registrations.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> Json<ReadyResponse> {
    let accounts = if state.users.read().await.is_empty() {
        "empty"
    } else {
        "ok"
    };

    // Taking the read lock proves the catalog is reachable.
    let _catalog = state.catalog.read().await;

    Json(ReadyResponse {
        status: "ok".to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            catalog: "ok".to_string(),
            accounts: accounts.to_string(),
        },
    })
}
