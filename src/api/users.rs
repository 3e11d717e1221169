// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: login, registration, and identity.

use std::collections::BTreeSet;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{Auth, CredentialError, Principal, Role},
    error::ApiError,
    models::{LoginRequest, RegisterRequest, TokenResponse},
    state::AppState,
};

/// Response for GET /api/users/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// User's unique ID
    pub user_id: String,
    /// User's email address
    pub email: String,
    /// Granted roles
    pub roles: BTreeSet<Role>,
}

impl From<Principal> for UserMeResponse {
    fn from(principal: Principal) -> Self {
        Self {
            user_id: principal.user_id,
            email: principal.email,
            roles: principal.roles,
        }
    }
}

/// Authenticate a username/password pair and mint a bearer token.
///
/// The failure response is identical for unknown usernames and wrong
/// passwords, so the endpoint does not reveal which accounts exist.
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token minted", body = TokenResponse),
        (status = 401, description = "Unknown username or wrong password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let principal = {
        let users = state.users.read().await;
        users
            .validate(&request.username, &request.password)
            .map_err(|_| {
                tracing::warn!("failed login attempt");
                ApiError::unauthorized("Invalid username or password")
            })?
    };

    let token = state
        .tokens
        .issue(&principal)
        .map_err(|err| ApiError::internal(err.to_string()))?;

    tracing::info!(user_id = %principal.user_id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

/// Register a new customer account.
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserMeResponse),
        (status = 400, description = "Empty email or too short a password"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserMeResponse>), ApiError> {
    let principal = {
        let mut users = state.users.write().await;
        users
            .register(
                &request.email,
                &request.password,
                BTreeSet::from([Role::Customer]),
            )
            .map_err(registration_error)?
    };

    tracing::info!(user_id = %principal.user_id, "account registered");
    Ok((StatusCode::CREATED, Json(principal.into())))
}

fn registration_error(err: CredentialError) -> ApiError {
    match err {
        CredentialError::EmailTaken => {
            ApiError::conflict("An account with this email already exists")
        }
        CredentialError::WeakPassword => {
            ApiError::bad_request("Password does not meet the minimum length")
        }
        CredentialError::InvalidCredentials => ApiError::bad_request("Email must not be empty"),
        CredentialError::Hashing(_) => ApiError::internal("Could not process the registration"),
    }
}

/// Get the current authenticated user's information.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserMeResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn get_current_user(Auth(principal): Auth) -> Json<UserMeResponse> {
    Json(principal.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenService, UserDirectory};
    use crate::store::CatalogStore;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_state() -> AppState {
        let users = UserDirectory::new().expect("directory builds");
        let tokens = TokenService::new(SECRET, "test").expect("key accepted");
        AppState::new(CatalogStore::new(), users, tokens)
    }

    async fn register_account(state: &AppState, email: &str, password: &str) -> Principal {
        let mut users = state.users.write().await;
        users
            .register(email, password, BTreeSet::from([Role::Customer]))
            .expect("registration succeeds")
    }

    #[test]
    fn user_me_response_from_principal() {
        let principal = Principal {
            user_id: "user_123".to_string(),
            email: "alice@example.com".to_string(),
            roles: BTreeSet::from([Role::Customer]),
        };

        let response: UserMeResponse = principal.into();
        assert_eq!(response.user_id, "user_123");
        assert_eq!(response.email, "alice@example.com");
        assert!(response.roles.contains(&Role::Customer));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let state = test_state();
        let principal = register_account(&state, "alice@example.com", "p4ssw0rd!").await;

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "alice@example.com".to_string(),
                password: "p4ssw0rd!".to_string(),
            }),
        )
        .await
        .expect("login succeeds");

        let claims = state.tokens.verify(&response.token).expect("token verifies");
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.uid, principal.user_id);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let state = test_state();
        register_account(&state, "alice@example.com", "p4ssw0rd!").await;

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "alice@example.com".to_string(),
                password: "not-the-password".to_string(),
            }),
        )
        .await
        .expect_err("wrong password is rejected");

        let unknown_user = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "nobody@example.com".to_string(),
                password: "p4ssw0rd!".to_string(),
            }),
        )
        .await
        .expect_err("unknown user is rejected");

        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
        // Same message both ways, so the response does not reveal which
        // usernames exist.
        assert_eq!(wrong_password.message, unknown_user.message);
    }

    #[tokio::test]
    async fn register_creates_customer_account() {
        let state = test_state();

        let (status, Json(response)) = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "bob@example.com".to_string(),
                password: "long enough".to_string(),
            }),
        )
        .await
        .expect("registration succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.email, "bob@example.com");
        assert_eq!(response.roles, BTreeSet::from([Role::Customer]));

        // The fresh account can log in.
        let login_result = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "bob@example.com".to_string(),
                password: "long enough".to_string(),
            }),
        )
        .await;
        assert!(login_result.is_ok());
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let state = test_state();
        register_account(&state, "bob@example.com", "long enough").await;

        let err = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "Bob@Example.com".to_string(),
                password: "another pass".to_string(),
            }),
        )
        .await
        .expect_err("duplicate email is rejected");

        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_weak_password_rejected() {
        let state = test_state();

        let err = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "carol@example.com".to_string(),
                password: "short".to_string(),
            }),
        )
        .await
        .expect_err("short password is rejected");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn me_reflects_the_authenticated_principal() {
        let principal = Principal {
            user_id: "user_9".to_string(),
            email: "dave@example.com".to_string(),
            roles: BTreeSet::from([Role::Administrator]),
        };

        let Json(response) = get_current_user(Auth(principal.clone())).await;
        assert_eq!(response.user_id, principal.user_id);
        assert_eq!(response.email, principal.email);
    }
}
