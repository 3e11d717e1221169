// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Author endpoints.
//!
//! Same gating as books: reads and updates for any authenticated user,
//! creates and deletes for administrators. An author with books still in
//! the catalog cannot be deleted.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    models::{Author, CreateAuthorRequest, UpdateAuthorRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "Authors",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Author]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_authors(
    Auth(_principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.list_authors()))
}

#[utoipa::path(
    get,
    path = "/api/authors/{author_id}",
    params(
        ("author_id" = u32, Path, description = "Identifier of the author to fetch")
    ),
    tag = "Authors",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Author),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No author with this id"),
    )
)]
pub async fn get_author(
    Auth(_principal): Auth,
    Path(author_id): Path<u32>,
    State(state): State<AppState>,
) -> Result<Json<Author>, ApiError> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.get_author(author_id)?))
}

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = CreateAuthorRequest,
    tag = "Authors",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Author),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an administrator"),
    )
)]
pub async fn create_author(
    AdminOnly(_principal): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let mut catalog = state.catalog.write().await;
    let author = catalog.create_author(request);
    Ok((StatusCode::CREATED, Json(author)))
}

#[utoipa::path(
    put,
    path = "/api/authors/{author_id}",
    params(
        ("author_id" = u32, Path, description = "Identifier of the author to update")
    ),
    request_body = UpdateAuthorRequest,
    tag = "Authors",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 400, description = "Zero or mismatched id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No author with this id"),
    )
)]
pub async fn update_author(
    Auth(_principal): Auth,
    Path(author_id): Path<u32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAuthorRequest>,
) -> Result<StatusCode, ApiError> {
    let mut catalog = state.catalog.write().await;
    catalog.update_author(author_id, request)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/authors/{author_id}",
    params(
        ("author_id" = u32, Path, description = "Identifier of the author to delete")
    ),
    tag = "Authors",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 400, description = "Zero id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "No author with this id"),
        (status = 422, description = "Author still has books in the catalog"),
    )
)]
pub async fn delete_author(
    AdminOnly(_principal): AdminOnly,
    Path(author_id): Path<u32>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut catalog = state.catalog.write().await;
    catalog.delete_author(author_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::auth::{Principal, Role, TokenService, UserDirectory};
    use crate::models::CreateBookRequest;
    use crate::store::CatalogStore;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_state() -> AppState {
        let users = UserDirectory::new().expect("directory builds");
        let tokens = TokenService::new(SECRET, "test").expect("key accepted");
        AppState::new(CatalogStore::new(), users, tokens)
    }

    fn admin() -> Principal {
        Principal {
            user_id: "admin-1".to_string(),
            email: "admin@example.com".to_string(),
            roles: BTreeSet::from([Role::Administrator]),
        }
    }

    fn customer() -> Principal {
        Principal {
            user_id: "customer-1".to_string(),
            email: "customer@example.com".to_string(),
            roles: BTreeSet::from([Role::Customer]),
        }
    }

    fn author_request() -> CreateAuthorRequest {
        CreateAuthorRequest {
            firstname: "James".into(),
            lastname: "Baldwin".into(),
            bio: Some("American writer".into()),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_author() {
        let state = test_state();

        let (status, Json(created)) = create_author(
            AdminOnly(admin()),
            State(state.clone()),
            Json(author_request()),
        )
        .await
        .expect("creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.firstname, "James");

        let Json(fetched) = get_author(
            Auth(customer()),
            Path(created.id),
            State(state.clone()),
        )
        .await
        .expect("fetch succeeds");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_author_missing_errors() {
        let state = test_state();
        let err = get_author(Auth(customer()), Path(3), State(state.clone()))
            .await
            .expect_err("no such author");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_author_applies_changes() {
        let state = test_state();
        let (_, Json(author)) = create_author(
            AdminOnly(admin()),
            State(state.clone()),
            Json(author_request()),
        )
        .await
        .expect("creation succeeds");

        let status = update_author(
            Auth(customer()),
            Path(author.id),
            State(state.clone()),
            Json(UpdateAuthorRequest {
                id: author.id,
                firstname: "James Arthur".into(),
                lastname: "Baldwin".into(),
                bio: author.bio.clone(),
            }),
        )
        .await
        .expect("update succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);

        let stored = state
            .catalog
            .read()
            .await
            .get_author(author.id)
            .expect("author exists");
        assert_eq!(stored.firstname, "James Arthur");
    }

    #[tokio::test]
    async fn delete_author_blocked_by_books() {
        let state = test_state();
        let (_, Json(author)) = create_author(
            AdminOnly(admin()),
            State(state.clone()),
            Json(author_request()),
        )
        .await
        .expect("creation succeeds");

        let book = {
            let mut catalog = state.catalog.write().await;
            catalog
                .create_book(CreateBookRequest {
                    title: "Giovanni's Room".into(),
                    year: Some(1956),
                    isbn: None,
                    summary: None,
                    image: None,
                    price: None,
                    author_id: author.id,
                })
                .expect("book creation succeeds")
        };

        let err = delete_author(AdminOnly(admin()), Path(author.id), State(state.clone()))
            .await
            .expect_err("author with books cannot be deleted");
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        {
            let mut catalog = state.catalog.write().await;
            catalog.delete_book(book.id).expect("book deletion succeeds");
        }

        let status = delete_author(AdminOnly(admin()), Path(author.id), State(state.clone()))
            .await
            .expect("author deletion succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
