// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Book endpoints.
//!
//! Reads and updates are open to any authenticated user; creating and
//! deleting books requires an administrator.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    models::{Book, CreateBookRequest, UpdateBookRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/books",
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Book]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_books(
    Auth(_principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.list_books()))
}

#[utoipa::path(
    get,
    path = "/api/books/{book_id}",
    params(
        ("book_id" = u32, Path, description = "Identifier of the book to fetch")
    ),
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Book),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No book with this id"),
    )
)]
pub async fn get_book(
    Auth(_principal): Auth,
    Path(book_id): Path<u32>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.get_book(book_id)?))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookRequest,
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Book),
        (status = 400, description = "author_id does not reference an existing author"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an administrator"),
    )
)]
pub async fn create_book(
    AdminOnly(_principal): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut catalog = state.catalog.write().await;
    let book = catalog.create_book(request)?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{book_id}",
    params(
        ("book_id" = u32, Path, description = "Identifier of the book to update")
    ),
    request_body = UpdateBookRequest,
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 400, description = "Zero or mismatched id, or unknown author_id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No book with this id"),
    )
)]
pub async fn update_book(
    Auth(_principal): Auth,
    Path(book_id): Path<u32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateBookRequest>,
) -> Result<StatusCode, ApiError> {
    let mut catalog = state.catalog.write().await;
    catalog.update_book(book_id, request)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/books/{book_id}",
    params(
        ("book_id" = u32, Path, description = "Identifier of the book to delete")
    ),
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 400, description = "Zero id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "No book with this id"),
    )
)]
pub async fn delete_book(
    AdminOnly(_principal): AdminOnly,
    Path(book_id): Path<u32>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut catalog = state.catalog.write().await;
    catalog.delete_book(book_id)?;
    Ok(StatusCode::NO_CONTENT)
}
