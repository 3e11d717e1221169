// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        Author, Book, CreateAuthorRequest, CreateBookRequest, LoginRequest, RegisterRequest,
        TokenResponse, UpdateAuthorRequest, UpdateBookRequest,
    },
    state::AppState,
};

pub mod authors;
pub mod books;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users/login", post(users::login))
        .route("/users/register", post(users::register))
        .route("/users/me", get(users::get_current_user))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{book_id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/authors/{author_id}",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::readiness,
        users::login,
        users::register,
        users::get_current_user,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author
    ),
    components(
        schemas(
            Book,
            CreateBookRequest,
            UpdateBookRequest,
            Author,
            CreateAuthorRequest,
            UpdateAuthorRequest,
            LoginRequest,
            RegisterRequest,
            TokenResponse,
            Role,
            users::UserMeResponse,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Health", description = "Service health probes"),
        (name = "Users", description = "Login, registration and identity"),
        (name = "Books", description = "Book catalog management"),
        (name = "Authors", description = "Author catalog management")
    )
)]
struct ApiDoc;
