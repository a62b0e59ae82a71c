use std::sync::Arc;

use axum::{routing::get, Router};
use common::types::Health;
use service::{BookService, BookStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::response::PrettyJson;

pub mod books;

/// Shared handler state: the book service over the process-wide store.
#[derive(Clone)]
pub struct AppState {
    pub books: BookService<BookStore>,
}

impl AppState {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { books: BookService::new(store) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> PrettyJson<Health> {
    PrettyJson(Health::ok())
}

async fn openapi_json() -> PrettyJson<utoipa::openapi::OpenApi> {
    PrettyJson(ApiDoc::openapi())
}

/// Build the full application router: books CRUD, health and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let book_routes = Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        );

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(book_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
