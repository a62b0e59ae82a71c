use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use models::{Book, BookPayload};
use serde::Serialize;
use service::ServiceError;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::response::PrettyJson;
use crate::routes::AppState;

pub const MSG_INVALID_ID_GET: &str = "Invalid Id";
pub const MSG_INVALID_ID: &str = "invalid Id";

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub deleted: bool,
    pub book: Book,
}

fn parse_id(raw: &str, msg: &str) -> Result<i64, JsonApiError> {
    raw.parse::<i64>().map_err(|_| {
        warn!(id = %raw, "rejected non-integer id");
        JsonApiError::bad_request(msg)
    })
}

/// A `null` body reads as the all-zero payload.
fn parse_payload(body: &[u8]) -> Result<BookPayload, JsonApiError> {
    serde_json::from_slice::<Option<BookPayload>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            warn!(error = %e, "rejected malformed book payload");
            JsonApiError::bad_request(e.to_string())
        })
}

fn rejected(op: &'static str) -> impl Fn(ServiceError) -> ServiceError {
    move |e| {
        warn!(op, error = %e, "book request rejected");
        e
    }
}

#[utoipa::path(
    get, path = "/books", tag = "books",
    responses((status = 200, description = "All books in store order", body = [crate::openapi::BookDoc]))
)]
pub async fn list_books(State(state): State<AppState>) -> PrettyJson<Vec<Book>> {
    PrettyJson(state.books.list().await)
}

#[utoipa::path(
    get, path = "/books/{id}", tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::BookDoc),
        (status = 400, description = "Invalid Id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<PrettyJson<Book>, JsonApiError> {
    let id = parse_id(&raw, MSG_INVALID_ID_GET)?;
    let book = state.books.get(id).await.map_err(rejected("get"))?;
    Ok(PrettyJson(book))
}

#[utoipa::path(
    post, path = "/books", tag = "books",
    request_body = crate::openapi::BookPayloadDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::BookDoc),
        (status = 400, description = "Malformed or invalid payload", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Title already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, JsonApiError> {
    let payload = parse_payload(&body)?;
    let book = state.books.create(payload).await.map_err(rejected("create"))?;
    Ok((StatusCode::CREATED, PrettyJson(book)))
}

#[utoipa::path(
    put, path = "/books/{id}", tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = crate::openapi::BookPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BookDoc),
        (status = 400, description = "Invalid id, payload, client-supplied id or unknown book", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Result<PrettyJson<Book>, JsonApiError> {
    let id = parse_id(&raw, MSG_INVALID_ID)?;
    let payload = parse_payload(&body)?;
    let book = state
        .books
        .update(id, payload)
        .await
        .map_err(rejected("update"))
        .map_err(JsonApiError::not_found_as_bad_request)?;
    Ok(PrettyJson(book))
}

#[utoipa::path(
    delete, path = "/books/{id}", tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Deleted, echoes the removed book", body = crate::openapi::DeleteDoc),
        (status = 400, description = "Invalid id or unknown book", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<PrettyJson<DeleteOutput>, JsonApiError> {
    let id = parse_id(&raw, MSG_INVALID_ID)?;
    let book = state
        .books
        .delete(id)
        .await
        .map_err(rejected("delete"))
        .map_err(JsonApiError::not_found_as_bad_request)?;
    Ok(PrettyJson(DeleteOutput { deleted: true, book }))
}
