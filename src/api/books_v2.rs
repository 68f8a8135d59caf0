//! V2 book endpoints
//!
//! Representations include `isAvailable`, and payloads may set it.

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::api::{ApiJson, AppState};
use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::models::{Book, BookRequest, EntityId};

/// Handler for GET /api/v2/books
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>> {
    Ok(Json(state.books.list_all().await?))
}

/// Handler for GET /api/v2/books/:id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Book>> {
    state
        .books
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Book with id {} not found", id)))
}

/// Handler for POST /api/v2/books
pub async fn create_book(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<BookRequest>,
) -> Result<impl IntoResponse> {
    req.validate().map_err(ApiError::Validation)?;

    let book = state.books.create(req.into_draft()).await?;
    info!(username = %user.username, id = book.id, "book created (v2)");

    let location = format!("/api/v2/books/{}", book.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(book)))
}

/// Handler for PUT /api/v2/books/:id
pub async fn update_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    ApiJson(req): ApiJson<BookRequest>,
) -> Result<StatusCode> {
    req.validate().map_err(ApiError::Validation)?;

    state.books.update(id, req.into_draft()).await?;
    info!(username = %user.username, id, "book updated (v2)");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/v2/books/:id
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> Result<StatusCode> {
    state.books.delete(id).await?;
    info!(username = %user.username, id, "book deleted (v2)");
    Ok(StatusCode::NO_CONTENT)
}
