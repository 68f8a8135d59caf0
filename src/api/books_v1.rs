//! V1 book endpoints
//!
//! Representations omit the availability flag, and updates never change it.

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
use crate::models::{BookRequest, BookV1, EntityId};

/// Handler for GET /api/v1/books
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookV1>>> {
    let books = state.books.list_all().await?;
    Ok(Json(books.into_iter().map(BookV1::from).collect()))
}

/// Handler for GET /api/v1/books/:id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<BookV1>> {
    state
        .books
        .get_by_id(id)
        .await?
        .map(|book| Json(BookV1::from(book)))
        .ok_or_else(|| ApiError::NotFound(format!("Book with id {} not found", id)))
}

/// Handler for POST /api/v1/books
pub async fn create_book(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<BookRequest>,
) -> Result<impl IntoResponse> {
    req.validate().map_err(ApiError::Validation)?;

    let book = state.books.create(req.into_draft_v1()).await?;
    info!(username = %user.username, id = book.id, "book created (v1)");

    let location = format!("/api/v1/books/{}", book.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(BookV1::from(book))))
}

/// Handler for PUT /api/v1/books/:id
pub async fn update_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    ApiJson(req): ApiJson<BookRequest>,
) -> Result<StatusCode> {
    req.validate().map_err(ApiError::Validation)?;

    state.books.update(id, req.into_draft_v1()).await?;
    info!(username = %user.username, id, "book updated (v1)");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/v1/books/:id
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> Result<StatusCode> {
    state.books.delete(id).await?;
    info!(username = %user.username, id, "book deleted (v1)");
    Ok(StatusCode::NO_CONTENT)
}
