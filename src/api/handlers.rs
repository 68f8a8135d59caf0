//! API Handlers
//!
//! Application state plus the handlers shared by every API version:
//! login, health, cache stats and the service instance tag.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::ApiJson;
use crate::auth::AuthService;
use crate::cache::ExpirationPolicy;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    seed_books, AuthResponse, Book, HealthResponse, InstanceResponse, LoginRequest,
    StatsResponse,
};
use crate::service::BookService;
use crate::store::{EntityStore, MemoryStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached book service
    pub books: Arc<BookService>,
    /// Token issuer and verifier
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(books: BookService, auth: AuthService) -> Self {
        Self {
            books: Arc::new(books),
            auth: Arc::new(auth),
        }
    }

    /// Creates a new AppState over `store`, configured from `config`.
    pub fn with_store(store: Arc<dyn EntityStore<Book>>, config: &Config) -> Self {
        let books = BookService::new(store, ExpirationPolicy::from(config));
        Self::new(books, AuthService::from_config(config))
    }

    /// Creates a new AppState over a seeded in-memory store.
    pub fn in_memory(config: &Config) -> Self {
        Self::with_store(Arc::new(MemoryStore::seeded(seed_books())), config)
    }
}

/// Handler for POST /api/auth/login and /api/v2/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    Ok(Json(state.auth.login(&req)?))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let books = &state.books;
    Json(StatsResponse::new(
        &books.cache_stats(),
        books.is_cache_populated(),
        books.instance_tag(),
    ))
}

/// Handler for GET /api/service-instance
pub async fn instance_handler(State(state): State<AppState>) -> Json<InstanceResponse> {
    Json(InstanceResponse {
        instance: state.books.instance_tag(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
