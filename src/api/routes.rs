//! API Routes
//!
//! Configures the Axum router with both API versions and the diagnostic
//! endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, instance_handler, login_handler, stats_handler, AppState,
};
use super::{books_v1, books_v2, timing::request_timing};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST /api/v{1,2}/books` - List / create books
/// - `GET|PUT|DELETE /api/v{1,2}/books/:id` - Read / replace / remove a book
/// - `POST /api/auth/login`, `POST /api/v2/auth/login` - Issue a bearer token
/// - `GET /api/service-instance` - Tag of the serving service instance
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// Writes require `Authorization: Bearer <token>`.
///
/// # Middleware
/// - Timing: logs each request with its duration
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .route(
            "/books",
            get(books_v1::list_books).post(books_v1::create_book),
        )
        .route(
            "/books/:id",
            get(books_v1::get_book)
                .put(books_v1::update_book)
                .delete(books_v1::delete_book),
        );

    let v2 = Router::new()
        .route(
            "/books",
            get(books_v2::list_books).post(books_v2::create_book),
        )
        .route(
            "/books/:id",
            get(books_v2::get_book)
                .put(books_v2::update_book)
                .delete(books_v2::delete_book),
        )
        .route("/auth/login", post(login_handler));

    Router::new()
        .nest("/api/v1", v1)
        .nest("/api/v2", v2)
        .route("/api/auth/login", post(login_handler))
        .route("/api/service-instance", get(instance_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_timing))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
