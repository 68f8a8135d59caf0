//! API Module
//!
//! HTTP handlers and routing for the book catalog REST API.
//!
//! # Endpoints
//! - `/api/v1/books[/:id]` - Book CRUD without the availability flag
//! - `/api/v2/books[/:id]` - Book CRUD with the availability flag
//! - `POST /api/auth/login` - Issue a bearer token
//! - `GET /api/service-instance` - Service instance tag
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod books_v1;
pub mod books_v2;
mod extract;
pub mod handlers;
pub mod routes;
mod timing;

pub use extract::ApiJson;
pub use handlers::*;
pub use routes::create_router;
