//! Domain entities and request/response models for the catalog API
//!
//! `entity` and `book` hold the domain types the core works with; `requests`
//! and `responses` are the DTOs serialized over HTTP.

pub mod book;
pub mod entity;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use book::{seed_books, Book, BookDraft};
pub use entity::{Entity, EntityId};
pub use requests::{BookRequest, LoginRequest};
pub use responses::{
    AuthResponse, BookV1, ErrorResponse, HealthResponse, InstanceResponse, StatsResponse,
};
