//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Book, EntityId};
use crate::service::InstanceTag;

/// V1 representation of a book (no availability flag)
#[derive(Debug, Clone, Serialize)]
pub struct BookV1 {
    pub id: EntityId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub price: Decimal,
}

impl From<Book> for BookV1 {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            year: book.year,
            price: book.price,
        }
    }
}

/// Response body for a successful login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token
    pub token: String,
    /// Token expiry in ISO 8601 format
    pub expiration: DateTime<Utc>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of list reads served from the cache
    pub hits: u64,
    /// Number of list reads that went to the store
    pub misses: u64,
    /// Number of times the cache was filled
    pub populations: u64,
    /// Number of write-triggered evictions
    pub invalidations: u64,
    /// Number of values dropped by expiration
    pub expirations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Whether the list is currently cached
    pub cached: bool,
    /// Diagnostic tag of the serving service instance
    pub instance: InstanceTag,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, cached: bool, instance: InstanceTag) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            populations: stats.populations,
            invalidations: stats.invalidations,
            expirations: stats.expirations,
            hit_rate: stats.hit_rate(),
            cached,
            instance,
        }
    }
}

/// Response body for GET /api/service-instance
#[derive(Debug, Clone, Serialize)]
pub struct InstanceResponse {
    pub instance: InstanceTag,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for plain error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
