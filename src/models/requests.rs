//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ValidationErrors;
use crate::models::BookDraft;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum author length in characters
pub const MAX_AUTHOR_LENGTH: usize = 100;

/// Earliest accepted publication year
pub const MIN_YEAR: i32 = 1800;

/// Decimal places a price may carry (`NUMERIC(18, 2)`)
pub const PRICE_SCALE: u32 = 2;

/// Integer digits a price may carry (`NUMERIC(18, 2)`)
pub const PRICE_INTEGER_DIGITS: u32 = 16;

/// Request body for creating or updating a book
///
/// Any `id` sent by the client is ignored; identifiers belong to the store.
/// `price` accepts either a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub year: i32,
    pub price: Decimal,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl BookRequest {
    /// Validates the request data
    ///
    /// Collects every failing rule per field; returns `Err` if any rule failed.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut fail = |field: &str, message: &str| {
            errors
                .entry(field.to_string())
                .or_default()
                .push(message.to_string());
        };

        if self.title.trim().is_empty() {
            fail("title", "Title is required");
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            fail("title", "Title cannot exceed 200 characters");
        }
        if self.author.trim().is_empty() {
            fail("author", "Author is required");
        }
        if self.author.chars().count() > MAX_AUTHOR_LENGTH {
            fail("author", "Author cannot exceed 100 characters");
        }
        let max_year = Utc::now().year() + 1;
        if !(MIN_YEAR..=max_year).contains(&self.year) {
            fail("year", "Year must be between 1800 and next year");
        }
        if self.price < Decimal::ZERO {
            fail("price", "Price must be non-negative");
        }
        if self.price.normalize().scale() > PRICE_SCALE {
            fail("price", "Price cannot have more than 2 decimal places");
        }
        if self.price.abs() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
            fail("price", "Price must be less than 10^16");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Converts into a draft that carries the availability flag (V2).
    pub fn into_draft(self) -> BookDraft {
        BookDraft {
            title: self.title,
            author: self.author,
            year: self.year,
            price: self.price,
            is_available: self.is_available,
        }
    }

    /// Converts into a draft that leaves availability untouched (V1).
    pub fn into_draft_v1(self) -> BookDraft {
        BookDraft {
            is_available: None,
            ..self.into_draft()
        }
    }
}

/// Request body for POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
