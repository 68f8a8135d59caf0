//! Book entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

// == Book ==
/// A catalog record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub price: Decimal,
    pub is_available: bool,
}

impl Book {
    pub fn new(
        id: EntityId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            price,
            is_available: true,
        }
    }
}

// == Book Draft ==
/// Field values for creating or updating a book.
///
/// `is_available` is optional: `None` means "available" on create and
/// "keep the stored value" on update.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub price: Decimal,
    pub is_available: Option<bool>,
}

impl Entity for Book {
    type Draft = BookDraft;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            price: draft.price,
            is_available: draft.is_available.unwrap_or(true),
        }
    }

    fn updated(&self, draft: BookDraft) -> Self {
        Self {
            id: self.id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            price: draft.price,
            is_available: draft.is_available.unwrap_or(self.is_available),
        }
    }
}

/// The initial catalog contents, ids 1 through 3.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new(1, "1984", "George Orwell", 1949, Decimal::from(120_000)),
        Book::new(2, "To Kill a Mockingbird", "Harper Lee", 1960, Decimal::from(150_000)),
        Book::new(3, "The Great Gatsby", "F. Scott Fitzgerald", 1925, Decimal::from(100_000)),
    ]
}
