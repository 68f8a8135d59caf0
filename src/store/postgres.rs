//! Postgres-backed book store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::StoreError;
use crate::models::{Book, BookDraft, Entity, EntityId};
use crate::store::EntityStore;

const BOOK_COLUMNS: &str = "id, title, author, year, price, is_available";

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i32,
    title: String,
    author: String,
    year: i32,
    price: Decimal,
    is_available: bool,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            year: row.year,
            price: row.price,
            is_available: row.is_available,
        }
    }
}

// == Postgres Book Store ==
/// Stores books in the `books` table.
///
/// Id policy: the `SERIAL` primary key assigns ids (auto-increment). Ids are
/// never reused, even after the highest one is deleted.
#[derive(Clone)]
pub struct PostgresBookStore {
    pool: PgPool,
}

impl PostgresBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `url` and applies pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Self::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore<Book> for PostgresBookStore {
    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id");
        let rows = sqlx::query_as::<_, BookRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::from_persistence)?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");
        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(StoreError::from_persistence)?;
        Ok(row.map(Book::from))
    }

    async fn insert(&self, draft: BookDraft) -> Result<Book, StoreError> {
        // id 0 is a placeholder; the sequence assigns the real one
        let book = Book::from_draft(0, draft);
        let sql = format!(
            "INSERT INTO books (title, author, year, price, is_available) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {BOOK_COLUMNS}"
        );
        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .bind(book.price)
            .bind(book.is_available)
            .fetch_one(self.pool())
            .await
            .map_err(StoreError::from_persistence)?;
        Ok(row.into())
    }

    async fn update(&self, book: Book) -> Result<Option<Book>, StoreError> {
        let sql = format!(
            "UPDATE books SET title = $2, author = $3, year = $4, price = $5, is_available = $6 \
             WHERE id = $1 RETURNING {BOOK_COLUMNS}"
        );
        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .bind(book.price)
            .bind(book.is_available)
            .fetch_optional(self.pool())
            .await
            .map_err(StoreError::from_persistence)?;
        Ok(row.map(Book::from))
    }

    async fn delete(&self, id: EntityId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(StoreError::from_persistence)?;
        Ok(result.rows_affected() > 0)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
