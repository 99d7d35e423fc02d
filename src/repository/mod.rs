//! Repository layer for database operations

pub mod books;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFields},
};

pub use books::PgBookStore;

/// Persistence operations on the `books` table.
///
/// Implementations own all persisted state; callers only ever hold
/// request-scoped copies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, newest year first, books without a year last
    async fn list_by_year_desc(&self) -> AppResult<Vec<Book>>;

    async fn find(&self, id: i32) -> AppResult<Option<Book>>;

    /// Insert a new row; the store assigns the id
    async fn insert(&self, fields: &BookFields) -> AppResult<Book>;

    /// Replace every field of an existing row, `None` when the row is gone
    async fn update(&self, id: i32, fields: &BookFields) -> AppResult<Option<Book>>;

    /// Hard delete, `false` when no row matched
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Connectivity check for readiness probes
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct, one store per table
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookStore::new(pool)),
        }
    }
}
