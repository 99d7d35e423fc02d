//! Catalog service: validation and record lookup in front of the store

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDraft},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// All books, newest first
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list_by_year_desc().await
    }

    /// Single record lookup shared by every id-addressed route
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| missing(id))
    }

    /// Validate and persist a new book
    pub async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let fields = draft.fields().map_err(AppError::Validation)?;
        let book = self.store.insert(&fields).await?;
        tracing::info!("Created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Validate and persist `draft` over the existing record `id`
    pub async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Book> {
        let fields = draft.fields().map_err(AppError::Validation)?;
        let book = self
            .store
            .update(id, &fields)
            .await?
            .ok_or_else(|| missing(id))?;
        tracing::info!("Updated book id={}", book.id);
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(missing(id));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

fn missing(id: i32) -> AppError {
    AppError::NotFound(format!("We can't seem to find book {}", id))
}
