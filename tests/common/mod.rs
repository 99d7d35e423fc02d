//! Shared helpers for route tests

#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use book_catalog::{
    error::{AppError, AppResult},
    models::{Book, BookFields},
    repository::BookStore,
    routes, AppConfig, AppState,
};

/// In-process book store with the same ordering and id rules as PostgreSQL
#[derive(Default)]
pub struct MemoryBookStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, Book>,
}

impl MemoryBookStore {
    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_by_year_desc(&self) -> AppResult<Vec<Book>> {
        let inner = self.inner.lock().await;
        let mut books: Vec<Book> = inner.rows.values().cloned().collect();
        books.sort_by(|a, b| match (a.year, b.year) {
            (Some(x), Some(y)) => y.cmp(&x).then(a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(books)
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.inner.lock().await.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: &BookFields) -> AppResult<Book> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let now = Utc::now();
        let book = Book {
            id: inner.last_id,
            title: fields.title.clone(),
            author: fields.author.clone(),
            genre: fields.genre.clone(),
            year: fields.year,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, fields: &BookFields) -> AppResult<Option<Book>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.rows.get_mut(&id).map(|book| {
            book.title = fields.title.clone();
            book.author = fields.author.clone();
            book.genre = fields.genre.clone();
            book.year = fields.year;
            book.updated_at = Utc::now();
            book.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.inner.lock().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Store whose every call fails like a lost connection
pub struct BrokenStore;

#[async_trait]
impl BookStore for BrokenStore {
    async fn list_by_year_desc(&self) -> AppResult<Vec<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find(&self, _id: i32) -> AppResult<Option<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _fields: &BookFields) -> AppResult<Book> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i32, _fields: &BookFields) -> AppResult<Option<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i32) -> AppResult<bool> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub fn app(store: Arc<dyn BookStore>) -> Router {
    let state = AppState::new(AppConfig::default(), store).expect("templates load");
    routes::router(state)
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    post_raw(app, uri, "application/x-www-form-urlencoded", body).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, "application/json", &body.to_string()).await
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::FOUND);
    response.headers()["location"].to_str().unwrap()
}
