//! Book Catalog
//!
//! A server-rendered catalog of book records: list, create, view, edit and
//! delete books stored in a PostgreSQL table.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: Arc<views::Views>,
}

impl AppState {
    /// Wire the services and template renderer around a book store
    pub fn new(config: AppConfig, store: Arc<dyn repository::BookStore>) -> AppResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(store)),
            views: Arc::new(views::Views::new()?),
        })
    }
}
