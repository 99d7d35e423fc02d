//! HTTP routes for the book catalog

pub mod books;
pub mod health;

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    handler::Handler,
    http::header::CONTENT_TYPE,
    response::Response,
    routing::{get, post},
    Form, Json, Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{error::AppError, models::BookForm, views::found, AppState};

/// Build the application router
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir)
        .not_found_service(not_found.with_state(state.clone()));

    Router::new()
        .route("/", get(root).fallback(not_found))
        .route("/health", get(health::health_check).fallback(not_found))
        .route("/ready", get(health::readiness_check).fallback(not_found))
        .route(
            "/books",
            get(books::list_books).fallback(not_found),
        )
        .route(
            "/books/new",
            get(books::new_book_form)
                .post(books::create_book)
                .fallback(not_found),
        )
        .route(
            "/books/:id",
            get(books::show_book)
                .post(books::update_book)
                .fallback(not_found),
        )
        .route(
            "/books/:id/delete",
            post(books::delete_book).fallback(not_found),
        )
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Response {
    found("/books")
}

/// Single fallback for every unmatched path or method
pub async fn not_found(State(state): State<AppState>, request: Request) -> Response {
    tracing::warn!("No route for {} {}", request.method(), request.uri());
    state
        .views
        .not_found("Sorry it appears we can't find this page")
}

/// Book field map from either a form-encoded or a JSON body
pub struct BookInput(pub BookForm);

#[async_trait]
impl<S> FromRequest<S> for BookInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(form) = Json::<BookForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(BookInput(form))
        } else {
            let Form(form) = Form::<BookForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(BookInput(form))
        }
    }
}
