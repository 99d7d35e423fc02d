//! Book catalog pages

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    models::BookDraft,
    views::found,
    AppState,
};

use super::BookInput;

/// Non-numeric ids can never match a row
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("We can't seem to find book {:?}", raw)))
}

fn book_location(id: i32) -> String {
    format!("/books/{}", id)
}

/// GET /books
pub async fn list_books(State(state): State<AppState>) -> Response {
    let result = list(&state).await;
    state.views.finish(result)
}

async fn list(state: &AppState) -> AppResult<Response> {
    let books = state.services.catalog.list().await?;
    state.views.book_list(&books)
}

/// GET /books/new
pub async fn new_book_form(State(state): State<AppState>) -> Response {
    let result = state.views.new_book(&BookDraft::default(), None);
    state.views.finish(result)
}

/// POST /books/new
pub async fn create_book(
    State(state): State<AppState>,
    input: Result<BookInput, AppError>,
) -> Response {
    let result = create(&state, input).await;
    state.views.finish(result)
}

async fn create(state: &AppState, input: Result<BookInput, AppError>) -> AppResult<Response> {
    let BookInput(form) = input?;
    let draft = BookDraft::from_form(&form);

    match state.services.catalog.create(&draft).await {
        Ok(book) => Ok(found(&book_location(book.id))),
        Err(AppError::Validation(errors)) => state.views.new_book(&draft, Some(&errors)),
        Err(err) => Err(err),
    }
}

/// GET /books/:id
pub async fn show_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = show(&state, &id).await;
    state.views.finish(result)
}

async fn show(state: &AppState, raw_id: &str) -> AppResult<Response> {
    let id = parse_id(raw_id)?;
    let book = state.services.catalog.get(id).await?;
    state.views.edit_book(&BookDraft::from_book(&book), None)
}

/// POST /books/:id
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    input: Result<BookInput, AppError>,
) -> Response {
    let result = update(&state, &id, input).await;
    state.views.finish(result)
}

async fn update(
    state: &AppState,
    raw_id: &str,
    input: Result<BookInput, AppError>,
) -> AppResult<Response> {
    let id = parse_id(raw_id)?;
    let existing = state.services.catalog.get(id).await?;
    let BookInput(form) = input?;
    let draft = BookDraft::from_book(&existing).apply(&form).with_id(id);

    match state.services.catalog.update(id, &draft).await {
        Ok(book) => Ok(found(&book_location(book.id))),
        Err(AppError::Validation(errors)) => state.views.edit_book(&draft, Some(&errors)),
        Err(err) => Err(err),
    }
}

/// POST /books/:id/delete
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = delete(&state, &id).await;
    state.views.finish(result)
}

async fn delete(state: &AppState, raw_id: &str) -> AppResult<Response> {
    let id = parse_id(raw_id)?;
    state.services.catalog.delete(id).await?;
    Ok(found("/books"))
}
