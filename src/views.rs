//! HTML views: template environment and response builders

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::{Book, BookDraft},
};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("form-fields.html", include_str!("../templates/form-fields.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("new-book.html", include_str!("../templates/new-book.html")),
    ("update-book.html", include_str!("../templates/update-book.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("page-not-found.html", include_str!("../templates/page-not-found.html")),
];

/// Template renderer, built once at startup
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> AppResult<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    pub fn book_list(&self, books: &[Book]) -> AppResult<Response> {
        let html = self.render("index.html", context! { title => "Book List", books })?;
        Ok(Html(html).into_response())
    }

    pub fn new_book(&self, book: &BookDraft, errors: Option<&FieldErrors>) -> AppResult<Response> {
        let html = self.render(
            "new-book.html",
            context! { title => "New Book", book, errors },
        )?;
        Ok(Html(html).into_response())
    }

    pub fn edit_book(&self, book: &BookDraft, errors: Option<&FieldErrors>) -> AppResult<Response> {
        let html = self.render(
            "update-book.html",
            context! { title => "Edit Book", book, errors },
        )?;
        Ok(Html(html).into_response())
    }

    /// Not-found page, always with a 404 status
    pub fn not_found(&self, message: &str) -> Response {
        match self.render(
            "page-not-found.html",
            context! { title => "Page Not Found", message },
        ) {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(err) => plain_failure(err),
        }
    }

    /// Generic error page
    pub fn error(&self, err: &AppError) -> Response {
        let status = err.status();
        match self.render(
            "error.html",
            context! {
                title => "Server Error",
                status => status.as_u16(),
                message => err.public_message(),
            },
        ) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => plain_failure(render_err),
        }
    }

    /// Turn a handler outcome into the final response
    pub fn finish(&self, result: AppResult<Response>) -> Response {
        match result {
            Ok(response) => response,
            Err(AppError::NotFound(message)) => {
                tracing::warn!("{}", message);
                self.not_found(&message)
            }
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!("{}", err);
                } else {
                    tracing::warn!("{}", err);
                }
                self.error(&err)
            }
        }
    }
}

/// 302 redirect, the status browsers follow with a GET
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

fn plain_failure(err: AppError) -> Response {
    tracing::error!("Failed to render error page: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}
