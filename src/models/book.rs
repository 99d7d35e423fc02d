//! Book model, submitted form and unsaved draft

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::error::FieldErrors;

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    /// Publication year, listing sort key
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted field map (form-encoded or JSON).
///
/// `None` means the key was absent from the request, which lets an update
/// leave the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
}

/// Accepts `"1965"` as well as `1965` so JSON clients can send numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<RawYear>::deserialize(deserializer)? {
        Some(RawYear::Number(n)) => Some(n.to_string()),
        Some(RawYear::Text(s)) => Some(s),
        None => None,
    })
}

/// Validated field set, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Unsaved book as entered by the user, rendered back into forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BookDraft {
    pub id: Option<i32>,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Author is required"))]
    pub author: String,
    pub genre: String,
    #[validate(custom(function = "integer_year", message = "Year must be a whole number"))]
    pub year: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn integer_year(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.parse::<i32>().is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("year"))
}

impl BookDraft {
    /// Draft holding exactly what was submitted
    pub fn from_form(form: &BookForm) -> Self {
        Self::default().apply(form)
    }

    /// Draft mirroring a stored record
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }

    /// Overwrite the fields present in `form`, keep the others
    pub fn apply(mut self, form: &BookForm) -> Self {
        if let Some(title) = &form.title {
            self.title = title.clone();
        }
        if let Some(author) = &form.author {
            self.author = author.clone();
        }
        if let Some(genre) = &form.genre {
            self.genre = genre.clone();
        }
        if let Some(year) = &form.year {
            self.year = year.clone();
        }
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the constraints and produce the persistable fields
    pub fn fields(&self) -> Result<BookFields, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;

        let genre = self.genre.trim();
        let year = self.year.trim();
        Ok(BookFields {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: (!genre.is_empty()).then(|| genre.to_string()),
            // already checked by `integer_year`
            year: year.parse().ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, author: &str) -> BookForm {
        BookForm {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            ..Default::default()
        }
    }

    fn stored() -> Book {
        Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: Some("SF".to_string()),
            year: Some(1965),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_draft_fields() {
        let mut submitted = form(" Dune ", "Herbert");
        submitted.year = Some("1965".to_string());
        submitted.genre = Some("".to_string());

        let fields = BookDraft::from_form(&submitted).fields().unwrap();
        assert_eq!(
            fields,
            BookFields {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                genre: None,
                year: Some(1965),
            }
        );
    }

    #[test]
    fn test_blank_title_and_author_rejected() {
        let errors = BookDraft::from_form(&form("", "   ")).fields().unwrap_err();
        assert_eq!(errors.get("title"), ["Title is required".to_string()]);
        assert_eq!(errors.get("author"), ["Author is required".to_string()]);
        assert!(!errors.contains("year"));
    }

    #[test]
    fn test_missing_keys_rejected_on_new_draft() {
        let errors = BookDraft::from_form(&BookForm::default()).fields().unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("author"));
    }

    #[test]
    fn test_non_numeric_year_rejected() {
        let mut submitted = form("Dune", "Herbert");
        submitted.year = Some("nineteen".to_string());
        let errors = BookDraft::from_form(&submitted).fields().unwrap_err();
        assert_eq!(errors.get("year"), ["Year must be a whole number".to_string()]);
    }

    #[test]
    fn test_apply_only_touches_submitted_fields() {
        let partial = BookForm {
            title: Some("Dune Messiah".to_string()),
            ..Default::default()
        };
        let draft = BookDraft::from_book(&stored()).apply(&partial);
        assert_eq!(draft.id, Some(7));
        assert_eq!(draft.title, "Dune Messiah");
        assert_eq!(draft.author, "Herbert");
        assert_eq!(draft.genre, "SF");
        assert_eq!(draft.year, "1965");
    }

    #[test]
    fn test_form_accepts_numeric_year_in_json() {
        let form: BookForm =
            serde_json::from_str(r#"{"title":"Dune","author":"Herbert","year":1965}"#).unwrap();
        assert_eq!(form.year.as_deref(), Some("1965"));
        assert!(form.genre.is_none());

        let form: BookForm = serde_json::from_str(r#"{"year":"2001","genre":null}"#).unwrap();
        assert_eq!(form.year.as_deref(), Some("2001"));
        assert!(form.title.is_none());
    }
}
