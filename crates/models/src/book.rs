use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const MSG_CLIENT_ID: &str = "the ID field is autoincremented";
pub const MSG_MISSING_TITLE: &str = "missing title";
pub const MSG_MISSING_AUTHOR: &str = "missing author name";
pub const MSG_MISSING_QUANTITY: &str = "missing quantity";

/// A library item held by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub quantity: i64,
}

/// Request body for create and update.
///
/// Every field falls back to its zero value when absent, so `{}` and
/// `{"id": 0, "title": "", "author": "", "quantity": 0}` are the same payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPayload {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub quantity: i64,
}

/// The single field an update is allowed to touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Author(String),
    Quantity(i64),
    Unchanged,
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Case-insensitive title comparison used for duplicate detection.
pub fn same_title(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Reject bodies that try to choose their own id.
pub fn ensure_no_client_id(id: i64) -> Result<(), ModelError> {
    if id != 0 {
        return Err(ModelError::validation(MSG_CLIENT_ID));
    }
    Ok(())
}

impl BookPayload {
    /// Checks run in order; the first failure is reported.
    pub fn validate_new(&self) -> Result<(), ModelError> {
        ensure_no_client_id(self.id)?;
        if is_blank(&self.title) {
            return Err(ModelError::validation(MSG_MISSING_TITLE));
        }
        if is_blank(&self.author) {
            return Err(ModelError::validation(MSG_MISSING_AUTHOR));
        }
        if self.quantity == 0 {
            return Err(ModelError::validation(MSG_MISSING_QUANTITY));
        }
        Ok(())
    }

    /// Resolve the update priority chain: title, then author, then quantity.
    ///
    /// A non-blank author selects the author field but assigns the payload
    /// title to it, which is blank on that branch.
    pub fn field_update(&self) -> FieldUpdate {
        if !is_blank(&self.title) {
            FieldUpdate::Title(self.title.clone())
        } else if !is_blank(&self.author) {
            FieldUpdate::Author(self.title.clone())
        } else if self.quantity >= 0 {
            FieldUpdate::Quantity(self.quantity)
        } else {
            FieldUpdate::Unchanged
        }
    }

    pub fn into_book(self, id: i64) -> Book {
        Book { id, title: self.title, author: self.author, quantity: self.quantity }
    }
}

impl Book {
    pub fn new(id: i64, title: &str, author: &str, quantity: i64) -> Self {
        Self { id, title: title.to_string(), author: author.to_string(), quantity }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(title) => self.title = title,
            FieldUpdate::Author(author) => self.author = author,
            FieldUpdate::Quantity(quantity) => self.quantity = quantity,
            FieldUpdate::Unchanged => {}
        }
    }
}

/// The three books a fresh store starts with.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new(1, "In Search of Lost Time", "Marcel Proust", 2),
        Book::new(2, "Fundamentos da Matemática Elementar - 3", "Iezzy", 5),
        Book::new(3, "War and Peace", "Leo Tolstoy", 6),
    ]
}
