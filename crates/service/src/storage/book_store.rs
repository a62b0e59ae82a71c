use std::collections::HashMap;

use async_trait::async_trait;
use models::book::{same_title, seed_books};
use models::{Book, BookPayload, FieldUpdate};
use tokio::sync::RwLock;
use tracing::debug;

use crate::books::repository::BookRepository;
use crate::errors::ServiceError;

#[derive(Default)]
struct Inner {
    by_id: HashMap<i64, Book>,
    /// Ids in insertion order; deletion shifts later entries down.
    order: Vec<i64>,
}

impl Inner {
    fn position(&self, id: i64) -> Option<usize> {
        if !self.by_id.contains_key(&id) {
            return None;
        }
        self.order.iter().position(|&o| o == id)
    }

    fn next_id(&self) -> i64 {
        self.order.iter().copied().max().map_or(1, |max| max + 1)
    }

    fn title_taken(&self, title: &str) -> bool {
        self.by_id.values().any(|b| same_title(&b.title, title))
    }

    fn push(&mut self, book: Book) {
        self.order.push(book.id);
        self.by_id.insert(book.id, book);
    }
}

/// In-memory Record Store.
///
/// Books are kept in insertion order with an id index for lookups. All access
/// goes through one `RwLock`, which is the only serialization point for writes.
/// Share it behind a single `Arc`.
#[derive(Default)]
pub struct BookStore {
    inner: RwLock<Inner>,
}

impl BookStore {
    /// Build a store holding `books` in the given order.
    ///
    /// Later entries with an id already present are dropped.
    pub fn with_books<I: IntoIterator<Item = Book>>(books: I) -> Self {
        let mut inner = Inner::default();
        for book in books {
            if inner.by_id.contains_key(&book.id) {
                continue;
            }
            inner.push(book);
        }
        Self { inner: RwLock::new(inner) }
    }

    /// Store pre-filled with the three built-in books.
    pub fn seeded() -> Self {
        Self::with_books(seed_books())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// All books in store order.
    pub async fn list(&self) -> Vec<Book> {
        let inner = self.inner.read().await;
        inner.order.iter().filter_map(|id| inner.by_id.get(id).cloned()).collect()
    }

    /// Book and its current position in store order.
    ///
    /// The position is only valid until the next delete.
    pub async fn locate(&self, id: i64) -> Result<(usize, Book), ServiceError> {
        let inner = self.inner.read().await;
        let idx = inner.position(id).ok_or_else(ServiceError::book_not_found)?;
        let book = inner.by_id.get(&id).cloned().ok_or_else(ServiceError::book_not_found)?;
        Ok((idx, book))
    }

    /// Append a new book with the next id unless its title is already used.
    pub async fn insert(&self, payload: BookPayload) -> Result<Book, ServiceError> {
        let mut inner = self.inner.write().await;
        if inner.title_taken(&payload.title) {
            debug!(title = %payload.title, "duplicate title rejected");
            return Err(ServiceError::book_exists());
        }
        let id = inner.next_id();
        let book = payload.into_book(id);
        inner.push(book.clone());
        debug!(id, count = inner.order.len(), "book inserted");
        Ok(book)
    }

    pub async fn apply(&self, id: i64, update: FieldUpdate) -> Result<Book, ServiceError> {
        let mut inner = self.inner.write().await;
        let book = inner.by_id.get_mut(&id).ok_or_else(ServiceError::book_not_found)?;
        book.apply(update);
        debug!(id, "book updated");
        Ok(book.clone())
    }

    pub async fn remove(&self, id: i64) -> Result<Book, ServiceError> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id).ok_or_else(ServiceError::book_not_found)?;
        inner.order.remove(idx);
        let book = inner.by_id.remove(&id).ok_or_else(ServiceError::book_not_found)?;
        debug!(id, index = idx, count = inner.order.len(), "book removed");
        Ok(book)
    }
}

#[async_trait]
impl BookRepository for BookStore {
    async fn list(&self) -> Vec<Book> { self.list().await }
    async fn locate(&self, id: i64) -> Result<(usize, Book), ServiceError> { self.locate(id).await }
    async fn insert(&self, payload: BookPayload) -> Result<Book, ServiceError> { self.insert(payload).await }
    async fn apply(&self, id: i64, update: FieldUpdate) -> Result<Book, ServiceError> { self.apply(id, update).await }
    async fn remove(&self, id: i64) -> Result<Book, ServiceError> { self.remove(id).await }
}
