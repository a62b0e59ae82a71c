use async_trait::async_trait;
use models::{Book, BookPayload, FieldUpdate};

use crate::errors::ServiceError;

/// Storage operations the book service relies on.
///
/// Each call is atomic with respect to the others: an implementation must not
/// let a concurrent insert slip between the duplicate-title check and the append.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self) -> Vec<Book>;
    /// Book and its position in store order; the position is stale after any delete.
    async fn locate(&self, id: i64) -> Result<(usize, Book), ServiceError>;
    /// Insert a validated payload, assigning its id. Fails on a duplicate title.
    async fn insert(&self, payload: BookPayload) -> Result<Book, ServiceError>;
    async fn apply(&self, id: i64, update: FieldUpdate) -> Result<Book, ServiceError>;
    /// Remove a book, returning its last state.
    async fn remove(&self, id: i64) -> Result<Book, ServiceError>;
}
