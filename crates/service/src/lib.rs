//! Service layer for the book store.
//! - `storage` owns the in-memory Record Store and its locking.
//! - `books` applies request validation on top of a `BookRepository`.

pub mod errors;
pub mod storage;
pub mod books;

pub use books::{repository::BookRepository, service::BookService};
pub use errors::ServiceError;
pub use storage::book_store::BookStore;
