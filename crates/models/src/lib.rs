//! Domain types for the book store.
//! - `Book` is the stored entity, `BookPayload` the request body shape.
//! - Field validation lives next to the types so the service layer only orchestrates.

pub mod book;
pub mod errors;

pub use book::{Book, BookPayload, FieldUpdate};
