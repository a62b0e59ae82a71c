//! Storage backends for the service layer
//!
//! Only an in-memory store exists; it is shared process-wide behind an `Arc`
//! and seeded explicitly at startup.

pub mod book_store;
