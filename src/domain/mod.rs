//! Domain types for the collection manager.
//!
//! This module contains the core data structures:
//! - Record: a book or movie with availability counts
//! - Fields: raw values for a new item and their coercion
//! - Error: everything collection operations can report

pub mod error;
pub mod fields;
pub mod record;

// Re-export commonly used types
pub use error::CollectionError;
pub use fields::{NewBook, NewItem, NewMovie};
pub use record::{BookDetails, ItemDetails, ItemId, ItemKind, MovieDetails, Record};
