//! shelf - Collection manager for a library's books and movies
//!
//! Loads books and movies from CSV files into memory and lets a user check
//! copies in and out, add new items, list a collection and search it by
//! keyword. Changes last for the session only.
//!
//! # Modules
//!
//! - `domain`: Data structures (Record, ItemId, CollectionError)
//! - `library`: The store and its operations (check-in/out, search, add, load)
//! - `config`: Where the CSV sources live
//! - `cli`: Command-line interface and interactive session
//!
//! # Usage
//!
//! ```bash
//! # Interactive session on ./books.csv and ./movies.csv
//! shelf
//!
//! # One-shot search
//! shelf search books tolkien
//!
//! # Other sources
//! shelf --books data/books.csv --movies data/movies.csv list movies
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{CollectionError, ItemId, ItemKind, Record};
pub use library::{CollectionStore, PendingItem};
