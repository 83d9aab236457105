//! Records held by the collection.
//!
//! A record is either a book or a movie. The variant is fixed when the
//! record is built and carried explicitly in [`ItemDetails`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::CollectionError;

/// Unique identifier of a record, shared across books and movies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value
    pub fn get(self) -> u32 {
        self.0
    }

    /// The id that follows this one, or `None` at the top of the id space
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| CollectionError::invalid_field("ID", s))
    }
}

/// Which of the two collections a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Book,
    Movie,
}

impl ItemKind {
    /// Plural noun used in user-facing messages
    pub fn plural(self) -> &'static str {
        match self {
            ItemKind::Book => "books",
            ItemKind::Movie => "movies",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Book => write!(f, "book"),
            ItemKind::Movie => write!(f, "movie"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "book" | "books" | "b" => Ok(ItemKind::Book),
            "movie" | "movies" | "m" => Ok(ItemKind::Movie),
            _ => anyhow::bail!("Unknown item kind: {}", s),
        }
    }
}

/// Fields only books carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetails {
    #[serde(rename = "Author")]
    pub author: String,

    #[serde(rename = "Publisher")]
    pub publisher: String,

    #[serde(rename = "Pages")]
    pub pages: i32,
}

/// Fields only movies carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDetails {
    #[serde(rename = "Director")]
    pub director: String,

    #[serde(rename = "Genre")]
    pub genre: String,

    /// Running time in minutes
    #[serde(rename = "Length")]
    pub length: i32,
}

/// Variant-specific part of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "Kind", rename_all = "snake_case")]
pub enum ItemDetails {
    Book(BookDetails),
    Movie(MovieDetails),
}

impl ItemDetails {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemDetails::Book(_) => ItemKind::Book,
            ItemDetails::Movie(_) => ItemKind::Movie,
        }
    }

    /// The two variant fields that keyword search looks at, besides the title
    pub fn searchable(&self) -> [&str; 2] {
        match self {
            ItemDetails::Book(b) => [&b.author, &b.publisher],
            ItemDetails::Movie(m) => [&m.director, &m.genre],
        }
    }
}

/// A single book or movie.
///
/// `id`, `copies` and the variant never change after construction. Only
/// `available` moves, and always within `0..=copies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "ID")]
    id: ItemId,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Copies")]
    copies: u32,

    #[serde(rename = "Available")]
    available: u32,

    #[serde(flatten)]
    pub details: ItemDetails,
}

impl Record {
    /// Build a record, rejecting an availability above the number of copies
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        year: i32,
        copies: u32,
        available: u32,
        details: ItemDetails,
    ) -> Result<Self, CollectionError> {
        if available > copies {
            return Err(CollectionError::invalid_field(
                "Available",
                format!("{} (exceeds {} copies)", available, copies),
            ));
        }

        Ok(Self {
            id,
            title: title.into(),
            year,
            copies,
            available,
            details,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn is_full(&self) -> bool {
        self.available == self.copies
    }

    /// Return one copy to the shelf
    pub(crate) fn return_copy(&mut self) -> Result<(), CollectionError> {
        if self.is_full() {
            return Err(CollectionError::AlreadyFull { id: self.id });
        }
        self.available += 1;
        Ok(())
    }

    /// Lend one copy out
    pub(crate) fn lend_copy(&mut self) -> Result<(), CollectionError> {
        if self.available == 0 {
            return Err(CollectionError::NoneAvailable { id: self.id });
        }
        self.available -= 1;
        Ok(())
    }

    /// Case-insensitive substring match against the title and the two
    /// variant search fields. `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        std::iter::once(self.title.as_str())
            .chain(self.details.searchable())
            .any(|field| field.to_lowercase().contains(needle))
    }
}
