//! Loading collections from CSV files.
//!
//! Each source is a comma-separated file with a header row. Columns are
//! matched by header name, so their order does not matter.
//!
//! ```text
//! ID,Title,Author,Publisher,Pages,Year,Copies,Available
//! 1,The Hobbit,J.R.R. Tolkien,Allen & Unwin,310,1937,3,2
//! ```
//!
//! Movies use `Director`, `Length` and `Genre` in place of the three book
//! columns. Any unreadable or inconsistent source fails the whole load.

use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::{error, info};

use crate::domain::{
    BookDetails, CollectionError, ItemDetails, ItemId, ItemKind, MovieDetails, Record,
};

use super::store::CollectionStore;

/// One row of the books file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BookRow {
    #[serde(rename = "ID")]
    id: u32,
    title: String,
    author: String,
    publisher: String,
    pages: i32,
    year: i32,
    copies: u32,
    available: u32,
}

/// One row of the movies file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MovieRow {
    #[serde(rename = "ID")]
    id: u32,
    title: String,
    director: String,
    length: i32,
    genre: String,
    year: i32,
    copies: u32,
    available: u32,
}

impl BookRow {
    fn into_record(self) -> Result<Record, CollectionError> {
        Record::new(
            ItemId::new(self.id),
            self.title,
            self.year,
            self.copies,
            self.available,
            ItemDetails::Book(BookDetails {
                author: self.author,
                publisher: self.publisher,
                pages: self.pages,
            }),
        )
    }
}

impl MovieRow {
    fn into_record(self) -> Result<Record, CollectionError> {
        Record::new(
            ItemId::new(self.id),
            self.title,
            self.year,
            self.copies,
            self.available,
            ItemDetails::Movie(MovieDetails {
                director: self.director,
                genre: self.genre,
                length: self.length,
            }),
        )
    }
}

/// Parse CSV text into records of one kind.
///
/// `origin` names the source in error messages.
pub fn parse_collection(
    text: &str,
    kind: ItemKind,
    origin: &Path,
) -> Result<Vec<Record>, CollectionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let fail = |reason: String| CollectionError::source_unavailable(origin, reason);

    match kind {
        ItemKind::Book => reader
            .deserialize::<BookRow>()
            .map(|row| {
                row.map_err(|e| fail(e.to_string()))
                    .and_then(|row| row.into_record().map_err(|e| fail(e.to_string())))
            })
            .collect(),
        ItemKind::Movie => reader
            .deserialize::<MovieRow>()
            .map(|row| {
                row.map_err(|e| fail(e.to_string()))
                    .and_then(|row| row.into_record().map_err(|e| fail(e.to_string())))
            })
            .collect(),
    }
}

/// Read and parse a single collection file
pub async fn load_collection(path: &Path, kind: ItemKind) -> Result<Vec<Record>, CollectionError> {
    let text = fs::read_to_string(path).await.map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            "file not found".to_string()
        } else {
            e.to_string()
        };
        CollectionError::source_unavailable(path, reason)
    })?;

    let records = parse_collection(&text, kind, path)?;
    info!(path = %path.display(), count = records.len(), "Loaded {}", kind.plural());
    Ok(records)
}

/// Load both collections and build a store from them.
///
/// Nothing is returned unless both sources load cleanly and ids are unique
/// across the two.
pub async fn load_store(books: &Path, movies: &Path) -> Result<CollectionStore, CollectionError> {
    let result = async {
        let (book_records, movie_records) = tokio::try_join!(
            load_collection(books, ItemKind::Book),
            load_collection(movies, ItemKind::Movie),
        )?;

        let mut store = CollectionStore::new();
        for (path, records) in [(books, book_records), (movies, movie_records)] {
            for record in records {
                store
                    .insert(record)
                    .map_err(|e| CollectionError::source_unavailable(path, e))?;
            }
        }
        Ok::<_, CollectionError>(store)
    }
    .await;

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}
