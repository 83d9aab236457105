//! Keyword search over one collection.
//!
//! Books are matched on title, author and publisher. Movies are matched on
//! title, director and genre.

use tracing::debug;

use crate::domain::{CollectionError, ItemKind, Record};

use super::store::CollectionStore;

/// Search items by query (case-insensitive substring match).
///
/// An empty or whitespace-only query is rejected with `InvalidQuery`. No
/// matches gives an empty list. Results keep collection order.
pub fn search<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    query: &str,
) -> Result<Vec<&'a Record>, CollectionError> {
    if query.trim().is_empty() {
        return Err(CollectionError::InvalidQuery);
    }

    let query_lower = query.to_lowercase();

    Ok(records
        .into_iter()
        .filter(|record| record.matches(&query_lower))
        .collect())
}

impl CollectionStore {
    /// Search one collection of the store
    pub fn search(&self, kind: ItemKind, query: &str) -> Result<Vec<&Record>, CollectionError> {
        let results = search(self.list(kind), query)?;
        debug!(%kind, query, matches = results.len(), "Search finished");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookDetails, ItemDetails, ItemId, MovieDetails};

    fn library() -> CollectionStore {
        let books = [
            ("Introduction to Rust", "Steve Klabnik", "No Starch"),
            ("Programming Pearls", "Jon Bentley", "Addison-Wesley"),
        ];
        let mut records: Vec<Record> = books
            .iter()
            .enumerate()
            .map(|(i, (title, author, publisher))| {
                Record::new(
                    ItemId::new(i as u32),
                    *title,
                    2018,
                    1,
                    1,
                    ItemDetails::Book(BookDetails {
                        author: author.to_string(),
                        publisher: publisher.to_string(),
                        pages: 500,
                    }),
                )
                .unwrap()
            })
            .collect();

        records.push(
            Record::new(
                ItemId::new(10),
                "Rust and Bone",
                2012,
                1,
                1,
                ItemDetails::Movie(MovieDetails {
                    director: "Jacques Audiard".to_string(),
                    genre: "Drama".to_string(),
                    length: 120,
                }),
            )
            .unwrap(),
        );

        CollectionStore::from_records(records).unwrap()
    }

    #[test]
    fn test_search_is_scoped_to_one_kind() {
        let store = library();

        let books = store.search(ItemKind::Book, "rust").unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Introduction to Rust");

        let movies = store.search(ItemKind::Movie, "rust").unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id(), ItemId::new(10));
    }

    #[test]
    fn test_search_case_insensitive() {
        let store = library();

        assert_eq!(store.search(ItemKind::Book, "ADDISON").unwrap().len(), 1);
        assert_eq!(store.search(ItemKind::Movie, "dRaMa").unwrap().len(), 1);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let store = library();
        assert!(store.search(ItemKind::Book, "python").unwrap().is_empty());
    }

    #[test]
    fn test_blank_query_rejected() {
        let store = library();

        assert!(matches!(
            store.search(ItemKind::Book, ""),
            Err(CollectionError::InvalidQuery)
        ));
        assert!(matches!(
            store.search(ItemKind::Movie, "   "),
            Err(CollectionError::InvalidQuery)
        ));
    }
}
