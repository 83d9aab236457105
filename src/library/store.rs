//! In-memory store for books and movies.
//!
//! Records live in a single map keyed by id. Two ordered id lists keep the
//! books and movies in load order followed by append order.

use std::collections::HashMap;

use crate::domain::{CollectionError, ItemId, ItemKind, Record};

/// Holder of both collections and the id counter
#[derive(Debug, Clone)]
pub struct CollectionStore {
    records: HashMap<ItemId, Record>,
    books: Vec<ItemId>,
    movies: Vec<ItemId>,

    /// Next id handed out by the item factory. Always greater than every id
    /// in `records`.
    next_id: ItemId,
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionStore {
    /// Create an empty store whose first new item gets id 0
    pub fn new() -> Self {
        Self::with_next_id(ItemId::new(0))
    }

    /// Create an empty store with a chosen starting id
    pub fn with_next_id(next_id: ItemId) -> Self {
        Self {
            records: HashMap::new(),
            books: Vec::new(),
            movies: Vec::new(),
            next_id,
        }
    }

    /// Build a store from records that already carry ids
    pub fn from_records(
        records: impl IntoIterator<Item = Record>,
    ) -> Result<Self, CollectionError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Add a record that already has an id, keeping ids unique and
    /// `next_id` ahead of all of them
    pub fn insert(&mut self, record: Record) -> Result<(), CollectionError> {
        let id = record.id();
        self.ensure_vacant(id)?;
        let after = successor(id)?;

        if id >= self.next_id {
            self.next_id = after;
        }

        self.sequence_mut(record.kind()).push(id);
        self.records.insert(id, record);
        Ok(())
    }

    /// The id the next committed item will receive
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    /// Get a record by id, whichever collection it is in
    pub fn get(&self, id: ItemId) -> Option<&Record> {
        self.records.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Record> {
        self.records.get_mut(&id)
    }

    /// All records of one kind, in collection order
    pub fn list(&self, kind: ItemKind) -> Vec<&Record> {
        self.sequence(kind)
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    pub fn books(&self) -> Vec<&Record> {
        self.list(ItemKind::Book)
    }

    pub fn movies(&self) -> Vec<&Record> {
        self.list(ItemKind::Movie)
    }

    /// Total number of records across both collections
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn sequence(&self, kind: ItemKind) -> &Vec<ItemId> {
        match kind {
            ItemKind::Book => &self.books,
            ItemKind::Movie => &self.movies,
        }
    }

    fn sequence_mut(&mut self, kind: ItemKind) -> &mut Vec<ItemId> {
        match kind {
            ItemKind::Book => &mut self.books,
            ItemKind::Movie => &mut self.movies,
        }
    }

    fn ensure_vacant(&self, id: ItemId) -> Result<(), CollectionError> {
        if self.records.contains_key(&id) {
            return Err(CollectionError::invalid_field(
                "ID",
                format!("{} (duplicate)", id),
            ));
        }
        Ok(())
    }

    /// Append a freshly minted record and advance the counter past it.
    /// Only the item factory calls this. The store is left untouched when
    /// the id is taken or is the last one available.
    pub(crate) fn push_new(&mut self, record: Record) -> Result<&Record, CollectionError> {
        let id = record.id();
        self.ensure_vacant(id)?;
        self.next_id = successor(id)?.max(self.next_id);

        self.sequence_mut(record.kind()).push(id);
        Ok(self.records.entry(id).or_insert(record))
    }
}

/// The id after `id`. The top id is never stored, so `next_id` stays
/// representable.
pub(crate) fn successor(id: ItemId) -> Result<ItemId, CollectionError> {
    id.next().ok_or_else(|| {
        CollectionError::invalid_field("ID", format!("{} (id space exhausted)", id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookDetails, ItemDetails, MovieDetails};

    fn book(id: u32, title: &str) -> Record {
        Record::new(
            ItemId::new(id),
            title,
            2000,
            1,
            1,
            ItemDetails::Book(BookDetails {
                author: "Author".to_string(),
                publisher: "Publisher".to_string(),
                pages: 100,
            }),
        )
        .unwrap()
    }

    fn movie(id: u32, title: &str) -> Record {
        Record::new(
            ItemId::new(id),
            title,
            2000,
            1,
            1,
            ItemDetails::Movie(MovieDetails {
                director: "Director".to_string(),
                genre: "Drama".to_string(),
                length: 90,
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store_starts_at_zero() {
        let store = CollectionStore::new();
        assert_eq!(store.next_id(), ItemId::new(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_next_id_follows_max_loaded_id() {
        let store =
            CollectionStore::from_records(vec![book(4, "A"), movie(11, "B"), book(2, "C")])
                .unwrap();

        assert_eq!(store.next_id(), ItemId::new(12));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_records_split_by_kind_in_order() {
        let store = CollectionStore::from_records(vec![
            book(3, "First"),
            movie(1, "Film"),
            book(2, "Second"),
        ])
        .unwrap();

        let titles: Vec<_> = store.books().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(store.movies().len(), 1);
    }

    #[test]
    fn test_duplicate_id_across_kinds_rejected() {
        let result = CollectionStore::from_records(vec![book(5, "A"), movie(5, "B")]);
        assert!(matches!(
            result,
            Err(CollectionError::InvalidFieldValue { field: "ID", .. })
        ));
    }

    #[test]
    fn test_insert_rejects_top_id() {
        let mut store = CollectionStore::from_records(vec![book(1, "A")]).unwrap();

        let result = store.insert(book(u32::MAX, "Last"));
        match result {
            Err(CollectionError::InvalidFieldValue { field: "ID", value }) => {
                assert!(value.contains("id space exhausted"), "got {value}");
            }
            other => panic!("expected exhausted id error, got {other:?}"),
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.books().len(), 1);
        assert_eq!(store.next_id(), ItemId::new(2));
    }

    #[test]
    fn test_insert_accepts_id_below_top() {
        let mut store = CollectionStore::new();
        store.insert(movie(u32::MAX - 1, "Almost")).unwrap();
        assert_eq!(store.next_id(), ItemId::new(u32::MAX));
    }

    #[test]
    fn test_insert_existing_id_leaves_store_unchanged() {
        let mut store = CollectionStore::from_records(vec![book(3, "A")]).unwrap();

        assert!(store.insert(movie(3, "B")).is_err());
        assert_eq!(store.get(ItemId::new(3)).unwrap().title, "A");
        assert!(store.movies().is_empty());
        assert_eq!(store.books().len(), 1);
    }

    #[test]
    fn test_push_new_onto_occupied_id_rejected() {
        let mut store = CollectionStore::from_records(vec![book(0, "Held")]).unwrap();
        store.next_id = ItemId::new(0);

        let result = store.push_new(book(0, "Intruder"));
        assert!(matches!(
            result,
            Err(CollectionError::InvalidFieldValue { field: "ID", .. })
        ));

        assert_eq!(store.books().len(), 1);
        assert_eq!(store.get(ItemId::new(0)).unwrap().title, "Held");
        assert_eq!(store.next_id(), ItemId::new(0));
    }

    #[test]
    fn test_push_new_advances_counter() {
        let mut store = CollectionStore::with_next_id(ItemId::new(6));

        let record = store.push_new(movie(6, "Fresh")).unwrap();
        assert_eq!(record.title, "Fresh");
        assert_eq!(store.next_id(), ItemId::new(7));
        assert_eq!(store.movies().len(), 1);
    }

    #[test]
    fn test_get_finds_either_kind() {
        let store = CollectionStore::from_records(vec![book(1, "A"), movie(2, "B")]).unwrap();

        assert_eq!(store.get(ItemId::new(2)).unwrap().kind(), ItemKind::Movie);
        assert!(store.get(ItemId::new(3)).is_none());
    }
}
