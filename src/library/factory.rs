//! Creation of new books and movies.
//!
//! Adding an item is a two-step affair: the field values are turned into a
//! [`PendingItem`] carrying the proposed id, which is then either committed
//! or cancelled. The store's id counter only moves on commit, so a cancelled
//! or failed add never leaves a gap.

use tracing::{debug, info};

use crate::domain::{CollectionError, ItemId, NewBook, NewItem, NewMovie, Record};

use super::store::{successor, CollectionStore};

/// A new record waiting for confirmation.
///
/// Holds the store mutably, so at most one add can be in flight. Dropping it
/// without calling [`PendingItem::commit`] discards the item.
#[derive(Debug)]
pub struct PendingItem<'a> {
    store: &'a mut CollectionStore,
    record: Record,
}

impl<'a> PendingItem<'a> {
    /// The record as it would be added
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Append the record to its collection and consume its id
    pub fn commit(self) -> Result<&'a Record, CollectionError> {
        let PendingItem { store, record } = self;
        let record = store.push_new(record)?;
        info!(id = %record.id(), kind = %record.kind(), title = %record.title, "Item added");
        Ok(record)
    }

    /// Discard the record, releasing the id it was offered.
    /// Returns the released id.
    pub fn cancel(self) -> ItemId {
        let id = self.record.id();
        debug!(%id, "Item discarded");
        id
    }
}

impl CollectionStore {
    /// Prepare a new book; see [`CollectionStore::draft`]
    pub fn create_book(&mut self, fields: &NewBook) -> Result<PendingItem<'_>, CollectionError> {
        let item = fields.parse()?;
        self.draft(item)
    }

    /// Prepare a new movie; see [`CollectionStore::draft`]
    pub fn create_movie(&mut self, fields: &NewMovie) -> Result<PendingItem<'_>, CollectionError> {
        let item = fields.parse()?;
        self.draft(item)
    }

    /// Offer the next id to a new item. The item starts with every copy
    /// available. Nothing in the store changes until the returned
    /// [`PendingItem`] is committed. Fails once the id space is used up.
    pub fn draft(&mut self, item: NewItem) -> Result<PendingItem<'_>, CollectionError> {
        let id = self.next_id();
        successor(id)?;

        let record = Record::new(
            id,
            item.title,
            item.year,
            item.copies,
            item.copies,
            item.details,
        )?;

        Ok(PendingItem {
            store: self,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            publisher: "Ace".to_string(),
            pages: "300".to_string(),
            year: "1969".to_string(),
            copies: "4".to_string(),
        }
    }

    #[test]
    fn test_commit_assigns_next_id_and_full_availability() {
        let mut store = CollectionStore::with_next_id(ItemId::new(3));

        let record = store
            .create_book(&new_book("The Left Hand of Darkness"))
            .unwrap()
            .commit()
            .unwrap();

        assert_eq!(record.id(), ItemId::new(3));
        assert_eq!(record.copies(), 4);
        assert_eq!(record.available(), 4);
        assert_eq!(record.kind(), ItemKind::Book);

        assert_eq!(store.next_id(), ItemId::new(4));
        assert_eq!(store.books().len(), 1);
    }

    #[test]
    fn test_cancel_releases_id() {
        let mut store = CollectionStore::with_next_id(ItemId::new(3));

        let pending = store.create_book(&new_book("Draft")).unwrap();
        assert_eq!(pending.record().id(), ItemId::new(3));
        assert_eq!(pending.cancel(), ItemId::new(3));

        assert_eq!(store.next_id(), ItemId::new(3));
        assert!(store.is_empty());
    }

    #[test]
    fn test_dropping_pending_item_discards_it() {
        let mut store = CollectionStore::new();

        {
            let _pending = store.create_book(&new_book("Dropped")).unwrap();
        }

        assert_eq!(store.next_id(), ItemId::new(0));
        assert!(store.books().is_empty());
    }

    #[test]
    fn test_draft_refuses_last_id() {
        let mut store = CollectionStore::with_next_id(ItemId::new(u32::MAX));

        let result = store.create_book(&new_book("One Too Many"));
        match result {
            Err(CollectionError::InvalidFieldValue { field: "ID", value }) => {
                assert!(value.contains("id space exhausted"), "got {value}");
            }
            other => panic!("expected exhausted id error, got {other:?}"),
        }

        assert!(store.is_empty());
        assert_eq!(store.next_id(), ItemId::new(u32::MAX));
    }

    #[test]
    fn test_draft_takes_second_to_last_id() {
        let mut store = CollectionStore::with_next_id(ItemId::new(u32::MAX - 1));

        let record = store
            .create_book(&new_book("Just In Time"))
            .unwrap()
            .commit()
            .unwrap();

        assert_eq!(record.id(), ItemId::new(u32::MAX - 1));
        assert_eq!(store.next_id(), ItemId::new(u32::MAX));
        assert!(store.create_book(&new_book("Too Late")).is_err());
    }

    #[test]
    fn test_coercion_failure_consumes_nothing() {
        let mut store = CollectionStore::with_next_id(ItemId::new(8));
        let mut fields = new_book("Bad");
        fields.copies = "several".to_string();

        assert!(matches!(
            store.create_book(&fields),
            Err(CollectionError::InvalidFieldValue { field: "Copies", .. })
        ));
        assert_eq!(store.next_id(), ItemId::new(8));
    }
}
