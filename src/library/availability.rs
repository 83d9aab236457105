//! Check-in and check-out of copies.

use tracing::{debug, info};

use crate::domain::{CollectionError, ItemId, Record};

use super::store::CollectionStore;

impl CollectionStore {
    /// Return one copy of an item to the library.
    ///
    /// Fails with `ItemNotFound` for an unknown id and `AlreadyFull` when
    /// every copy is already on the shelf. A failure leaves the record as is.
    pub fn check_in(&mut self, id: ItemId) -> Result<&Record, CollectionError> {
        self.transition(id, "check in", Record::return_copy)
    }

    /// Lend one copy of an item out.
    ///
    /// Fails with `ItemNotFound` for an unknown id and `NoneAvailable` when no
    /// copy is left. A failure leaves the record as is.
    pub fn check_out(&mut self, id: ItemId) -> Result<&Record, CollectionError> {
        self.transition(id, "check out", Record::lend_copy)
    }

    fn transition(
        &mut self,
        id: ItemId,
        action: &'static str,
        apply: fn(&mut Record) -> Result<(), CollectionError>,
    ) -> Result<&Record, CollectionError> {
        let record = self
            .get_mut(id)
            .ok_or(CollectionError::ItemNotFound { id })?;

        match apply(record) {
            Ok(()) => {
                info!(%id, available = record.available(), copies = record.copies(), "{} succeeded", action);
                Ok(record)
            }
            Err(e) => {
                debug!(%id, "{} rejected: {}", action, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemDetails, MovieDetails};

    fn store_with_movie(copies: u32, available: u32) -> CollectionStore {
        let record = Record::new(
            ItemId::new(9),
            "Spirited Away",
            2001,
            copies,
            available,
            ItemDetails::Movie(MovieDetails {
                director: "Hayao Miyazaki".to_string(),
                genre: "Animation".to_string(),
                length: 125,
            }),
        )
        .unwrap();
        CollectionStore::from_records(vec![record]).unwrap()
    }

    #[test]
    fn test_check_out_then_in_restores_availability() {
        let mut store = store_with_movie(2, 2);

        assert_eq!(store.check_out(ItemId::new(9)).unwrap().available(), 1);
        assert_eq!(store.check_in(ItemId::new(9)).unwrap().available(), 2);
    }

    #[test]
    fn test_unknown_id() {
        let mut store = store_with_movie(1, 1);

        assert!(matches!(
            store.check_in(ItemId::new(10)),
            Err(CollectionError::ItemNotFound { id }) if id == ItemId::new(10)
        ));
        assert!(matches!(
            store.check_out(ItemId::new(10)),
            Err(CollectionError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_zero_copies_item_rejects_both_directions() {
        let mut store = store_with_movie(0, 0);

        assert!(matches!(
            store.check_out(ItemId::new(9)),
            Err(CollectionError::NoneAvailable { .. })
        ));
        assert!(matches!(
            store.check_in(ItemId::new(9)),
            Err(CollectionError::AlreadyFull { .. })
        ));
    }
}
