//! Recently viewed products.
//!
//! A bounded, most-recent-first list persisted under
//! [`keys::RECENTLY_VIEWED`]. Viewing a product already in the list moves it
//! to the front instead of adding a duplicate.

use std::sync::{Arc, Mutex};

use crate::catalog::Product;
use crate::events::{EventBus, StoreEvent};
use crate::models::RecentlyViewedEntry;
use crate::storage::{KeyValueStore, StorageError, keys, read_list, write_json};

/// Maximum number of entries kept.
pub const MAX_RECENTLY_VIEWED: usize = 4;

/// Persistent recently-viewed list.
#[derive(Clone)]
pub struct RecentlyViewedStore {
    storage: Arc<dyn KeyValueStore>,
    events: EventBus,
    lock: Arc<Mutex<()>>,
}

impl RecentlyViewedStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, events: EventBus) -> Self {
        Self {
            storage,
            events,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend fails.
    pub fn list(&self) -> Result<Vec<RecentlyViewedEntry>, StorageError> {
        read_list(self.storage.as_ref(), keys::RECENTLY_VIEWED)
    }

    /// Put `entry` at the front, dropping any older entry for the same product
    /// and anything past [`MAX_RECENTLY_VIEWED`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend fails.
    pub fn record(
        &self,
        entry: RecentlyViewedEntry,
    ) -> Result<Vec<RecentlyViewedEntry>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        let mut entries = self.list()?;
        entries.retain(|existing| existing.id != entry.id);
        entries.insert(0, entry);
        entries.truncate(MAX_RECENTLY_VIEWED);

        write_json(self.storage.as_ref(), keys::RECENTLY_VIEWED, &entries)?;
        self.events.publish(StoreEvent::RecentProductsUpdated);
        Ok(entries)
    }

    /// Record a view of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend fails.
    pub fn record_product(
        &self,
        product: &Product,
    ) -> Result<Vec<RecentlyViewedEntry>, StorageError> {
        self.record(RecentlyViewedEntry::from(product))
    }

    /// Forget every entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        write_json::<[RecentlyViewedEntry]>(self.storage.as_ref(), keys::RECENTLY_VIEWED, &[])?;
        self.events.publish(StoreEvent::RecentProductsUpdated);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::PLACEHOLDER_IMAGE;
    use crate::catalog::tests::sample_catalog;
    use crate::storage::MemoryStore;
    use bazaar_core::{CurrencyCode, ProductId};
    use rust_decimal::Decimal;

    fn store() -> (RecentlyViewedStore, EventBus) {
        let events = EventBus::new();
        let recent = RecentlyViewedStore::new(Arc::new(MemoryStore::new()), events.clone());
        (recent, events)
    }

    fn entry(id: i64) -> RecentlyViewedEntry {
        RecentlyViewedEntry {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(100),
            currency: CurrencyCode::TRY,
            image: PLACEHOLDER_IMAGE.to_string(),
            category: "bere".to_string(),
            slug: format!("product-{id}"),
        }
    }

    fn ids(entries: &[RecentlyViewedEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.id.as_i64()).collect()
    }

    #[test]
    fn test_fifth_view_evicts_oldest() {
        let (recent, _) = store();
        // Recording D, C, B, A leaves [A, B, C, D]
        for id in [4, 3, 2, 1] {
            recent.record(entry(id)).unwrap();
        }
        assert_eq!(ids(&recent.list().unwrap()), vec![1, 2, 3, 4]);

        let entries = recent.record(entry(5)).unwrap();
        assert_eq!(ids(&entries), vec![5, 1, 2, 3]);
        assert_eq!(recent.list().unwrap(), entries);
    }

    #[test]
    fn test_view_again_moves_to_front() {
        let (recent, _) = store();
        for id in [1, 2, 3] {
            recent.record(entry(id)).unwrap();
        }

        let entries = recent.record(entry(1)).unwrap();
        assert_eq!(ids(&entries), vec![1, 3, 2]);
    }

    #[test]
    fn test_never_exceeds_max() {
        let (recent, _) = store();
        for id in 0..20 {
            let entries = recent.record(entry(id)).unwrap();
            assert!(entries.len() <= MAX_RECENTLY_VIEWED);
        }
        assert_eq!(recent.list().unwrap().len(), MAX_RECENTLY_VIEWED);
    }

    #[test]
    fn test_record_product_uses_placeholder_and_slug() {
        let catalog = sample_catalog();
        let (recent, _) = store();
        let hoodie = catalog.find_by_id(ProductId::new(2)).unwrap();

        let entries = recent.record_product(hoodie).unwrap();
        assert_eq!(entries[0].image, PLACEHOLDER_IMAGE);
        assert_eq!(entries[0].slug, "oversize-hoodie");
        assert_eq!(entries[0].category, "hoodie");
    }

    #[test]
    fn test_record_and_clear_publish() {
        let (recent, events) = store();
        let mut sub = events.subscribe().only(StoreEvent::RecentProductsUpdated);

        recent.record(entry(1)).unwrap();
        assert_eq!(sub.try_recv(), Some(StoreEvent::RecentProductsUpdated));

        recent.clear().unwrap();
        assert_eq!(sub.try_recv(), Some(StoreEvent::RecentProductsUpdated));
        assert!(recent.list().unwrap().is_empty());
    }
}
