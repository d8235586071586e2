//! In-memory item store.
//!
//! # Design
//! `ItemStore` is the seam between the HTTP layer and item lifecycle. It
//! knows nothing about HTTP; its only failure is `StoreError::NotFound`.
//!
//! `MemoryItemStore` keeps every item in one `HashMap` behind a single
//! `RwLock`. Each operation takes the lock exactly once, so a lookup, an
//! update and a delete racing on the same ID each see the item either fully
//! present or fully gone. Callers always receive clones, never references
//! into the map.

use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{CreateItemRequest, Item, UpdateItemRequest};

/// The five item lifecycle operations. Implementations must be safe to call
/// from many request handlers at once.
pub trait ItemStore: Send + Sync {
    /// Mints a fresh ID and stores a new item. Performs no validation.
    fn create_item(&self, req: CreateItemRequest) -> Result<Item, StoreError>;

    fn get_item(&self, id: &str) -> Result<Item, StoreError>;

    /// Replaces name and description, keeping the ID.
    fn update_item(&self, id: &str, req: UpdateItemRequest) -> Result<Item, StoreError>;

    fn delete_item(&self, id: &str) -> Result<(), StoreError>;

    /// Every current item, in no particular order.
    fn get_all_items(&self) -> Result<Vec<Item>, StoreError>;
}

/// Volatile `ItemStore` backed by a lock-guarded map. Contents are lost when
/// the process exits.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<HashMap<String, Item>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

/// Draws v4 UUIDs until one is not already a key. The hyphenated form is 36
/// characters long.
fn fresh_id(items: &HashMap<String, Item>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !items.contains_key(&id) {
            return id;
        }
    }
}

impl ItemStore for MemoryItemStore {
    fn create_item(&self, req: CreateItemRequest) -> Result<Item, StoreError> {
        let mut items = self.items.write();
        let item = Item {
            id: fresh_id(&items),
            name: req.name,
            description: req.description,
        };
        items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    fn get_item(&self, id: &str) -> Result<Item, StoreError> {
        self.items
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn update_item(&self, id: &str, req: UpdateItemRequest) -> Result<Item, StoreError> {
        let mut items = self.items.write();
        let item = items.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        item.name = req.name;
        item.description = req.description;
        Ok(item.clone())
    }

    fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        self.items
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn get_all_items(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.read().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use rstest::rstest;

    use super::*;

    fn oil() -> CreateItemRequest {
        CreateItemRequest::new("Oil", "Some beautiful oil.")
    }

    #[test]
    fn fresh_store_is_empty() {
        let store = MemoryItemStore::new();
        assert!(store.get_all_items().unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn create_returns_item_with_long_id() {
        let store = MemoryItemStore::new();
        let item = store.create_item(oil()).unwrap();
        assert!(item.id.len() > 6, "id too short: {}", item.id);
        assert_eq!(item.name, "Oil");
        assert_eq!(item.description, "Some beautiful oil.");
    }

    #[test]
    fn create_does_not_validate_name() {
        let store = MemoryItemStore::new();
        let item = store.create_item(CreateItemRequest::default()).unwrap();
        assert!(item.name.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_then_get_returns_equal_item() {
        let store = MemoryItemStore::new();
        let created = store.create_item(oil()).unwrap();
        let loaded = store.get_item(&created.id).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn ids_are_unique_across_creates() {
        let store = MemoryItemStore::new();
        let ids: HashSet<String> = (0..100)
            .map(|_| store.create_item(oil()).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let store = MemoryItemStore::new();
        let created = store.create_item(CreateItemRequest::new("Bread", "White")).unwrap();

        let updated = store
            .update_item(&created.id, UpdateItemRequest::new("Brown Bread", "Whole grain"))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Brown Bread");
        assert_eq!(updated.description, "Whole grain");

        assert_eq!(store.get_item(&created.id).unwrap(), updated);
    }

    #[test]
    fn update_can_clear_description() {
        let store = MemoryItemStore::new();
        let created = store.create_item(oil()).unwrap();
        let updated = store
            .update_item(&created.id, UpdateItemRequest::new("Oil", ""))
            .unwrap();
        assert!(updated.description.is_empty());
    }

    #[test]
    fn returned_items_are_copies() {
        let store = MemoryItemStore::new();
        let mut created = store.create_item(oil()).unwrap();
        created.name.push_str(" (edited)");
        assert_eq!(store.get_item(&created.id).unwrap().name, "Oil");
    }

    #[test]
    fn delete_removes_item() {
        let store = MemoryItemStore::new();
        let created = store.create_item(oil()).unwrap();

        store.delete_item(&created.id).unwrap();

        assert_eq!(
            store.get_item(&created.id),
            Err(StoreError::not_found(&created.id))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn delete_twice_reports_not_found() {
        let store = MemoryItemStore::new();
        let created = store.create_item(oil()).unwrap();
        store.delete_item(&created.id).unwrap();
        assert!(matches!(
            store.delete_item(&created.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[rstest]
    #[case("nonexistent-id")]
    #[case("")]
    #[case("00000000-0000-0000-0000-000000000000")]
    fn unknown_id_is_not_found(#[case] id: &str) {
        let store = MemoryItemStore::new();
        store.create_item(oil()).unwrap();

        assert_eq!(store.get_item(id), Err(StoreError::not_found(id)));
        assert_eq!(
            store.update_item(id, UpdateItemRequest::new("x", "y")),
            Err(StoreError::not_found(id))
        );
        assert_eq!(store.delete_item(id), Err(StoreError::not_found(id)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_all_returns_every_created_item() {
        let store = MemoryItemStore::new();
        let created: Vec<Item> = ["Milk", "Eggs", "Juice"]
            .into_iter()
            .map(|name| store.create_item(CreateItemRequest::new(name, "")).unwrap())
            .collect();

        let mut all = store.get_all_items().unwrap();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        let mut expected = created;
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(all, expected);
    }

    #[test]
    fn concurrent_creates_yield_distinct_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let store = Arc::new(MemoryItemStore::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| {
                            store
                                .create_item(CreateItemRequest::new(format!("item-{t}-{i}"), ""))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), THREADS * PER_THREAD);
        assert_eq!(store.get_all_items().unwrap().len(), THREADS * PER_THREAD);
    }

    #[test]
    fn concurrent_delete_and_get_never_tear() {
        let store = Arc::new(MemoryItemStore::new());
        let ids: Vec<String> = (0..200)
            .map(|_| store.create_item(oil()).unwrap().id)
            .collect();

        let deleter = {
            let store = Arc::clone(&store);
            let ids = ids.clone();
            thread::spawn(move || {
                for id in &ids {
                    store.delete_item(id).unwrap();
                }
            })
        };

        for id in &ids {
            match store.get_item(id) {
                Ok(item) => assert_eq!(item.name, "Oil"),
                Err(err) => assert_eq!(err, StoreError::not_found(id)),
            }
        }
        deleter.join().unwrap();
        assert!(store.is_empty());
    }
}
