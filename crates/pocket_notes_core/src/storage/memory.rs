//! In-memory slot storage.

use super::{KeyValueStorage, StorageResult};
use std::collections::BTreeMap;

/// Volatile slot map. Never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    slots: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of written slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::KeyValueStorage;

    #[test]
    fn set_item_overwrites_whole_slot() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").expect("memory read"), None);
        assert!(storage.is_empty());

        storage.set_item("k", "one").expect("memory write");
        storage.set_item("k", "two").expect("memory write");
        assert_eq!(
            storage.get_item("k").expect("memory read").as_deref(),
            Some("two")
        );
        assert_eq!(storage.len(), 1);
    }
}
