//! In-memory record store.

use std::collections::BTreeMap;

use mroots_costs::{CostResult, CostsExt, OperationCost};
use parking_lot::RwLock;

use crate::{Error, RecordStore, Update};

/// Record store backed by a `BTreeMap` behind a read-write lock.
///
/// Reads share the lock; a read-modify-write holds the exclusive lock for its
/// whole duration, which makes it atomic with respect to every other write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryStorage {
    fn get(&self, key: &[u8]) -> CostResult<Option<Vec<u8>>, Error> {
        let value = self.records.read().get(key).cloned();
        let cost = OperationCost::read(value.as_ref().map_or(0, Vec::len));
        Ok(value).wrap_with_cost(cost)
    }

    fn read_modify_write<T, F>(&self, key: &[u8], mut f: F) -> CostResult<T, Error>
    where
        F: FnMut(Option<&[u8]>) -> (Update, T),
    {
        let mut records = self.records.write();
        let current = records.get(key).map(Vec::as_slice);
        let mut cost = OperationCost::read(current.map_or(0, <[u8]>::len));
        let (update, output) = f(current);
        if let Update::Put(value) = update {
            cost += OperationCost::write(key, &value);
            records.insert(key.to_vec(), value);
        }
        Ok(output).wrap_with_cost(cost)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_get_missing_and_present() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get(b"a").unwrap().expect("get"), None);

        storage
            .read_modify_write(b"a", |_| (Update::Put(b"one".to_vec()), ()))
            .unwrap()
            .expect("write");

        let ctx = storage.get(b"a");
        assert_eq!(ctx.cost, OperationCost::read(3));
        assert_eq!(ctx.unwrap().expect("get"), Some(b"one".to_vec()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_keep_leaves_record_untouched() {
        let storage = MemoryStorage::new();
        storage
            .read_modify_write(b"a", |_| (Update::Put(b"one".to_vec()), ()))
            .unwrap()
            .expect("write");

        let seen = storage
            .read_modify_write(b"a", |current| (Update::Keep, current.map(<[u8]>::to_vec)))
            .unwrap()
            .expect("read");
        assert_eq!(seen, Some(b"one".to_vec()));
        assert_eq!(storage.get(b"a").unwrap().expect("get"), Some(b"one".to_vec()));
    }

    #[test]
    fn test_concurrent_counter_loses_no_updates() {
        let storage = MemoryStorage::new();
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        storage
                            .read_modify_write(b"counter", |current| {
                                let n = current.map_or(0, |b| b.len());
                                (Update::Put(vec![0; n + 1]), ())
                            })
                            .unwrap()
                            .expect("increment");
                    }
                });
            }
        });
        let stored = storage.get(b"counter").unwrap().expect("get");
        assert_eq!(stored.map(|v| v.len()), Some(800));
    }
}
