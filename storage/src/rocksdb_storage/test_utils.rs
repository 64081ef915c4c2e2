//! Useful utilities for testing.

use std::ops::Deref;

use mroots_costs::CostResult;
use tempfile::TempDir;

use super::*;
use crate::{Error, RecordStore, StorageConfig, Update};

/// RocksDb storage with self-cleanup
pub struct TempStorage {
    storage: RocksDbStorage,
    dir: TempDir,
}

impl TempStorage {
    /// Create new `TempStorage`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("cannot create tempdir");
        let storage = RocksDbStorage::open(&StorageConfig::with_path(dir.path()))
            .expect("cannot open RocksDB storage");
        TempStorage { storage, dir }
    }

    /// Close the database and open it again from the same directory.
    pub fn reopen(self) -> Self {
        let TempStorage { storage, dir } = self;
        drop(storage);
        let storage = RocksDbStorage::open(&StorageConfig::with_path(dir.path()))
            .expect("cannot reopen RocksDB storage");
        TempStorage { storage, dir }
    }
}

impl Default for TempStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TempStorage {
    type Target = RocksDbStorage;

    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

impl RecordStore for TempStorage {
    fn get(&self, key: &[u8]) -> CostResult<Option<Vec<u8>>, Error> {
        self.storage.get(key)
    }

    fn read_modify_write<T, F>(&self, key: &[u8], f: F) -> CostResult<T, Error>
    where
        F: FnMut(Option<&[u8]>) -> (Update, T),
    {
        self.storage.read_modify_write(key, f)
    }
}
