#![deny(missing_docs)]

//! Keyed record stores for the merkle root registry.
//!
//! A store maps a key (a tree root) to an opaque record (the encoded node
//! array). Besides point reads, every store offers an atomic
//! read-modify-write so that callers can make a decision based on the
//! current record and apply it without another writer slipping in between.

mod config;
mod error;
mod memory_storage;
#[cfg(feature = "rocksdb_storage")]
pub mod rocksdb_storage;
mod storage;

pub use crate::{
    config::StorageConfig,
    error::Error,
    memory_storage::MemoryStorage,
    storage::{RecordStore, Update},
};
