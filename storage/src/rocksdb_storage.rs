//! Record store implemented over RocksDB.
mod storage;
#[cfg(feature = "test_utils")]
pub mod test_utils;
#[cfg(test)]
mod tests;

pub use self::storage::{RocksDbStorage, TREES_CF_NAME};
