//! Storage errors

/// Storage and underlying errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rocks DB error
    #[cfg(feature = "rocksdb_storage")]
    #[error("rocksDB error: {0}")]
    RocksDBError(#[from] rocksdb::Error),
    /// An optimistic transaction kept colliding with other writers
    #[error("transaction commit failed after {attempts} attempts")]
    CommitRetriesExhausted {
        /// How many commits were tried
        attempts: u32,
    },
    /// The database was opened without a required column family
    #[error("column family {0} is missing")]
    MissingColumnFamily(&'static str),
    /// Configuration values that cannot be used to open a store
    #[error("invalid storage config: {0}")]
    InvalidConfig(String),
}
