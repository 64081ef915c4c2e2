use mroots_costs::CostResult;

use crate::Error;

/// What a read-modify-write decided to do with the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Leave the stored record as it is.
    Keep,
    /// Replace (or create) the record with these bytes.
    Put(Vec<u8>),
}

/// Keyed record store.
///
/// Methods take `&self`; implementations synchronize internally so one store
/// can be shared between threads.
pub trait RecordStore {
    /// Point read of the record stored under `key`.
    fn get(&self, key: &[u8]) -> CostResult<Option<Vec<u8>>, Error>;

    /// Atomically reads the record under `key`, hands it to `f` and applies
    /// the returned [`Update`].
    ///
    /// No other write to `key` can land between the read and the write. `f`
    /// may be invoked more than once when the backend retries a conflicting
    /// commit, so it must not have side effects; only the output of the
    /// invocation whose update got applied is returned.
    fn read_modify_write<T, F>(&self, key: &[u8], f: F) -> CostResult<T, Error>
    where
        F: FnMut(Option<&[u8]>) -> (Update, T);
}
