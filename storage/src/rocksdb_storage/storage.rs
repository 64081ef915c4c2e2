//! RocksDB backend built on an optimistic transaction database.

use mroots_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, ErrorKind, OptimisticTransactionDB};
use tracing::{debug, info};

use crate::{Error, RecordStore, StorageConfig, Update};

/// Name of column family used to store tree records
pub const TREES_CF_NAME: &str = "trees";

/// Storage which uses RocksDB as its backend.
///
/// Read-modify-writes run inside optimistic transactions: the record is read
/// with `get_for_update`, so a commit fails with `Busy` if another writer
/// touched it in the meantime, and the whole sequence is retried.
pub struct RocksDbStorage {
    db: OptimisticTransactionDB,
    max_commit_retries: u32,
}

impl RocksDbStorage {
    /// Open (or create) a database as described by `config`.
    pub fn open(config: &StorageConfig) -> Result<Self, Error> {
        config.validate()?;
        let opts = config.db_options();
        let db = OptimisticTransactionDB::open_cf_descriptors(
            &opts,
            &config.path,
            [ColumnFamilyDescriptor::new(TREES_CF_NAME, opts.clone())],
        )?;
        info!(path = %config.path.display(), "opened tree storage");
        Ok(RocksDbStorage {
            db,
            max_commit_retries: config.max_commit_retries,
        })
    }

    /// Forces data to be written
    pub fn flush(&self) -> Result<(), Error> {
        self.db.flush_cf(self.cf_trees()?)?;
        Ok(())
    }

    fn cf_trees(&self) -> Result<&ColumnFamily, Error> {
        self.db
            .cf_handle(TREES_CF_NAME)
            .ok_or(Error::MissingColumnFamily(TREES_CF_NAME))
    }
}

impl RecordStore for RocksDbStorage {
    fn get(&self, key: &[u8]) -> CostResult<Option<Vec<u8>>, Error> {
        let cost = OperationCost::default();
        let cf = cost_return_on_error_no_add!(&cost, self.cf_trees());
        let value = cost_return_on_error_no_add!(
            &cost,
            self.db.get_cf(cf, key).map_err(Error::from)
        );
        let cost = OperationCost::read(value.as_ref().map_or(0, Vec::len));
        Ok(value).wrap_with_cost(cost)
    }

    fn read_modify_write<T, F>(&self, key: &[u8], mut f: F) -> CostResult<T, Error>
    where
        F: FnMut(Option<&[u8]>) -> (Update, T),
    {
        let mut cost = OperationCost::default();
        let cf = cost_return_on_error_no_add!(&cost, self.cf_trees());

        for attempt in 1..=self.max_commit_retries {
            let transaction = self.db.transaction();
            let current = cost_return_on_error_no_add!(
                &cost,
                transaction
                    .get_for_update_cf(cf, key, true)
                    .map_err(Error::from)
            );
            cost += OperationCost::read(current.as_ref().map_or(0, Vec::len));

            let (update, output) = f(current.as_deref());
            if let Update::Put(value) = &update {
                cost_return_on_error_no_add!(
                    &cost,
                    transaction.put_cf(cf, key, value).map_err(Error::from)
                );
                cost += OperationCost::write(key, value);
            }

            match transaction.commit() {
                Ok(()) => return Ok(output).wrap_with_cost(cost),
                Err(e) if matches!(e.kind(), ErrorKind::Busy | ErrorKind::TryAgain) => {
                    debug!(attempt, error = %e, "record changed during transaction, retrying");
                }
                Err(e) => return Err(Error::RocksDBError(e)).wrap_with_cost(cost),
            }
        }

        Err(Error::CommitRetriesExhausted {
            attempts: self.max_commit_retries,
        })
        .wrap_with_cost(cost)
    }
}
