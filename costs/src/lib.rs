#![deny(missing_docs)]
//! Cost accounting shared by the tree builder and the record stores.
//!
//! Every operation that touches storage or calls the hash oracle returns its
//! value wrapped in a [`CostContext`], so callers can sum up how much work a
//! build or a reconciliation took without threading counters by hand.

mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Approximate amount of resources consumed by an operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many point reads or writes were issued against storage.
    pub seek_count: u32,
    /// How many bytes were written to storage.
    pub storage_written_bytes: u64,
    /// How many bytes were loaded from storage.
    pub storage_loaded_bytes: u64,
    /// How many times two children were hashed into a parent.
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// Returns `true` if the operation did no measurable work.
    pub fn is_nothing(&self) -> bool {
        *self == Self::default()
    }

    /// Cost of `seek_count` storage seeks and nothing else.
    pub fn with_seek_count(seek_count: u32) -> Self {
        OperationCost {
            seek_count,
            ..Default::default()
        }
    }

    /// Cost of `hash_node_calls` node hashes and nothing else.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Cost of a single point read that returned `loaded` bytes.
    pub fn read(loaded: usize) -> Self {
        OperationCost {
            seek_count: 1,
            storage_loaded_bytes: loaded as u64,
            ..Default::default()
        }
    }

    /// Cost of a single write of `key` and `value`.
    pub fn write(key: &[u8], value: &[u8]) -> Self {
        OperationCost {
            seek_count: 1,
            storage_written_bytes: (key.len() + value.len()) as u64,
            ..Default::default()
        }
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.seek_count += rhs.seek_count;
        self.storage_written_bytes += rhs.storage_written_bytes;
        self.storage_loaded_bytes += rhs.storage_loaded_bytes;
        self.hash_node_calls += rhs.hash_node_calls;
    }
}

/// Works like `?` for `CostResult`: on error returns early, wrapping the error
/// with everything accumulated in `$cost` so far; on success unwraps the value
/// and adds its cost to `$cost`.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Same as [`cost_return_on_error`] but for a plain `Result`; nothing is added
/// to `$cost` besides what was already accumulated.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
