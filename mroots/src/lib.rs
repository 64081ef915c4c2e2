//! Registry of complete binary Merkle trees keyed by their root.
//!
//! Trees are built from an ordered list of leaves (decimal-encoded field
//! elements) into a flat node array using implicit heap indexing: for `n`
//! leaves the array has `2n` entries, index 0 is unused, leaves occupy
//! `n..2n` and every internal node `i` is `hash2(node[2i], node[2i + 1])`,
//! which puts the root at index 1.
//!
//! [`TreeStore`] keeps at most one tree per root. When a second tree arrives
//! under a root that is already known, the larger tree wins and a tree that is
//! not strictly larger is rejected with [`Error::Conflict`].

#![warn(missing_docs)]

mod error;
pub mod hash;
mod record;
mod store;
mod tree;

pub use error::Error;
pub use hash::{Blake3Oracle, HashOracle};
#[cfg(feature = "poseidon")]
pub use hash::PoseidonOracle;
pub use mroots_costs::{CostContext, CostResult, OperationCost};
pub use mroots_storage::{MemoryStorage, RecordStore, StorageConfig};
pub use store::{Reconciled, TreeStore};
pub use tree::{MerkleTree, ROOT_INDEX, build_tree};
