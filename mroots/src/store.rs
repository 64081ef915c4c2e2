//! Reconciliation of built trees against the record store.

use mroots_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error, cost_return_on_error_no_add,
};
use mroots_storage::{RecordStore, Update};
use tracing::{debug, info};

use crate::{
    Error, HashOracle, MerkleTree, build_tree,
    record::{decode_nodes, encode_nodes},
};

/// Successful outcome of [`TreeStore::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// No tree was stored under the root; the incoming tree was inserted.
    Created,
    /// A smaller tree was stored under the root and has been replaced.
    Replaced {
        /// Node count of the replaced tree.
        previous_len: usize,
    },
}

/// Trees keyed by root on top of a [`RecordStore`].
///
/// Among trees sharing a root the one with more nodes is considered more
/// complete. That the larger tree actually extends the smaller one is taken
/// on trust and not checked.
pub struct TreeStore<S> {
    storage: S,
}

impl<S: RecordStore> TreeStore<S> {
    /// Wrap a record store.
    pub fn new(storage: S) -> Self {
        TreeStore { storage }
    }

    /// Underlying record store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the underlying record store.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Node array stored for `root`.
    ///
    /// An unknown root is not an error: the result is then `["", root]`, the
    /// node array of a tree whose only known node is its root.
    pub fn lookup(&self, root: &str) -> CostResult<Vec<String>, Error> {
        self.get(root).map_ok(|tree| match tree {
            Some(tree) => tree.into_nodes(),
            None => vec![String::new(), root.to_owned()],
        })
    }

    /// Stored tree for `root`, if any.
    pub fn get(&self, root: &str) -> CostResult<Option<MerkleTree>, Error> {
        let mut cost = OperationCost::default();
        let stored = cost_return_on_error!(
            &mut cost,
            self.storage.get(root.as_bytes()).map_err(Error::from)
        );
        let Some(bytes) = stored else {
            return Ok(None).wrap_with_cost(cost);
        };
        let nodes = cost_return_on_error_no_add!(&cost, decode_nodes(&bytes));
        let tree = cost_return_on_error_no_add!(
            &cost,
            MerkleTree::from_parts(root.to_owned(), nodes)
                .map_err(|e| Error::CorruptedData(format!("record for {root}: {e}")))
        );
        Ok(Some(tree)).wrap_with_cost(cost)
    }

    /// Store `tree` unless a tree at least as large is already stored under
    /// its root.
    ///
    /// The comparison and the write happen atomically, so concurrent calls
    /// for one root always leave the largest submitted tree behind. Returns
    /// [`Error::Conflict`] when the stored tree is kept.
    pub fn reconcile(&self, tree: &MerkleTree) -> CostResult<Reconciled, Error> {
        let mut cost = OperationCost::default();
        let encoded = cost_return_on_error_no_add!(&cost, encode_nodes(tree.nodes()));
        let root = tree.root();
        let incoming_len = tree.nodes().len();

        let outcome = cost_return_on_error!(
            &mut cost,
            self.storage
                .read_modify_write(root.as_bytes(), |current| {
                    let Some(bytes) = current else {
                        return (Update::Put(encoded.clone()), Ok(Reconciled::Created));
                    };
                    match decode_nodes(bytes) {
                        Err(e) => (Update::Keep, Err(e)),
                        Ok(stored) if stored.len() >= incoming_len => (
                            Update::Keep,
                            Err(Error::Conflict {
                                root: root.to_owned(),
                                stored_len: stored.len(),
                                incoming_len,
                            }),
                        ),
                        Ok(stored) => (
                            Update::Put(encoded.clone()),
                            Ok(Reconciled::Replaced {
                                previous_len: stored.len(),
                            }),
                        ),
                    }
                })
                .map_err(Error::from)
        );

        match &outcome {
            Ok(Reconciled::Created) => {
                debug!(root, nodes = incoming_len, "created tree");
            }
            Ok(Reconciled::Replaced { previous_len }) => {
                debug!(
                    root,
                    previous_len,
                    nodes = incoming_len,
                    "replaced tree with larger tree"
                );
            }
            Err(Error::Conflict { stored_len, .. }) => {
                info!(
                    root,
                    stored_len,
                    nodes = incoming_len,
                    "rejected tree not larger than stored tree"
                );
            }
            Err(_) => {}
        }
        outcome.wrap_with_cost(cost)
    }

    /// Build a tree from `leaves` and reconcile it.
    ///
    /// On success returns the built tree and how it was stored. A
    /// [`Error::Conflict`] still carries the root of the rejected tree.
    pub fn submit<H, L>(
        &self,
        leaves: &[L],
        oracle: &H,
    ) -> CostResult<(MerkleTree, Reconciled), Error>
    where
        H: HashOracle + ?Sized,
        L: AsRef<str>,
    {
        build_tree(leaves, oracle)
            .flat_map_ok(|tree| self.reconcile(&tree).map_ok(|outcome| (tree, outcome)))
    }
}
