use thiserror::Error;

/// Errors from building, reconciling and looking up trees.
#[derive(Debug, Error)]
pub enum Error {
    /// A tree needs at least one leaf.
    #[error("cannot build a tree from zero leaves")]
    EmptyInput,
    /// A leaf is not an element of the hash oracle's domain.
    #[error("leaf {index} is not a valid hash element: {value:?}")]
    MalformedLeaf {
        /// Position of the leaf in the submitted sequence.
        index: usize,
        /// The rejected value.
        value: String,
    },
    /// A hash operand that is not an element of the oracle's domain.
    #[error("invalid hash element: {0:?}")]
    InvalidElement(String),
    /// A tree under the same root is stored and is at least as large.
    #[error("tree {root} is stored with {stored_len} nodes, refusing tree with {incoming_len} nodes")]
    Conflict {
        /// Root shared by both trees.
        root: String,
        /// Node count of the stored tree.
        stored_len: usize,
        /// Node count of the rejected tree.
        incoming_len: usize,
    },
    /// A node array that does not have the shape of an encoded tree.
    #[error("invalid tree: {0}")]
    InvalidTree(String),
    /// A stored record that cannot be decoded.
    #[error("corrupted data: {0}")]
    CorruptedData(String),
    /// The hash oracle failed.
    #[error("hash error: {0}")]
    HashError(String),
    /// The record store failed.
    #[error("storage error: {0}")]
    StorageError(#[from] mroots_storage::Error),
}
