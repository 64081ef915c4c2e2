use mroots_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};

use crate::{Error, HashOracle};

/// Index of the root in a node array.
pub const ROOT_INDEX: usize = 1;

/// A complete binary Merkle tree in implicit heap layout.
///
/// For `n` leaves `nodes` has `2n` entries: `nodes[0]` is the empty string,
/// `nodes[n..2n]` are the leaves in order and `nodes[i]` for `1 <= i < n` is
/// the hash of `nodes[2i]` and `nodes[2i + 1]`. The root is `nodes[1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    root: String,
    nodes: Vec<String>,
}

impl MerkleTree {
    /// Wrap an already computed node array.
    ///
    /// Only the shape is checked (even length of at least two, empty slot 0,
    /// root at index 1); hashes are not recomputed, see [`MerkleTree::verify`].
    pub fn from_parts(root: String, nodes: Vec<String>) -> Result<Self, Error> {
        if nodes.len() < 2 || nodes.len() % 2 != 0 {
            return Err(Error::InvalidTree(format!(
                "node array must have an even length of at least 2, got {}",
                nodes.len()
            )));
        }
        if nodes.first().is_some_and(|unused| !unused.is_empty()) {
            return Err(Error::InvalidTree("slot 0 must be empty".to_owned()));
        }
        if nodes.get(ROOT_INDEX) != Some(&root) {
            return Err(Error::InvalidTree(format!(
                "root {root} is not at index {ROOT_INDEX}"
            )));
        }
        Ok(MerkleTree { root, nodes })
    }

    /// Root hash.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The full node array, slot 0 included.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len() / 2
    }

    /// Leaves in submission order.
    pub fn leaves(&self) -> &[String] {
        self.nodes.get(self.leaf_count()..).unwrap_or_default()
    }

    /// Node at `index`, `None` past the end of the array.
    pub fn node(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    /// Consume the tree returning its node array.
    pub fn into_nodes(self) -> Vec<String> {
        self.nodes
    }

    /// Recompute every internal node with `oracle` and compare.
    ///
    /// Returns `Ok(false)` on the first mismatch and an error if a node is not
    /// an element of the oracle's domain.
    pub fn verify<H: HashOracle + ?Sized>(&self, oracle: &H) -> CostResult<bool, Error> {
        let mut cost = OperationCost::default();
        for index in (ROOT_INDEX..self.leaf_count()).rev() {
            let (Some(parent), Some(left), Some(right)) = (
                self.node(index),
                self.node(2 * index),
                self.node(2 * index + 1),
            ) else {
                return Ok(false).wrap_with_cost(cost);
            };
            let expected = cost_return_on_error_no_add!(&cost, oracle.hash2_decimal(left, right));
            cost.hash_node_calls += 1;
            if expected != parent {
                return Ok(false).wrap_with_cost(cost);
            }
        }
        Ok(true).wrap_with_cost(cost)
    }
}

/// Build the tree over `leaves`.
///
/// Every leaf must parse with `oracle`; leaves are kept verbatim in the node
/// array while internal nodes are written in the oracle's decimal form. The
/// cost reports one `hash_node_calls` per internal node.
pub fn build_tree<H, S>(leaves: &[S], oracle: &H) -> CostResult<MerkleTree, Error>
where
    H: HashOracle + ?Sized,
    S: AsRef<str>,
{
    let mut cost = OperationCost::default();
    let n = leaves.len();
    if n == 0 {
        return Err(Error::EmptyInput).wrap_with_cost(cost);
    }

    let mut elements: Vec<Option<H::Element>> = Vec::with_capacity(2 * n);
    elements.resize_with(n, || None);
    for (index, leaf) in leaves.iter().enumerate() {
        let leaf = leaf.as_ref();
        let element = cost_return_on_error_no_add!(
            &cost,
            oracle.parse(leaf).ok_or_else(|| Error::MalformedLeaf {
                index,
                value: leaf.to_owned(),
            })
        );
        elements.push(Some(element));
    }

    let mut nodes = vec![String::new(); n];
    nodes.extend(leaves.iter().map(|leaf| leaf.as_ref().to_owned()));

    for index in (ROOT_INDEX..n).rev() {
        let parent = {
            let left = cost_return_on_error_no_add!(&cost, element_at(&elements, 2 * index));
            let right = cost_return_on_error_no_add!(&cost, element_at(&elements, 2 * index + 1));
            cost_return_on_error_no_add!(&cost, oracle.hash2(left, right))
        };
        cost.hash_node_calls += 1;
        nodes[index] = oracle.format(&parent);
        elements[index] = Some(parent);
    }

    let root = nodes[ROOT_INDEX].clone();
    Ok(MerkleTree { root, nodes }).wrap_with_cost(cost)
}

fn element_at<E>(elements: &[Option<E>], index: usize) -> Result<&E, Error> {
    elements
        .get(index)
        .and_then(Option::as_ref)
        .ok_or_else(|| Error::InvalidTree(format!("node {index} has not been computed")))
}
