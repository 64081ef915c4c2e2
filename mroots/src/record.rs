//! Encoding of stored node arrays.

use bincode::config;

use crate::Error;

/// Serialize a node array, preserving index order.
pub(crate) fn encode_nodes(nodes: &[String]) -> Result<Vec<u8>, Error> {
    bincode::encode_to_vec(nodes, config::standard())
        .map_err(|e| Error::CorruptedData(format!("cannot encode nodes: {e}")))
}

/// Deserialize a node array written by [`encode_nodes`].
pub(crate) fn decode_nodes(bytes: &[u8]) -> Result<Vec<String>, Error> {
    let (nodes, read): (Vec<String>, usize) =
        bincode::decode_from_slice(bytes, config::standard())
            .map_err(|e| Error::CorruptedData(format!("cannot decode nodes: {e}")))?;
    if read != bytes.len() {
        return Err(Error::CorruptedData(format!(
            "{} trailing bytes after node array",
            bytes.len() - read
        )));
    }
    Ok(nodes)
}
