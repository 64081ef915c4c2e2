//! Two-to-one hash oracles over decimal-encoded unsigned integers.

mod blake3_oracle;
#[cfg(feature = "poseidon")]
mod poseidon;

use num_bigint::BigUint;

pub use self::blake3_oracle::Blake3Oracle;
#[cfg(feature = "poseidon")]
pub use self::poseidon::PoseidonOracle;
use crate::Error;

/// A deterministic, order-sensitive hash of two elements into one.
///
/// Tree nodes are exchanged as decimal strings; an oracle parses them into
/// its own element type once, hashes in that representation and formats
/// results back into decimal strings.
pub trait HashOracle {
    /// Parsed representation of a node value.
    type Element;

    /// Parse a decimal string, returning `None` if it is not in the domain.
    fn parse(&self, value: &str) -> Option<Self::Element>;

    /// Hash `left` and `right` (in that order) into their parent.
    fn hash2(&self, left: &Self::Element, right: &Self::Element) -> Result<Self::Element, Error>;

    /// Decimal string form of an element.
    fn format(&self, element: &Self::Element) -> String;

    /// `hash2` over decimal strings.
    fn hash2_decimal(&self, left: &str, right: &str) -> Result<String, Error> {
        let left = self
            .parse(left)
            .ok_or_else(|| Error::InvalidElement(left.to_owned()))?;
        let right = self
            .parse(right)
            .ok_or_else(|| Error::InvalidElement(right.to_owned()))?;
        Ok(self.format(&self.hash2(&left, &right)?))
    }
}

/// Parse an unsigned decimal integer of arbitrary size.
///
/// Only ASCII digits are accepted: no sign, separators or whitespace.
pub(crate) fn parse_decimal(value: &str) -> Option<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(value.as_bytes(), 10)
}
