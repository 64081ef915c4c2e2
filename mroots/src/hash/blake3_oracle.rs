use num_bigint::BigUint;

use super::{HashOracle, parse_decimal};
use crate::Error;

const NODE_DOMAIN: &[u8] = b"mroots/node";

/// Hash oracle over all unsigned integers built on blake3.
///
/// `hash2(a, b) = blake3("mroots/node" || len(a) || a || len(b) || b)` with
/// operands as minimal big-endian bytes and lengths as big-endian `u64`. The
/// 32-byte digest is read back as a big-endian integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Oracle;

impl HashOracle for Blake3Oracle {
    type Element = BigUint;

    fn parse(&self, value: &str) -> Option<BigUint> {
        parse_decimal(value)
    }

    fn hash2(&self, left: &BigUint, right: &BigUint) -> Result<BigUint, Error> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(NODE_DOMAIN);
        for operand in [left, right] {
            let bytes = operand.to_bytes_be();
            hasher.update(&(bytes.len() as u64).to_be_bytes());
            hasher.update(&bytes);
        }
        Ok(BigUint::from_bytes_be(hasher.finalize().as_bytes()))
    }

    fn format(&self, element: &BigUint) -> String {
        element.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_both_operands_in_order() {
        let oracle = Blake3Oracle;
        let ab = oracle.hash2_decimal("1", "2").expect("hash");
        assert_eq!(ab, oracle.hash2_decimal("1", "2").expect("hash"));
        assert_ne!(ab, oracle.hash2_decimal("2", "1").expect("hash"));
        assert_ne!(ab, oracle.hash2_decimal("1", "3").expect("hash"));
        assert_ne!(ab, oracle.hash2_decimal("1", "1").expect("hash"));
    }

    #[test]
    fn test_operand_boundaries_are_unambiguous() {
        // 0x01 || 0x0203 and 0x0102 || 0x03 concatenate to the same bytes
        let oracle = Blake3Oracle;
        assert_ne!(
            oracle.hash2_decimal("1", "515").expect("hash"),
            oracle.hash2_decimal("258", "3").expect("hash")
        );
    }

    #[test]
    fn test_output_is_decimal() {
        let digest = Blake3Oracle.hash2_decimal("0", "0").expect("hash");
        assert!(digest.bytes().all(|b| b.is_ascii_digit()));
        assert!(Blake3Oracle.parse(&digest).is_some());
    }

    #[test]
    fn test_rejects_non_decimal_operands() {
        assert!(matches!(
            Blake3Oracle.hash2_decimal("abc", "1"),
            Err(Error::InvalidElement(value)) if value == "abc"
        ));
        assert!(Blake3Oracle.hash2_decimal("1", "").is_err());
    }
}
