use ark_bn254::Fr;
use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};
use num_bigint::BigUint;
use parking_lot::Mutex;

use super::{HashOracle, parse_decimal};
use crate::Error;

/// Circom-compatible Poseidon over the BN254 scalar field.
///
/// Elements are integers strictly below the field modulus; anything else is
/// rejected by [`HashOracle::parse`] instead of being reduced.
pub struct PoseidonOracle {
    hasher: Mutex<Poseidon<Fr>>,
    modulus: BigUint,
}

impl PoseidonOracle {
    /// Set up a two-input Poseidon instance.
    pub fn new() -> Result<Self, Error> {
        let hasher = Poseidon::<Fr>::new_circom(2).map_err(|e| Error::HashError(e.to_string()))?;
        Ok(PoseidonOracle {
            hasher: Mutex::new(hasher),
            modulus: BigUint::from(Fr::MODULUS),
        })
    }
}

impl std::fmt::Debug for PoseidonOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseidonOracle").finish_non_exhaustive()
    }
}

impl HashOracle for PoseidonOracle {
    type Element = Fr;

    fn parse(&self, value: &str) -> Option<Fr> {
        let value = parse_decimal(value)?;
        if value >= self.modulus {
            return None;
        }
        Some(Fr::from(value))
    }

    fn hash2(&self, left: &Fr, right: &Fr) -> Result<Fr, Error> {
        self.hasher
            .lock()
            .hash(&[*left, *right])
            .map_err(|e| Error::HashError(e.to_string()))
    }

    fn format(&self, element: &Fr) -> String {
        BigUint::from(element.into_bigint()).to_string()
    }
}
