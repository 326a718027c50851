//! Seed commitments for provable fairness.
//!
//! A seed is published first as its SHA-256 digest and revealed later; anyone
//! holding the commitment can check the revealed seed. Commitments are not yet
//! attached to game rounds.

use crate::errors::RandomnessError;
use crate::games::rng::{EntropySource, RandomSource};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A hex seed together with its hex SHA-256 commitment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCommitment {
    pub seed: String,
    pub commitment: String,
}

impl SeedCommitment {
    /// Draw a fresh seed and commit to it
    pub fn generate<E: EntropySource>(rng: &mut RandomSource<E>) -> Result<Self, RandomnessError> {
        let seed = rng.generate_seed()?;
        Ok(Self::from_seed(seed))
    }

    pub fn from_seed(seed: String) -> Self {
        let commitment = commit(&seed);
        Self { seed, commitment }
    }

    pub fn verify(&self) -> bool {
        verify_reveal(&self.commitment, &self.seed)
    }
}

/// Hex SHA-256 digest of the seed string
pub fn commit(seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a revealed seed against a previously published commitment
pub fn verify_reveal(commitment: &str, revealed_seed: &str) -> bool {
    commit(revealed_seed).eq_ignore_ascii_case(commitment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_verifies() {
        let mut rng = RandomSource::os();
        let sc = SeedCommitment::generate(&mut rng).unwrap();
        assert_eq!(sc.seed.len(), 32);
        assert_eq!(sc.commitment.len(), 64);
        assert!(sc.verify());
    }

    #[test]
    fn test_tampered_seed_is_rejected() {
        let sc = SeedCommitment::from_seed("00112233445566778899aabbccddeeff".to_string());
        assert!(!verify_reveal(&sc.commitment, "00112233445566778899aabbccddeefe"));
    }

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        assert_eq!(
            commit("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
