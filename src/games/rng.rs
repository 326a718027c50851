//! Random outcome source
//!
//! All game randomness is drawn from the operating system's CSPRNG through
//! `rand_core::OsRng`. If the OS source fails the draw fails too; nothing
//! here falls back to a statistical generator.

use crate::errors::RandomnessError;
use crate::games::types::CardColor;
use rand_core::{OsRng, RngCore};

/// Bytes in a seed produced by [`RandomSource::generate_seed`]
pub const SEED_BYTES: usize = 16;

const U32_RANGE: f64 = 4_294_967_296.0; // 2^32

/// A source of entropy bytes
pub trait EntropySource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomnessError>;
}

/// Operating-system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomnessError::Unavailable(e.to_string()))
    }
}

/// Replays a fixed, cycling sequence of 32-bit words.
///
/// Used for deterministic replays and tests. Each `uniform()` draw consumes
/// exactly one word. An empty script behaves like an unavailable device.
#[derive(Clone, Debug)]
pub struct ScriptedEntropy {
    words: Vec<u32>,
    cursor: usize,
}

impl ScriptedEntropy {
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words, cursor: 0 }
    }

    /// Words that make `uniform()` return (approximately) the given values
    pub fn from_uniforms(values: &[f64]) -> Self {
        Self::from_words(
            values
                .iter()
                .map(|u| (u.clamp(0.0, 0.999_999_999) * U32_RANGE) as u32)
                .collect(),
        )
    }

    /// Draws that resolve to the given card colours
    pub fn colors(colors: &[CardColor]) -> Self {
        let values: Vec<f64> = colors
            .iter()
            .map(|c| match c {
                CardColor::Red => 0.25,
                CardColor::Black => 0.75,
            })
            .collect();
        Self::from_uniforms(&values)
    }

    /// Draws that resolve to the given die faces (1..=6)
    pub fn die_faces(faces: &[u8]) -> Self {
        let values: Vec<f64> = faces.iter().map(|f| (f64::from(*f) - 0.5) / 6.0).collect();
        Self::from_uniforms(&values)
    }

    /// Draws that resolve to the given numbers in 1..=10
    pub fn numbers(numbers: &[u8]) -> Self {
        let values: Vec<f64> = numbers.iter().map(|n| (f64::from(*n) - 0.5) / 10.0).collect();
        Self::from_uniforms(&values)
    }

    fn next_word(&mut self) -> Result<u32, RandomnessError> {
        if self.words.is_empty() {
            return Err(RandomnessError::Unavailable(
                "scripted entropy has no words".to_string(),
            ));
        }
        let word = self.words[self.cursor % self.words.len()];
        self.cursor += 1;
        Ok(word)
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_word()?.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}

/// Derives game outcomes from an entropy source
#[derive(Clone, Debug, Default)]
pub struct RandomSource<E: EntropySource = OsEntropy> {
    entropy: E,
}

impl RandomSource<OsEntropy> {
    /// Random source backed by the OS CSPRNG
    pub fn os() -> Self {
        Self::new(OsEntropy)
    }
}

impl<E: EntropySource> RandomSource<E> {
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }

    fn next_u32(&mut self) -> Result<u32, RandomnessError> {
        let mut buf = [0u8; 4];
        self.entropy.fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Uniform float in [0, 1) from one 32-bit draw
    pub fn uniform(&mut self) -> Result<f64, RandomnessError> {
        Ok(f64::from(self.next_u32()?) / U32_RANGE)
    }

    /// Uniform integer in `[min, max]` inclusive. Returns `min` when `max <= min`.
    pub fn random_int(&mut self, min: i64, max: i64) -> Result<i64, RandomnessError> {
        if max <= min {
            return Ok(min);
        }
        let span = (i128::from(max) - i128::from(min) + 1) as f64;
        let offset = (self.uniform()? * span).floor() as i128;
        Ok((i128::from(min) + offset).min(i128::from(max)) as i64)
    }

    /// Red below 0.5 on the uniform draw, black otherwise
    pub fn random_card_color(&mut self) -> Result<CardColor, RandomnessError> {
        Ok(if self.uniform()? < 0.5 {
            CardColor::Red
        } else {
            CardColor::Black
        })
    }

    pub fn random_die_face(&mut self) -> Result<u8, RandomnessError> {
        Ok(self.random_int(1, 6)? as u8)
    }

    pub fn random_number(&mut self, min: i64, max: i64) -> Result<i64, RandomnessError> {
        self.random_int(min, max)
    }

    /// 16 random bytes, hex-encoded (32 characters)
    pub fn generate_seed(&mut self) -> Result<String, RandomnessError> {
        let mut seed = [0u8; SEED_BYTES];
        self.entropy.fill_bytes(&mut seed)?;
        Ok(hex::encode(seed))
    }
}
