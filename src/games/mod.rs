//! Game catalog, outcome sampling and round resolution

pub mod catalog;
pub mod processor;
pub mod rng;
pub mod types;

pub use catalog::{catalog, game_config, unlocked_games, GameConfig};
pub use processor::GameProcessor;
pub use rng::{EntropySource, OsEntropy, RandomSource, ScriptedEntropy};
pub use types::*;
