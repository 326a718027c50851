//! Prediction Master - game resolution, progression and energy economy
//!
//! Players spend energy to bet coins on a card colour, a dice range or a
//! number. Rounds are resolved from the OS CSPRNG, winnings and XP are applied
//! to a single persisted player record, and energy regenerates over time.
//!
//! Layering, leaves first:
//! - `games::rng`: secure randomness and outcome sampling
//! - `progression`: XP curve and levels
//! - `energy`: time-based regeneration
//! - `games::processor`: per-game resolution into a `GameResult`
//! - `user_store`: the sole writer of the player record
//! - `session`: bet selection and the play sequence

pub mod common;
pub mod config;
pub mod energy;
pub mod errors;
pub mod fairness;
pub mod games;
pub mod progression;
pub mod session;
pub mod storage;
pub mod user;
pub mod user_record;
pub mod user_store;

pub use errors::{AppError, AppResult};
pub use games::{GameKind, GameProcessor, GameResult, Prediction};
pub use session::{BetSelection, PlaySession};
pub use user::User;
pub use user_store::UserStore;
