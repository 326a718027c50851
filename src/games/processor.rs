use crate::errors::RandomnessError;
use crate::games::rng::{EntropySource, OsEntropy, RandomSource};
use crate::games::types::{
    CardColor, DiceRange, GameKind, GameResult, Outcome, Prediction, NUMBER_MAX, NUMBER_MIN,
};
use crate::progression::{XP_PER_GAME, XP_WIN_BONUS};

/// Card game payout multiplier
pub const CARD_MULTIPLIER: u64 = 2;
/// Number game payout multiplier
pub const NUMBER_MULTIPLIER: u64 = 10;

/// XP for one round: the flat award plus the win bonus
pub fn xp_for_round(won: bool) -> u64 {
    XP_PER_GAME + if won { XP_WIN_BONUS } else { 0 }
}

/// Resolves rounds for every game variant.
///
/// Resolution only consumes randomness. The returned [`GameResult`] is
/// applied to the player by the caller.
pub struct GameProcessor<E: EntropySource = OsEntropy> {
    rng: RandomSource<E>,
}

impl GameProcessor<OsEntropy> {
    /// Processor backed by the OS CSPRNG
    pub fn new_secure() -> Self {
        Self::new(RandomSource::os())
    }
}

impl<E: EntropySource> GameProcessor<E> {
    pub fn new(rng: RandomSource<E>) -> Self {
        Self { rng }
    }

    /// Resolve any prediction against its game
    pub fn resolve(&mut self, prediction: Prediction, bet: u64) -> Result<GameResult, RandomnessError> {
        match prediction {
            Prediction::Card(color) => self.resolve_card_game(color, bet),
            Prediction::Dice(range) => self.resolve_dice_game(range, bet),
            Prediction::Number(value) => self.resolve_number_game(value, bet),
        }
    }

    /// Red/black at 2x
    pub fn resolve_card_game(
        &mut self,
        prediction: CardColor,
        bet: u64,
    ) -> Result<GameResult, RandomnessError> {
        let actual = self.rng.random_card_color()?;
        let won = prediction == actual;

        Ok(GameResult {
            game: GameKind::Card,
            won,
            prediction: Prediction::Card(prediction),
            outcome: Outcome::Card { color: actual },
            win_amount: if won { bet.saturating_mul(CARD_MULTIPLIER) } else { 0 },
            xp_gained: xp_for_round(won),
        })
    }

    /// Low/middle/high on one die; the multiplier follows the prediction
    pub fn resolve_dice_game(
        &mut self,
        prediction: DiceRange,
        bet: u64,
    ) -> Result<GameResult, RandomnessError> {
        let face = self.rng.random_die_face()?;
        let actual = DiceRange::of_face(face);
        let won = prediction == actual;

        Ok(GameResult {
            game: GameKind::Dice,
            won,
            prediction: Prediction::Dice(prediction),
            outcome: Outcome::Dice {
                range: actual,
                face,
            },
            win_amount: if won {
                bet.saturating_mul(prediction.payout_multiplier())
            } else {
                0
            },
            xp_gained: xp_for_round(won),
        })
    }

    /// Exact number in 1..=10 at a flat 10x
    pub fn resolve_number_game(
        &mut self,
        prediction: u8,
        bet: u64,
    ) -> Result<GameResult, RandomnessError> {
        let actual = self
            .rng
            .random_number(i64::from(NUMBER_MIN), i64::from(NUMBER_MAX))? as u8;
        let won = prediction == actual;

        Ok(GameResult {
            game: GameKind::Number,
            won,
            prediction: Prediction::Number(prediction),
            outcome: Outcome::Number { value: actual },
            win_amount: if won { bet.saturating_mul(NUMBER_MULTIPLIER) } else { 0 },
            xp_gained: xp_for_round(won),
        })
    }

    /// Fresh hex seed from the same entropy source
    pub fn generate_seed(&mut self) -> Result<String, RandomnessError> {
        self.rng.generate_seed()
    }
}
