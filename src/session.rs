//! Play session: bet selection and the bet → reveal → settle sequence
//!
//! Energy consumption is the commit point of a round. Once `consume_energy`
//! succeeds the round runs to completion; the reveal delay is a cooperative
//! `tokio` sleep held under `&mut self`, so no other store mutation can
//! interleave with a pending round.

use crate::{
    config::SessionConfig,
    errors::{AppResult, PlayError},
    games::{game_config, EntropySource, GameKind, GameProcessor, GameResult, OsEntropy, Prediction},
    user_store::{AppliedResult, ProfileSnapshot, UserStore},
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Bet amount selected when nothing else has been chosen
pub const DEFAULT_BET: u64 = 10;

/// Transient menu state; never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetSelection {
    pub game: Option<GameKind>,
    pub bet: u64,
    pub prediction: Option<Prediction>,
}

impl Default for BetSelection {
    fn default() -> Self {
        Self {
            game: None,
            bet: DEFAULT_BET,
            prediction: None,
        }
    }
}

impl BetSelection {
    /// Enter a game; the bet is raised to the game's minimum if needed
    pub fn select_game(&mut self, game: GameKind) {
        self.game = Some(game);
        self.bet = self.bet.max(game_config(game).min_bet);
        if self.prediction.map(|p| p.game_kind()) != Some(game) {
            self.prediction = None;
        }
    }

    pub fn set_bet(&mut self, amount: u64) {
        self.bet = amount;
    }

    pub fn set_prediction(&mut self, prediction: Prediction) {
        self.prediction = Some(prediction);
    }

    /// Back to the menu
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A settled round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayOutcome {
    pub result: GameResult,
    pub bet: u64,
    pub applied: AppliedResult,
}

pub struct PlaySession<E: EntropySource = OsEntropy> {
    store: UserStore,
    processor: GameProcessor<E>,
    selection: BetSelection,
    config: SessionConfig,
}

impl PlaySession<OsEntropy> {
    pub fn secure(store: UserStore, config: SessionConfig) -> Self {
        Self::new(store, GameProcessor::new_secure(), config)
    }
}

impl<E: EntropySource> PlaySession<E> {
    pub fn new(store: UserStore, processor: GameProcessor<E>, config: SessionConfig) -> Self {
        Self {
            store,
            processor,
            selection: BetSelection::default(),
            config,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UserStore {
        &mut self.store
    }

    pub fn selection(&self) -> &BetSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut BetSelection {
        &mut self.selection
    }

    pub fn processor_mut(&mut self) -> &mut GameProcessor<E> {
        &mut self.processor
    }

    pub fn back_to_menu(&mut self) {
        self.selection.reset();
    }

    /// Check the current selection against the catalog and the player's state
    pub fn validate(&mut self) -> Result<(Prediction, u64), PlayError> {
        let game = self.selection.game.ok_or(PlayError::NoGameSelected)?;
        let prediction = self.selection.prediction.ok_or(PlayError::NoPrediction)?;
        if prediction.game_kind() != game {
            return Err(PlayError::PredictionMismatch(game.to_string()));
        }
        if let Prediction::Number(value) = prediction {
            Prediction::number(value)?;
        }

        let config = game_config(game);
        let level = self.store.user().level;
        if !config.is_unlocked_for(level) {
            return Err(PlayError::GameLocked {
                required: config.unlock_level,
                level,
            });
        }

        let bet = self.selection.bet;
        if bet < config.min_bet {
            return Err(PlayError::BetBelowMinimum {
                min_bet: config.min_bet,
                bet,
            });
        }
        if !self.store.has_energy() {
            return Err(PlayError::OutOfEnergy);
        }
        if !self.store.can_afford_bet(bet) {
            return Err(PlayError::InsufficientCoins {
                coins: self.store.user().coins,
                bet,
            });
        }

        Ok((prediction, bet))
    }

    /// Play the selected round to completion
    pub async fn play(&mut self) -> AppResult<PlayOutcome> {
        let (prediction, bet) = self.validate()?;

        if !self.store.consume_energy() {
            return Err(PlayError::OutOfEnergy.into());
        }
        debug!(game = %prediction.game_kind(), bet, "Bet placed");

        let delay = self.config.reveal_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = self.processor.resolve(prediction, bet).map_err(|e| {
            warn!("Round aborted after energy was spent: {}", e);
            e
        })?;
        let applied = self.store.apply_result(&result, bet);

        info!(
            game = %result.game,
            won = result.won,
            prediction = %result.prediction_label(),
            actual = %result.actual_label(),
            win_amount = result.win_amount,
            "Round settled"
        );

        self.selection.prediction = None;
        Ok(PlayOutcome {
            result,
            bet,
            applied,
        })
    }

    /// Select, bet and play in one call
    pub async fn play_round(&mut self, prediction: Prediction, bet: u64) -> AppResult<PlayOutcome> {
        self.selection.select_game(prediction.game_kind());
        self.selection.set_bet(bet);
        self.selection.set_prediction(prediction);
        self.play().await
    }

    /// Poll energy regeneration `ticks` times at the configured cadence
    pub async fn watch_energy<F>(&mut self, ticks: u32, mut on_tick: F)
    where
        F: FnMut(&ProfileSnapshot),
    {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        for _ in 0..ticks {
            interval.tick().await;
            let credited = self.store.refresh_energy();
            if credited > 0 {
                debug!(credited, "Energy credited while watching");
            }
            on_tick(&self.store.profile());
        }
    }
}
