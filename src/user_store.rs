//! Player progression store
//!
//! `UserStore` is the only writer of the [`User`] record. Every mutation
//! builds the next state in full, swaps it in, then writes it to storage, so
//! neither readers nor the persisted record ever see a half-applied change.
//!
//! Energy-dependent checks (`has_energy`, `consume_energy`) run an explicit
//! [`UserStore::refresh_energy`] pass first.

use crate::{
    common::Clock,
    energy::{format_countdown, regenerate, time_until_next},
    games::GameResult,
    progression::{level_from_xp, xp_progress, XpProgress},
    storage::KeyValueStore,
    user::User,
    user_record::{load_user, store_user},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Coins granted by the rewarded-ad bonus
pub const AD_COIN_BONUS: u64 = 50;
/// Energy granted by the rewarded-ad bonus
pub const AD_ENERGY_BONUS: u32 = 1;
/// Level-up bonus per level reached
pub const LEVEL_UP_BONUS_PER_LEVEL: u64 = 100;

/// What `apply_result` changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedResult {
    pub previous_level: u32,
    pub new_level: u32,
    pub level_up_bonus: u64,
    pub coins: u64,
}

impl AppliedResult {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Read-only view for the profile bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub coins: u64,
    pub energy: u32,
    pub max_energy: u32,
    /// `m:ss` until the next energy unit, absent at full energy
    pub next_energy_in: Option<String>,
    pub level: u32,
    pub xp: u64,
    pub progress: XpProgress,
    pub games_played: u64,
    pub games_won: u64,
    pub total_winnings: u64,
}

pub struct UserStore {
    user: User,
    storage: Arc<dyn KeyValueStore>,
    record: String,
    clock: Arc<dyn Clock>,
}

impl UserStore {
    /// Load the persisted player (or create one) and credit offline regeneration.
    ///
    /// A missing or unreadable record falls back to a fresh default player.
    pub fn initialize(
        storage: Arc<dyn KeyValueStore>,
        record: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let record = record.into();
        let now = clock.now_ms();

        let (user, dirty) = match load_user(storage.as_ref(), &record) {
            Ok(Some(mut user)) => {
                let repaired = user.normalize();
                if repaired {
                    warn!(record = %record, "Persisted user record needed normalization");
                }
                info!(record = %record, coins = user.coins, level = user.level, "Loaded user");
                (user, repaired)
            }
            Ok(None) => {
                info!(record = %record, "No saved user, creating default");
                (User::new(now), true)
            }
            Err(e) => {
                warn!(record = %record, "Falling back to default user: {}", e);
                (User::new(now), true)
            }
        };

        let mut store = Self {
            user,
            storage,
            record,
            clock,
        };

        let credited = store.refresh_energy();
        if dirty && credited == 0 {
            store.persist();
        }
        store
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    fn now(&self) -> i64 {
        self.clock.now_ms()
    }

    fn commit(&mut self, next: User) {
        self.user = next;
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = store_user(self.storage.as_ref(), &self.record, &self.user) {
            warn!(record = %self.record, "Failed to persist user: {}", e);
        }
    }

    /// Explicit save, surfacing storage errors
    pub fn flush(&self) -> crate::errors::AppResult<()> {
        store_user(self.storage.as_ref(), &self.record, &self.user)
    }

    /// Credit passive regeneration; returns the units credited.
    ///
    /// Within a partial period this is a no-op and leaves the anchor alone.
    pub fn refresh_energy(&mut self) -> u32 {
        let now = self.now();
        let regenerated = regenerate(
            self.user.energy,
            self.user.max_energy,
            self.user.last_energy_update,
            now,
        );
        if regenerated == self.user.energy {
            return 0;
        }

        let credited = regenerated - self.user.energy;
        debug!(credited, energy = regenerated, "Energy regenerated");
        let next = User {
            energy: regenerated,
            last_energy_update: now,
            ..self.user.clone()
        };
        self.commit(next);
        credited
    }

    pub fn has_energy(&mut self) -> bool {
        self.refresh_energy();
        self.user.energy > 0
    }

    pub fn can_afford_bet(&self, amount: u64) -> bool {
        self.user.coins >= amount
    }

    /// Spend one energy. Returns false, changing nothing, when empty.
    pub fn consume_energy(&mut self) -> bool {
        self.refresh_energy();
        if self.user.energy == 0 {
            return false;
        }

        let next = User {
            energy: self.user.energy - 1,
            last_energy_update: self.now(),
            ..self.user.clone()
        };
        self.commit(next);
        true
    }

    /// Grant energy up to the cap and re-anchor regeneration
    pub fn add_energy(&mut self, amount: u32) {
        self.refresh_energy();
        let next = User {
            energy: self.user.energy.saturating_add(amount).min(self.user.max_energy),
            last_energy_update: self.now(),
            ..self.user.clone()
        };
        self.commit(next);
    }

    pub fn add_energy_from_ad(&mut self) {
        self.add_energy(AD_ENERGY_BONUS);
    }

    pub fn add_coins_from_ad(&mut self) {
        self.adjust_coins(AD_COIN_BONUS as i64);
    }

    /// Signed coin adjustment, clamped at zero
    pub fn adjust_coins(&mut self, delta: i64) {
        let coins = if delta >= 0 {
            self.user.coins.saturating_add(delta as u64)
        } else {
            self.user.coins.saturating_sub(delta.unsigned_abs())
        };
        let next = User {
            coins,
            ..self.user.clone()
        };
        self.commit(next);
    }

    /// Apply a resolved round: bet, winnings, XP, level and lifetime stats
    /// in one transition.
    pub fn apply_result(&mut self, result: &GameResult, bet: u64) -> AppliedResult {
        let current = &self.user;
        let xp = current.xp.saturating_add(result.xp_gained);
        let new_level = level_from_xp(xp);
        let level_up_bonus = if new_level > current.level {
            LEVEL_UP_BONUS_PER_LEVEL.saturating_mul(u64::from(new_level))
        } else {
            0
        };

        let coins = current
            .coins
            .saturating_add(result.win_amount)
            .saturating_add(level_up_bonus)
            .saturating_sub(bet);

        let applied = AppliedResult {
            previous_level: current.level,
            new_level,
            level_up_bonus,
            coins,
        };

        let next = User {
            coins,
            xp,
            level: new_level,
            games_played: current.games_played + 1,
            games_won: current.games_won + u64::from(result.won),
            total_winnings: current.total_winnings.saturating_add(result.win_amount),
            ..current.clone()
        };
        self.commit(next);

        if applied.leveled_up() {
            info!(
                level = new_level,
                bonus = level_up_bonus,
                "Level up"
            );
        }
        applied
    }

    /// Milliseconds until the next energy unit, `None` at full energy
    pub fn time_until_next_energy(&self) -> Option<i64> {
        if self.user.is_energy_full() {
            None
        } else {
            Some(time_until_next(self.user.last_energy_update, self.now()))
        }
    }

    pub fn profile(&self) -> ProfileSnapshot {
        let user = &self.user;
        ProfileSnapshot {
            coins: user.coins,
            energy: user.energy,
            max_energy: user.max_energy,
            next_energy_in: self.time_until_next_energy().map(format_countdown),
            level: user.level,
            xp: user.xp,
            progress: xp_progress(user.xp, user.level),
            games_played: user.games_played,
            games_won: user.games_won,
            total_winnings: user.total_winnings,
        }
    }
}
