//! Player aggregate and its persisted shape

use crate::progression::level_from_xp;
use serde::{Deserialize, Serialize};

pub const STARTING_COINS: u64 = 1000;
pub const MAX_ENERGY: u32 = 5;

/// The single player record.
///
/// Serialized with camelCase field names; fields missing from records
/// written by earlier versions fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub coins: u64,
    pub energy: u32,
    pub max_energy: u32,
    pub xp: u64,
    pub level: u32,
    /// Unix milliseconds of the last energy change
    pub last_energy_update: i64,
    pub games_played: u64,
    pub games_won: u64,
    pub total_winnings: u64,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: String::new(),
            coins: STARTING_COINS,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            xp: 0,
            level: 1,
            last_energy_update: 0,
            games_played: 0,
            games_won: 0,
            total_winnings: 0,
        }
    }
}

impl User {
    /// Fresh player with a generated id, anchored at `now_ms`
    pub fn new(now_ms: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            last_energy_update: now_ms,
            ..Self::default()
        }
    }

    /// Restore invariants on a record read from storage.
    ///
    /// Returns true if anything had to change.
    pub fn normalize(&mut self) -> bool {
        let before = self.clone();

        if self.id.is_empty() {
            self.id = uuid::Uuid::new_v4().to_string();
        }
        self.max_energy = self.max_energy.max(1);
        self.energy = self.energy.min(self.max_energy);
        self.level = level_from_xp(self.xp);
        self.games_won = self.games_won.min(self.games_played);

        *self != before
    }

    pub fn is_energy_full(&self) -> bool {
        self.energy >= self.max_energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(42);
        assert_eq!(user.coins, 1000);
        assert_eq!(user.energy, 5);
        assert_eq!(user.max_energy, 5);
        assert_eq!(user.xp, 0);
        assert_eq!(user.level, 1);
        assert_eq!(user.last_energy_update, 42);
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_persisted_field_names() {
        let user = User::new(7);
        let json = serde_json::to_value(&user).unwrap();
        for field in [
            "coins",
            "energy",
            "maxEnergy",
            "xp",
            "level",
            "lastEnergyUpdate",
            "gamesPlayed",
            "gamesWon",
            "totalWinnings",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let user: User = serde_json::from_str(r#"{"coins": 420, "xp": 120}"#).unwrap();
        assert_eq!(user.coins, 420);
        assert_eq!(user.max_energy, 5);
        assert_eq!(user.games_played, 0);
    }

    #[test]
    fn test_normalize_restores_invariants() {
        let mut user: User = serde_json::from_str(
            r#"{"id": "p1", "energy": 9, "maxEnergy": 5, "xp": 260, "level": 1}"#,
        )
        .unwrap();

        assert!(user.normalize());
        assert_eq!(user.energy, 5);
        assert_eq!(user.level, 3);
        assert_eq!(user.id, "p1");
        assert!(!user.normalize());
    }
}
