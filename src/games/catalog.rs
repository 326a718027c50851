//! Static game catalog

use crate::games::types::GameKind;
use crate::progression::is_unlocked;
use serde::Serialize;

/// Catalog entry for one game variant
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameConfig {
    pub id: GameKind,
    pub name: &'static str,
    /// Nominal payout multiplier shown to the player
    pub multiplier: u64,
    pub min_bet: u64,
    pub unlock_level: u32,
    pub icon: &'static str,
    pub description: &'static str,
    /// Quick-pick bet amounts offered by the bet selector
    pub bet_presets: &'static [u64],
}

impl GameConfig {
    pub fn is_unlocked_for(&self, level: u32) -> bool {
        is_unlocked(self.unlock_level, level)
    }
}

static GAME_CONFIGS: [GameConfig; 3] = [
    GameConfig {
        id: GameKind::Card,
        name: "Card Color",
        multiplier: 2,
        min_bet: 10,
        unlock_level: 1,
        icon: "🎴",
        description: "Predict Red or Black",
        bet_presets: &[10, 25, 50, 100, 250],
    },
    GameConfig {
        id: GameKind::Dice,
        name: "Dice Game",
        multiplier: 3,
        min_bet: 20,
        unlock_level: 3,
        icon: "🎲",
        description: "Predict Low/Middle/High",
        bet_presets: &[20, 50, 100, 200],
    },
    GameConfig {
        id: GameKind::Number,
        name: "Number Range",
        multiplier: 10,
        min_bet: 50,
        unlock_level: 5,
        icon: "🔢",
        description: "Guess number 1-10",
        bet_presets: &[50, 100, 200, 500],
    },
];

/// All games, in menu order
pub fn catalog() -> &'static [GameConfig] {
    &GAME_CONFIGS
}

pub fn game_config(kind: GameKind) -> &'static GameConfig {
    match kind {
        GameKind::Card => &GAME_CONFIGS[0],
        GameKind::Dice => &GAME_CONFIGS[1],
        GameKind::Number => &GAME_CONFIGS[2],
    }
}

/// Games a player at `level` may select
pub fn unlocked_games(level: u32) -> impl Iterator<Item = &'static GameConfig> {
    GAME_CONFIGS.iter().filter(move |g| g.is_unlocked_for(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_values() {
        let ids: Vec<GameKind> = catalog().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![GameKind::Card, GameKind::Dice, GameKind::Number]);

        let dice = game_config(GameKind::Dice);
        assert_eq!(dice.multiplier, 3);
        assert_eq!(dice.min_bet, 20);
        assert_eq!(dice.unlock_level, 3);
    }

    #[test]
    fn test_lookup_matches_id() {
        for kind in GameKind::ALL {
            assert_eq!(game_config(kind).id, kind);
        }
    }

    #[test]
    fn test_presets_respect_min_bet() {
        for game in catalog() {
            assert!(game.bet_presets.iter().all(|b| *b >= game.min_bet));
        }
    }

    #[test]
    fn test_unlocked_games_by_level() {
        assert_eq!(unlocked_games(1).count(), 1);
        assert_eq!(unlocked_games(3).count(), 2);
        assert_eq!(unlocked_games(4).count(), 2);
        assert_eq!(unlocked_games(5).count(), 3);
    }
}
