use crate::errors::PlayError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest number a player can pick in the number game
pub const NUMBER_MIN: u8 = 1;
/// Highest number a player can pick in the number game
pub const NUMBER_MAX: u8 = 10;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Card,
    Dice,
    Number,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Card, GameKind::Dice, GameKind::Number];
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Card => write!(f, "card"),
            GameKind::Dice => write!(f, "dice"),
            GameKind::Number => write!(f, "number"),
        }
    }
}

impl FromStr for GameKind {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" => Ok(GameKind::Card),
            "dice" => Ok(GameKind::Dice),
            "number" => Ok(GameKind::Number),
            other => Err(PlayError::InvalidPrediction(format!("unknown game '{}'", other))),
        }
    }
}

/// Card colour drawn in the card game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Black,
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardColor::Red => write!(f, "red"),
            CardColor::Black => write!(f, "black"),
        }
    }
}

impl FromStr for CardColor {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(CardColor::Red),
            "black" => Ok(CardColor::Black),
            other => Err(PlayError::InvalidPrediction(format!(
                "'{}' is not a card colour (red|black)",
                other
            ))),
        }
    }
}

/// Range bucket of a die face
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiceRange {
    Low,
    Middle,
    High,
}

impl DiceRange {
    /// Bucket for a face: 1-2 low, 3-4 middle, 5-6 high
    pub fn of_face(face: u8) -> Self {
        match face {
            0..=2 => DiceRange::Low,
            3..=4 => DiceRange::Middle,
            _ => DiceRange::High,
        }
    }

    /// Payout multiplier keyed on the predicted range
    pub fn payout_multiplier(self) -> u64 {
        match self {
            DiceRange::Low => 3,
            DiceRange::Middle => 2,
            DiceRange::High => 3,
        }
    }
}

impl fmt::Display for DiceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiceRange::Low => write!(f, "low"),
            DiceRange::Middle => write!(f, "middle"),
            DiceRange::High => write!(f, "high"),
        }
    }
}

impl FromStr for DiceRange {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(DiceRange::Low),
            "middle" | "mid" => Ok(DiceRange::Middle),
            "high" => Ok(DiceRange::High),
            other => Err(PlayError::InvalidPrediction(format!(
                "'{}' is not a dice range (low|middle|high)",
                other
            ))),
        }
    }
}

/// What the player picked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", content = "pick", rename_all = "lowercase")]
pub enum Prediction {
    Card(CardColor),
    Dice(DiceRange),
    Number(u8),
}

impl Prediction {
    /// Number-game pick, validated against 1..=10
    pub fn number(value: u8) -> Result<Self, PlayError> {
        if (NUMBER_MIN..=NUMBER_MAX).contains(&value) {
            Ok(Prediction::Number(value))
        } else {
            Err(PlayError::InvalidPrediction(format!(
                "{} is outside {}..={}",
                value, NUMBER_MIN, NUMBER_MAX
            )))
        }
    }

    /// Parse a pick for the given game
    pub fn parse(game: GameKind, raw: &str) -> Result<Self, PlayError> {
        match game {
            GameKind::Card => Ok(Prediction::Card(raw.parse()?)),
            GameKind::Dice => Ok(Prediction::Dice(raw.parse()?)),
            GameKind::Number => {
                let value: u8 = raw.trim().parse().map_err(|_| {
                    PlayError::InvalidPrediction(format!("'{}' is not a number", raw))
                })?;
                Prediction::number(value)
            }
        }
    }

    pub fn game_kind(&self) -> GameKind {
        match self {
            Prediction::Card(_) => GameKind::Card,
            Prediction::Dice(_) => GameKind::Dice,
            Prediction::Number(_) => GameKind::Number,
        }
    }
}

/// The sampled result of a round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Outcome {
    Card { color: CardColor },
    Dice { range: DiceRange, face: u8 },
    Number { value: u8 },
}

/// Result of one resolved round, consumed by the store and the result display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub game: GameKind,
    pub won: bool,
    pub prediction: Prediction,
    pub outcome: Outcome,
    pub win_amount: u64,
    pub xp_gained: u64,
}

impl GameResult {
    /// Display form of the prediction; dice picks carry the drawn face
    pub fn prediction_label(&self) -> String {
        match (self.prediction, self.outcome) {
            (Prediction::Dice(range), Outcome::Dice { face, .. }) => {
                format!("{} (dice: {})", range, face)
            }
            (Prediction::Card(color), _) => color.to_string(),
            (Prediction::Dice(range), _) => range.to_string(),
            (Prediction::Number(value), _) => value.to_string(),
        }
    }

    /// Display form of the outcome
    pub fn actual_label(&self) -> String {
        match self.outcome {
            Outcome::Card { color } => color.to_string(),
            Outcome::Dice { range, face } => format!("{} (dice: {})", range, face),
            Outcome::Number { value } => value.to_string(),
        }
    }
}
