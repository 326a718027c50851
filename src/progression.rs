//! Experience and level curve
//!
//! Level `n` takes `floor(100 * 1.5^(n-1))` XP to clear. The requirement is
//! computed as `100 * 3^k / 2^k` in integer arithmetic so every level gets the
//! exact floor, saturating at `u64::MAX` once the curve leaves the u64 range.

use serde::Serialize;

/// XP awarded for every round played
pub const XP_PER_GAME: u64 = 10;
/// Extra XP for a winning round
pub const XP_WIN_BONUS: u64 = 5;

const BASE_XP: u128 = 100;

/// XP needed to clear `level` (level 0 is treated as level 1)
pub fn xp_required_for_level(level: u32) -> u64 {
    let k = level.saturating_sub(1);
    let (Some(num), Some(den)) = (3u128.checked_pow(k), 2u128.checked_pow(k)) else {
        return u64::MAX;
    };
    match BASE_XP.checked_mul(num) {
        Some(scaled) => u64::try_from(scaled / den).unwrap_or(u64::MAX),
        None => u64::MAX,
    }
}

/// Total XP consumed by every level below `level`
pub fn cumulative_xp_before(level: u32) -> u64 {
    (1..level).fold(0u64, |total, l| total.saturating_add(xp_required_for_level(l)))
}

/// Level reached with `xp` lifetime experience (always >= 1)
pub fn level_from_xp(xp: u64) -> u32 {
    let mut level = 1u32;
    let mut total = 0u64;

    loop {
        match total.checked_add(xp_required_for_level(level)) {
            Some(next) if next <= xp => {
                total = next;
                level += 1;
            }
            _ => break,
        }
    }

    level
}

/// Progress through the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XpProgress {
    pub current: u64,
    pub required: u64,
    pub percentage: f64,
}

pub fn xp_progress(xp: u64, level: u32) -> XpProgress {
    let current = xp.saturating_sub(cumulative_xp_before(level));
    let required = xp_required_for_level(level);
    let percentage = (current as f64 / required as f64 * 100.0).min(100.0);

    XpProgress {
        current,
        required,
        percentage,
    }
}

pub fn is_unlocked(game_unlock_level: u32, user_level: u32) -> bool {
    user_level >= game_unlock_level
}
