//! Energy regeneration economy
//!
//! One unit of energy is credited per full 30-minute period since the anchor
//! timestamp. All functions are pure; callers supply `now`.

/// Regeneration period in milliseconds (30 minutes)
pub const REGEN_PERIOD_MS: i64 = 30 * 60 * 1000;

/// Elapsed time since `last_update`; a clock that moved backwards counts as zero
fn elapsed_ms(last_update: i64, now: i64) -> i64 {
    now.saturating_sub(last_update).max(0)
}

/// Energy after passive regeneration.
///
/// At or above `max_energy` the value is returned unchanged.
pub fn regenerate(current_energy: u32, max_energy: u32, last_update: i64, now: i64) -> u32 {
    if current_energy >= max_energy {
        return current_energy;
    }

    let periods = elapsed_ms(last_update, now) / REGEN_PERIOD_MS;
    let credited = u32::try_from(periods).unwrap_or(u32::MAX);
    current_energy.saturating_add(credited).min(max_energy)
}

/// Milliseconds until the next unit would be credited.
///
/// Only meaningful while energy is below the cap.
pub fn time_until_next(last_update: i64, now: i64) -> i64 {
    REGEN_PERIOD_MS - elapsed_ms(last_update, now) % REGEN_PERIOD_MS
}

/// `m:ss` countdown for display
pub fn format_countdown(milliseconds: i64) -> String {
    let milliseconds = milliseconds.max(0);
    let minutes = milliseconds / 60_000;
    let seconds = (milliseconds % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T: i64 = 1_700_000_000_000;
    const MINUTE: i64 = 60_000;

    #[test]
    fn test_one_period_credits_one_unit() {
        assert_eq!(regenerate(2, 5, T, T + 30 * MINUTE), 3);
    }

    #[test]
    fn test_regeneration_clamps_to_max() {
        assert_eq!(regenerate(2, 5, T, T + 95 * MINUTE), 5);
    }

    #[test]
    fn test_partial_period_credits_nothing() {
        assert_eq!(regenerate(2, 5, T, T + 29 * MINUTE), 2);
    }

    #[test]
    fn test_at_cap_is_unchanged() {
        assert_eq!(regenerate(5, 5, T, T + 600 * MINUTE), 5);
        assert_eq!(regenerate(7, 5, T, T + 600 * MINUTE), 7);
    }

    #[test]
    fn test_clock_skew_credits_nothing() {
        assert_eq!(regenerate(1, 5, T, T - 90 * MINUTE), 1);
        assert_eq!(time_until_next(T, T - MINUTE), REGEN_PERIOD_MS);
    }

    #[test]
    fn test_time_until_next() {
        assert_eq!(time_until_next(T, T + 10 * MINUTE), 1_200_000);
        assert_eq!(time_until_next(T, T), REGEN_PERIOD_MS);
        assert_eq!(time_until_next(T, T + 45 * MINUTE), 15 * MINUTE);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(1_200_000), "20:00");
        assert_eq!(format_countdown(65_500), "1:05");
        assert_eq!(format_countdown(0), "0:00");
    }

    proptest! {
        #[test]
        fn regeneration_never_exceeds_cap(
            energy in 0u32..5,
            elapsed in 0i64..(48 * 60 * MINUTE),
        ) {
            let next = regenerate(energy, 5, T, T + elapsed);
            prop_assert!(next >= energy);
            prop_assert!(next <= 5);
        }

        #[test]
        fn countdown_is_within_one_period(elapsed in 0i64..(48 * 60 * MINUTE)) {
            let remaining = time_until_next(T, T + elapsed);
            prop_assert!(remaining > 0 && remaining <= REGEN_PERIOD_MS);
        }
    }
}
