//! End-to-end play flow: progression, unlocks, energy and ad rewards

use prediction_master::{
    common::ManualClock,
    config::AppConfig,
    errors::{AppError, PlayError},
    games::{unlocked_games, CardColor, DiceRange, GameKind, GameProcessor, Prediction, RandomSource, ScriptedEntropy},
    session::PlaySession,
    storage::MemoryStorage,
    user_record::DEFAULT_RECORD_KEY,
    UserStore,
};
use std::sync::Arc;

const T0: i64 = 1_700_000_000_000;

// uniform 0.1 draws red on the card and a 1 on the die
fn always_low_session() -> (PlaySession<ScriptedEntropy>, ManualClock) {
    let clock = ManualClock::new(T0);
    let store = UserStore::initialize(
        Arc::new(MemoryStorage::new()),
        DEFAULT_RECORD_KEY,
        Arc::new(clock.clone()),
    );
    let processor = GameProcessor::new(RandomSource::new(ScriptedEntropy::from_uniforms(&[0.1])));
    (
        PlaySession::new(store, processor, AppConfig::testing().session),
        clock,
    )
}

#[tokio::test]
async fn test_winning_streak_unlocks_dice() {
    let (mut session, clock) = always_low_session();

    let mut level_ups = Vec::new();
    for _ in 0..17 {
        clock.advance_minutes(30);
        let outcome = session
            .play_round(Prediction::Card(CardColor::Red), 10)
            .await
            .expect("card round");
        assert!(outcome.result.won);
        if outcome.applied.leveled_up() {
            level_ups.push((outcome.applied.new_level, outcome.applied.level_up_bonus));
        }
    }

    // 17 wins at 15 XP: level 2 at 105 XP, level 3 at 255 XP
    assert_eq!(level_ups, vec![(2, 200), (3, 300)]);
    let user = session.store().user().clone();
    assert_eq!(user.xp, 255);
    assert_eq!(user.level, 3);
    assert_eq!(user.coins, 1000 + 17 * 10 + 200 + 300);
    assert_eq!(user.energy, 4);
    assert_eq!(user.games_played, 17);
    assert_eq!(user.games_won, 17);
    assert_eq!(user.total_winnings, 17 * 20);

    let unlocked: Vec<GameKind> = unlocked_games(user.level).map(|g| g.id).collect();
    assert_eq!(unlocked, vec![GameKind::Card, GameKind::Dice]);

    let outcome = session
        .play_round(Prediction::Dice(DiceRange::Low), 20)
        .await
        .expect("dice round");
    assert!(outcome.result.won);
    assert_eq!(outcome.result.win_amount, 60);
    assert_eq!(outcome.result.actual_label(), "low (dice: 1)");

    let err = session
        .play_round(Prediction::Number(4), 50)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Play(PlayError::GameLocked { required: 5, level: 3 })
    ));
}

#[tokio::test]
async fn test_ad_energy_reopens_play_when_drained() {
    let (mut session, clock) = always_low_session();
    for _ in 0..5 {
        session
            .play_round(Prediction::Card(CardColor::Black), 10)
            .await
            .expect("losing round still settles");
    }
    assert_eq!(session.store().user().energy, 0);
    assert_eq!(session.store().user().coins, 950);

    let err = session
        .play_round(Prediction::Card(CardColor::Black), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Play(PlayError::OutOfEnergy)));
    assert_eq!(session.store().user().games_played, 5);

    session.store_mut().add_energy_from_ad();
    session.store_mut().add_coins_from_ad();
    assert_eq!(session.store().user().energy, 1);
    assert_eq!(session.store().user().coins, 1000);

    let profile = session.store().profile();
    assert_eq!(profile.next_energy_in.as_deref(), Some("30:00"));

    clock.advance_minutes(12);
    let profile = session.store().profile();
    assert_eq!(profile.next_energy_in.as_deref(), Some("18:00"));

    session
        .play_round(Prediction::Card(CardColor::Red), 10)
        .await
        .expect("ad energy is playable");
    assert_eq!(session.store().user().energy, 0);
    assert_eq!(session.store().user().xp, 5 * 10 + 15);
}

#[tokio::test]
async fn test_selection_flow_through_menu() {
    let (mut session, _clock) = always_low_session();

    session.selection_mut().select_game(GameKind::Card);
    session.selection_mut().set_bet(25);
    session
        .selection_mut()
        .set_prediction(Prediction::Card(CardColor::Red));
    let outcome = session.play().await.expect("selected round");
    assert_eq!(outcome.bet, 25);
    assert_eq!(outcome.result.win_amount, 50);

    // prediction is cleared, game and bet stay for the next round
    assert_eq!(session.selection().game, Some(GameKind::Card));
    assert_eq!(session.selection().bet, 25);
    assert!(matches!(
        session.play().await.unwrap_err(),
        AppError::Play(PlayError::NoPrediction)
    ));

    session.back_to_menu();
    assert_eq!(session.selection().game, None);
    assert_eq!(session.selection().bet, 10);
}
