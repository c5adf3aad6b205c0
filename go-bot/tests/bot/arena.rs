use go_bot::arena::Arena;
use go_bot::{Bot, BotConfig};

use crate::common::rng;

#[tokio::test]
async fn plays_a_small_game_to_the_end() {
    let arena = Arena::new(Bot::new(BotConfig::default()));
    let result = arena.play_game(1, 3, 5, &mut rng(17)).await.unwrap();
    assert!(result.moves > 0);
    assert!(result.moves <= 3 * 25 + 1);
    if let Some(level) = result.winning_level() {
        assert!(level == 1 || level == 3);
    }
}

#[tokio::test]
async fn series_tallies_every_game() {
    let arena = Arena::new(Bot::new(BotConfig::default()));
    let summary = arena.run_series(2, 1, 2, 5, &mut rng(4)).await.unwrap();
    assert_eq!(summary.games, 2);
    assert_eq!(summary.first_wins + summary.second_wins + summary.draws, 2);
}

#[tokio::test]
async fn higher_level_beats_the_level_below() {
    let arena = Arena::new(Bot::new(BotConfig::default()));
    for level in [3u8, 6, 9] {
        let summary = arena
            .run_series(level, level - 1, 60, 9, &mut rng(u64::from(level)))
            .await
            .unwrap();
        assert_eq!(summary.games, 60);
        assert!(
            summary.first_win_rate() > 0.55,
            "level {level} won {} of {} against level {}",
            summary.first_wins,
            summary.games,
            level - 1
        );
    }
}
