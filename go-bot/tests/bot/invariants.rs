use go_bot::session::{GameSession, GameVariant};
use go_bot::{Bot, BotConfig, SessionDelta};
use go_engine::{Goban, Stone};

use crate::common::{at, rng};

fn every_group_breathes(goban: &Goban) -> bool {
    Stone::BOTH
        .iter()
        .all(|&s| goban.groups(s).iter().all(|g| g.liberty_count() >= 1))
}

/// Self-play with mistakes on, checking the board after every committed move.
#[test]
fn committed_moves_keep_the_rules() {
    let bot = Bot::new(BotConfig {
        jitter: false,
        ..BotConfig::default()
    });
    for seed in 0..3 {
        let mut r = rng(seed);
        let mut session = GameSession::new(7, GameVariant::Standard);
        let levels = [(Stone::Black, 2u8), (Stone::White, 6u8)];
        for ply in 0..60 {
            if session.is_over() {
                break;
            }
            let stone = session.turn;
            let level = levels.iter().find(|(s, _)| *s == stone).map_or(2, |l| l.1);
            let ranked = bot.rank(&session, level, &mut rng(0));
            let delta = bot.take_turn(&session, level, &mut r, at(ply));

            if let SessionDelta::Play(d) = &delta {
                assert!(every_group_breathes(&d.goban), "seed {seed} ply {ply}");
                for p in &d.captured {
                    assert_eq!(d.goban.stone_at(*p), None);
                }
                let group = d.goban.group_at(d.point).unwrap();
                let self_atari = group.in_atari() && d.captured.is_empty();
                let had_choice = ranked.iter().any(|s| !s.breakdown.self_atari);
                if self_atari && had_choice {
                    // Only a snapback throw-in may leave a lone stone in atari.
                    assert!(level >= 3 && group.size() == 1, "seed {seed} ply {ply}");
                }
            }
            session.apply(&delta).unwrap();
        }
    }
}
