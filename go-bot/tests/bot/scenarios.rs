use go_bot::{Decision, SessionDelta};
use go_engine::Stone;

use crate::common::{at, nine, rng, session, strict_bot};

/// Black (0,0)-(0,1) has a single liberty at (1,0). Playing there also takes
/// White (1,1), leaving the group two liberties.
///
/// ```text
///      c0  c1  c2
/// r0:   B   .   .
/// r1:   B   W   B
/// r2:   W   B   .
/// r3:   W   .   .
/// ```
fn rescue_layout() -> Vec<&'static str> {
    nine(&["B++++++++", "BWB++++++", "WB+++++++", "W++++++++"])
}

#[test]
fn rescues_the_group_in_atari() {
    let bot = strict_bot();
    let session = session(&rescue_layout(), Stone::Black);
    for level in 3..=10 {
        let Decision::Play(order) = bot.decide(&session, level, &mut rng(level as u64)) else {
            panic!("level {level} did not play");
        };
        assert_eq!(order[0], (1, 0), "level {level}");
    }

    let SessionDelta::Play(d) = bot.take_turn(&session, 3, &mut rng(0), at(0)) else {
        panic!("expected a play");
    };
    assert_eq!(d.point, (1, 0));
    assert_eq!(d.goban.group_at((0, 0)).unwrap().liberty_count(), 2);
}

#[test]
fn captures_the_stone_in_atari() {
    // White (4,3) has one liberty at (4,4).
    let layout = nine(&[
        "+++++++++",
        "+++++++++",
        "++++B++++",
        "+++BWB+++",
    ]);
    let bot = strict_bot();
    let session = session(&layout, Stone::Black);
    for level in 1..=10 {
        let SessionDelta::Play(d) = bot.take_turn(&session, level, &mut rng(level as u64), at(0))
        else {
            panic!("level {level} did not play");
        };
        assert_eq!(d.point, (4, 4), "level {level}");
        assert_eq!(d.captured, vec![(4, 3)], "level {level}");
        assert_eq!(d.capture_points, 1);
    }
}

#[test]
fn resigns_on_a_full_board() {
    let bot = strict_bot();
    let session = session(&["BWBW", "WBWB", "BWBW", "WBWB"], Stone::White);
    for level in 1..=10 {
        let delta = bot.take_turn(&session, level, &mut rng(1), at(0));
        let SessionDelta::Resign(r) = delta else {
            panic!("level {level} should resign");
        };
        assert_eq!(r.stone, Stone::White);
        assert_eq!(r.outcome.winner, Some(Stone::Black));
    }
}

#[test]
fn avoids_self_atari_when_it_knows_better() {
    // Only (0,1) and the open area remain; (0,1) would leave Black one liberty.
    let layout = ["++W++", "+W+++", "W++++", "+++++", "+++++"];
    let bot = strict_bot();
    let s = session(&layout, Stone::Black);
    for level in 2..=10 {
        let ranked = bot.rank(&s, level, &mut rng(3));
        let corner = ranked.iter().find(|c| c.point() == (0, 1)).unwrap();
        assert!(corner.breakdown.self_atari, "level {level}");
        assert_ne!(ranked[0].point(), (0, 1), "level {level}");
    }
}
