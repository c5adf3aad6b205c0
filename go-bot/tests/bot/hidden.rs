use go_bot::session::{GameSession, GameVariant};
use go_bot::{Decision, SessionDelta};
use go_engine::{Goban, Stone, Turn};

use crate::common::{at, nine, rng, strict_bot};

/// Black sees White (4,3) in atari at (4,4), but White has a hidden stone on
/// (4,4) itself.
fn ambush() -> GameSession {
    let layout = nine(&[
        "+++++++++",
        "+++++++++",
        "++++B++++",
        "+++BWB+++",
        "++++W++++",
        "+++++++++",
        "+++++++++",
        "+++++++++",
        "++++++++W",
    ]);
    let mut session =
        GameSession::from_goban(Goban::from_layout(&layout), Stone::Black, GameVariant::Hidden);
    session.moves = vec![
        Turn::play(Stone::Black, (3, 3)),
        Turn::play(Stone::White, (4, 4)),
        Turn::play(Stone::Black, (5, 3)),
        Turn::play(Stone::White, (4, 3)),
        Turn::play(Stone::Black, (4, 2)),
        Turn::play(Stone::White, (8, 8)),
    ];
    session.hidden.hidden_moves.insert(1);
    session
}

#[test]
fn playing_onto_a_hidden_stone_reveals_it() {
    let bot = strict_bot();
    let mut session = ambush();
    assert_eq!(session.perceived_goban(Stone::Black).stone_at((4, 4)), None);

    let Decision::Play(order) = bot.decide(&session, 5, &mut rng(0)) else {
        panic!("expected a play");
    };
    assert_eq!(order[0], (4, 4));

    let delta = bot.take_turn(&session, 5, &mut rng(0), at(0));
    let SessionDelta::Reveal(reveal) = &delta else {
        panic!("expected a reveal, got {delta:?}");
    };
    assert_eq!(reveal.point, (4, 4));

    let before = session.goban.clone();
    session.apply(&delta).unwrap();
    assert_eq!(session.goban, before);
    assert_eq!(session.moves.len(), 6);
    assert_eq!(session.turn, Stone::White);
    assert!(session.hidden.revealed.contains(&(4, 4)));
    assert_eq!(
        session.perceived_goban(Stone::Black).stone_at((4, 4)),
        Some(Stone::White)
    );
}

#[test]
fn revealed_stone_is_not_targeted_again() {
    let bot = strict_bot();
    let mut session = ambush();
    let reveal = bot.take_turn(&session, 5, &mut rng(0), at(0));
    session.apply(&reveal).unwrap();
    session.apply(&go_bot::commit::pass(&session, Stone::White, at(1))).unwrap();

    let delta = bot.take_turn(&session, 5, &mut rng(0), at(2));
    let SessionDelta::Play(d) = delta else {
        panic!("expected a play, got {delta:?}");
    };
    assert_ne!(d.point, (4, 4));
}

#[test]
fn white_sees_its_own_hidden_stone() {
    let mut session = ambush();
    session.turn = Stone::White;
    assert_eq!(session.perceived_goban(Stone::White), session.goban);
}
