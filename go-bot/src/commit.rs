//! Turning a decision into exactly one session delta, and applying it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use go_engine::territory::{estimate_territory, score};
use go_engine::{GoError, Goban, Point, Stone, Turn};
use serde::{Deserialize, Serialize};

use crate::clock::ClockState;
use crate::session::{GameOutcome, GameSession, GameVariant, WinReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDelta {
    pub stone: Stone,
    pub point: Point,
    /// The true board after the move.
    pub goban: Goban,
    pub captured: Vec<Point>,
    /// Weighted capture points earned by this move.
    pub capture_points: u32,
    pub clock: Option<ClockState>,
    pub outcome: Option<GameOutcome>,
}

/// The bot aimed at an opponent's hidden stone; the stone is revealed and no
/// stone is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealDelta {
    pub stone: Stone,
    pub point: Point,
    pub clock: Option<ClockState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassDelta {
    pub stone: Stone,
    pub clock: Option<ClockState>,
    pub outcome: Option<GameOutcome>,
}

/// The mover gives up, either by resigning or by running out of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResignDelta {
    pub stone: Stone,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionDelta {
    Play(MoveDelta),
    Reveal(RevealDelta),
    Pass(PassDelta),
    Resign(ResignDelta),
}

impl SessionDelta {
    pub fn stone(&self) -> Stone {
        match self {
            SessionDelta::Play(d) => d.stone,
            SessionDelta::Reveal(d) => d.stone,
            SessionDelta::Pass(d) => d.stone,
            SessionDelta::Resign(d) => d.stone,
        }
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        match self {
            SessionDelta::Play(d) => d.outcome.as_ref(),
            SessionDelta::Pass(d) => d.outcome.as_ref(),
            SessionDelta::Resign(d) => Some(&d.outcome),
            SessionDelta::Reveal(_) => None,
        }
    }
}

fn tick(session: &GameSession, stone: Stone, now: DateTime<Utc>) -> Option<ClockState> {
    session.clock.clone().map(|mut clock| {
        clock.process_move(stone, &session.time_control, now);
        clock
    })
}

/// A loss on time if `stone` has flagged.
pub fn flagged(session: &GameSession, stone: Stone, now: DateTime<Utc>) -> Option<SessionDelta> {
    let clock = session.clock.as_ref()?;
    clock
        .is_flagged(stone, session.turn, &session.time_control, now)
        .then(|| {
            SessionDelta::Resign(ResignDelta {
                stone,
                outcome: GameOutcome::win(stone.opp(), WinReason::Timeout),
            })
        })
}

pub fn resign(stone: Stone) -> SessionDelta {
    SessionDelta::Resign(ResignDelta {
        stone,
        outcome: GameOutcome::win(stone.opp(), WinReason::Resignation),
    })
}

/// Pass; a second consecutive pass ends the game by score.
pub fn pass(session: &GameSession, stone: Stone, now: DateTime<Utc>) -> SessionDelta {
    let outcome = session
        .last_turn()
        .is_some_and(Turn::is_pass)
        .then(|| score_outcome(&session.goban, session.komi));
    SessionDelta::Pass(PassDelta {
        stone,
        clock: tick(session, stone, now),
        outcome,
    })
}

/// Score the board as it stands, treating every stone as alive.
pub fn score_outcome(goban: &Goban, komi: f64) -> GameOutcome {
    let dead = HashSet::new();
    let ownership = estimate_territory(goban, &dead);
    let result = score(goban, &ownership, &dead, komi);
    GameOutcome {
        winner: result.winner(),
        reason: WinReason::Score,
        result: result.result(),
    }
}

/// Commit the first workable point of `preference` against the true board.
///
/// If the first choice lands on an opponent's unrevealed hidden stone the turn
/// becomes a reveal. Later choices on hidden stones are skipped, as are points
/// the true board rejects. With nothing left the mover resigns.
pub fn commit(
    session: &GameSession,
    stone: Stone,
    preference: &[Point],
    now: DateTime<Utc>,
) -> SessionDelta {
    let hidden = session.unrevealed_stones(stone.opp());

    if let Some(&first) = preference.first()
        && hidden.contains(&first)
    {
        tracing::debug!("{stone:?} ran into a hidden stone at {first:?}");
        return SessionDelta::Reveal(RevealDelta {
            stone,
            point: first,
            clock: tick(session, stone, now),
        });
    }

    for &point in preference.iter().filter(|p| !hidden.contains(p)) {
        match session.try_place(point, stone) {
            Ok(placed) => {
                let capture_points = session.capture_value(&placed.captured);
                let outcome = check_win(session, stone, capture_points);
                return SessionDelta::Play(MoveDelta {
                    stone,
                    point,
                    goban: placed.goban,
                    captured: placed.captured,
                    capture_points,
                    clock: tick(session, stone, now),
                    outcome,
                });
            }
            Err(e) => tracing::debug!("{stone:?} at {point:?} rejected on the true board: {e}"),
        }
    }

    resign(stone)
}

fn check_win(session: &GameSession, stone: Stone, capture_points: u32) -> Option<GameOutcome> {
    if let Some(target) = session.capture_target
        && session.scores.get(stone) + capture_points >= target
    {
        return Some(GameOutcome::win(stone, WinReason::CaptureTarget));
    }
    if let GameVariant::Survival {
        turn_budget,
        survivor,
    } = session.variant
        && stone == survivor.opp()
        && session.moves_by(stone) + 1 >= turn_budget
    {
        return Some(GameOutcome::win(survivor, WinReason::SurvivalBudget));
    }
    None
}

impl GameSession {
    /// Apply one delta produced for the side to move.
    pub fn apply(&mut self, delta: &SessionDelta) -> Result<(), GoError> {
        let stone = delta.stone();
        if stone != self.turn || self.is_over() {
            return Err(GoError::OutOfTurn);
        }
        match delta {
            SessionDelta::Play(d) => {
                self.goban = d.goban.clone();
                self.moves.push(Turn::play(stone, d.point));
                self.scores.add(stone, d.capture_points);
                for p in &d.captured {
                    self.pattern_stones.remove(p);
                }
                self.set_clock(&d.clock);
            }
            SessionDelta::Reveal(d) => {
                self.hidden.revealed.insert(d.point);
                self.set_clock(&d.clock);
            }
            SessionDelta::Pass(d) => {
                self.goban.pass();
                self.moves.push(Turn::pass(stone));
                self.set_clock(&d.clock);
            }
            SessionDelta::Resign(_) => {
                self.moves.push(Turn::resign(stone));
            }
        }
        self.result = delta.outcome().cloned();
        self.turn = stone.opp();
        Ok(())
    }

    fn set_clock(&mut self, clock: &Option<ClockState>) {
        if clock.is_some() {
            self.clock = clock.clone();
        }
    }
}
