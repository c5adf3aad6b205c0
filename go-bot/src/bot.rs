//! The per-turn pipeline: perceive, generate, score, read ahead, err, commit.

use std::time::Duration;

use chrono::{DateTime, Utc};
use go_engine::{Goban, Point};
use rand::{Rng, RngExt};
use tracing::{debug, trace, warn};

use crate::adapter::{ExternalEngine, SuggestRequest};
use crate::commit::{self, SessionDelta};
use crate::config::BotConfig;
use crate::lookahead::LookAhead;
use crate::mistake;
use crate::movegen::{MoveRequest, generate};
use crate::profile::SkillProfile;
use crate::scorer::{Goal, Scored, Scorer, Situation, sort_ranked};
use crate::session::GameSession;

/// Board fill at which the bot is willing to pass instead of making a wasteful move.
const SETTLED_FILL: f64 = 0.6;

/// What the heuristic pipeline wants to do this turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Points in order of preference; the first is the chosen move.
    Play(Vec<Point>),
    Pass,
    Resign,
}

#[derive(Debug, Clone)]
pub struct Bot {
    config: BotConfig,
    look_ahead: LookAhead,
}

impl Bot {
    pub fn new(config: BotConfig) -> Self {
        let look_ahead = LookAhead::new(config.max_branches, config.max_depth);
        Bot { config, look_ahead }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Rank every candidate for the side to move, as it perceives the board.
    pub fn rank(&self, session: &GameSession, level: u8, rng: &mut (impl Rng + ?Sized)) -> Vec<Scored> {
        let stone = session.turn;
        let profile = SkillProfile::for_level(level);
        let goban = session.perceived_goban(stone);
        let move_index = session.move_index();

        let mut req = MoveRequest::new(&goban, stone, move_index);
        req.options = session.default_options();
        let candidates = generate(&req, profile.uses_fast_generator());
        if candidates.is_empty() {
            return Vec::new();
        }

        let goal = Goal::for_session(session, stone);
        let sit = Situation::new(&goban, stone, move_index, profile, goal, &session.pattern_stones);
        let scorer = Scorer::new(&self.look_ahead);
        let mut ranked = scorer.rank(&sit, candidates);

        let jitter = profile.jitter();
        if self.config.jitter && jitter > 0.0 {
            for s in ranked.iter_mut().filter(|s| !s.breakdown.self_atari) {
                s.score += rng.random_range(-jitter..=jitter);
            }
            sort_ranked(&mut ranked);
        }
        scorer.refine(&sit, &mut ranked);

        for s in &ranked {
            trace!("{stone:?} {:?} scored {:.1}: {:?}", s.point(), s.score, s.breakdown);
        }
        ranked
    }

    /// Pick a move, a pass, or resignation for the side to move.
    pub fn decide(&self, session: &GameSession, level: u8, rng: &mut (impl Rng + ?Sized)) -> Decision {
        let ranked = self.rank(session, level, rng);
        let stone = session.turn;
        if ranked.is_empty() {
            debug!("{stone:?} has no legal move at level {level}");
            return Decision::Resign;
        }
        if should_pass(session, &session.perceived_goban(stone), &ranked) {
            debug!("{stone:?} passes: only wasteful moves left");
            return Decision::Pass;
        }

        let profile = SkillProfile::for_level(level);
        let choice = if self.config.mistakes {
            mistake::pick(&ranked, profile.mistake_rate, rng)
        } else {
            0
        };
        if choice > 0 {
            debug!(
                "{stone:?} level {level} plays rank {choice} {:?} instead of {:?}",
                ranked[choice].point(),
                ranked[0].point()
            );
        } else {
            debug!("{stone:?} level {level} plays {:?} ({:.1})", ranked[0].point(), ranked[0].score);
        }

        let mut order = Vec::with_capacity(ranked.len());
        order.push(ranked[choice].point());
        order.extend(
            ranked
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != choice)
                .map(|(_, s)| s.point()),
        );
        Decision::Play(order)
    }

    /// Run the heuristic pipeline and commit its result.
    pub fn take_turn(
        &self,
        session: &GameSession,
        level: u8,
        rng: &mut (impl Rng + ?Sized),
        now: DateTime<Utc>,
    ) -> SessionDelta {
        let stone = session.turn;
        if let Some(lost) = commit::flagged(session, stone, now) {
            return lost;
        }
        match self.decide(session, level, rng) {
            Decision::Play(order) => commit::commit(session, stone, &order, now),
            Decision::Pass => commit::pass(session, stone, now),
            Decision::Resign => commit::resign(stone),
        }
    }

    /// Ask the external engine first; fall back to [`Bot::take_turn`] on any failure.
    pub async fn play_turn<E: ExternalEngine>(
        &self,
        engine: &E,
        session: &GameSession,
        level: u8,
        rng: &mut (impl Rng + ?Sized),
        now: DateTime<Utc>,
    ) -> SessionDelta {
        if engine.is_available()
            && commit::flagged(session, session.turn, now).is_none()
            && let Some(point) = self.consult(engine, session, level).await
        {
            return commit::commit(session, session.turn, &[point], now);
        }
        self.take_turn(session, level, rng, now)
    }

    /// A suggestion that is legal on the true board or lands on a hidden stone.
    async fn consult<E: ExternalEngine>(
        &self,
        engine: &E,
        session: &GameSession,
        level: u8,
    ) -> Option<Point> {
        let request = SuggestRequest::from_session(session, Some(level));
        let timeout = Duration::from_millis(self.config.engine_timeout_ms);
        let point = match tokio::time::timeout(timeout, engine.suggest(&request)).await {
            Ok(Ok(point)) => point,
            Ok(Err(e)) => {
                warn!("External engine failed, using heuristics: {e}");
                return None;
            }
            Err(_) => {
                warn!("External engine timed out after {timeout:?}, using heuristics");
                return None;
            }
        };

        let stone = session.turn;
        let hidden = session.unrevealed_stones(stone.opp()).contains(&point);
        match session.try_place(point, stone) {
            Ok(_) => Some(point),
            _ if hidden => Some(point),
            Err(e) => {
                warn!("External engine suggested illegal {point:?} ({e}), using heuristics");
                None
            }
        }
    }
}

fn should_pass(session: &GameSession, goban: &Goban, ranked: &[Scored]) -> bool {
    if !ranked.iter().all(|s| s.breakdown.is_wasteful()) {
        return false;
    }
    let opponent_passed = session.last_turn().is_some_and(|t| t.is_pass());
    let fill = goban.stone_count() as f64 / goban.area().max(1) as f64;
    opponent_passed || fill >= SETTLED_FILL
}
