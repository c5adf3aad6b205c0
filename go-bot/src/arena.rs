//! Self-play between two skill levels.

use chrono::Utc;
use go_engine::Stone;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::adapter::{ExternalEngine, NoEngine};
use crate::bot::Bot;
use crate::commit::score_outcome;
use crate::error::BotError;
use crate::session::{GameOutcome, GameSession, GameVariant};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub black_level: u8,
    pub white_level: u8,
    pub outcome: GameOutcome,
    pub moves: usize,
}

impl MatchResult {
    /// Level of the winner, or `None` on a draw.
    pub fn winning_level(&self) -> Option<u8> {
        self.outcome.winner.map(|w| match w {
            Stone::Black => self.black_level,
            Stone::White => self.white_level,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SeriesSummary {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl SeriesSummary {
    pub fn first_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.first_wins as f64 / self.games as f64
    }
}

pub struct Arena<E = NoEngine> {
    bot: Bot,
    engine: E,
    komi: f64,
}

impl Arena<NoEngine> {
    pub fn new(bot: Bot) -> Self {
        let komi = bot.config().komi;
        Arena {
            bot,
            engine: NoEngine,
            komi,
        }
    }
}

impl<E: ExternalEngine> Arena<E> {
    pub fn with_engine(bot: Bot, engine: E) -> Self {
        let komi = bot.config().komi;
        Arena { bot, engine, komi }
    }

    /// Play one game to completion. Games that run past three moves per point
    /// are scored as they stand.
    pub async fn play_game(
        &self,
        black_level: u8,
        white_level: u8,
        size: u8,
        rng: &mut (impl Rng + ?Sized),
    ) -> Result<MatchResult, BotError> {
        let mut session = GameSession::new(size, GameVariant::Standard);
        session.komi = self.komi;
        let cap = 3 * session.goban.area();

        while !session.is_over() {
            if session.moves.len() >= cap {
                debug!("Move cap {cap} reached, scoring the board");
                session.result = Some(score_outcome(&session.goban, session.komi));
                break;
            }
            let level = match session.turn {
                Stone::Black => black_level,
                Stone::White => white_level,
            };
            let delta = self
                .bot
                .play_turn(&self.engine, &session, level, rng, Utc::now())
                .await;
            session.apply(&delta)?;
        }

        let outcome = session
            .result
            .clone()
            .ok_or_else(|| BotError::Engine("game ended without a result".to_string()))?;
        Ok(MatchResult {
            black_level,
            white_level,
            outcome,
            moves: session.moves.len(),
        })
    }

    /// Play `games` games between `first` and `second`, alternating colors.
    pub async fn run_series(
        &self,
        first: u8,
        second: u8,
        games: usize,
        size: u8,
        rng: &mut (impl Rng + ?Sized),
    ) -> Result<SeriesSummary, BotError> {
        let mut summary = SeriesSummary::default();
        for game in 0..games {
            let first_is_black = game % 2 == 0;
            let (black, white) = if first_is_black {
                (first, second)
            } else {
                (second, first)
            };
            let result = self.play_game(black, white, size, rng).await?;
            summary.games += 1;
            match result.outcome.winner {
                None => summary.draws += 1,
                Some(w) if (w == Stone::Black) == first_is_black => summary.first_wins += 1,
                Some(_) => summary.second_wins += 1,
            }
            info!(
                "Game {}/{games}: B{black} vs W{white} -> {} after {} moves",
                game + 1,
                result.outcome.result,
                result.moves
            );
        }
        Ok(summary)
    }
}
