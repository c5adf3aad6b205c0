//! Optional external engine. Any failure is the caller's cue to fall back to
//! the heuristic pipeline.

use std::future::Future;
use std::time::Duration;

use go_engine::{Point, Stone};
use serde::{Deserialize, Serialize};

use crate::error::BotError;
use crate::session::GameSession;

/// One history entry as sent to the engine. Passes use `(-1, -1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub x: i32,
    pub y: i32,
    pub player: Stone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    /// Rows of `1` (black), `-1` (white) and `0` (empty), indexed `[y][x]`.
    pub board_state: Vec<Vec<i8>>,
    pub board_size: u8,
    pub player: Stone,
    pub move_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl SuggestRequest {
    /// Build a request from what `session.turn` may see.
    pub fn from_session(session: &GameSession, level: Option<u8>) -> Self {
        let player = session.turn;
        let goban = session.perceived_goban(player);
        let cols = goban.cols() as usize;
        let board_state = goban.board().chunks(cols).map(<[i8]>::to_vec).collect();
        let move_history = session
            .perceived_moves(player)
            .iter()
            .filter(|t| !t.is_resign())
            .map(|t| {
                let (x, y) = t
                    .point()
                    .map_or((-1, -1), |(c, r)| (i32::from(c), i32::from(r)));
                HistoryEntry {
                    x,
                    y,
                    player: t.stone,
                }
            })
            .collect();
        SuggestRequest {
            board_state,
            board_size: goban.cols(),
            player,
            move_history,
            level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub x: i32,
    pub y: i32,
}

impl Suggestion {
    pub fn to_point(self, board_size: u8) -> Result<Point, BotError> {
        let size = i32::from(board_size);
        if (0..size).contains(&self.x) && (0..size).contains(&self.y) {
            Ok((self.x as u8, self.y as u8))
        } else {
            Err(BotError::Engine(format!(
                "suggestion ({}, {}) is off a {board_size}x{board_size} board",
                self.x, self.y
            )))
        }
    }
}

pub trait ExternalEngine {
    /// Whether the engine should be consulted at all.
    fn is_available(&self) -> bool {
        true
    }

    fn suggest(
        &self,
        request: &SuggestRequest,
    ) -> impl Future<Output = Result<Point, BotError>> + Send;
}

/// No external engine: never consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEngine;

impl ExternalEngine for NoEngine {
    fn is_available(&self) -> bool {
        false
    }

    async fn suggest(&self, _request: &SuggestRequest) -> Result<Point, BotError> {
        Err(BotError::Engine("no external engine configured".to_string()))
    }
}

/// Engine reached over HTTP: `POST {url}` with a [`SuggestRequest`], answered by a [`Suggestion`].
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: reqwest::Client,
    url: String,
}

impl HttpEngine {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BotError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpEngine {
            client,
            url: url.into(),
        })
    }
}

impl ExternalEngine for HttpEngine {
    async fn suggest(&self, request: &SuggestRequest) -> Result<Point, BotError> {
        let suggestion: Suggestion = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        suggestion.to_point(request.board_size)
    }
}

#[cfg(test)]
mod tests {
    use go_engine::{Goban, Turn};

    use super::*;
    use crate::session::GameVariant;

    #[test]
    fn request_uses_the_perceived_board() {
        let mut session = GameSession::new(5, GameVariant::Hidden);
        session.goban = Goban::from_layout(&["+++++", "+B+++", "+++W+", "+++++", "+++++"]);
        session.moves = vec![
            Turn::play(Stone::Black, (1, 1)),
            Turn::play(Stone::White, (3, 2)),
            Turn::pass(Stone::Black),
        ];
        session.hidden.hidden_moves.insert(1);
        session.turn = Stone::White;

        // White sees its own hidden stone.
        let request = SuggestRequest::from_session(&session, Some(3));
        assert_eq!(request.board_state[2][3], -1);
        assert_eq!(request.move_history.len(), 3);

        session.turn = Stone::Black;
        let request = SuggestRequest::from_session(&session, None);
        assert_eq!(request.board_state[2][3], 0);
        assert_eq!(request.board_state[1][1], 1);
        assert_eq!(request.move_history.len(), 2);
        assert_eq!(request.move_history[1], HistoryEntry {
            x: -1,
            y: -1,
            player: Stone::Black
        });
    }

    #[test]
    fn request_json_is_camel_case() {
        let session = GameSession::new(9, GameVariant::Standard);
        let json = serde_json::to_value(SuggestRequest::from_session(&session, Some(4))).unwrap();
        assert_eq!(json["boardSize"], 9);
        assert_eq!(json["player"], 1);
        assert_eq!(json["level"], 4);
        assert!(json["moveHistory"].as_array().unwrap().is_empty());
        assert_eq!(json["boardState"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn off_board_suggestion_is_an_error() {
        assert_eq!(Suggestion { x: 2, y: 8 }.to_point(9).unwrap(), (2, 8));
        assert!(Suggestion { x: 9, y: 0 }.to_point(9).is_err());
        assert!(Suggestion { x: -1, y: -1 }.to_point(9).is_err());
    }
}
