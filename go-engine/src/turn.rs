use serde::{Deserialize, Serialize};

use crate::Point;
use crate::stone::Stone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Play,
    Pass,
    Resign,
}

/// One entry of a game's move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub kind: Move,
    pub stone: Stone,
    pub pos: Option<Point>,
}

impl Turn {
    pub fn play(stone: Stone, point: Point) -> Self {
        Turn {
            kind: Move::Play,
            stone,
            pos: Some(point),
        }
    }

    pub fn pass(stone: Stone) -> Self {
        Turn {
            kind: Move::Pass,
            stone,
            pos: None,
        }
    }

    pub fn resign(stone: Stone) -> Self {
        Turn {
            kind: Move::Resign,
            stone,
            pos: None,
        }
    }

    pub fn is_play(&self) -> bool {
        self.kind == Move::Play
    }

    pub fn is_pass(&self) -> bool {
        self.kind == Move::Pass
    }

    pub fn is_resign(&self) -> bool {
        self.kind == Move::Resign
    }

    /// The played point, if this turn placed a stone.
    pub fn point(&self) -> Option<Point> {
        if self.is_play() { self.pos } else { None }
    }
}
