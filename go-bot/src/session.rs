//! Session snapshot consumed by the bot, and the deltas it emits.

use std::collections::{HashMap, HashSet};

use go_engine::{Captures, GoError, Goban, MoveOptions, Placement, Point, Stone, Turn};
use serde::{Deserialize, Serialize};

use crate::clock::{ClockState, TimeControl};

/// Rule variant of a session, dispatched once per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameVariant {
    #[default]
    Standard,
    /// Some stones are placed hidden and stay invisible to the opponent until revealed.
    Hidden,
    /// First to `capture_target` weighted capture points wins.
    CaptureTarget,
    /// The attacker must reach `capture_target` within `turn_budget` of its own moves.
    Survival { turn_budget: u32, survivor: Stone },
}

/// Hidden-stone bookkeeping: which moves were hidden and which points are
/// permanently visible to both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenStones {
    pub hidden_moves: HashSet<usize>,
    pub revealed: HashSet<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    Resignation,
    CaptureTarget,
    SurvivalBudget,
    Score,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// `None` on a draw.
    pub winner: Option<Stone>,
    pub reason: WinReason,
    pub result: String,
}

impl GameOutcome {
    pub fn win(winner: Stone, reason: WinReason) -> Self {
        let suffix = match reason {
            WinReason::Resignation => "R",
            WinReason::CaptureTarget => "C",
            WinReason::SurvivalBudget => "S",
            WinReason::Timeout => "T",
            WinReason::Score => "?",
        };
        GameOutcome {
            winner: Some(winner),
            reason,
            result: format!("{}+{suffix}", winner.letter()),
        }
    }
}

/// A full game session as seen by the bot. The true board lives in `goban`,
/// including its ko state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub goban: Goban,
    pub turn: Stone,
    pub moves: Vec<Turn>,
    pub hidden: HiddenStones,
    /// Variant-specific stones worth double when captured.
    pub pattern_stones: HashSet<Point>,
    /// Weighted capture points per color.
    pub scores: Captures,
    pub variant: GameVariant,
    pub capture_target: Option<u32>,
    pub komi: f64,
    pub time_control: TimeControl,
    pub clock: Option<ClockState>,
    pub result: Option<GameOutcome>,
}

impl GameSession {
    pub fn new(size: u8, variant: GameVariant) -> Self {
        Self::from_goban(Goban::with_dimensions(size, size), Stone::Black, variant)
    }

    /// Start from an arbitrary position with `turn` to move.
    pub fn from_goban(goban: Goban, turn: Stone, variant: GameVariant) -> Self {
        GameSession {
            goban,
            turn,
            moves: Vec::new(),
            hidden: HiddenStones::default(),
            pattern_stones: HashSet::new(),
            scores: Captures::new(),
            variant,
            capture_target: None,
            komi: 6.5,
            time_control: TimeControl::None,
            clock: None,
            result: None,
        }
    }

    pub fn with_capture_target(mut self, target: u32) -> Self {
        self.capture_target = Some(target);
        self
    }

    pub fn with_time_control(mut self, tc: TimeControl) -> Self {
        self.clock = ClockState::new(&tc);
        self.time_control = tc;
        self
    }

    /// Index the next move will get in the history.
    pub fn move_index(&self) -> usize {
        self.moves.len()
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.moves.last()
    }

    pub fn moves_by(&self, stone: Stone) -> u32 {
        self.moves
            .iter()
            .filter(|t| t.stone == stone && !t.is_resign())
            .count() as u32
    }

    pub fn default_options(&self) -> MoveOptions {
        MoveOptions {
            single_player: self.variant == GameVariant::Hidden,
            ..MoveOptions::default()
        }
    }

    /// Apply a move to the true board without committing it.
    pub fn try_place(&self, point: Point, stone: Stone) -> Result<Placement, GoError> {
        self.goban.process_move(
            point,
            stone,
            self.goban.ko().as_ref(),
            self.move_index(),
            &self.default_options(),
        )
    }

    /// Stones of `owner` that were placed hidden and are still unrevealed.
    pub fn unrevealed_stones(&self, owner: Stone) -> HashSet<Point> {
        if self.hidden.hidden_moves.is_empty() {
            return HashSet::new();
        }
        let mut last_play: HashMap<Point, usize> = HashMap::new();
        for (index, turn) in self.moves.iter().enumerate() {
            if let Some(p) = turn.point() {
                last_play.insert(p, index);
            }
        }
        last_play
            .into_iter()
            .filter(|&(p, index)| {
                self.hidden.hidden_moves.contains(&index)
                    && self.moves[index].stone == owner
                    && self.goban.stone_at(p) == Some(owner)
                    && !self.hidden.revealed.contains(&p)
            })
            .map(|(p, _)| p)
            .collect()
    }

    /// Whether the stone at `point` was placed by a hidden move.
    pub fn was_hidden(&self, point: Point) -> bool {
        self.moves
            .iter()
            .enumerate()
            .rev()
            .find(|(_, t)| t.point() == Some(point))
            .is_some_and(|(index, _)| self.hidden.hidden_moves.contains(&index))
    }

    /// The board as `viewer` perceives it: the opponent's unrevealed hidden
    /// stones are removed in the hidden variant.
    pub fn perceived_goban(&self, viewer: Stone) -> Goban {
        match self.variant {
            GameVariant::Hidden => self.goban.without(self.unrevealed_stones(viewer.opp())),
            _ => self.goban.clone(),
        }
    }

    /// Move history as `viewer` may know it: the opponent's unrevealed hidden
    /// moves are dropped.
    pub fn perceived_moves(&self, viewer: Stone) -> Vec<Turn> {
        let unseen = self.unrevealed_stones(viewer.opp());
        self.moves
            .iter()
            .enumerate()
            .filter(|(index, t)| {
                !(t.stone != viewer
                    && self.hidden.hidden_moves.contains(index)
                    && t.point().is_some_and(|p| unseen.contains(&p)))
            })
            .map(|(_, t)| t.clone())
            .collect()
    }

    /// Capture points earned for removing the stones at `points`:
    /// hidden ×5, pattern ×2, otherwise ×1.
    pub fn capture_value(&self, points: &[Point]) -> u32 {
        points
            .iter()
            .map(|&p| {
                if self.was_hidden(p) {
                    5
                } else if self.pattern_stones.contains(&p) {
                    2
                } else {
                    1
                }
            })
            .sum()
    }
}
