use chrono::{DateTime, Utc};
use go_engine::Stone;
use serde::{Deserialize, Serialize};

/// Time control for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeControl {
    #[default]
    None,
    Fischer {
        main_time_secs: i32,
        increment_secs: i32,
    },
    Byoyomi {
        main_time_secs: i32,
        period_time_secs: i32,
        periods: i32,
    },
    Correspondence {
        days_per_move_secs: i32,
    },
}

impl TimeControl {
    pub fn is_none(&self) -> bool {
        matches!(self, TimeControl::None)
    }
}

/// One player's remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerClock {
    pub remaining_ms: i64,
    pub periods: i32,
}

/// Clock values for both players. The side to move is owned by the session,
/// not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    pub black: PlayerClock,
    pub white: PlayerClock,
    pub last_move_at: Option<DateTime<Utc>>,
}

impl ClockState {
    /// Initial clock for a time control, or `None` for untimed play.
    pub fn new(tc: &TimeControl) -> Option<Self> {
        let (main_secs, periods) = match *tc {
            TimeControl::None => return None,
            TimeControl::Fischer { main_time_secs, .. } => (main_time_secs, 0),
            TimeControl::Byoyomi {
                main_time_secs,
                periods,
                ..
            } => (main_time_secs, periods),
            TimeControl::Correspondence { days_per_move_secs } => (days_per_move_secs, 0),
        };
        let player = PlayerClock {
            remaining_ms: main_secs as i64 * 1000,
            periods,
        };
        Some(ClockState {
            black: player,
            white: player,
            last_move_at: None,
        })
    }

    pub fn player(&self, stone: Stone) -> &PlayerClock {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    fn player_mut(&mut self, stone: Stone) -> &mut PlayerClock {
        match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }

    /// Charge `stone` for the time since the previous move, apply increment or
    /// period rules, then stamp `now`. The very first move only starts the clock.
    pub fn process_move(&mut self, stone: Stone, tc: &TimeControl, now: DateTime<Utc>) {
        if let Some(last) = self.last_move_at {
            let elapsed_ms = (now - last).num_milliseconds().max(0);
            self.deduct(stone, elapsed_ms, tc);
        }
        self.last_move_at = Some(now);
    }

    fn deduct(&mut self, stone: Stone, elapsed_ms: i64, tc: &TimeControl) {
        let clock = self.player_mut(stone);

        match *tc {
            TimeControl::Fischer { increment_secs, .. } => {
                clock.remaining_ms -= elapsed_ms;
                clock.remaining_ms += increment_secs as i64 * 1000;
            }
            TimeControl::Byoyomi {
                period_time_secs, ..
            } => {
                let period_ms = period_time_secs as i64 * 1000;
                if clock.remaining_ms > 0 {
                    clock.remaining_ms -= elapsed_ms;
                    if clock.remaining_ms < 0 {
                        // main time ran out mid-move; the overflow eats into a period
                        let overflow = -clock.remaining_ms;
                        clock.remaining_ms = period_ms - overflow;
                        if clock.remaining_ms < 0 {
                            clock.periods -= 1;
                            clock.remaining_ms = period_ms;
                        }
                    }
                } else if elapsed_ms <= period_ms {
                    clock.remaining_ms = period_ms;
                } else {
                    clock.periods -= 1;
                    clock.remaining_ms = period_ms;
                }
            }
            TimeControl::Correspondence { days_per_move_secs } => {
                clock.remaining_ms = days_per_move_secs as i64 * 1000;
            }
            TimeControl::None => {}
        }
    }

    /// Remaining ms for `stone`, counting the running time if `stone` is on move.
    pub fn remaining_ms(&self, stone: Stone, to_move: Stone, now: DateTime<Utc>) -> i64 {
        let base = self.player(stone).remaining_ms;
        match self.last_move_at {
            Some(last) if stone == to_move => base - (now - last).num_milliseconds().max(0),
            _ => base,
        }
    }

    /// True if `stone` has no time left, byo-yomi periods included.
    pub fn is_flagged(&self, stone: Stone, to_move: Stone, tc: &TimeControl, now: DateTime<Utc>) -> bool {
        let remaining = self.remaining_ms(stone, to_move, now);
        let total = match *tc {
            TimeControl::Byoyomi {
                period_time_secs, ..
            } => remaining + self.player(stone).periods as i64 * period_time_secs as i64 * 1000,
            _ => remaining,
        };
        total <= 0
    }
}
