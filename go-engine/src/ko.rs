use serde::{Deserialize, Serialize};

use crate::Point;
use crate::stone::Stone;

/// Ko restriction: `illegal` may not play at `pos` on the move right after
/// `created_at` (the index of the capturing move).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ko {
    pub pos: Point,
    pub illegal: Stone,
    pub created_at: usize,
}

impl Ko {
    /// Whether this ko forbids `stone` at `point` for the move numbered `move_index`.
    /// With `ignore_index` the restriction holds until the ko is replaced or cleared.
    pub fn forbids(&self, point: Point, stone: Stone, move_index: usize, ignore_index: bool) -> bool {
        self.pos == point
            && self.illegal == stone
            && (ignore_index || move_index == self.created_at + 1)
    }
}
