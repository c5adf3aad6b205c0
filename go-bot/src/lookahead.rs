//! Bounded reply reading for the top urgent candidates.

use go_engine::{Goban, Point, Stone};

use crate::movegen::{Candidate, MoveRequest, fast_scan};
use crate::profile::SkillProfile;

/// Branching and depth bounds for look-ahead. Depth is further capped by the
/// profile's calculation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAhead {
    pub max_branches: usize,
    pub max_depth: u8,
}

impl Default for LookAhead {
    fn default() -> Self {
        LookAhead {
            max_branches: 5,
            max_depth: 4,
        }
    }
}

impl LookAhead {
    pub fn new(max_branches: usize, max_depth: u8) -> Self {
        LookAhead {
            max_branches: max_branches.max(1),
            max_depth,
        }
    }

    pub fn depth_for(&self, profile: &SkillProfile) -> u8 {
        profile.calculation_depth.min(self.max_depth)
    }

    /// Chance in `[0, 1]` that the group at `point` survives the attacker's ataris.
    pub fn survival(&self, goban: &Goban, point: Point, owner: Stone, depth: u8) -> f64 {
        self.read_survival(goban, point, owner, depth, &mut 0)
    }

    /// Average material swing the side to move can force over the next `depth`
    /// plies, read over the top `max_branches` replies.
    pub fn reply_pressure(&self, goban: &Goban, to_move: Stone, move_index: usize, depth: u8) -> f64 {
        self.read_replies(goban, to_move, move_index, depth, &mut 0)
    }

    /// `nodes` counts the positions expanded.
    fn read_survival(
        &self,
        goban: &Goban,
        point: Point,
        owner: Stone,
        depth: u8,
        nodes: &mut usize,
    ) -> f64 {
        let Some(group) = goban.group_at(point) else {
            return 0.0;
        };
        match group.liberty_count() {
            0 => return 0.0,
            n if n >= 3 => return 1.0,
            n if depth == 0 => return if n == 2 { 0.7 } else { 0.2 },
            _ => {}
        }
        *nodes += 1;

        let mut worst: f64 = 1.0;
        for &lib in group.liberties.iter().take(self.max_branches) {
            let Ok(attacked) = goban.play(lib, owner.opp()) else {
                continue;
            };
            let value = match attacked.group_at(point) {
                None => 0.0,
                Some(g) if !g.in_atari() => {
                    self.read_survival(&attacked, point, owner, depth - 1, nodes)
                }
                Some(g) => match attacked.play(g.liberties[0], owner) {
                    Ok(saved) => 0.9 * self.read_survival(&saved, point, owner, depth - 1, nodes),
                    Err(_) => 0.0,
                },
            };
            worst = worst.min(value);
        }
        worst
    }

    /// `nodes` counts the replies read.
    fn read_replies(
        &self,
        goban: &Goban,
        to_move: Stone,
        move_index: usize,
        depth: u8,
        nodes: &mut usize,
    ) -> f64 {
        if depth == 0 {
            return 0.0;
        }
        let req = MoveRequest::new(goban, to_move, move_index);
        let before = AtariCount::of(goban, to_move);
        let mut replies: Vec<(f64, Candidate)> = fast_scan(&req)
            .into_iter()
            .map(|c| (exchange(&before, &c, to_move), c))
            .collect();
        if replies.is_empty() {
            return 0.0;
        }
        replies.sort_by(|a, b| b.0.total_cmp(&a.0));
        replies.truncate(self.max_branches);
        *nodes += replies.len();

        let total: f64 = replies
            .iter()
            .map(|(gain, c)| {
                let next = &c.placed.goban;
                gain - 0.5 * self.read_replies(next, to_move.opp(), move_index + 1, depth - 1, nodes)
            })
            .sum();
        total / replies.len() as f64
    }
}

/// Groups in atari for each side, from the mover's point of view.
struct AtariCount {
    own: usize,
    opp: usize,
}

impl AtariCount {
    fn of(goban: &Goban, mover: Stone) -> Self {
        let count = |s: Stone| goban.groups(s).iter().filter(|g| g.in_atari()).count();
        AtariCount {
            own: count(mover),
            opp: count(mover.opp()),
        }
    }
}

fn exchange(before: &AtariCount, cand: &Candidate, mover: Stone) -> f64 {
    let after = AtariCount::of(&cand.placed.goban, mover);
    cand.placed.captured.len() as f64 * 100.0 + (after.opp as f64 - before.opp as f64) * 40.0
        - (after.own as f64 - before.own as f64) * 40.0
}
