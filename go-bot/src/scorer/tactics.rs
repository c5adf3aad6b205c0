//! Reading: ladders and nets.

use go_engine::{Goban, MoveOptions, Point, Stone};

use super::{Probe, Situation};

/// Whether `hunter` captures the group at `prey` by repeated ataris.
/// `budget` bounds the number of plies read.
pub fn ladder_captures(goban: &Goban, prey: Point, hunter: Stone, budget: usize) -> bool {
    let Some(group) = goban.group_at(prey) else {
        return true;
    };
    if group.liberty_count() >= 3 || budget == 0 {
        return false;
    }

    if group.liberty_count() == 2 {
        return group.liberties.iter().any(|&lib| match goban.play(lib, hunter) {
            Ok(next) => {
                next.liberties(lib).len() >= 2 && ladder_captures(&next, prey, hunter, budget - 1)
            }
            Err(_) => false,
        });
    }

    // Prey in atari: it escapes by capturing a hunter stone in atari.
    let counter = group.stones.iter().any(|&s| {
        goban
            .adjacent_groups(s, hunter)
            .iter()
            .any(|g| g.in_atari())
    });
    if counter {
        return false;
    }
    match goban.play(group.liberties[0], group.stone) {
        Err(_) => true,
        Ok(next) => match next.liberties(prey).len() {
            0 | 1 => true,
            2 => ladder_captures(&next, prey, hunter, budget - 1),
            _ => false,
        },
    }
}

/// Ladder and net reading on the groups the move touches.
pub(super) fn advanced(sit: &Situation, probe: &Probe) -> f64 {
    let budget = sit.goban.area();
    let mut score = 0.0;
    for g in &probe.opp_adjacent {
        if g.in_atari() {
            if ladder_captures(probe.after, g.stones[0], sit.stone, budget) {
                score += 700.0;
            }
        } else if g.liberty_count() == 2 && g.size() <= 3 && is_net(sit, probe.after, &g.liberties)
        {
            score += 350.0;
        }
    }
    score
}

/// Every extension by the opponent leaves it with at most two liberties.
fn is_net(sit: &Situation, after: &Goban, liberties: &[Point]) -> bool {
    liberties.iter().all(|&lib| {
        match after.process_move(lib, sit.opp(), None, sit.move_index + 1, &MoveOptions::default()) {
            Err(_) => true,
            Ok(placed) => placed.captured.is_empty() && placed.liberties.len() <= 2,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_working_ladder() {
        // White (1,1) has two liberties; the chase ends on the left edge.
        let goban = Goban::from_layout(&[
            "+B+++++", "BW+++++", "++B++++", "+++++++", "+++++++", "+++++++", "+++++++",
        ]);
        assert!(ladder_captures(&goban, (1, 1), Stone::Black, 49));
    }

    #[test]
    fn prey_escapes_by_capturing_a_hunter() {
        // Black (1,0) is in atari from White (2,0).
        let goban = Goban::from_layout(&[
            "+BW++++", "BW+++++", "++B++++", "+++++++", "+++++++", "+++++++", "+++++++",
        ]);
        assert!(!ladder_captures(&goban, (1, 1), Stone::Black, 49));
    }

    #[test]
    fn open_group_is_not_laddered() {
        let goban = Goban::from_layout(&["+++++", "+++++", "++W++", "+++++", "+++++"]);
        assert!(!ladder_captures(&goban, (2, 2), Stone::Black, 25));
    }
}
