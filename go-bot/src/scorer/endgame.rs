//! Endgame boundary play and goal-driven bonuses.

use super::{Goal, Phase, Probe, Situation};

/// Boundary moves once most of the board is settled.
pub(super) fn boundary(sit: &Situation, probe: &Probe) -> f64 {
    if sit.phase != Phase::Endgame {
        return 0.0;
    }
    let goban = sit.goban;
    let neighbors = goban.neighbors(probe.point);
    let touches_own = neighbors.iter().any(|&n| goban.stone_at(n) == Some(sit.stone));
    let touches_opp = neighbors.iter().any(|&n| goban.stone_at(n) == Some(sit.opp()));

    let mut score = 0.0;
    if touches_own && touches_opp {
        score += 70.0;
        if goban.line(probe.point) == 0 {
            // first-line hane
            score += 30.0;
        }
    }
    match sit.region_at(probe.point) {
        Some(region) if region.owner().is_none() && region.size() == 1 => score += 10.0,
        Some(region) if region.owner() == Some(sit.opp()) && region.size() <= 8 && touches_own => {
            score += 40.0
        }
        _ => {}
    }
    score
}

/// Bonus toward the session's win condition, scaled by the profile's win focus.
pub(super) fn win_focus(sit: &Situation, probe: &Probe) -> f64 {
    let value = f64::from(probe.capture_value);
    let raw = match sit.goal {
        Goal::Territory => 0.0,
        Goal::Captures { remaining } => {
            if probe.capture_value >= remaining {
                3000.0
            } else {
                value * 200.0
            }
        }
        Goal::Attack {
            remaining,
            turns_left,
        } => {
            if probe.capture_value >= remaining {
                3000.0
            } else {
                value * 200.0 * (1.0 + 1.0 / f64::from(turns_left.max(1)))
            }
        }
        Goal::Survive { .. } => {
            let exposed = if probe.group.liberty_count() <= 2 && !probe.is_capture() {
                -200.0
            } else {
                0.0
            };
            exposed + probe.rescued as f64 * 150.0
        }
    };
    raw * sit.profile.win_focus
}
