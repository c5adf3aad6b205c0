//! Rescue, capture and atari evaluators.

use go_engine::MoveOptions;

use super::{Probe, Situation};

/// Saving own stones from atari. Zero unless the rescued groups end with two or more liberties.
pub(super) fn rescue(probe: &Probe) -> f64 {
    if probe.rescued == 0 {
        return 0.0;
    }
    5000.0 + 500.0 * probe.rescued as f64
}

pub(super) fn capture(probe: &Probe) -> f64 {
    if probe.capture_value == 0 {
        return 0.0;
    }
    5000.0 + 500.0 * f64::from(probe.capture_value)
}

/// Capturing stones that were themselves putting one of our groups in atari.
pub(super) fn counter_capture(sit: &Situation, probe: &Probe) -> f64 {
    if !probe.is_capture() {
        return 0.0;
    }
    let threatened = sit.own_groups.iter().filter(|g| g.in_atari()).any(|g| {
        g.stones.iter().any(|&s| {
            sit.goban
                .neighbors(s)
                .iter()
                .any(|n| probe.captured.contains(n))
        })
    });
    if threatened { 400.0 } else { 0.0 }
}

/// Putting opponent groups into atari. Profiles with atari judgment check
/// whether the target simply walks out.
pub(super) fn atari_threat(sit: &Situation, probe: &Probe) -> f64 {
    let judge = sit.profile.knowledge.atari_judgment;
    let weight = 0.5 + 0.5 * sit.profile.tendencies.combat;
    probe
        .opp_adjacent
        .iter()
        .filter(|g| g.in_atari())
        .map(|g| {
            let base = 600.0 + 100.0 * g.size() as f64;
            if !judge {
                return base;
            }
            base * escape_factor(sit, probe, g.liberties[0])
        })
        .sum::<f64>()
        * weight
}

/// How much an atari is worth once the opponent extends at `liberty`.
fn escape_factor(sit: &Situation, probe: &Probe, liberty: go_engine::Point) -> f64 {
    let extended = probe.after.process_move(
        liberty,
        sit.opp(),
        None,
        sit.move_index + 1,
        &MoveOptions::default(),
    );
    match extended {
        Err(_) => 1.5,
        Ok(placed) if !placed.captured.is_empty() => 0.3,
        Ok(placed) => match placed.liberties.len() {
            0 | 1 => 1.5,
            2 => 0.8,
            _ => 0.3,
        },
    }
}
