//! Territory and fighting evaluators.

use super::{Probe, Situation, enclosed_territory};

/// Blocking next to an opponent stone that is reaching toward open space.
pub(super) fn defensive(sit: &Situation, probe: &Probe) -> f64 {
    let goban = sit.goban;
    let blocks = goban.neighbors(probe.point).iter().any(|&n| {
        goban.stone_at(n).is_none()
            && goban
                .neighbors(n)
                .iter()
                .any(|&m| goban.stone_at(m) == Some(sit.opp()))
    });
    if blocks {
        120.0 * sit.profile.tendencies.territory
    } else {
        0.0
    }
}

/// Negative when the move fills a small region the mover already owns.
pub(super) fn own_fill(sit: &Situation, probe: &Probe) -> f64 {
    match sit.region_at(probe.point) {
        Some(region)
            if region.owner() == Some(sit.stone) && region.size() <= sit.enclosed_limit() =>
        {
            -400.0 * (0.5 + sit.profile.tendencies.territory)
        }
        _ => 0.0,
    }
}

/// Change in enclosed territory. Weak profiles only notice their own gain;
/// territory-combat profiles also count what the opponent loses.
pub(super) fn strategic(sit: &Situation, probe: &Probe) -> f64 {
    let limit = sit.enclosed_limit();
    let weight = sit.profile.tendencies.territory;
    let own_before = enclosed_territory(sit.goban, sit.stone, limit) as f64;
    let own_after = enclosed_territory(probe.after, sit.stone, limit) as f64;

    if !sit.profile.knowledge.territory_combat {
        if own_after <= own_before {
            return 0.0;
        }
        let reach = if own_after >= 10.0 { 80.0 } else { 0.0 };
        return (40.0 + reach) * weight;
    }

    let opp_before = enclosed_territory(sit.goban, sit.opp(), limit) as f64;
    let opp_after = enclosed_territory(probe.after, sit.opp(), limit) as f64;
    let delta = (own_after - own_before) + (opp_before - opp_after);
    (15.0 * delta).clamp(-300.0, 300.0) * weight
}

/// Liberty pressure on adjacent opponent groups and room for the mover's own stones.
pub(super) fn combat(sit: &Situation, probe: &Probe) -> f64 {
    let pressure: f64 = probe
        .opp_adjacent
        .iter()
        .filter(|g| !g.in_atari() && g.liberty_count() <= 4)
        .map(|g| (5 - g.liberty_count()) as f64 * 25.0)
        .sum();
    let room = (probe.group.liberty_count() as f64 - 2.0).clamp(0.0, 3.0) * 10.0;
    (pressure + room) * sit.profile.tendencies.combat
}
