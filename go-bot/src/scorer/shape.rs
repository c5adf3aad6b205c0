//! Shape evaluators: self-atari, snapback, connection, escape, eyes.

use go_engine::{Goban, Group, MoveOptions, Point, Stone};

use super::{Probe, Situation};

/// The mover's own group is left with a single liberty and nothing was gained.
pub(super) fn is_self_atari(probe: &Probe) -> bool {
    probe.group.liberty_count() == 1 && !probe.is_capture() && probe.rescued == 0
}

/// A single-stone throw-in whose capture leaves the capturer in atari.
pub(super) fn is_snapback(sit: &Situation, probe: &Probe) -> bool {
    if probe.group.size() != 1 || probe.group.liberty_count() != 1 || probe.is_capture() {
        return false;
    }
    let take_at = probe.group.liberties[0];
    let Ok(taken) = probe.after.process_move(
        take_at,
        sit.opp(),
        None,
        sit.move_index + 1,
        &MoveOptions::default(),
    ) else {
        return false;
    };
    if !taken.captured.contains(&probe.point) {
        return false;
    }
    taken
        .goban
        .group_at(take_at)
        .is_some_and(|g| g.in_atari() && g.size() >= 2)
}

/// Joining separate own groups, or cutting opponent groups apart.
pub(super) fn connection(sit: &Situation, probe: &Probe) -> f64 {
    let own = sit.goban.adjacent_groups(probe.point, sit.stone);
    let mut score = 0.0;
    if own.len() >= 2 {
        score += 100.0 * (own.len() - 1) as f64;
        if own.iter().any(|g| g.liberty_count() <= 2) {
            score += 100.0;
        }
    }
    let opp = sit.goban.adjacent_groups(probe.point, sit.opp());
    if opp.len() >= 2 && probe.group.liberty_count() >= 2 {
        score += 120.0 * (opp.len() - 1) as f64 * sit.profile.tendencies.combat;
    }
    score
}

/// Lengthening an own group that was down to two liberties.
pub(super) fn escape(sit: &Situation, probe: &Probe) -> f64 {
    let weight = 0.5 + 0.5 * sit.profile.tendencies.movement;
    sit.goban
        .adjacent_groups(probe.point, sit.stone)
        .iter()
        .filter(|g| g.liberty_count() == 2)
        .filter(|_| probe.group.liberty_count() >= 3)
        .map(|g| 250.0 + 40.0 * g.size() as f64)
        .sum::<f64>()
        * weight
}

/// Extending weak groups and one-space jumps.
pub(super) fn movement(sit: &Situation, probe: &Probe) -> f64 {
    let mut score = 0.0;
    let weak = sit
        .goban
        .adjacent_groups(probe.point, sit.stone)
        .iter()
        .any(|g| g.liberty_count() == 3);
    if weak && probe.group.liberty_count() >= 4 {
        score += 80.0;
    }
    if is_one_space_jump(sit.goban, probe.point, sit.stone) {
        score += 40.0;
    }
    score * sit.profile.tendencies.movement
}

fn is_one_space_jump(goban: &Goban, (c, r): Point, stone: Stone) -> bool {
    let touching = goban
        .neighbors((c, r))
        .iter()
        .any(|&n| goban.stone_at(n).is_some());
    if touching {
        return false;
    }
    [(-2i16, 0i16), (2, 0), (0, -2), (0, 2)].iter().any(|&(dc, dr)| {
        let (tc, tr) = (c as i16 + dc, r as i16 + dr);
        tc >= 0
            && tr >= 0
            && goban.on_board((tc as u8, tr as u8))
            && goban.stone_at((tc as u8, tr as u8)) == Some(stone)
    })
}

/// Making eyes for unsettled own groups and taking vital points of weak opponent shapes.
pub(super) fn life_death(sit: &Situation, probe: &Probe) -> f64 {
    let mut score = 0.0;

    if !probe.group.stones.iter().any(|p| sit.alive_own.contains(p)) {
        let before: usize = sit
            .goban
            .adjacent_groups(probe.point, sit.stone)
            .iter()
            .map(|g| eye_count(sit.goban, g))
            .sum();
        let after = eye_count(probe.after, &probe.group);
        if after > before {
            score += 150.0 * (after - before) as f64;
        }
    }

    let vital = sit
        .region_at(probe.point)
        .filter(|region| region.owner() == Some(sit.opp()) && region.size() <= 6);
    if let Some(region) = vital {
        let unsettled = sit.opp_groups.iter().any(|g| {
            !sit.alive_opp.contains(&g.stones[0])
                && g.liberties.iter().any(|l| region.points.contains(l))
        });
        if unsettled {
            score += 200.0;
        }
    }

    score * sit.profile.tendencies.life_death
}

/// Liberties of `group` that are single-point eyes.
fn eye_count(goban: &Goban, group: &Group) -> usize {
    group
        .liberties
        .iter()
        .filter(|&&l| {
            goban
                .neighbors(l)
                .iter()
                .all(|&n| goban.stone_at(n) == Some(group.stone))
        })
        .count()
}
