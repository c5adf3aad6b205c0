//! Opening knowledge and directional play.

use go_engine::{Goban, Point};

use super::{Phase, Probe, Situation};

/// Corner-relative points worth taking in an empty corner.
static CORNER_POINTS: &[((u8, u8), f64)] = &[
    ((3, 3), 90.0),
    ((2, 3), 85.0),
    ((3, 2), 85.0),
    ((2, 2), 60.0),
    ((4, 2), 50.0),
    ((2, 4), 50.0),
    ((4, 3), 45.0),
    ((3, 4), 45.0),
];

/// Follow-ups to a corner stone: `(anchor, reply, approach value, enclosure value)`.
/// Approach applies when the anchor is the opponent's, enclosure when it is ours.
static CORNER_REPLIES: &[((u8, u8), (u8, u8), f64, f64)] = &[
    ((3, 3), (5, 2), 70.0, 55.0),
    ((3, 3), (2, 5), 70.0, 55.0),
    ((3, 3), (2, 2), 50.0, 0.0),
    ((2, 3), (4, 2), 75.0, 60.0),
    ((2, 3), (4, 3), 65.0, 0.0),
    ((2, 3), (2, 5), 0.0, 60.0),
    ((3, 2), (2, 4), 75.0, 60.0),
    ((3, 2), (3, 4), 65.0, 0.0),
    ((3, 2), (5, 2), 0.0, 60.0),
    ((2, 2), (3, 5), 55.0, 45.0),
    ((2, 2), (5, 3), 55.0, 45.0),
];

/// Corner size used to decide which corner a point belongs to.
const CORNER_SPAN: u8 = 6;

/// Map a board point into the frame of `corner` (0..4), or `None` if outside it.
fn corner_local(goban: &Goban, (c, r): Point, corner: u8) -> Option<(u8, u8)> {
    let (cols, rows) = (goban.cols(), goban.rows());
    let x = if corner & 1 == 0 { c } else { cols - 1 - c };
    let y = if corner & 2 == 0 { r } else { rows - 1 - r };
    (x < CORNER_SPAN && y < CORNER_SPAN).then_some((x, y))
}

fn corner_global(goban: &Goban, (x, y): (u8, u8), corner: u8) -> Option<Point> {
    let (cols, rows) = (goban.cols(), goban.rows());
    if x >= cols || y >= rows {
        return None;
    }
    let c = if corner & 1 == 0 { x } else { cols - 1 - x };
    let r = if corner & 2 == 0 { y } else { rows - 1 - y };
    Some((c, r))
}

fn corner_is_empty(goban: &Goban, corner: u8) -> bool {
    goban
        .points()
        .filter(|&p| corner_local(goban, p, corner).is_some())
        .all(|p| goban.stone_at(p).is_none())
}

fn opening_board(sit: &Situation) -> bool {
    sit.phase == Phase::Opening && sit.goban.cols() >= 9 && sit.goban.rows() >= 9
}

/// Line preference in the opening: third and fourth lines, away from the edge.
pub(super) fn fuseki(sit: &Situation, probe: &Probe) -> f64 {
    if !opening_board(sit) {
        return 0.0;
    }
    let line = match sit.goban.line(probe.point) {
        0 => -80.0,
        1 => -30.0,
        2 => 50.0,
        3 => 45.0,
        _ => 10.0,
    };
    let empty_corner = (0..4).any(|corner| {
        corner_local(sit.goban, probe.point, corner).is_some() && corner_is_empty(sit.goban, corner)
    });
    line + if empty_corner { 30.0 } else { 0.0 }
}

/// Standard corner openings, approaches and enclosures.
pub(super) fn joseki(sit: &Situation, probe: &Probe) -> f64 {
    if !opening_board(sit) {
        return 0.0;
    }
    let goban = sit.goban;
    let mut best: f64 = 0.0;
    for corner in 0..4 {
        let Some(local) = corner_local(goban, probe.point, corner) else {
            continue;
        };
        if corner_is_empty(goban, corner) {
            if let Some(&(_, value)) = CORNER_POINTS.iter().find(|(p, _)| *p == local) {
                best = best.max(value);
            }
            continue;
        }
        for &(anchor, reply, approach, enclosure) in CORNER_REPLIES {
            if reply != local {
                continue;
            }
            let owner = corner_global(goban, anchor, corner).and_then(|p| goban.stone_at(p));
            let value = match owner {
                Some(s) if s == sit.stone => enclosure,
                Some(_) => approach,
                None => 0.0,
            };
            best = best.max(value);
        }
    }
    best * sit.profile.tendencies.joseki
}

/// Attack weak groups from the open side and avoid crawling along the edge.
pub(super) fn direction(sit: &Situation, probe: &Probe) -> f64 {
    let goban = sit.goban;
    let line = f64::from(goban.line(probe.point));
    let mut score = 0.0;
    for g in probe.opp_adjacent.iter().filter(|g| g.liberty_count() <= 3) {
        let avg = g.stones.iter().map(|&p| f64::from(goban.line(p))).sum::<f64>()
            / g.size() as f64;
        score += if line >= avg { 120.0 } else { -40.0 };
    }
    if !probe.is_capture() && probe.rescued == 0 {
        match (goban.line(probe.point), sit.phase) {
            (0, Phase::Opening | Phase::Middle) => score -= 60.0,
            (1, Phase::Opening) => score -= 20.0,
            _ => {}
        }
    }
    score * (0.5 + 0.5 * sit.profile.tendencies.combat)
}
