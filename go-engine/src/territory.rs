use std::collections::HashSet;

use serde::Serialize;

use crate::Point;
use crate::goban::Goban;
use crate::stone::Stone;

/// A maximal 4-connected region of empty points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Point>,
    /// Bit 0 = bordered by Black, bit 1 = bordered by White.
    border_colors: u8,
}

impl Region {
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// The single color bordering this region, if only one does.
    pub fn owner(&self) -> Option<Stone> {
        match self.border_colors {
            1 => Some(Stone::Black),
            2 => Some(Stone::White),
            _ => None,
        }
    }

    pub fn touches(&self, stone: Stone) -> bool {
        let bit = match stone {
            Stone::Black => 1,
            Stone::White => 2,
        };
        self.border_colors & bit != 0
    }
}

/// Flood-fill every empty region of `goban`, treating `removed` points as empty.
pub fn regions_ignoring(goban: &Goban, removed: &HashSet<Point>) -> Vec<Region> {
    let cols = goban.cols() as usize;
    let color_at = |p: Point| {
        if removed.contains(&p) {
            None
        } else {
            goban.stone_at(p)
        }
    };

    let mut visited = vec![false; goban.area()];
    let mut regions = Vec::new();

    for start in goban.points() {
        let si = start.1 as usize * cols + start.0 as usize;
        if visited[si] || color_at(start).is_some() {
            continue;
        }

        let mut points = Vec::new();
        let mut border_colors: u8 = 0;
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            let pi = p.1 as usize * cols + p.0 as usize;
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            points.push(p);

            for n in goban.neighbors(p) {
                match color_at(n) {
                    Some(Stone::Black) => border_colors |= 1,
                    Some(Stone::White) => border_colors |= 2,
                    None => {
                        if !visited[n.1 as usize * cols + n.0 as usize] {
                            stack.push(n);
                        }
                    }
                }
            }
        }

        regions.push(Region {
            points,
            border_colors,
        });
    }

    regions
}

pub fn regions(goban: &Goban) -> Vec<Region> {
    regions_ignoring(goban, &HashSet::new())
}

/// Estimate territory ownership for each point on the board.
///
/// Returns a flat array (same layout as `goban.board()`) where `1` is Black
/// territory, `-1` White territory and `0` neutral. Points occupied by dead
/// stones count for the surrounding color.
pub fn estimate_territory(goban: &Goban, dead_stones: &HashSet<Point>) -> Vec<i8> {
    let cols = goban.cols() as usize;
    let mut ownership = vec![0i8; goban.area()];
    for region in regions_ignoring(goban, dead_stones) {
        let owner = region.owner().map_or(0, Stone::to_int);
        for &(c, r) in &region.points {
            ownership[r as usize * cols + c as usize] = owner;
        }
    }
    ownership
}

/// Find all unconditionally alive stones of `stone` color using Benson's algorithm.
///
/// A chain is unconditionally alive if it has at least two "vital" enclosed regions
/// (empty regions bordered only by candidate chains, where every empty point is
/// a liberty of the chain).
pub fn find_unconditionally_alive(goban: &Goban, stone: Stone) -> HashSet<Point> {
    let chains: Vec<Vec<Point>> = goban.groups(stone).into_iter().map(|g| g.stones).collect();
    if chains.is_empty() {
        return HashSet::new();
    }

    let cols = goban.cols() as usize;
    let mut point_to_chain = vec![usize::MAX; goban.area()];
    for (ci, chain) in chains.iter().enumerate() {
        for &(c, r) in chain {
            point_to_chain[r as usize * cols + c as usize] = ci;
        }
    }
    let chain_sets: Vec<HashSet<Point>> = chains
        .iter()
        .map(|chain| chain.iter().copied().collect())
        .collect();

    let mut alive = vec![true; chains.len()];

    loop {
        let mut vital_counts = vec![0usize; chains.len()];
        for region in regions(goban) {
            let Some(bordering) = enclosing_chains(goban, &region, stone, &point_to_chain, &alive)
            else {
                continue;
            };
            for ci in bordering {
                let vital = region
                    .points
                    .iter()
                    .all(|&rp| goban.neighbors(rp).iter().any(|n| chain_sets[ci].contains(n)));
                if vital {
                    vital_counts[ci] += 1;
                }
            }
        }

        let mut changed = false;
        for ci in 0..chains.len() {
            if alive[ci] && vital_counts[ci] < 2 {
                alive[ci] = false;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    chains
        .iter()
        .zip(&alive)
        .filter(|&(_, &a)| a)
        .flat_map(|(chain, _)| chain.iter().copied())
        .collect()
}

/// Indices of the alive chains bordering `region`, or `None` if anything else borders it.
fn enclosing_chains(
    goban: &Goban,
    region: &Region,
    stone: Stone,
    point_to_chain: &[usize],
    alive: &[bool],
) -> Option<HashSet<usize>> {
    if region.touches(stone.opp()) {
        return None;
    }
    let cols = goban.cols() as usize;
    let mut bordering = HashSet::new();
    for &p in &region.points {
        for n in goban.neighbors(p) {
            if goban.stone_at(n) == Some(stone) {
                let ci = point_to_chain[n.1 as usize * cols + n.0 as usize];
                if !alive[ci] {
                    return None;
                }
                bordering.insert(ci);
            }
        }
    }
    Some(bordering)
}

/// Per-color score breakdown: territory (empty points) and captures (prisoners + dead stones).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPoints {
    pub territory: u32,
    pub captures: u32,
}

impl PlayerPoints {
    pub fn total(&self) -> u32 {
        self.territory + self.captures
    }
}

/// Full score breakdown for both players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameScore {
    pub black: PlayerPoints,
    pub white: PlayerPoints,
    pub komi: f64,
}

impl GameScore {
    pub fn black_total(&self) -> f64 {
        self.black.total() as f64
    }

    pub fn white_total(&self) -> f64 {
        self.white.total() as f64 + self.komi
    }

    /// The leading color, or `None` on a draw.
    pub fn winner(&self) -> Option<Stone> {
        let diff = self.black_total() - self.white_total();
        if diff > 0.0 {
            Some(Stone::Black)
        } else if diff < 0.0 {
            Some(Stone::White)
        } else {
            None
        }
    }

    pub fn result(&self) -> String {
        format_result(self.black_total(), self.white_total())
    }
}

/// Japanese-style score: territory + prisoners (including dead stones) + komi for White.
pub fn score(
    goban: &Goban,
    ownership: &[i8],
    dead_stones: &HashSet<Point>,
    komi: f64,
) -> GameScore {
    let black_territory = ownership.iter().filter(|&&o| o == 1).count() as u32;
    let white_territory = ownership.iter().filter(|&&o| o == -1).count() as u32;

    let dead_of = |stone: Stone| {
        dead_stones
            .iter()
            .filter(|&&pt| goban.stone_at(pt) == Some(stone))
            .count() as u32
    };

    GameScore {
        black: PlayerPoints {
            territory: black_territory,
            captures: goban.captures().get(Stone::Black) + dead_of(Stone::White),
        },
        white: PlayerPoints {
            territory: white_territory,
            captures: goban.captures().get(Stone::White) + dead_of(Stone::Black),
        },
        komi,
    }
}

/// Format the game result string from final scores: "B+{diff}", "W+{diff}" or "Draw".
pub fn format_result(black_score: f64, white_score: f64) -> String {
    let diff = black_score - white_score;
    if diff > 0.0 {
        format!("B+{}", diff)
    } else if diff < 0.0 {
        format!("W+{}", -diff)
    } else {
        "Draw".to_string()
    }
}
