//! Group (chain) analysis: flood-filled stone sets with their liberty points.

use serde::Serialize;

use crate::Point;
use crate::goban::Goban;
use crate::stone::Stone;

/// A maximal 4-connected set of same-colored stones and its distinct liberties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub stone: Stone,
    pub stones: Vec<Point>,
    pub liberties: Vec<Point>,
}

impl Group {
    pub fn size(&self) -> usize {
        self.stones.len()
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn in_atari(&self) -> bool {
        self.liberties.len() == 1
    }

    pub fn contains(&self, point: Point) -> bool {
        self.stones.contains(&point)
    }
}

impl Goban {
    /// Every group of `stone` on the board, in row-major order of their first stone.
    pub fn groups(&self, stone: Stone) -> Vec<Group> {
        let mut visited = vec![false; self.area()];
        let mut groups = Vec::new();
        for p in self.points() {
            if visited[self.idx(p.0, p.1)] || self.stone_at(p) != Some(stone) {
                continue;
            }
            let stones = self.chain_from(p, &mut visited);
            let liberties = self.chain_liberties(&stones);
            groups.push(Group {
                stone,
                stones,
                liberties,
            });
        }
        groups
    }

    /// The group containing `point`, if a stone is there.
    pub fn group_at(&self, point: Point) -> Option<Group> {
        let stone = self.stone_at(point)?;
        let stones = self.chain(point);
        let liberties = self.chain_liberties(&stones);
        Some(Group {
            stone,
            stones,
            liberties,
        })
    }

    /// Distinct groups of `stone` orthogonally adjacent to `point`.
    pub fn adjacent_groups(&self, point: Point, stone: Stone) -> Vec<Group> {
        self.neighbor_chains(point, stone)
            .into_iter()
            .map(|stones| {
                let liberties = self.chain_liberties(&stones);
                Group {
                    stone,
                    stones,
                    liberties,
                }
            })
            .collect()
    }
}
