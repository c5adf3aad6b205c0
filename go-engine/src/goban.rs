use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::GoError;
use crate::ko::Ko;
use crate::stone::Stone;

/// Captures indexed by stone color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// Rule switches for [`Goban::process_move`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// Accept self-capture: the mover's dead group is removed instead of rejecting the move.
    pub ignore_suicide: bool,
    /// Enforce ko by point and color only, without checking the move index.
    pub single_player: bool,
    /// Color whose adjacent groups are resolved for capture. Defaults to the mover's opponent.
    pub opponent: Option<Stone>,
}

/// A successfully applied move.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub goban: Goban,
    pub ko: Option<Ko>,
    /// Opponent stones removed by the move.
    pub captured: Vec<Point>,
    /// Liberties of the placed stone's group after captures. Empty when it self-captured.
    pub liberties: Vec<Point>,
    /// Own stones removed by an accepted self-capture.
    pub self_captured: Vec<Point>,
}

/// The Go board stored as a flat array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goban {
    board: Vec<i8>,
    cols: u8,
    rows: u8,
    captures: Captures,
    ko: Option<Ko>,
}

impl Goban {
    /// Create a goban from an existing board matrix (rows x cols of i8 values).
    pub fn new(board: Vec<Vec<i8>>) -> Self {
        let rows = board.len() as u8;
        let cols = if rows == 0 { 0 } else { board[0].len() as u8 };

        assert!(
            board.iter().all(|row| row.len() == cols as usize),
            "malformed board matrix"
        );

        Goban {
            board: board.into_iter().flatten().collect(),
            cols,
            rows,
            captures: Captures::new(),
            ko: None,
        }
    }

    /// Create an empty board with the given dimensions.
    pub fn with_dimensions(cols: u8, rows: u8) -> Self {
        Goban {
            board: vec![0i8; cols as usize * rows as usize],
            cols,
            rows,
            captures: Captures::new(),
            ko: None,
        }
    }

    /// Build a board from an ASCII diagram, one string per row.
    /// `B`/`X` = Black, `W`/`O` = White, anything else = empty.
    pub fn from_layout(layout: &[&str]) -> Self {
        let board = layout
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| Stone::from_char(c).map_or(0, Stone::to_int))
                    .collect()
            })
            .collect();
        Goban::new(board)
    }

    // -- Accessors --

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of intersections.
    pub fn area(&self) -> usize {
        self.board.len()
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn ko(&self) -> &Option<Ko> {
        &self.ko
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        let (col, row) = point;
        if self.on_board(point) {
            Stone::from_int(self.board[self.idx(col, row)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (col, row): Point) -> bool {
        col < self.cols && row < self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|&s| s == 0)
    }

    pub fn stone_count(&self) -> usize {
        self.board.iter().filter(|&&s| s != 0).count()
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (col, row)))
    }

    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|&p| self.stone_at(p).is_none())
    }

    /// Distance to the nearest edge, 0 on the first line.
    pub fn line(&self, (col, row): Point) -> u8 {
        col.min(row)
            .min(self.cols.saturating_sub(col + 1))
            .min(self.rows.saturating_sub(row + 1))
    }

    /// A copy with the given points emptied.
    pub fn without(&self, points: impl IntoIterator<Item = Point>) -> Goban {
        let mut goban = self.clone();
        for p in points {
            goban.clear_stone(p);
        }
        goban
    }

    // -- Game actions --

    /// Place a stone using the board's own ko. Returns a new Goban with the move applied.
    pub fn play(&self, point: Point, stone: Stone) -> Result<Goban, GoError> {
        let options = MoveOptions {
            single_player: true,
            ..MoveOptions::default()
        };
        self.process_move(point, stone, self.ko.as_ref(), 0, &options)
            .map(|placed| placed.goban)
    }

    /// Pass: clears ko in place.
    pub fn pass(&mut self) {
        self.ko = None;
    }

    /// Apply a move: place the stone, remove dead opponent groups, then check the
    /// mover's own liberties. This is the only place captures are resolved.
    pub fn process_move(
        &self,
        point: Point,
        stone: Stone,
        ko: Option<&Ko>,
        move_index: usize,
        options: &MoveOptions,
    ) -> Result<Placement, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }

        if self.stone_at(point).is_some() {
            return Err(GoError::Overwrite);
        }

        if ko.is_some_and(|k| k.forbids(point, stone, move_index, options.single_player)) {
            return Err(GoError::KoViolation);
        }

        let mut goban = self.clone();
        goban.set_stone(point, stone);

        let opponent = options.opponent.unwrap_or(stone.opp());
        let mut captured = Vec::new();
        for chain in goban.neighbor_chains(point, opponent) {
            if goban.chain_liberties(&chain).is_empty() {
                captured.extend(chain);
            }
        }
        goban.capture_mut(&captured, stone);

        let own = goban.chain(point);
        let liberties = goban.chain_liberties(&own);
        let mut self_captured = Vec::new();
        if liberties.is_empty() {
            if !options.ignore_suicide {
                return Err(GoError::Suicide);
            }
            goban.capture_mut(&own, stone.opp());
            self_captured = own;
        }

        let ko = Self::detect_ko(&goban, &captured, &liberties, point, stone, move_index);
        goban.ko = ko.clone();

        Ok(Placement {
            goban,
            ko,
            captured,
            liberties,
            self_captured,
        })
    }

    /// Remove stones from the board in place, crediting `by`.
    fn capture_mut(&mut self, stones: &[Point], by: Stone) {
        if stones.is_empty() {
            return;
        }
        for &pt in stones {
            self.clear_stone(pt);
        }
        self.captures.add(by, stones.len() as u32);
    }

    // -- Graph algorithms --

    /// Get the 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (col, row): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if col > 0 {
            result.push((col - 1, row));
        }
        if col + 1 < self.cols {
            result.push((col + 1, row));
        }
        if row > 0 {
            result.push((col, row - 1));
        }
        if row + 1 < self.rows {
            result.push((col, row + 1));
        }
        result
    }

    /// Get the diagonal neighbors that are on the board.
    pub fn diagonals(&self, (col, row): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        for (dc, dr) in [(-1i16, -1i16), (1, -1), (-1, 1), (1, 1)] {
            let c = col as i16 + dc;
            let r = row as i16 + dr;
            if c >= 0 && r >= 0 && c < self.cols as i16 && r < self.rows as i16 {
                result.push((c as u8, r as u8));
            }
        }
        result
    }

    /// Flood-fill connected group of same-colored stones.
    pub fn chain(&self, point: Point) -> Vec<Point> {
        let mut visited = vec![false; self.board.len()];
        self.chain_from(point, &mut visited)
    }

    /// Get the liberties of a single stone's connected group.
    pub fn liberties(&self, point: Point) -> Vec<Point> {
        let chain = self.chain(point);
        self.chain_liberties(&chain)
    }

    /// Get the liberties of a chain (pre-computed group of points), each point once.
    pub fn chain_liberties(&self, chain: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.board.len()];
        let mut libs = Vec::new();
        for &p in chain {
            for n in self.neighbors(p) {
                let ni = self.idx(n.0, n.1);
                if !seen[ni] && self.stone_at(n).is_none() {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    /// Distinct chains of `color` touching `point`.
    pub fn neighbor_chains(&self, point: Point, color: Stone) -> Vec<Vec<Point>> {
        let mut chains = Vec::new();
        let mut visited = vec![false; self.board.len()];

        for n in self.neighbors(point) {
            if self.stone_at(n) != Some(color) || visited[self.idx(n.0, n.1)] {
                continue;
            }
            let ch = self.chain_from(n, &mut visited);
            if !ch.is_empty() {
                chains.push(ch);
            }
        }

        chains
    }

    /// Chain flood-fill using a shared visited bitset.
    pub(crate) fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let stone = match self.stone_at(point) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut result = Vec::new();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p.0, p.1);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            result.push(p);
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[self.idx(n.0, n.1)] {
                    stack.push(n);
                }
            }
        }

        result
    }

    // -- Internal helpers --

    #[inline]
    pub(crate) fn idx(&self, col: u8, row: u8) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn set_stone(&mut self, (col, row): Point, stone: Stone) {
        if self.on_board((col, row)) {
            let i = self.idx(col, row);
            self.board[i] = stone.to_int();
        }
    }

    fn clear_stone(&mut self, (col, row): Point) {
        if self.on_board((col, row)) {
            let i = self.idx(col, row);
            self.board[i] = 0;
        }
    }

    fn detect_ko(
        goban: &Goban,
        dead_stones: &[Point],
        liberties: &[Point],
        point: Point,
        stone: Stone,
        move_index: usize,
    ) -> Option<Ko> {
        let is_ko = dead_stones.len() == 1
            && liberties.len() == 1
            && liberties[0] == dead_stones[0]
            && goban
                .neighbors(point)
                .iter()
                .all(|&n| goban.stone_at(n) != Some(stone));

        is_ko.then(|| Ko {
            pos: dead_stones[0],
            illegal: stone.opp(),
            created_at: move_index,
        })
    }
}

impl fmt::Display for Goban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = match self.stone_at((col, row)) {
                    Some(Stone::Black) => 'B',
                    Some(Stone::White) => 'W',
                    None => '+',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KO_SHAPE: [&str; 4] = ["+BW+", "BW+W", "+BW+", "++++"];

    #[test]
    fn creates_board_with_dimensions() {
        let goban = Goban::with_dimensions(5, 3);
        assert_eq!(goban.cols(), 5);
        assert_eq!(goban.rows(), 3);
        assert_eq!(goban.area(), 15);
        assert!(goban.is_empty());
    }

    #[test]
    #[should_panic(expected = "malformed")]
    fn rejects_malformed_board() {
        Goban::new(vec![vec![0], vec![0, 0]]);
    }

    #[test]
    fn layout_round_trips_through_display() {
        let goban = Goban::from_layout(&KO_SHAPE);
        assert_eq!(goban.to_string(), "+BW+\nBW+W\n+BW+\n++++\n");
    }

    #[test]
    fn prevents_overwrite() {
        let goban = Goban::with_dimensions(4, 4).play((0, 0), Stone::Black).unwrap();
        assert_eq!(goban.play((0, 0), Stone::White), Err(GoError::Overwrite));
    }

    #[test]
    fn rejects_off_board() {
        let goban = Goban::with_dimensions(4, 4);
        assert_eq!(goban.play((4, 0), Stone::Black), Err(GoError::NotOnBoard));
    }

    #[test]
    fn prevents_ko_violation() {
        let goban = Goban::from_layout(&KO_SHAPE);
        let goban = goban.play((2, 1), Stone::Black).unwrap();
        assert_eq!(goban.play((1, 1), Stone::White), Err(GoError::KoViolation));
    }

    #[test]
    fn ko_only_binds_the_following_move_index() {
        let goban = Goban::from_layout(&KO_SHAPE);
        let opts = MoveOptions::default();
        let placed = goban.process_move((2, 1), Stone::Black, None, 10, &opts).unwrap();
        let ko = placed.ko.clone().unwrap();
        assert_eq!(ko.pos, (1, 1));
        assert_eq!(ko.created_at, 10);

        let retake = placed.goban.process_move((1, 1), Stone::White, Some(&ko), 11, &opts);
        assert_eq!(retake.unwrap_err(), GoError::KoViolation);

        let later = placed.goban.process_move((1, 1), Stone::White, Some(&ko), 13, &opts);
        assert!(later.is_ok());

        let single = MoveOptions {
            single_player: true,
            ..opts
        };
        let stale = placed.goban.process_move((1, 1), Stone::White, Some(&ko), 13, &single);
        assert_eq!(stale.unwrap_err(), GoError::KoViolation);
    }

    #[test]
    fn prevents_suicide() {
        let goban = Goban::from_layout(&["+B++", "B+++", "++++", "++++"]);
        assert_eq!(goban.play((0, 0), Stone::White), Err(GoError::Suicide));
    }

    #[test]
    fn ignore_suicide_removes_the_mover() {
        let goban = Goban::from_layout(&["+B++", "B+++", "++++", "++++"]);
        let opts = MoveOptions {
            ignore_suicide: true,
            ..MoveOptions::default()
        };
        let placed = goban.process_move((0, 0), Stone::White, None, 0, &opts).unwrap();
        assert_eq!(placed.self_captured, vec![(0, 0)]);
        assert!(placed.liberties.is_empty());
        assert_eq!(placed.goban.stone_at((0, 0)), None);
        assert_eq!(placed.goban.captures().black, 1);
    }

    #[test]
    fn capture_is_not_suicide() {
        // White at (0,0) has one liberty at (0,1); Black fills it while itself surrounded.
        let goban = Goban::from_layout(&["WB++", "+W++", "W+++", "++++"]);
        let placed = goban
            .process_move((0, 1), Stone::Black, None, 0, &MoveOptions::default())
            .unwrap();
        assert_eq!(placed.captured, vec![(0, 0)]);
        assert_eq!(placed.liberties, vec![(0, 0)]);
    }

    #[test]
    fn captures_single_stone() {
        let goban = Goban::from_layout(&["+B++", "BWB+", "++++", "++++"]);
        let placed = goban
            .process_move((1, 2), Stone::Black, None, 0, &MoveOptions::default())
            .unwrap();
        assert_eq!(placed.captured, vec![(1, 1)]);
        assert_eq!(placed.goban.captures().black, 1);
    }

    #[test]
    fn captures_stone_chain() {
        let goban = Goban::from_layout(&["+BB+", "BWWB", "W+WB", "WWB+"]);
        let goban = goban.play((1, 2), Stone::Black).unwrap();
        assert_eq!(goban.captures().black, 6);
    }

    #[test]
    fn opponent_override_limits_capture_resolution() {
        let goban = Goban::from_layout(&["+B++", "BWB+", "++++", "++++"]);
        let opts = MoveOptions {
            opponent: Some(Stone::Black),
            ..MoveOptions::default()
        };
        let placed = goban.process_move((1, 2), Stone::Black, None, 0, &opts).unwrap();
        assert!(placed.captured.is_empty());
        assert_eq!(placed.goban.stone_at((1, 1)), Some(Stone::White));
    }

    #[test]
    fn captures_corner_stone() {
        let mut goban = Goban::with_dimensions(4, 4);
        goban = goban.play((0, 0), Stone::Black).unwrap();
        goban = goban.play((1, 0), Stone::White).unwrap();
        goban = goban.play((0, 1), Stone::White).unwrap();

        assert_eq!(goban.stone_at((0, 0)), None);
        assert_eq!(goban.captures().white, 1);
    }

    #[test]
    fn pass_clears_ko() {
        let goban = Goban::from_layout(&KO_SHAPE);
        let mut goban = goban.play((2, 1), Stone::Black).unwrap();
        assert!(goban.ko().is_some());

        goban.pass();
        assert!(goban.ko().is_none());
    }

    #[test]
    fn liberties_are_distinct_points() {
        let goban = Goban::from_layout(&["+BB+", "+BB+", "++++", "++++"]);
        let mut libs = goban.liberties((1, 0));
        libs.sort();
        assert_eq!(libs, vec![(0, 0), (0, 1), (1, 2), (2, 2), (3, 0), (3, 1)]);
    }

    #[test]
    fn line_and_diagonals() {
        let goban = Goban::with_dimensions(9, 9);
        assert_eq!(goban.line((0, 4)), 0);
        assert_eq!(goban.line((2, 3)), 2);
        assert_eq!(goban.line((4, 4)), 4);
        assert_eq!(goban.diagonals((0, 0)).len(), 1);
        assert_eq!(goban.diagonals((4, 4)).len(), 4);
    }

    #[test]
    fn without_masks_points() {
        let goban = Goban::from_layout(&["BW", "++"]);
        let masked = goban.without([(1, 0)]);
        assert_eq!(masked.stone_at((1, 0)), None);
        assert_eq!(masked.stone_at((0, 0)), Some(Stone::Black));
        assert_eq!(goban.stone_at((1, 0)), Some(Stone::White));
    }
}
