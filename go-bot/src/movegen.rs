//! Candidate generation: every legal empty point, or a cheap local subset.

use go_engine::{Goban, MoveOptions, Placement, Point, Stone};

/// Below this many fast candidates the generator falls back to a full scan.
pub const FAST_MIN_CANDIDATES: usize = 5;

/// A legal move and the board it produces.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub point: Point,
    pub placed: Placement,
}

/// What to generate moves for.
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
    pub goban: &'a Goban,
    pub stone: Stone,
    pub move_index: usize,
    pub options: MoveOptions,
}

impl<'a> MoveRequest<'a> {
    pub fn new(goban: &'a Goban, stone: Stone, move_index: usize) -> Self {
        MoveRequest {
            goban,
            stone,
            move_index,
            options: MoveOptions::default(),
        }
    }

    fn try_point(&self, point: Point) -> Option<Candidate> {
        self.goban
            .process_move(
                point,
                self.stone,
                self.goban.ko().as_ref(),
                self.move_index,
                &self.options,
            )
            .ok()
            .map(|placed| Candidate { point, placed })
    }

    fn collect(&self, points: impl IntoIterator<Item = Point>) -> Vec<Candidate> {
        points.into_iter().filter_map(|p| self.try_point(p)).collect()
    }
}

/// Every legal empty point, in row-major order.
pub fn full_scan(req: &MoveRequest) -> Vec<Candidate> {
    req.collect(req.goban.empty_points())
}

/// Legal points orthogonally adjacent to any stone, or a central window on an
/// empty board. May return fewer than [`FAST_MIN_CANDIDATES`].
pub fn local_scan(req: &MoveRequest) -> Vec<Candidate> {
    let goban = req.goban;
    if goban.is_empty() {
        return req.collect(central_window(goban));
    }
    req.collect(
        goban
            .empty_points()
            .filter(|&p| goban.neighbors(p).iter().any(|&n| goban.stone_at(n).is_some())),
    )
}

/// Local scan with a full-scan fallback, so it finds a move whenever one exists.
pub fn fast_scan(req: &MoveRequest) -> Vec<Candidate> {
    let local = local_scan(req);
    if local.len() >= FAST_MIN_CANDIDATES {
        local
    } else {
        full_scan(req)
    }
}

/// Generate candidates the way a profile does: fast for weak levels, full otherwise.
pub fn generate(req: &MoveRequest, fast: bool) -> Vec<Candidate> {
    if fast { fast_scan(req) } else { full_scan(req) }
}

/// Points within a square window around the center, sized to the board.
fn central_window(goban: &Goban) -> Vec<Point> {
    let radius = (goban.cols().min(goban.rows()) / 6).max(1);
    let (cc, cr) = (goban.cols() / 2, goban.rows() / 2);
    goban
        .points()
        .filter(|&(c, r)| c.abs_diff(cc) <= radius && r.abs_diff(cr) <= radius)
        .collect()
}
