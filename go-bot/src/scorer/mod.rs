//! Heuristic move scoring.
//!
//! Each evaluator is a pure function of the position ([`Situation`]) and one
//! candidate ([`Probe`]). Their weighted contributions are summed into a
//! single score; rescue and capture dominate, then atari threats, then
//! territory and fighting, then positional preferences.

mod capture;
mod endgame;
mod opening;
mod shape;
mod tactics;
mod territory;

use std::collections::HashSet;

use go_engine::territory::{Region, find_unconditionally_alive, regions};
use go_engine::{Goban, Group, Point, Stone};
use serde::Serialize;

use crate::lookahead::LookAhead;
use crate::movegen::Candidate;
use crate::profile::SkillProfile;
use crate::session::{GameSession, GameVariant};

pub use tactics::ladder_captures;

/// Score forced onto self-atari moves by profiles that know to avoid them.
pub const SELF_ATARI_SCORE: f64 = -100_000.0;

/// What winning means for the side to move, resolved once per turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Goal {
    /// Ordinary game decided by territory.
    Territory,
    /// Capture race: `remaining` weighted points still needed.
    Captures { remaining: u32 },
    /// Survival attacker: needs `remaining` points within `turns_left` moves.
    Attack { remaining: u32, turns_left: u32 },
    /// Survival defender: hold out for `turns_left` more attacker moves.
    Survive { turns_left: u32 },
}

impl Goal {
    pub fn for_session(session: &GameSession, stone: Stone) -> Goal {
        let remaining = |target: u32| target.saturating_sub(session.scores.get(stone)).max(1);
        match session.variant {
            GameVariant::Survival {
                turn_budget,
                survivor,
            } => {
                let turns_left = turn_budget.saturating_sub(session.moves_by(survivor.opp()));
                if stone == survivor {
                    Goal::Survive { turns_left }
                } else {
                    Goal::Attack {
                        remaining: remaining(session.capture_target.unwrap_or(1)),
                        turns_left: turns_left.max(1),
                    }
                }
            }
            _ => match session.capture_target {
                Some(target) => Goal::Captures {
                    remaining: remaining(target),
                },
                None => Goal::Territory,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Opening,
    Middle,
    Endgame,
}

impl Phase {
    pub fn of(goban: &Goban) -> Phase {
        let fill = goban.stone_count() as f64 / goban.area().max(1) as f64;
        if fill < 0.15 {
            Phase::Opening
        } else if fill < 0.5 {
            Phase::Middle
        } else {
            Phase::Endgame
        }
    }
}

/// Per-turn facts shared by every candidate.
pub struct Situation<'a> {
    pub goban: &'a Goban,
    pub stone: Stone,
    pub move_index: usize,
    pub profile: &'a SkillProfile,
    pub goal: Goal,
    pub phase: Phase,
    pub pattern_stones: &'a HashSet<Point>,
    pub own_groups: Vec<Group>,
    pub opp_groups: Vec<Group>,
    pub regions: Vec<Region>,
    region_index: Vec<usize>,
    /// Benson-alive opponent stones; only computed for profiles that read life and death.
    pub alive_opp: HashSet<Point>,
    pub alive_own: HashSet<Point>,
}

impl<'a> Situation<'a> {
    pub fn new(
        goban: &'a Goban,
        stone: Stone,
        move_index: usize,
        profile: &'a SkillProfile,
        goal: Goal,
        pattern_stones: &'a HashSet<Point>,
    ) -> Self {
        let regions = regions(goban);
        let mut region_index = vec![usize::MAX; goban.area()];
        for (ri, region) in regions.iter().enumerate() {
            for &(c, r) in &region.points {
                region_index[r as usize * goban.cols() as usize + c as usize] = ri;
            }
        }
        let (alive_own, alive_opp) = if profile.knowledge.shape_and_life {
            (
                find_unconditionally_alive(goban, stone),
                find_unconditionally_alive(goban, stone.opp()),
            )
        } else {
            (HashSet::new(), HashSet::new())
        };
        Situation {
            goban,
            stone,
            move_index,
            profile,
            goal,
            phase: Phase::of(goban),
            pattern_stones,
            own_groups: goban.groups(stone),
            opp_groups: goban.groups(stone.opp()),
            regions,
            region_index,
            alive_opp,
            alive_own,
        }
    }

    pub fn opp(&self) -> Stone {
        self.stone.opp()
    }

    /// The empty region containing `point` before the move.
    pub fn region_at(&self, (c, r): Point) -> Option<&Region> {
        let ri = *self
            .region_index
            .get(r as usize * self.goban.cols() as usize + c as usize)?;
        self.regions.get(ri)
    }

    /// Largest region still counted as enclosed territory.
    pub fn enclosed_limit(&self) -> usize {
        (self.goban.area() / 4).max(4)
    }

    pub fn own_group_at(&self, point: Point) -> Option<&Group> {
        self.own_groups.iter().find(|g| g.contains(point))
    }
}

/// Enclosed territory of `stone` on `goban`, counting only regions up to `limit` points.
pub(crate) fn enclosed_territory(goban: &Goban, stone: Stone, limit: usize) -> usize {
    regions(goban)
        .iter()
        .filter(|r| r.owner() == Some(stone) && r.size() <= limit)
        .map(Region::size)
        .sum()
}

/// Post-move facts for one candidate.
pub struct Probe<'c> {
    pub point: Point,
    pub after: &'c Goban,
    pub captured: &'c [Point],
    /// Captured stones with pattern stones counted twice.
    pub capture_value: u32,
    /// The mover's group containing `point` after the move.
    pub group: Group,
    /// Stones of previously-in-atari own groups that now have two or more liberties.
    pub rescued: usize,
    /// Opponent groups touching `point` after the move.
    pub opp_adjacent: Vec<Group>,
}

impl<'c> Probe<'c> {
    pub fn new(sit: &Situation, cand: &'c Candidate) -> Self {
        let after = &cand.placed.goban;
        let group = after.group_at(cand.point).unwrap_or(Group {
            stone: sit.stone,
            stones: Vec::new(),
            liberties: Vec::new(),
        });
        let rescued = sit
            .own_groups
            .iter()
            .filter(|g| g.in_atari())
            .filter(|g| {
                after
                    .group_at(g.stones[0])
                    .is_some_and(|now| now.liberty_count() >= 2)
            })
            .map(Group::size)
            .sum();
        let capture_value = cand
            .placed
            .captured
            .iter()
            .map(|p| if sit.pattern_stones.contains(p) { 2 } else { 1 })
            .sum();
        Probe {
            point: cand.point,
            after,
            captured: &cand.placed.captured,
            capture_value,
            group,
            rescued,
            opp_adjacent: after.adjacent_groups(cand.point, sit.opp()),
        }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Each evaluator's contribution to a candidate's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Breakdown {
    pub rescue: f64,
    pub capture: f64,
    pub atari: f64,
    pub sacrifice: f64,
    pub defense: f64,
    pub own_fill: f64,
    pub strategy: f64,
    pub combat: f64,
    pub joseki: f64,
    pub fuseki: f64,
    pub direction: f64,
    pub life_death: f64,
    pub movement: f64,
    pub escape: f64,
    pub connection: f64,
    pub tactics: f64,
    pub endgame: f64,
    pub win_focus: f64,
    pub look_ahead: f64,
    pub self_atari: bool,
}

impl Breakdown {
    /// Rescue and capture combined: the larger one plus 30% of the other.
    pub fn primary(&self) -> f64 {
        let (hi, lo) = if self.rescue >= self.capture {
            (self.rescue, self.capture)
        } else {
            (self.capture, self.rescue)
        };
        hi + 0.3 * lo
    }

    pub fn is_urgent(&self) -> bool {
        self.rescue > 0.0 || self.capture > 0.0
    }

    /// A move that only damages the mover: self-atari or filling its own territory.
    pub fn is_wasteful(&self) -> bool {
        self.self_atari || (self.own_fill < 0.0 && !self.is_urgent())
    }

    pub fn total(&self) -> f64 {
        if self.self_atari {
            return SELF_ATARI_SCORE;
        }
        self.primary()
            + self.atari
            + self.sacrifice
            + self.defense
            + self.own_fill
            + self.strategy
            + self.combat
            + self.joseki
            + self.fuseki
            + self.direction
            + self.life_death
            + self.movement
            + self.escape
            + self.connection
            + self.tactics
            + self.endgame
            + self.win_focus
            + self.look_ahead
    }
}

/// A scored candidate.
#[derive(Debug, Clone)]
pub struct Scored {
    pub candidate: Candidate,
    pub breakdown: Breakdown,
    pub score: f64,
}

impl Scored {
    pub fn point(&self) -> Point {
        self.candidate.point
    }
}

pub struct Scorer<'l> {
    look_ahead: &'l LookAhead,
}

impl<'l> Scorer<'l> {
    pub fn new(look_ahead: &'l LookAhead) -> Self {
        Scorer { look_ahead }
    }

    pub fn breakdown(&self, sit: &Situation, cand: &Candidate) -> Breakdown {
        let probe = Probe::new(sit, cand);
        let knows = sit.profile.knowledge;
        let weights = sit.profile.tendencies;
        let depth = self.look_ahead.depth_for(sit.profile);

        let mut b = Breakdown::default();

        let urgency = 0.6 + 0.4 * weights.capture;
        b.rescue = capture::rescue(&probe) * urgency;
        if b.rescue > 0.0 && depth > 1 {
            let survival = self
                .look_ahead
                .survival(probe.after, probe.point, sit.stone, depth - 1);
            b.rescue *= survival.max(0.2);
        }
        b.capture = capture::capture(&probe) * urgency;
        b.atari = capture::atari_threat(sit, &probe);
        b.escape = shape::escape(sit, &probe);
        b.defense = territory::defensive(sit, &probe);
        b.own_fill = territory::own_fill(sit, &probe);
        b.strategy = territory::strategic(sit, &probe);
        b.combat = territory::combat(sit, &probe);
        b.win_focus = endgame::win_focus(sit, &probe);

        let snapback = knows.sacrifice_counter && shape::is_snapback(sit, &probe);
        if knows.sacrifice_counter {
            b.sacrifice = capture::counter_capture(sit, &probe) + if snapback { 900.0 } else { 0.0 };
        }
        if knows.directional_attack {
            b.direction = opening::direction(sit, &probe);
        }
        if knows.fuseki {
            b.fuseki = opening::fuseki(sit, &probe);
            b.joseki = opening::joseki(sit, &probe);
        }
        if knows.advanced_tactics {
            b.tactics = tactics::advanced(sit, &probe);
        }
        if knows.shape_and_life {
            b.connection = shape::connection(sit, &probe);
            b.life_death = shape::life_death(sit, &probe);
            b.movement = shape::movement(sit, &probe);
        }
        if knows.endgame {
            b.endgame = endgame::boundary(sit, &probe);
        }

        b.self_atari = knows.avoids_self_atari && !snapback && shape::is_self_atari(&probe);
        b
    }

    /// Score every candidate, sorted best first. Ties keep generation order.
    pub fn rank(&self, sit: &Situation, candidates: Vec<Candidate>) -> Vec<Scored> {
        let mut scored: Vec<Scored> = candidates
            .into_iter()
            .map(|candidate| {
                let breakdown = self.breakdown(sit, &candidate);
                Scored {
                    score: breakdown.total(),
                    candidate,
                    breakdown,
                }
            })
            .collect();
        sort_ranked(&mut scored);
        scored
    }

    /// Re-score the leading capture/rescue candidates with the opponent's best replies.
    pub fn refine(&self, sit: &Situation, ranked: &mut [Scored]) {
        let depth = self.look_ahead.depth_for(sit.profile);
        if depth <= 1 {
            return;
        }
        let weight = f64::from(depth) / 10.0;
        let mut touched = false;
        for s in ranked
            .iter_mut()
            .take(self.look_ahead.max_branches)
            .filter(|s| s.breakdown.is_urgent() && !s.breakdown.self_atari)
        {
            let pressure = self.look_ahead.reply_pressure(
                &s.candidate.placed.goban,
                sit.opp(),
                sit.move_index + 1,
                depth - 1,
            );
            s.breakdown.look_ahead = -pressure * weight;
            s.score += s.breakdown.look_ahead;
            touched = true;
        }
        if touched {
            sort_ranked(ranked);
        }
    }
}

pub(crate) fn sort_ranked(scored: &mut [Scored]) {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn score_of(layout: &[&str], stone: Stone, level: u8, point: Point) -> Breakdown {
        let goban = Goban::from_layout(layout);
        let pattern = HashSet::new();
        let sit = situation(&goban, stone, level, &pattern);
        let look_ahead = LookAhead::default();
        Scorer::new(&look_ahead).breakdown(&sit, &candidate(&goban, stone, point))
    }

    #[test]
    fn primary_blends_thirty_percent_of_the_smaller() {
        let b = Breakdown {
            rescue: 1000.0,
            capture: 6000.0,
            ..Breakdown::default()
        };
        assert_eq!(b.primary(), 6300.0);
    }

    #[test]
    fn self_atari_forces_the_sentinel() {
        let b = Breakdown {
            capture: 9000.0,
            self_atari: true,
            ..Breakdown::default()
        };
        assert_eq!(b.total(), SELF_ATARI_SCORE);
    }

    #[test]
    fn capture_outranks_positional_play() {
        let layout = ["+++++", "++B++", "+BW++", "++B++", "+++++"];
        let capture = score_of(&layout, Stone::Black, 1, (3, 2));
        let quiet = score_of(&layout, Stone::Black, 1, (0, 4));
        assert!(capture.capture > 0.0);
        assert!(capture.total() > quiet.total() + 3000.0);
    }

    #[test]
    fn self_atari_depends_on_knowledge() {
        // Black at (0,1) would have only (0,0) left.
        let layout = ["++W++", "+W+++", "W++++", "+++++", "+++++"];
        let novice = score_of(&layout, Stone::Black, 1, (0, 1));
        let careful = score_of(&layout, Stone::Black, 2, (0, 1));
        assert!(!novice.self_atari);
        assert!(careful.self_atari);
        assert_eq!(careful.total(), SELF_ATARI_SCORE);
    }

    #[test]
    fn goal_follows_the_variant() {
        let mut session = GameSession::new(9, GameVariant::CaptureTarget).with_capture_target(5);
        session.scores.add(Stone::Black, 3);
        assert_eq!(
            Goal::for_session(&session, Stone::Black),
            Goal::Captures { remaining: 2 }
        );

        let survival = GameSession::new(
            9,
            GameVariant::Survival {
                turn_budget: 10,
                survivor: Stone::White,
            },
        );
        assert_eq!(
            Goal::for_session(&survival, Stone::White),
            Goal::Survive { turns_left: 10 }
        );
        assert!(matches!(
            Goal::for_session(&survival, Stone::Black),
            Goal::Attack { turns_left: 10, .. }
        ));
        assert_eq!(
            Goal::for_session(&GameSession::new(9, GameVariant::Standard), Stone::Black),
            Goal::Territory
        );
    }

    #[test]
    fn phase_tracks_fill() {
        assert_eq!(Phase::of(&Goban::with_dimensions(9, 9)), Phase::Opening);
        let full = Goban::from_layout(&["BW+", "WB+", "B++"]);
        assert_eq!(Phase::of(&full), Phase::Endgame);
    }
}
