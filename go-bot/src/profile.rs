//! The fixed table of ten skill profiles.
//!
//! Knowledge unlocks one flag per level, so a level-k profile knows
//! everything a lower level knows.

use serde::Serialize;

/// Boolean knowledge flags in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Knowledge {
    pub basic_rules: bool,
    pub avoids_self_atari: bool,
    pub sacrifice_counter: bool,
    pub atari_judgment: bool,
    pub directional_attack: bool,
    pub fuseki: bool,
    pub territory_combat: bool,
    pub advanced_tactics: bool,
    pub shape_and_life: bool,
    pub endgame: bool,
}

impl Knowledge {
    pub const fn unlocked(level: u8) -> Self {
        Knowledge {
            basic_rules: level >= 1,
            avoids_self_atari: level >= 2,
            sacrifice_counter: level >= 3,
            atari_judgment: level >= 4,
            directional_attack: level >= 5,
            fuseki: level >= 6,
            territory_combat: level >= 7,
            advanced_tactics: level >= 8,
            shape_and_life: level >= 9,
            endgame: level >= 10,
        }
    }

    pub fn flags(&self) -> [bool; 10] {
        [
            self.basic_rules,
            self.avoids_self_atari,
            self.sacrifice_counter,
            self.atari_judgment,
            self.directional_attack,
            self.fuseki,
            self.territory_combat,
            self.advanced_tactics,
            self.shape_and_life,
            self.endgame,
        ]
    }
}

/// Continuous play-style weights, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tendencies {
    pub capture: f64,
    pub territory: f64,
    pub combat: f64,
    pub joseki: f64,
    pub life_death: f64,
    pub movement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillProfile {
    pub level: u8,
    pub tendencies: Tendencies,
    pub mistake_rate: f64,
    pub win_focus: f64,
    pub calculation_depth: u8,
    pub knowledge: Knowledge,
}

const fn profile(
    level: u8,
    [capture, territory, combat, joseki, life_death, movement]: [f64; 6],
    mistake_rate: f64,
    win_focus: f64,
    calculation_depth: u8,
) -> SkillProfile {
    SkillProfile {
        level,
        tendencies: Tendencies {
            capture,
            territory,
            combat,
            joseki,
            life_death,
            movement,
        },
        mistake_rate,
        win_focus,
        calculation_depth,
        knowledge: Knowledge::unlocked(level),
    }
}

pub static PROFILES: [SkillProfile; 10] = [
    profile(1, [0.50, 0.10, 0.30, 0.00, 0.05, 0.10], 0.45, 0.30, 1),
    profile(2, [0.55, 0.20, 0.35, 0.05, 0.10, 0.20], 0.38, 0.35, 1),
    profile(3, [0.60, 0.30, 0.40, 0.10, 0.20, 0.30], 0.32, 0.40, 1),
    profile(4, [0.65, 0.40, 0.50, 0.20, 0.30, 0.40], 0.26, 0.50, 2),
    profile(5, [0.70, 0.50, 0.55, 0.30, 0.40, 0.50], 0.21, 0.55, 2),
    profile(6, [0.75, 0.60, 0.60, 0.45, 0.50, 0.60], 0.16, 0.60, 2),
    profile(7, [0.80, 0.70, 0.70, 0.60, 0.65, 0.70], 0.12, 0.70, 3),
    profile(8, [0.85, 0.80, 0.75, 0.70, 0.75, 0.75], 0.08, 0.80, 3),
    profile(9, [0.90, 0.85, 0.85, 0.80, 0.85, 0.85], 0.04, 0.85, 4),
    profile(10, [0.95, 0.90, 0.90, 0.90, 0.95, 0.90], 0.01, 0.90, 4),
];

/// Jitter added per level below 10, on the scale of territory and positional scores.
const JITTER_STEP: f64 = 30.0;

impl SkillProfile {
    /// The profile for `level`, clamped into 1..=10.
    pub fn for_level(level: u8) -> &'static SkillProfile {
        &PROFILES[level.clamp(1, 10) as usize - 1]
    }

    /// Levels up to 3 only look near existing stones.
    pub fn uses_fast_generator(&self) -> bool {
        self.level <= 3
    }

    /// Half-width of the uniform noise added to each candidate's score.
    pub fn jitter(&self) -> f64 {
        f64::from(10 - self.level) * JITTER_STEP
    }
}
