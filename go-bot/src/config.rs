use serde::Deserialize;

use crate::error::BotError;

/// Tunable engine settings. Every field has a default; `from_env` layers an
/// optional JSON file (`GO_BOT_CONFIG`) and then individual variables on top.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Opponent replies explored per look-ahead node.
    pub max_branches: usize,
    /// Upper bound on look-ahead depth, whatever the profile asks for.
    pub max_depth: u8,
    /// Base URL of an optional external engine.
    pub engine_url: Option<String>,
    pub engine_timeout_ms: u64,
    /// Whether profiles inject their deliberate mistakes.
    pub mistakes: bool,
    /// Whether low levels get random score jitter.
    pub jitter: bool,
    pub seed: Option<u64>,
    /// Self-play settings used by the binary.
    pub games: usize,
    pub board_size: u8,
    pub levels: (u8, u8),
    pub komi: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            max_branches: 5,
            max_depth: 4,
            engine_url: None,
            engine_timeout_ms: 2000,
            mistakes: true,
            jitter: true,
            seed: None,
            games: 10,
            board_size: 9,
            levels: (5, 4),
            komi: 6.5,
        }
    }
}

impl BotConfig {
    /// Deterministic settings: no mistakes, no jitter.
    pub fn strict() -> Self {
        BotConfig {
            mistakes: false,
            jitter: false,
            ..BotConfig::default()
        }
    }

    pub fn from_env() -> Result<Self, BotError> {
        let mut config = match std::env::var("GO_BOT_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| BotError::Config(format!("{path}: {e}")))?;
                Self::from_json(&raw)?
            }
            Err(_) => BotConfig::default(),
        };
        config.apply_vars(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, BotError> {
        serde_json::from_str(raw).map_err(|e| BotError::Config(e.to_string()))
    }

    /// Override fields from `GO_BOT_*` variables provided by `lookup`.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), BotError> {
        if let Some(v) = lookup("GO_BOT_ENGINE_URL") {
            self.engine_url = (!v.is_empty()).then_some(v);
        }
        if let Some(v) = lookup("GO_BOT_ENGINE_TIMEOUT_MS") {
            self.engine_timeout_ms = parse("GO_BOT_ENGINE_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("GO_BOT_MAX_BRANCHES") {
            self.max_branches = parse("GO_BOT_MAX_BRANCHES", &v)?;
        }
        if let Some(v) = lookup("GO_BOT_MAX_DEPTH") {
            self.max_depth = parse("GO_BOT_MAX_DEPTH", &v)?;
        }
        if let Some(v) = lookup("GO_BOT_SEED") {
            self.seed = Some(parse("GO_BOT_SEED", &v)?);
        }
        if let Some(v) = lookup("GO_BOT_GAMES") {
            self.games = parse("GO_BOT_GAMES", &v)?;
        }
        if let Some(v) = lookup("GO_BOT_BOARD_SIZE") {
            self.board_size = parse("GO_BOT_BOARD_SIZE", &v)?;
        }
        if let Some(v) = lookup("GO_BOT_LEVELS") {
            let (a, b) = v
                .split_once(',')
                .ok_or_else(|| BotError::Config(format!("GO_BOT_LEVELS: expected `a,b`, got {v}")))?;
            self.levels = (parse("GO_BOT_LEVELS", a)?, parse("GO_BOT_LEVELS", b)?);
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), BotError> {
        if self.max_branches == 0 {
            return Err(BotError::Config("max_branches must be at least 1".to_string()));
        }
        if !(2..=19).contains(&self.board_size) {
            return Err(BotError::Config(format!(
                "board_size must be within 2..=19, got {}",
                self.board_size
            )));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, BotError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| BotError::Config(format!("{key}: {e}")))
}
