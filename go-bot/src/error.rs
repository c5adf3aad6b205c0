use std::fmt;

use go_engine::GoError;

#[derive(Debug)]
pub enum BotError {
    /// Bad or unreadable configuration.
    Config(String),
    /// The external engine failed or answered with something unusable.
    Engine(String),
    /// The external engine did not answer in time.
    Timeout,
    /// A rules violation while applying a session delta.
    Rules(GoError),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "Config error: {msg}"),
            BotError::Engine(msg) => write!(f, "External engine error: {msg}"),
            BotError::Timeout => write!(f, "External engine timed out"),
            BotError::Rules(e) => write!(f, "Rules error: {e}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<GoError> for BotError {
    fn from(e: GoError) -> Self {
        BotError::Rules(e)
    }
}

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BotError::Timeout
        } else {
            BotError::Engine(e.to_string())
        }
    }
}
