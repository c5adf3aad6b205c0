//! Heuristic Go bot with ten skill levels.
//!
//! Each turn the bot reads the board as its side perceives it, generates
//! candidates, scores them, optionally errs on purpose, and commits exactly
//! one [`commit::SessionDelta`] against the true board.

pub mod adapter;
pub mod arena;
pub mod bot;
pub mod clock;
pub mod commit;
pub mod config;
pub mod error;
pub mod lookahead;
pub mod mistake;
pub mod movegen;
pub mod profile;
pub mod scorer;
pub mod session;

pub use bot::{Bot, Decision};
pub use commit::SessionDelta;
pub use config::BotConfig;
pub use error::BotError;
pub use session::GameSession;
