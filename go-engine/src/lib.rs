//! Go rules: board, groups and liberties, move legality (captures, ko,
//! suicide) and territory regions.

pub mod error;
pub mod goban;
pub mod group;
pub mod ko;
pub mod stone;
pub mod territory;
pub mod turn;

/// `(col, row)`, zero-based from the top-left corner.
pub type Point = (u8, u8);

pub use error::GoError;
pub use goban::{Captures, Goban, MoveOptions, Placement};
pub use group::Group;
pub use ko::Ko;
pub use stone::Stone;
pub use turn::{Move, Turn};
