//! Error types for the game core

use thiserror::Error;

/// Core game errors
///
/// Invalid player input never surfaces here; actions report those as
/// [`crate::sim::ActionOutcome::Ignored`]. These variants are for broken
/// construction arguments and internal invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid atom rank {rank}: table has {table_len} elements")]
    InvalidRank { rank: u32, table_len: usize },

    #[error("Ring position {position} out of range 1..={max}")]
    OutOfRange { position: usize, max: usize },

    #[error("Piece {0} not found in ring")]
    NotFound(u32),

    #[error("Ring is empty")]
    EmptyRing,

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Element table line {line}: {reason}")]
    TableParse { line: usize, reason: String },

    #[error("Invalid settings: {0}")]
    Config(String),
}

pub type GameResult<T> = Result<T, GameError>;
