//! Error types for the hangman engine.

use thiserror::Error;

use crate::select::RoundFilter;

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while driving a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// No catalog entry matches the requested filters.
    #[error("no services match {0}")]
    NoMatch(RoundFilter),

    /// A guess was made with no round in play.
    #[error("no active round")]
    NoActiveRound,

    /// Scoring was requested before the round was decided.
    #[error("round is still in progress")]
    RoundInProgress,

    /// Catalog error.
    #[error("{0}")]
    Catalog(#[from] hm_core::CatalogError),
}
