//! Hangman engine for Cloud Hangman.
//!
//! Picks a target service from a [`hm_core::Catalog`], tracks guesses
//! against it, decides wins and losses, and keeps a running score. The
//! pieces are plain values ([`GameRound`], [`ScoreRecord`]) with a thin
//! [`GameSession`] driver on top for frontends.

pub mod config;
pub mod error;
pub mod round;
pub mod score;
pub mod select;
pub mod session;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use round::{GameRound, GuessFeedback, GuessResult, Outcome};
pub use score::{HistoryRecord, ScoreRecord, Statistics};
pub use select::{RoundFilter, select_round};
pub use session::GameSession;
