//! Score keeping and game history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hm_core::Difficulty;

use crate::error::{GameError, GameResult};
use crate::round::{GameRound, Outcome};

/// Points for a win before the difficulty multiplier.
pub const BASE_POINTS: u32 = 10;

/// One finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The service that was the target.
    pub target: String,
    /// `Won` or `Lost`.
    pub result: Outcome,
    /// When the round was resolved.
    pub timestamp: DateTime<Utc>,
}

/// Cumulative score and history for the lifetime of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    score: u32,
    history: Vec<HistoryRecord>,
}

impl ScoreRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Finished rounds, oldest first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Record a decided round and return the points it earned.
    ///
    /// Wins earn `10 × multiplier` for the target's difficulty; losses earn
    /// nothing. Either way one history record is appended.
    pub fn resolve_round(&mut self, round: &GameRound, difficulty: Difficulty) -> GameResult<u32> {
        let points = match round.outcome() {
            Outcome::Unresolved => return Err(GameError::RoundInProgress),
            Outcome::Won => BASE_POINTS * difficulty.multiplier(),
            Outcome::Lost => 0,
        };
        self.score += points;
        self.history.push(HistoryRecord {
            target: round.target().to_string(),
            result: round.outcome(),
            timestamp: Utc::now(),
        });
        Ok(points)
    }

    /// Summary numbers over the whole history.
    pub fn statistics(&self) -> Statistics {
        let total_games = self.history.len();
        let games_won = self
            .history
            .iter()
            .filter(|h| h.result == Outcome::Won)
            .count();
        let win_rate_percent = if total_games == 0 {
            0.0
        } else {
            100.0 * games_won as f64 / total_games as f64
        };
        Statistics {
            total_games,
            games_won,
            games_lost: total_games - games_won,
            win_rate_percent,
            current_score: self.score,
        }
    }
}

/// Summary of a score record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Rounds finished.
    pub total_games: usize,
    /// Rounds won.
    pub games_won: usize,
    /// Rounds lost.
    pub games_lost: usize,
    /// Share of rounds won, 0 when nothing was played.
    pub win_rate_percent: f64,
    /// Cumulative score.
    pub current_score: u32,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_games == 0 {
            return write!(f, "No games played yet.");
        }
        writeln!(f, "Total games played: {}", self.total_games)?;
        writeln!(f, "Games won: {}", self.games_won)?;
        writeln!(f, "Games lost: {}", self.games_lost)?;
        writeln!(f, "Win rate: {:.1}%", self.win_rate_percent)?;
        write!(f, "Current score: {}", self.current_score)
    }
}
