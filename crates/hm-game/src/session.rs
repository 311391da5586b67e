//! Game session management.
//!
//! `GameSession` is what a frontend holds on to: it owns the RNG, the round
//! in play (with the metadata of its target), and the score record, and
//! resolves each round into the score exactly once.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use hm_core::{Catalog, ServiceEntry};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::round::{GameRound, GuessResult};
use crate::score::{ScoreRecord, Statistics};
use crate::select::{RoundFilter, pick_target};

struct ActiveRound {
    round: GameRound,
    entry: ServiceEntry,
    awarded: Option<u32>,
}

/// A sequence of rounds with a running score.
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    active: Option<ActiveRound>,
    score: ScoreRecord,
}

impl GameSession {
    /// Create a session. Without a configured seed the RNG is seeded from
    /// the operating system.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng,
            active: None,
            score: ScoreRecord::new(),
        }
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new round against a service matching `filter`.
    ///
    /// Fails with `NoMatch` if nothing matches, leaving any previous round
    /// in place. An undecided previous round is abandoned unscored.
    pub fn start_round(&mut self, catalog: &Catalog, filter: &RoundFilter) -> GameResult<&GameRound> {
        let name = pick_target(catalog, filter, &mut self.rng)?;
        let entry = catalog
            .get(&name)
            .cloned()
            .ok_or_else(|| GameError::NoMatch(filter.clone()))?;

        if let Some(previous) = &self.active {
            debug!(
                service = previous.round.target(),
                outcome = %previous.round.outcome(),
                "closing previous round"
            );
        }

        debug!(service = %name, %filter, "starting round");
        let active = self.active.insert(ActiveRound {
            round: GameRound::with_tries(&name, self.config.max_tries),
            entry,
            awarded: None,
        });
        Ok(&active.round)
    }

    /// The round in play, if any.
    pub fn round(&self) -> Option<&GameRound> {
        self.active.as_ref().map(|a| &a.round)
    }

    /// Catalog metadata of the current target (hint, category, study notes).
    pub fn entry(&self) -> Option<&ServiceEntry> {
        self.active.as_ref().map(|a| &a.entry)
    }

    /// Points the current round earned, once it has been decided.
    pub fn last_award(&self) -> Option<u32> {
        self.active.as_ref().and_then(|a| a.awarded)
    }

    /// Apply a guess to the round in play. When the guess decides the
    /// round, the result is recorded in the score.
    pub fn guess(&mut self, raw: &str) -> GameResult<GuessResult> {
        let active = self.active.as_mut().ok_or(GameError::NoActiveRound)?;
        let result = active.round.apply_guess(raw);

        if result.round_ended && active.awarded.is_none() {
            let points = self
                .score
                .resolve_round(&active.round, active.entry.difficulty)?;
            active.awarded = Some(points);
            info!(
                service = active.round.target(),
                outcome = %active.round.outcome(),
                points,
                "round finished"
            );
        }

        Ok(result)
    }

    /// The score record.
    pub fn score(&self) -> &ScoreRecord {
        &self.score
    }

    /// Summary statistics for the session so far.
    pub fn statistics(&self) -> Statistics {
        self.score.statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{GuessFeedback, Outcome};
    use hm_core::Difficulty;
    use hm_core::seed::default_catalog;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default().with_seed(42))
    }

    fn storage() -> RoundFilter {
        RoundFilter::any().category("Storage")
    }

    #[test]
    fn create_session() {
        let s = session();
        assert!(s.round().is_none());
        assert!(s.entry().is_none());
        assert_eq!(s.statistics().total_games, 0);
    }

    #[test]
    fn guess_without_round() {
        let mut s = session();
        assert!(matches!(s.guess("a"), Err(GameError::NoActiveRound)));
    }

    #[test]
    fn round_carries_entry_metadata() {
        let mut s = session();
        let round = s.start_round(&default_catalog(), &storage()).unwrap();
        assert_eq!(round.target(), "S3");
        let entry = s.entry().unwrap();
        assert_eq!(entry.category, "Storage");
        assert_eq!(entry.difficulty, Difficulty::Easy);
        assert!(entry.study_notes.contains("storage classes"));
    }

    #[test]
    fn win_is_scored_once() {
        let mut s = session();
        s.start_round(&default_catalog(), &storage()).unwrap();
        assert!(!s.guess("s").unwrap().round_ended);
        let res = s.guess("3").unwrap();
        assert!(res.won);
        assert_eq!(s.last_award(), Some(10));

        let again = s.guess("x").unwrap();
        assert_eq!(again.feedback, GuessFeedback::RoundOver);
        assert_eq!(s.score().score(), 10);
        assert_eq!(s.score().history().len(), 1);
    }

    #[test]
    fn loss_is_recorded() {
        let mut s = GameSession::new(GameConfig::default().with_seed(1).with_max_tries(2));
        assert_eq!(s.config().max_tries, 2);
        s.start_round(&default_catalog(), &RoundFilter::any().category("storage"))
            .unwrap();
        s.guess("x").unwrap();
        let res = s.guess("y").unwrap();
        assert!(res.round_ended);
        assert!(!res.won);
        assert_eq!(s.round().unwrap().outcome(), Outcome::Lost);
        assert_eq!(s.last_award(), Some(0));
        let stats = s.statistics();
        assert_eq!(stats.games_lost, 1);
        assert_eq!(stats.win_rate_percent, 0.0);
    }

    #[test]
    fn medium_win_scores_double() {
        let mut s = session();
        let filter = RoundFilter::any()
            .category("Compute")
            .difficulty(Difficulty::Medium);
        s.start_round(&default_catalog(), &filter).unwrap();
        s.guess("lambda").unwrap();
        assert_eq!(s.score().score(), 20);
    }

    #[test]
    fn no_match_keeps_previous_round() {
        let mut s = session();
        s.start_round(&default_catalog(), &storage()).unwrap();
        let filter = RoundFilter::any()
            .category("Storage")
            .difficulty(Difficulty::Hard);
        assert!(matches!(
            s.start_round(&default_catalog(), &filter),
            Err(GameError::NoMatch(_))
        ));
        assert_eq!(s.round().unwrap().target(), "S3");
    }

    #[test]
    fn score_accumulates_across_rounds() {
        let mut s = session();
        let catalog = default_catalog();
        for _ in 0..3 {
            s.start_round(&catalog, &storage()).unwrap();
            s.guess("S3").unwrap();
        }
        let stats = s.statistics();
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.current_score, 30);
        assert_eq!(stats.win_rate_percent, 100.0);
    }

    #[test]
    fn abandoned_round_is_not_scored() {
        let mut s = session();
        let catalog = default_catalog();
        s.start_round(&catalog, &storage()).unwrap();
        s.guess("q").unwrap();
        s.start_round(&catalog, &storage()).unwrap();
        assert_eq!(s.round().unwrap().tries_remaining(), 6);
        assert!(s.score().history().is_empty());
    }
}
