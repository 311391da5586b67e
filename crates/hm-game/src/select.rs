//! Target selection.

use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;

use hm_core::{Catalog, Difficulty};

use crate::config::DEFAULT_TRIES;
use crate::error::{GameError, GameResult};
use crate::round::GameRound;

/// Constraints on which services a round may target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundFilter {
    /// Only services in this category (case-insensitive).
    pub category: Option<String>,
    /// Only services of this difficulty.
    pub difficulty: Option<Difficulty>,
}

impl RoundFilter {
    /// No constraints.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a difficulty.
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

impl fmt::Display for RoundFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.category, self.difficulty) {
            (None, None) => write!(f, "any category and difficulty"),
            (Some(c), None) => write!(f, "category {c}"),
            (None, Some(d)) => write!(f, "difficulty {d}"),
            (Some(c), Some(d)) => write!(f, "category {c} and difficulty {d}"),
        }
    }
}

/// Pick a target uniformly from the services matching `filter` and start a
/// round against it with the default tries.
pub fn select_round(catalog: &Catalog, filter: &RoundFilter, rng: &mut StdRng) -> GameResult<GameRound> {
    let name = pick_target(catalog, filter, rng)?;
    Ok(GameRound::with_tries(&name, DEFAULT_TRIES))
}

/// Pick the name of a matching service uniformly at random.
pub(crate) fn pick_target(
    catalog: &Catalog,
    filter: &RoundFilter,
    rng: &mut StdRng,
) -> GameResult<String> {
    let candidates = catalog.filter(filter.category.as_deref(), filter.difficulty);
    if candidates.is_empty() {
        return Err(GameError::NoMatch(filter.clone()));
    }
    let (name, _) = candidates[rng.random_range(0..candidates.len())];
    Ok(name.to_string())
}
