//! Configuration for a game session.

/// Tries a round starts with unless configured otherwise.
pub const DEFAULT_TRIES: u32 = 6;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible target selection. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Wrong guesses allowed per round (1-6).
    pub max_tries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_tries: DEFAULT_TRIES,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tries per round (clamped to 1-6, the gallows has six stages).
    pub fn with_max_tries(mut self, tries: u32) -> Self {
        self.max_tries = tries.clamp(1, DEFAULT_TRIES);
        self
    }
}
