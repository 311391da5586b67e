//! A single round of hangman.
//!
//! A round knows its target, which positions have been revealed, what has
//! been guessed, and how many tries are left. Guesses are either a single
//! letter/digit or a full word of the target's length; everything else is
//! rejected without touching the state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TRIES;

/// Stand-in shown for an unrevealed position.
pub const PLACEHOLDER: char = '_';

/// How a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Still guessing.
    Unresolved,
    /// The target was fully revealed or guessed outright.
    Won,
    /// Tries ran out first.
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "in progress"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// What happened to a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessFeedback {
    /// The letter occurs in the target; `revealed` positions were uncovered.
    Hit {
        /// The guessed character.
        letter: char,
        /// How many positions it uncovered.
        revealed: usize,
    },
    /// The letter does not occur in the target. Costs a try.
    Miss(char),
    /// The letter was guessed before. Rejected.
    RepeatedLetter(char),
    /// The word is the target.
    CorrectWord(String),
    /// The word is not the target. Costs a try.
    WrongWord(String),
    /// The word was guessed before. Rejected.
    RepeatedWord(String),
    /// Neither a single character nor a word of the right length. Rejected.
    Invalid,
    /// The round is already decided. Rejected.
    RoundOver,
}

impl GuessFeedback {
    /// Whether the guess was taken (as opposed to rejected as input).
    pub fn accepted(&self) -> bool {
        matches!(
            self,
            Self::Hit { .. } | Self::Miss(_) | Self::CorrectWord(_) | Self::WrongWord(_)
        )
    }
}

impl fmt::Display for GuessFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit { letter, .. } => write!(f, "Good job, {letter} is in the word!"),
            Self::Miss(letter) => write!(f, "{letter} is not in the word."),
            Self::RepeatedLetter(letter) => write!(f, "You already guessed the letter {letter}"),
            Self::CorrectWord(word) => write!(f, "{word} is the word!"),
            Self::WrongWord(word) => write!(f, "{word} is not the word."),
            Self::RepeatedWord(word) => write!(f, "You already guessed the word {word}"),
            Self::Invalid => write!(f, "Not a valid guess."),
            Self::RoundOver => write!(f, "This round is already over."),
        }
    }
}

/// The result of applying one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    /// What happened.
    pub feedback: GuessFeedback,
    /// False when the guess was rejected and nothing changed.
    pub accepted: bool,
    /// True once the round is won or lost.
    pub round_ended: bool,
    /// True if the round is won.
    pub won: bool,
}

impl GuessResult {
    /// User-facing message for this guess.
    pub fn message(&self) -> String {
        self.feedback.to_string()
    }
}

/// One play-through against a single target.
#[derive(Debug, Clone)]
pub struct GameRound {
    target: String,
    letters: Vec<char>,
    revealed: Vec<Option<char>>,
    guessed_letters: Vec<char>,
    guessed_words: Vec<String>,
    max_tries: u32,
    tries_remaining: u32,
    outcome: Outcome,
}

impl GameRound {
    /// Start a round against `target` with the default six tries.
    pub fn new(target: &str) -> Self {
        Self::with_tries(target, DEFAULT_TRIES)
    }

    /// Start a round against `target` with a custom number of tries.
    pub fn with_tries(target: &str, tries: u32) -> Self {
        let target = hm_core::normalize_name(target);
        let letters: Vec<char> = target.chars().collect();
        Self {
            revealed: vec![None; letters.len()],
            target,
            letters,
            guessed_letters: Vec::new(),
            guessed_words: Vec::new(),
            max_tries: tries,
            tries_remaining: tries,
            outcome: Outcome::Unresolved,
        }
    }

    /// The name being guessed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The revealed pattern, with [`PLACEHOLDER`] for hidden positions.
    pub fn pattern(&self) -> String {
        self.revealed
            .iter()
            .map(|c| c.unwrap_or(PLACEHOLDER))
            .collect()
    }

    /// Letters guessed so far, in the order they were tried.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    /// Words guessed so far, in the order they were tried.
    pub fn guessed_words(&self) -> &[String] {
        &self.guessed_words
    }

    /// Tries left before the round is lost.
    pub fn tries_remaining(&self) -> u32 {
        self.tries_remaining
    }

    /// Tries the round started with.
    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Wrong guesses made so far.
    pub fn wrong_guesses(&self) -> u32 {
        self.max_tries - self.tries_remaining
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the round is won or lost.
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Unresolved
    }

    /// Apply a raw guess. Input is trimmed and uppercased first.
    pub fn apply_guess(&mut self, raw: &str) -> GuessResult {
        let feedback = if self.is_over() {
            GuessFeedback::RoundOver
        } else {
            let guess = raw.trim().to_uppercase();
            let chars: Vec<char> = guess.chars().collect();
            let well_formed = !chars.is_empty() && chars.iter().all(|c| c.is_alphanumeric());

            match chars.as_slice() {
                [letter] if well_formed => self.guess_letter(*letter),
                _ if well_formed && chars.len() == self.letters.len() => self.guess_word(guess),
                _ => GuessFeedback::Invalid,
            }
        };

        // A completing guess never costs a try, so checking the win first
        // is only a formality.
        if self.outcome == Outcome::Unresolved && self.tries_remaining == 0 {
            self.outcome = Outcome::Lost;
        }

        GuessResult {
            accepted: feedback.accepted(),
            round_ended: self.is_over(),
            won: self.outcome == Outcome::Won,
            feedback,
        }
    }

    fn guess_letter(&mut self, letter: char) -> GuessFeedback {
        if self.guessed_letters.contains(&letter) {
            return GuessFeedback::RepeatedLetter(letter);
        }
        self.guessed_letters.push(letter);

        let mut revealed = 0;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.letters) {
            if c == letter {
                *slot = Some(c);
                revealed += 1;
            }
        }

        if revealed == 0 {
            self.tries_remaining = self.tries_remaining.saturating_sub(1);
            return GuessFeedback::Miss(letter);
        }
        if self.revealed.iter().all(Option::is_some) {
            self.outcome = Outcome::Won;
        }
        GuessFeedback::Hit { letter, revealed }
    }

    fn guess_word(&mut self, word: String) -> GuessFeedback {
        if self.guessed_words.contains(&word) {
            return GuessFeedback::RepeatedWord(word);
        }
        self.guessed_words.push(word.clone());

        if word != self.target {
            self.tries_remaining = self.tries_remaining.saturating_sub(1);
            return GuessFeedback::WrongWord(word);
        }
        self.revealed = self.letters.iter().copied().map(Some).collect();
        self.outcome = Outcome::Won;
        GuessFeedback::CorrectWord(word)
    }
}
