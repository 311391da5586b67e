//! Text rendering for the play loop.

use colored::Colorize;

use hm_core::ServiceEntry;
use hm_game::{GameRound, Statistics};

/// Gallows drawings, from fully hanged (index 0) to empty (index 6).
const STAGES: [[&str; 7]; 7] = [
    [
        "--------",
        "|      |",
        "|      O",
        "|     \\|/",
        "|      |",
        "|     / \\",
        "-",
    ],
    [
        "--------",
        "|      |",
        "|      O",
        "|     \\|/",
        "|      |",
        "|     /",
        "-",
    ],
    [
        "--------",
        "|      |",
        "|      O",
        "|     \\|/",
        "|      |",
        "|",
        "-",
    ],
    [
        "--------",
        "|      |",
        "|      O",
        "|     \\|",
        "|      |",
        "|",
        "-",
    ],
    [
        "--------",
        "|      |",
        "|      O",
        "|      |",
        "|      |",
        "|",
        "-",
    ],
    [
        "--------",
        "|      |",
        "|      O",
        "|",
        "|",
        "|",
        "-",
    ],
    [
        "--------",
        "|      |",
        "|",
        "|",
        "|",
        "|",
        "-",
    ],
];

/// Which drawing to show. Rounds with fewer than six tries are scaled
/// onto the six-step drawing.
pub fn stage_index(tries_remaining: u32, max_tries: u32) -> usize {
    if max_tries == 0 {
        return 0;
    }
    let last = (STAGES.len() - 1) as u32;
    (tries_remaining.min(max_tries) * last / max_tries) as usize
}

pub fn gallows(round: &GameRound) -> String {
    STAGES[stage_index(round.tries_remaining(), round.max_tries())]
        .iter()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `"S_"` becomes `"S _"`.
pub fn spaced(pattern: &str) -> String {
    pattern
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

fn joined_or_dash(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Everything the player sees before a guess.
pub fn round_state(round: &GameRound, entry: &ServiceEntry, score: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  Category: {} | Difficulty: {}\n",
        entry.category, entry.difficulty
    ));
    out.push_str(&format!("  Hint: {}\n", entry.description));
    out.push_str(&gallows(round));
    out.push('\n');
    out.push_str(&format!("  Word: {}\n", spaced(&round.pattern()).bold()));
    out.push_str(&format!(
        "  Guessed letters: {}\n",
        joined_or_dash(round.guessed_letters().iter().map(char::to_string))
    ));
    out.push_str(&format!(
        "  Guessed words: {}\n",
        joined_or_dash(round.guessed_words().iter().cloned())
    ));
    out.push_str(&format!(
        "  Tries left: {} | Score: {score}",
        round.tries_remaining()
    ));
    out
}

pub fn statistics(stats: &Statistics) -> String {
    stats
        .to_string()
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_core::Difficulty;

    #[test]
    fn full_tries_show_empty_gallows() {
        assert_eq!(stage_index(6, 6), 6);
        assert_eq!(stage_index(0, 6), 0);
        assert_eq!(stage_index(3, 6), 3);
    }

    #[test]
    fn short_rounds_are_scaled() {
        assert_eq!(stage_index(2, 2), 6);
        assert_eq!(stage_index(1, 2), 3);
        assert_eq!(stage_index(0, 2), 0);
        assert_eq!(stage_index(0, 0), 0);
    }

    #[test]
    fn gallows_tracks_wrong_guesses() {
        let mut round = GameRound::new("EC2");
        assert!(!gallows(&round).contains('O'));
        round.apply_guess("x");
        assert!(gallows(&round).contains('O'));
        for g in ["q", "z", "w", "v", "y"] {
            round.apply_guess(g);
        }
        assert!(gallows(&round).contains("/ \\"));
    }

    #[test]
    fn spaced_pattern() {
        assert_eq!(spaced("S_"), "S _");
        assert_eq!(spaced(""), "");
    }

    #[test]
    fn round_state_lists_guesses() {
        colored::control::set_override(false);
        let mut round = GameRound::new("EC2");
        round.apply_guess("e");
        round.apply_guess("x");
        round.apply_guess("ecs");
        let entry = ServiceEntry::new("Virtual servers", "Compute", Difficulty::Easy, "");
        let text = round_state(&round, &entry, 20);
        assert!(text.contains("Category: Compute | Difficulty: Easy"));
        assert!(text.contains("Hint: Virtual servers"));
        assert!(text.contains("Word: E _ _"));
        assert!(text.contains("Guessed letters: E, X"));
        assert!(text.contains("Guessed words: ECS"));
        assert!(text.contains("Tries left: 4 | Score: 20"));
    }
}
