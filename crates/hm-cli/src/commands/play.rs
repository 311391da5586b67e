use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use hm_game::{GameConfig, GameError, GameSession, RoundFilter};

use crate::render;

pub fn run(
    catalog: &Path,
    category: Option<String>,
    difficulty: Option<&str>,
    seed: Option<u64>,
    tries: u32,
) -> Result<(), String> {
    let filter = RoundFilter {
        category,
        difficulty: super::parse_difficulty(difficulty)?,
    };
    let store = super::open_store(catalog);

    let mut config = GameConfig::default().with_max_tries(tries);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut session = GameSession::new(config);

    println!("  {} Cloud Hangman", "Starting".bold());
    println!(
        "  Wrong guesses allowed per round: {}",
        session.config().max_tries
    );
    println!("  Type a letter or the whole service name. 'stats' shows your record, 'quit' exits.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    'session: loop {
        match session.start_round(store.catalog(), &filter) {
            Ok(_) => {}
            Err(GameError::NoMatch(_)) => {
                println!("{}", "  No services match your criteria.".yellow());
                break;
            }
            Err(e) => return Err(e.to_string()),
        }

        loop {
            let (Some(round), Some(entry)) = (session.round(), session.entry()) else {
                break;
            };
            println!("{}\n", render::round_state(round, entry, session.score().score()));

            let Some(input) = prompt(&mut reader, "Enter a letter or word: ")? else {
                break 'session;
            };
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("quit") {
                break 'session;
            }
            if input.eq_ignore_ascii_case("stats") {
                println!("{}\n", render::statistics(&session.statistics()));
                continue;
            }

            let result = session.guess(&input).map_err(|e| e.to_string())?;
            if result.accepted {
                println!("  {}\n", result.message());
            } else {
                println!("  {}\n", result.message().yellow());
            }

            if result.round_ended {
                finish_round(&session, result.won);
                break;
            }
        }

        match prompt(&mut reader, "Play another round? (y/n): ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") => {
                println!();
            }
            _ => break,
        }
    }

    println!("\n  {}", "Final statistics".bold());
    println!("{}", render::statistics(&session.statistics()));
    println!("  Thanks for playing!");

    Ok(())
}

fn finish_round(session: &GameSession, won: bool) {
    let (Some(round), Some(entry)) = (session.round(), session.entry()) else {
        return;
    };

    println!("{}", render::gallows(round));
    if won {
        println!(
            "  {} You guessed the service: {}",
            "Congratulations!".green().bold(),
            round.target().bold()
        );
    } else {
        println!(
            "  {} The service was: {}",
            "Out of tries.".red().bold(),
            round.target().bold()
        );
    }

    if !entry.study_notes.is_empty() {
        println!("\n  {}", "Certification Study Tip:".bold());
        for line in entry.study_notes.lines() {
            println!("    {line}");
        }
    }

    let points = session.last_award().unwrap_or(0);
    println!(
        "\n  Points this round: {points} | Score: {}\n",
        session.score().score()
    );
}

/// Print a prompt and read one trimmed line. `None` on end of input.
fn prompt(reader: &mut impl BufRead, text: &str) -> Result<Option<String>, String> {
    print!("{text}");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(e.to_string()),
    }
}
