//! CLI frontend for Cloud Hangman.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hangman",
    about = "Cloud Hangman: guess cloud services, learn for the exam",
    version,
    propagate_version = true
)]
struct Cli {
    /// Service catalog file
    #[arg(
        long,
        global = true,
        env = "HANGMAN_CATALOG",
        default_value = "aws_services.json"
    )]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactive rounds on the terminal
    Play {
        /// Only pick services from this category
        #[arg(long)]
        category: Option<String>,

        /// Only pick services of this difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,

        /// RNG seed for reproducible target selection
        #[arg(short, long)]
        seed: Option<u64>,

        /// Wrong guesses allowed per round (1-6)
        #[arg(short, long, default_value = "6")]
        tries: u32,
    },

    /// List services in the catalog
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter by difficulty
        #[arg(long)]
        difficulty: Option<String>,
    },

    /// List the categories present in the catalog
    Categories,

    /// Show everything known about a service
    Show {
        /// Service name (case-insensitive)
        name: String,
    },

    /// Add a new service
    Add {
        /// Service name (letters and digits only)
        name: String,

        /// Hint shown while guessing
        #[arg(short, long)]
        description: String,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Difficulty (easy, medium, hard)
        #[arg(short = 'l', long)]
        difficulty: String,

        /// Certification study notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Replace the service if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Update fields of an existing service (omitted fields are kept)
    Update {
        /// Service name (case-insensitive)
        name: String,

        /// New hint
        #[arg(short, long)]
        description: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New difficulty
        #[arg(short = 'l', long)]
        difficulty: Option<String>,

        /// New study notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a service
    Delete {
        /// Service name (case-insensitive)
        name: String,
    },

    /// Merge a pre-fetched documentation feed into the catalog
    Refresh {
        /// Feed document (JSON with services, exam_domains, announcements)
        #[arg(short, long)]
        feed: PathBuf,

        /// Which feeds to merge: docs, cert, blogs, all
        #[arg(long, default_value = "all")]
        scope: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = cli.catalog.as_path();

    let result = match cli.command {
        Commands::Play {
            category,
            difficulty,
            seed,
            tries,
        } => commands::play::run(catalog, category, difficulty.as_deref(), seed, tries),
        Commands::List {
            category,
            difficulty,
        } => commands::list::run(catalog, category.as_deref(), difficulty.as_deref()),
        Commands::Categories => commands::categories::run(catalog),
        Commands::Show { name } => commands::show::run(catalog, &name),
        Commands::Add {
            name,
            description,
            category,
            difficulty,
            notes,
            overwrite,
        } => commands::add::run(
            catalog,
            &name,
            &description,
            &category,
            &difficulty,
            &notes,
            overwrite,
        ),
        Commands::Update {
            name,
            description,
            category,
            difficulty,
            notes,
        } => commands::update::run(catalog, &name, description, category, difficulty, notes),
        Commands::Delete { name } => commands::delete::run(catalog, &name),
        Commands::Refresh { feed, scope } => commands::refresh::run(catalog, &feed, &scope),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
