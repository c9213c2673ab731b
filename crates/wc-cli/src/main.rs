//! CLI frontend for the Wordchain learning game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wc_game::FACTS_TABLE;

#[derive(Parser)]
#[command(
    name = "wordchain",
    about = "Wordchain: learn places by chaining their names",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding facts, saves, and the leaderboard
    #[arg(short, long, default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the location facts
    Facts {
        /// Table (file stem) holding the facts
        #[arg(short, long, default_value = FACTS_TABLE)]
        table: String,
    },

    /// Play an interactive word-chain session
    Play {
        /// Player id
        #[arg(short, long)]
        user: String,

        /// Difficulty level: 0 easy, 1 normal, 2 hard
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        level: i32,

        /// RNG seed for the first prompt
        #[arg(short, long)]
        seed: Option<u64>,

        /// Require the chaining letters to match case exactly
        #[arg(long)]
        exact_case: bool,

        /// Continue the player's last saved game
        #[arg(short, long)]
        resume: bool,

        /// Table (file stem) holding the facts
        #[arg(short, long, default_value = FACTS_TABLE)]
        table: String,
    },

    /// Register a new player
    Register {
        /// Player id
        id: String,

        /// Login PIN
        #[arg(short, long, default_value_t = 0)]
        pin: u32,
    },

    /// Set a player's rank label
    Rank {
        /// Player id
        id: String,

        /// New rank, from 0 to the number of players minus one
        rank: usize,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dir = cli.data_dir;

    let result = match cli.command {
        Commands::Facts { table } => commands::facts::run(&dir, &table),
        Commands::Play {
            user,
            level,
            seed,
            exact_case,
            resume,
            table,
        } => commands::play::run(
            &dir,
            &commands::play::PlayOptions {
                user,
                level,
                seed,
                exact_case,
                resume,
                table,
            },
        ),
        Commands::Register { id, pin } => commands::register::run(&dir, &id, pin),
        Commands::Rank { id, rank } => commands::rank::run(&dir, &id, rank),
        Commands::Leaderboard { json } => commands::leaderboard::run(&dir, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
