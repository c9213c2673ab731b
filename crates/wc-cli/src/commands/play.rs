use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use wc_core::DirStore;
use wc_game::{CaseRule, Difficulty, GameConfig, GameSession, SessionPhase};

/// Flags of the `play` command.
pub struct PlayOptions {
    pub user: String,
    pub level: i32,
    pub seed: Option<u64>,
    pub exact_case: bool,
    pub resume: bool,
    pub table: String,
}

pub fn run(dir: &Path, opts: &PlayOptions) -> Result<(), String> {
    let mut store = DirStore::new(dir);
    let facts = super::load_facts(&store, &opts.table)?;
    let mut board = super::load_board(&store)?;

    let mut config = GameConfig::default().with_level(opts.level);
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if opts.exact_case {
        config = config.with_case_rule(CaseRule::Exact);
    }

    let mut session = GameSession::from_config(&opts.user, &facts, store.clone(), &config);
    if opts.resume {
        match session.restore_user_state(&opts.user) {
            Some(state) => println!(
                "  Resuming at \"{}\" with {} points",
                state.current_question, state.score
            ),
            None => println!("  No saved game for '{}', starting fresh", opts.user),
        }
    }

    let Some(difficulty) = Difficulty::from_level(session.level()) else {
        return Err(format!(
            "unknown level {} (expected 0, 1 or 2)",
            session.level()
        ));
    };

    println!("  {} Wordchain", "Starting".bold());
    println!(
        "  Player: {} | Level: {difficulty} | Lives: {}",
        opts.user,
        session.lives_left()
    );
    println!("  Answer with a place whose name starts with the last letter of the prompt.");
    println!("  Commands: 'fact', 'save', 'quit'.\n");

    if session.start().is_none() {
        return Err("no prompt available".into());
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut out_of_lives = false;

    loop {
        println!(
            "  {} {}  (score {}, lives {})",
            "Prompt:".cyan(),
            session.current_question().bold(),
            session.scores(),
            session.lives_left()
        );
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
        if input.eq_ignore_ascii_case("fact") {
            let fact = session.fact_or_default(session.current_question());
            println!("  {fact}\n");
            continue;
        }
        if input.eq_ignore_ascii_case("save") {
            let level = session.level();
            session
                .save_user_state(&opts.user, level)
                .map_err(|e| format!("cannot save game: {e}"))?;
            println!("  Game saved.\n");
            continue;
        }

        let outcome = session.submit_answer(input).map_err(|e| e.to_string())?;
        if outcome.correct {
            println!(
                "  {} +{} points\n",
                "Correct!".green(),
                outcome.points_awarded
            );
        } else {
            println!(
                "  {} {} lives left\n",
                "Wrong.".red(),
                outcome.lives_left
            );
        }

        if *session.advance().map_err(|e| e.to_string())? == SessionPhase::Ended {
            out_of_lives = true;
            println!("  {}", "Out of lives!".red().bold());
            break;
        }
    }

    if !out_of_lives {
        let level = session.level();
        session
            .save_user_state(&opts.user, level)
            .map_err(|e| format!("cannot save game: {e}"))?;
    }

    let final_state = session.finish().clone();
    tracing::debug!(
        user = %opts.user,
        level = final_state.level,
        score = final_state.score,
        "game finished"
    );
    println!("  Final score: {}", final_state.score);

    if board.record_score(&opts.user, final_state.level, final_state.score) {
        println!("  {}", "New high score!".yellow().bold());
    }
    super::save_board(&board, &mut store)?;

    Ok(())
}
