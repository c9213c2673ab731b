//! Word-chain game engine.
//!
//! Players are shown a location and must answer with a word that begins
//! with the prompt's last letter. This crate loads the location facts,
//! issues and validates chain prompts, maps difficulty levels to point and
//! life budgets, and runs a single player's session with checkpointing
//! through a [`wc_core::RecordStore`].

pub mod chain;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod facts;
pub mod session;

pub use chain::{CaseRule, ChainEngine, NO_DATA, check_answer};
pub use config::GameConfig;
pub use difficulty::{Difficulty, LEVEL_COUNT, Level, lives, points};
pub use error::{GameError, GameResult};
pub use facts::{FACT_NOT_FOUND, FACTS_TABLE, FactStore};
pub use session::{
    GameSession, RoundOutcome, SAVES_TABLE, SESSIONS_TABLE, SessionPhase, SessionState,
};
