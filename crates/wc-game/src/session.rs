//! One player's game session.
//!
//! `GameSession` borrows a shared [`FactStore`], owns its chain engine and
//! storage collaborator, and walks through
//! `Uninitialized -> Loaded -> InProgress -> Answered -> {InProgress | Ended}`.
//! Saving and loading never move the session between phases.
//!
//! Two persisted layouts share the same five columns:
//!
//! - `sessions`: `player, level, score, current_question, incorrect`,
//!   one row per `(player, level)`.
//! - `saves`: `user, level, score, current_question, incorrect`,
//!   one row per user.

use serde::{Deserialize, Serialize};

use wc_core::{Record, RecordStore};

use crate::chain::ChainEngine;
use crate::config::GameConfig;
use crate::difficulty::{Level, lives, points};
use crate::error::{GameError, GameResult};
use crate::facts::FactStore;

/// Table of per-level checkpoints, keyed by `(player, level)`.
pub const SESSIONS_TABLE: &str = "sessions";

/// Table of durable per-user saves, keyed by user.
pub const SAVES_TABLE: &str = "saves";

/// The mutable part of a session that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Difficulty level.
    pub level: Level,
    /// Points scored so far.
    pub score: u32,
    /// The prompt currently on the board.
    pub current_question: String,
    /// Incorrect answers so far.
    pub incorrect: u32,
}

impl SessionState {
    fn to_record(&self, owner: &str) -> Record {
        Record::new(vec![
            owner.to_string(),
            self.level.to_string(),
            self.score.to_string(),
            self.current_question.clone(),
            self.incorrect.to_string(),
        ])
    }

    fn from_record(record: &Record) -> GameResult<Self> {
        if record.len() != 5 {
            return Err(GameError::MalformedRecord(format!(
                "expected 5 fields, found {}",
                record.len()
            )));
        }
        let fields = record.fields();
        Ok(Self {
            level: parse_field(&fields[1], "level")?,
            score: parse_field(&fields[2], "score")?,
            current_question: fields[3].clone(),
            incorrect: parse_field(&fields[4], "incorrect")?,
        })
    }
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str) -> GameResult<T> {
    value
        .parse()
        .map_err(|_| GameError::MalformedRecord(format!("{name} is not a number: \"{value}\"")))
}

/// Where a session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No facts are available, so no prompt can be issued.
    Uninitialized,
    /// Facts are available; no prompt issued yet.
    Loaded,
    /// A prompt is waiting for an answer.
    InProgress,
    /// An answer was evaluated; call [`GameSession::advance`] to continue.
    Answered {
        /// Whether the answer continued the chain.
        correct: bool,
        /// The trimmed answer text.
        answer: String,
    },
    /// Out of lives, or the player finished.
    Ended,
}

/// Result of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Whether the answer continued the chain.
    pub correct: bool,
    /// Points added to the score by this answer.
    pub points_awarded: u32,
    /// Lives remaining after this answer.
    pub lives_left: u32,
}

/// An interactive word-chain session for a single player.
pub struct GameSession<'f, S: RecordStore> {
    player: String,
    facts: &'f FactStore,
    store: S,
    chain: ChainEngine,
    state: SessionState,
    phase: SessionPhase,
}

impl<'f, S: RecordStore> GameSession<'f, S> {
    /// Create a session for `player` at `level`.
    pub fn new(
        player: impl Into<String>,
        level: Level,
        facts: &'f FactStore,
        store: S,
        config: &GameConfig,
    ) -> Self {
        let phase = if facts.is_empty() {
            SessionPhase::Uninitialized
        } else {
            SessionPhase::Loaded
        };
        Self {
            player: player.into(),
            facts,
            store,
            chain: ChainEngine::new(config),
            state: SessionState {
                level,
                ..SessionState::default()
            },
            phase,
        }
    }

    /// Create a session for `player` at the level set in `config`.
    pub fn from_config(
        player: impl Into<String>,
        facts: &'f FactStore,
        store: S,
        config: &GameConfig,
    ) -> Self {
        Self::new(player, config.level, facts, store, config)
    }

    /// The player this session belongs to.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Current difficulty level.
    pub fn level(&self) -> Level {
        self.state.level
    }

    /// Change the difficulty level. Out-of-range levels are accepted and
    /// simply earn no points and grant no lives.
    pub fn set_level_difficulty(&mut self, level: Level) {
        self.state.level = level;
    }

    /// Points scored so far.
    pub fn scores(&self) -> u32 {
        self.state.score
    }

    /// Incorrect answers so far.
    pub fn incorrect(&self) -> u32 {
        self.state.incorrect
    }

    /// The prompt currently on the board (empty before the first prompt).
    pub fn current_question(&self) -> &str {
        &self.state.current_question
    }

    /// The full persisted state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The shared fact store.
    pub fn facts(&self) -> &'f FactStore {
        self.facts
    }

    /// The storage collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the storage collaborator.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The fact for `location`, if known.
    pub fn fact(&self, location: &str) -> Option<&'f str> {
        self.facts.fact(location)
    }

    /// The fact for `location`, or [`FACT_NOT_FOUND`](crate::FACT_NOT_FOUND).
    pub fn fact_or_default(&self, location: &str) -> &'f str {
        self.facts.fact_or_default(location)
    }

    /// Pick a random loaded location without touching session state.
    pub fn first_chain(&mut self) -> Option<String> {
        self.chain.first_chain(self.facts)
    }

    /// Check an answer against a prompt with the session's case rule.
    pub fn check_ans(&self, prompt: &str, answer: &str) -> bool {
        self.chain.check_answer(prompt, answer)
    }

    /// Points per correct answer at `level`.
    pub fn points(&self, level: Level) -> u32 {
        points(level)
    }

    /// Lives granted at `level`.
    pub fn lives(&self, level: Level) -> u32 {
        lives(level)
    }

    /// Lives remaining at the current level.
    pub fn lives_left(&self) -> u32 {
        lives(self.state.level).saturating_sub(self.state.incorrect)
    }

    /// Put a prompt on the board.
    ///
    /// From `Loaded`, a prompt restored by [`load_game`](Self::load_game) or
    /// [`restore_user_state`](Self::restore_user_state) is reused; otherwise
    /// a random location is drawn. While a round is running the current
    /// prompt is returned unchanged. `None` when no facts are loaded or the
    /// session has ended.
    pub fn start(&mut self) -> Option<&str> {
        match self.phase {
            SessionPhase::Uninitialized | SessionPhase::Ended => None,
            SessionPhase::InProgress | SessionPhase::Answered { .. } => {
                Some(self.state.current_question.as_str())
            }
            SessionPhase::Loaded => {
                if self.state.current_question.is_empty() {
                    self.state.current_question = self.chain.first_chain(self.facts)?;
                }
                self.phase = SessionPhase::InProgress;
                Some(self.state.current_question.as_str())
            }
        }
    }

    /// Evaluate an answer to the current prompt.
    ///
    /// A correct answer adds the level's points; an incorrect one costs a life.
    pub fn submit_answer(&mut self, answer: &str) -> GameResult<RoundOutcome> {
        if self.phase != SessionPhase::InProgress {
            return Err(GameError::NoActivePrompt);
        }

        let correct = self
            .chain
            .check_answer(&self.state.current_question, answer);
        let points_awarded = if correct { points(self.state.level) } else { 0 };
        if correct {
            self.state.score = self.state.score.saturating_add(points_awarded);
        } else {
            self.state.incorrect += 1;
        }

        self.phase = SessionPhase::Answered {
            correct,
            answer: answer.trim().to_string(),
        };
        Ok(RoundOutcome {
            correct,
            points_awarded,
            lives_left: self.lives_left(),
        })
    }

    /// Move past an evaluated answer.
    ///
    /// With no lives left the session ends. Otherwise the next prompt is the
    /// accepted answer, or the same prompt again after a miss.
    pub fn advance(&mut self) -> GameResult<&SessionPhase> {
        let next_prompt = match &self.phase {
            SessionPhase::Answered { correct: true, answer } => Some(answer.clone()),
            SessionPhase::Answered { correct: false, .. } => None,
            _ => return Err(GameError::NotAnswered),
        };

        if self.lives_left() == 0 {
            self.phase = SessionPhase::Ended;
        } else {
            if let Some(prompt) = next_prompt {
                self.state.current_question = prompt;
            }
            self.phase = SessionPhase::InProgress;
        }
        Ok(&self.phase)
    }

    /// End the session now, whatever its phase.
    pub fn finish(&mut self) -> &SessionState {
        self.phase = SessionPhase::Ended;
        &self.state
    }

    /// Write the checkpoint for `(player, level)`, replacing any earlier one.
    pub fn save_game(
        &mut self,
        level: Level,
        score: u32,
        current_location: &str,
        incorrect: u32,
    ) -> GameResult<()> {
        let state = SessionState {
            level,
            score,
            current_question: current_location.to_string(),
            incorrect,
        };
        let level_key = level.to_string();
        self.store.upsert(
            SESSIONS_TABLE,
            &[self.player.as_str(), level_key.as_str()],
            state.to_record(&self.player),
        )?;
        tracing::debug!(player = %self.player, level, "saved checkpoint");
        Ok(())
    }

    /// Save the live state as the checkpoint for its level.
    pub fn checkpoint(&mut self) -> GameResult<()> {
        let SessionState {
            level,
            score,
            current_question,
            incorrect,
        } = self.state.clone();
        self.save_game(level, score, &current_question, incorrect)
    }

    /// Replace the live state with the checkpoint for `(player, level)`.
    ///
    /// Returns `None` when no usable checkpoint exists (missing, unreadable,
    /// or malformed); the live state is then left exactly as it was.
    pub fn load_game(&mut self, level: Level) -> Option<&SessionState> {
        let level_key = level.to_string();
        let found = self
            .store
            .find(SESSIONS_TABLE, &[self.player.as_str(), level_key.as_str()]);
        self.apply_loaded(found, "checkpoint")
    }

    /// Write the durable save for `user`: `level` plus the live score,
    /// prompt, and incorrect count.
    pub fn save_user_state(&mut self, user: &str, level: Level) -> GameResult<()> {
        let state = SessionState {
            level,
            ..self.state.clone()
        };
        self.store
            .upsert(SAVES_TABLE, &[user], state.to_record(user))?;
        tracing::debug!(user, level, "saved user state");
        Ok(())
    }

    /// Replace the live state with the durable save for `user`.
    ///
    /// Same not-found contract as [`load_game`](Self::load_game).
    pub fn restore_user_state(&mut self, user: &str) -> Option<&SessionState> {
        let found = self.store.find(SAVES_TABLE, &[user]);
        self.apply_loaded(found, "user save")
    }

    fn apply_loaded(
        &mut self,
        found: wc_core::StoreResult<Option<Record>>,
        what: &str,
    ) -> Option<&SessionState> {
        let record = match found {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::warn!(player = %self.player, "no {what} found");
                return None;
            }
            Err(e) => {
                tracing::warn!(player = %self.player, error = %e, "cannot read {what}");
                return None;
            }
        };
        match SessionState::from_record(&record) {
            Ok(state) => {
                self.state = state;
                Some(&self.state)
            }
            Err(e) => {
                tracing::warn!(player = %self.player, error = %e, "ignoring {what}");
                None
            }
        }
    }
}
