//! Chain prompts and the chaining rule.
//!
//! An answer continues the chain when its first character matches the
//! prompt's last character. Only the letters are compared; whether the
//! answer is a real place is not checked.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::facts::FactStore;

/// Text shown in place of a prompt when no locations are loaded.
pub const NO_DATA: &str = "No data";

/// How the chaining letters are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseRule {
    /// Characters must be identical (`'h'` does not match `'H'`).
    Exact,
    /// Characters match ignoring case (`'h'` matches `'H'`).
    #[default]
    Insensitive,
}

impl CaseRule {
    /// Whether two characters match under this rule.
    pub fn matches(self, a: char, b: char) -> bool {
        match self {
            Self::Exact => a == b,
            Self::Insensitive => a == b || a.to_lowercase().eq(b.to_lowercase()),
        }
    }
}

/// Check whether `answer` continues the chain from `prompt`.
///
/// Surrounding whitespace is ignored, so the comparison is between the first
/// character of the trimmed answer and the last character of the trimmed
/// prompt: `check_answer("Utah", " hawaii", CaseRule::Insensitive)` holds.
/// An empty or whitespace-only prompt or answer never matches.
pub fn check_answer(prompt: &str, answer: &str, rule: CaseRule) -> bool {
    match (prompt.trim().chars().next_back(), answer.trim().chars().next()) {
        (Some(last), Some(first)) => rule.matches(last, first),
        _ => false,
    }
}

/// Issues prompts from a [`FactStore`] and validates answers.
#[derive(Debug, Clone)]
pub struct ChainEngine {
    rng: StdRng,
    case_rule: CaseRule,
}

impl ChainEngine {
    /// Create an engine from the session configuration.
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            case_rule: config.case_rule,
        }
    }

    /// The active comparison rule.
    pub fn case_rule(&self) -> CaseRule {
        self.case_rule
    }

    /// Pick a loaded location uniformly at random. `None` when there are none.
    pub fn first_chain(&mut self, facts: &FactStore) -> Option<String> {
        let locations = facts.locations();
        if locations.is_empty() {
            return None;
        }
        Some(locations[self.rng.random_range(0..locations.len())].clone())
    }

    /// Like [`first_chain`](Self::first_chain), but yields [`NO_DATA`] when empty.
    pub fn first_chain_or_default(&mut self, facts: &FactStore) -> String {
        self.first_chain(facts)
            .unwrap_or_else(|| NO_DATA.to_string())
    }

    /// Check `answer` against `prompt` with this engine's rule.
    pub fn check_answer(&self, prompt: &str, answer: &str) -> bool {
        check_answer(prompt, answer, self.case_rule)
    }
}
