//! Configuration for a game session.

use crate::chain::CaseRule;
use crate::difficulty::{Difficulty, Level};

/// Configuration shared by the chain engine and the session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for prompt selection. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// How the first/last letter comparison treats case.
    pub case_rule: CaseRule,
    /// Starting difficulty level for sessions built from this config.
    pub level: Level,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            case_rule: CaseRule::default(),
            level: Difficulty::Normal.level(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the letter comparison rule.
    pub fn with_case_rule(mut self, rule: CaseRule) -> Self {
        self.case_rule = rule;
        self
    }

    /// Set the starting level. Unsupported levels are kept as given; they
    /// score no points and grant no lives.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}
