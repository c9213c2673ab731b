//! Difficulty levels and their point/life budgets.
//!
//! | level | difficulty | points per answer | lives |
//! |-------|------------|-------------------|-------|
//! | 0     | easy       | 6                 | 7     |
//! | 1     | normal     | 4                 | 5     |
//! | 2     | hard       | 2                 | 3     |
//!
//! Any other level earns nothing and has no lives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw difficulty level as stored and passed around. May be out of range.
pub type Level = i32;

/// Number of supported difficulty levels.
pub const LEVEL_COUNT: usize = 3;

/// A supported difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Level 0.
    Easy,
    /// Level 1.
    Normal,
    /// Level 2.
    Hard,
}

impl Difficulty {
    /// Every difficulty, ordered by level.
    pub const ALL: [Difficulty; LEVEL_COUNT] = [Self::Easy, Self::Normal, Self::Hard];

    /// The difficulty for a raw level, if supported.
    pub fn from_level(level: Level) -> Option<Self> {
        match level {
            0 => Some(Self::Easy),
            1 => Some(Self::Normal),
            2 => Some(Self::Hard),
            _ => None,
        }
    }

    /// The raw level for this difficulty.
    pub fn level(self) -> Level {
        match self {
            Self::Easy => 0,
            Self::Normal => 1,
            Self::Hard => 2,
        }
    }

    /// Points awarded per correct answer.
    pub fn points(self) -> u32 {
        match self {
            Self::Easy => 6,
            Self::Normal => 4,
            Self::Hard => 2,
        }
    }

    /// Incorrect answers allowed before the session ends.
    pub fn lives(self) -> u32 {
        match self {
            Self::Easy => 7,
            Self::Normal => 5,
            Self::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Points per correct answer at `level`; 0 for unsupported levels.
pub fn points(level: Level) -> u32 {
    Difficulty::from_level(level).map_or(0, Difficulty::points)
}

/// Lives at `level`; 0 for unsupported levels.
pub fn lives(level: Level) -> u32 {
    Difficulty::from_level(level).map_or(0, Difficulty::lives)
}
