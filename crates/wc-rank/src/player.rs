//! Registered players.

use serde::{Deserialize, Serialize};

use wc_game::{LEVEL_COUNT, Level};

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player identifier.
    pub id: String,
    /// Login PIN. Stored as-is; not a secret.
    pub pin: u32,
    /// Best score per difficulty level, indexed by level.
    pub highscores: [u32; LEVEL_COUNT],
    /// Advisory rank label, independent of score ordering.
    pub rank: usize,
    /// Unlocked achievements, by index.
    pub achievements: Vec<bool>,
}

impl Player {
    /// Create a player with no scores, rank 0, and no achievements.
    pub fn new(id: impl Into<String>, pin: u32) -> Self {
        Self {
            id: id.into(),
            pin,
            highscores: [0; LEVEL_COUNT],
            rank: 0,
            achievements: Vec::new(),
        }
    }

    /// Set every high score.
    pub fn with_highscores(mut self, highscores: [u32; LEVEL_COUNT]) -> Self {
        self.highscores = highscores;
        self
    }

    /// Set the rank label.
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = rank;
        self
    }

    /// Set the achievement flags.
    pub fn with_achievements(mut self, achievements: Vec<bool>) -> Self {
        self.achievements = achievements;
        self
    }

    /// High score at `level`, if the level is supported.
    pub fn highscore(&self, level: Level) -> Option<u32> {
        slot(level).map(|i| self.highscores[i])
    }

    /// Record a finished game. The slot only moves up.
    ///
    /// Returns `true` when this was a new high score. Unsupported levels are
    /// ignored.
    pub fn record_score(&mut self, level: Level, score: u32) -> bool {
        match slot(level) {
            Some(i) if score > self.highscores[i] => {
                self.highscores[i] = score;
                true
            }
            _ => false,
        }
    }

    /// The best score across all levels.
    pub fn max_high_score(&self) -> u32 {
        self.highscores.iter().copied().max().unwrap_or(0)
    }

    /// Whether achievement `index` is unlocked.
    pub fn has_achievement(&self, index: usize) -> bool {
        self.achievements.get(index).copied().unwrap_or(false)
    }

    /// Unlock achievement `index`, growing the list as needed.
    pub fn unlock(&mut self, index: usize) {
        if self.achievements.len() <= index {
            self.achievements.resize(index + 1, false);
        }
        self.achievements[index] = true;
    }
}

fn slot(level: Level) -> Option<usize> {
    usize::try_from(level).ok().filter(|&i| i < LEVEL_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_a_slot_per_level() {
        let p = Player::new("Player1", 1234);
        assert_eq!(p.highscores.len(), LEVEL_COUNT);
        assert_eq!(p.max_high_score(), 0);
        assert_eq!(p.highscore(0), Some(0));
        assert_eq!(p.highscore(3), None);
        assert_eq!(p.highscore(-1), None);
    }

    #[test]
    fn record_score_only_raises() {
        let mut p = Player::new("Player1", 1234);
        assert!(p.record_score(1, 40));
        assert!(!p.record_score(1, 30));
        assert!(!p.record_score(1, 40));
        assert!(p.record_score(1, 41));
        assert_eq!(p.highscore(1), Some(41));
    }

    #[test]
    fn record_score_ignores_unknown_levels() {
        let mut p = Player::new("Player1", 1234);
        assert!(!p.record_score(7, 500));
        assert!(!p.record_score(-2, 500));
        assert_eq!(p.max_high_score(), 0);
    }

    #[test]
    fn max_high_score_across_levels() {
        let p = Player::new("Player2", 1234).with_highscores([150, 350, 250]);
        assert_eq!(p.max_high_score(), 350);
    }

    #[test]
    fn achievements() {
        let mut p = Player::new("Player1", 1234).with_achievements(vec![false, true]);
        assert!(p.has_achievement(1));
        assert!(!p.has_achievement(5));
        p.unlock(4);
        assert_eq!(p.achievements, vec![false, true, false, false, true]);
    }

    #[test]
    fn round_trip_serde() {
        let p = Player::new("Player1", 1234)
            .with_highscores([100, 200, 300])
            .with_rank(2)
            .with_achievements(vec![true]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
