//! The leaderboard: registered players and their score ordering.

use wc_game::{Difficulty, Level};

use crate::player::Player;
use crate::report::{LeaderboardReport, ReportLine};

/// Registered players, kept in registration order.
///
/// Ids are unique. Ordering "by score" is computed on demand and never
/// stored; the per-player `rank` field is a separate, manually assigned label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    players: Vec<Player>,
}

impl Leaderboard {
    /// Create a leaderboard. Later players repeating an earlier id are dropped.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        let mut board = Self::default();
        board.set_players(players);
        board
    }

    /// Replace every tracked player. Same duplicate rule as [`new`](Self::new).
    pub fn set_players(&mut self, players: impl IntoIterator<Item = Player>) {
        self.players.clear();
        for player in players {
            self.add_player(player);
        }
    }

    /// Register a player.
    ///
    /// Returns `false` and leaves the board unchanged when the id is taken,
    /// so an existing player's score history is never overwritten.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.contains(&player.id) {
            tracing::warn!(id = %player.id, "duplicate player id rejected");
            return false;
        }
        self.players.push(player);
        true
    }

    /// All players in registration order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no players are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Look up a player by exact id.
    pub fn get_player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by exact id, mutably.
    pub fn get_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The largest value in a score sequence; 0 when empty.
    pub fn max_high_score(scores: &[u32]) -> u32 {
        scores.iter().copied().max().unwrap_or(0)
    }

    /// The player with the best score at any level. Ties go to the player
    /// registered first.
    pub fn top_player(&self) -> Option<&Player> {
        first_max_by(&self.players, |p| Self::max_high_score(&p.highscores))
    }

    /// The player with the best score at `level`. `None` for an empty board
    /// or an unsupported level.
    pub fn top_player_for_level(&self, level: Level) -> Option<&Player> {
        let with_slot = self
            .players
            .iter()
            .filter(|p| p.highscore(level).is_some());
        first_max_by(with_slot, |p| p.highscore(level).unwrap_or(0))
    }

    /// Relabel a player's rank.
    ///
    /// Only applies when `id` is registered and `new_rank` is in
    /// `0..len()`; otherwise nothing changes. Score ordering is unaffected.
    /// Returns whether the rank was updated.
    pub fn change_rank(&mut self, id: &str, new_rank: usize) -> bool {
        if new_rank >= self.players.len() {
            return false;
        }
        match self.get_player_mut(id) {
            Some(player) => {
                player.rank = new_rank;
                true
            }
            None => false,
        }
    }

    /// Record a finished game for `id`, registering the player with PIN 0
    /// if unknown. Returns whether it set a new high score.
    ///
    /// An unsupported level changes nothing and registers no one.
    pub fn record_score(&mut self, id: &str, level: Level, score: u32) -> bool {
        if Difficulty::from_level(level).is_none() {
            return false;
        }
        if !self.contains(id) {
            self.players.push(Player::new(id, 0));
        }
        self.get_player_mut(id)
            .is_some_and(|p| p.record_score(level, score))
    }

    /// Players in descending score order, ties in registration order.
    pub fn ranked(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.max_high_score().cmp(&a.max_high_score()));
        ranked
    }

    /// Build the text report without printing it.
    pub fn report(&self) -> LeaderboardReport {
        let lines = self
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(i, p)| ReportLine {
                position: i + 1,
                id: p.id.clone(),
                high_score: p.max_high_score(),
            })
            .collect();
        LeaderboardReport { lines }
    }

    /// Print the report to stdout and return it.
    pub fn display_leaderboard(&self) -> LeaderboardReport {
        let report = self.report();
        print!("{report}");
        report
    }
}

/// First element with the largest key.
fn first_max_by<'a, I, F>(players: I, key: F) -> Option<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
    F: Fn(&Player) -> u32,
{
    players.into_iter().fold(None, |best, p| match best {
        Some(b) if key(b) >= key(p) => Some(b),
        _ => Some(p),
    })
}
