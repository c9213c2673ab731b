//! Player registry and leaderboard for Wordchain.
//!
//! Players carry one high score per difficulty level plus an advisory rank
//! label. Leaderboard order is always derived from scores; changing a
//! player's rank never reorders it. High scores persist through a
//! [`wc_core::RecordStore`].

pub mod error;
pub mod leaderboard;
pub mod player;
pub mod report;
pub mod scores;

pub use error::{RankError, RankResult};
pub use leaderboard::Leaderboard;
pub use player::Player;
pub use report::{LeaderboardReport, REPORT_HEADER, ReportLine};
pub use scores::{HIGHSCORES_TABLE, PLAYERS_TABLE};
