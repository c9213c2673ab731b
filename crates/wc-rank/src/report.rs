//! The leaderboard text report.
//!
//! Format, one line each:
//!
//! ```text
//! LEADERBOARD:
//! 1. Player2 - 350
//! 2. Player1 - 300
//! ```
//!
//! Consumers match on the `LEADERBOARD:` header and on each player's id and
//! best score appearing on a line, so those tokens must stay stable.

use std::fmt;

use serde::Serialize;

/// First line of every report.
pub const REPORT_HEADER: &str = "LEADERBOARD:";

/// One player's line in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    /// 1-based position in score order.
    pub position: usize,
    /// Player id.
    pub id: String,
    /// Best score across all levels.
    pub high_score: u32,
}

/// Players in descending score order, ties kept in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaderboardReport {
    /// The ordered lines.
    pub lines: Vec<ReportLine>,
}

impl LeaderboardReport {
    /// Number of lines, header excluded.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the report lists no players.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Ids in report order.
    pub fn ids(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.id.as_str()).collect()
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} - {}", self.position, self.id, self.high_score)
    }
}

impl fmt::Display for LeaderboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_HEADER}")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
