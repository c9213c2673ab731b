//! Leaderboard persistence.
//!
//! Two tables:
//!
//! - `players`: `id, pin, rank, achievements`, where achievements is a
//!   string of `1`/`0` flags.
//! - `highscores`: `id, level, score`, one row per `(player, level)`.
//!
//! Rows that cannot be parsed are skipped with a warning rather than
//! failing the whole load.

use wc_core::{Record, RecordStore};
use wc_game::{Difficulty, Level};

use crate::error::RankResult;
use crate::leaderboard::Leaderboard;
use crate::player::Player;

/// Table of registered players.
pub const PLAYERS_TABLE: &str = "players";

/// Table of per-level high scores.
pub const HIGHSCORES_TABLE: &str = "highscores";

impl Leaderboard {
    /// Write every player's score at `level`, replacing their earlier row
    /// for that level. Other rows are kept. Returns the rows written; an
    /// unsupported level writes nothing.
    pub fn save_high_scores<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        level: Level,
    ) -> RankResult<usize> {
        if Difficulty::from_level(level).is_none() {
            tracing::warn!(level, "no high score slot for level, nothing saved");
            return Ok(0);
        }

        let level_key = level.to_string();
        let mut rows = store.read_table(HIGHSCORES_TABLE)?.unwrap_or_default();
        rows.retain(|r| {
            let ours = r.get(0).is_some_and(|id| self.contains(id));
            !(ours && r.get(1) == Some(level_key.as_str()))
        });

        let mut written = 0;
        for player in self.players() {
            if let Some(score) = player.highscore(level) {
                rows.push(score_row(&player.id, level, score));
                written += 1;
            }
        }
        store.write_table(HIGHSCORES_TABLE, &rows)?;
        tracing::debug!(level, players = written, "saved high scores");
        Ok(written)
    }

    /// Write the whole leaderboard, replacing both tables.
    pub fn save<S: RecordStore + ?Sized>(&self, store: &mut S) -> RankResult<()> {
        let players: Vec<Record> = self
            .players()
            .iter()
            .map(|p| {
                Record::new(vec![
                    p.id.clone(),
                    p.pin.to_string(),
                    p.rank.to_string(),
                    encode_achievements(&p.achievements),
                ])
            })
            .collect();

        let scores: Vec<Record> = self
            .players()
            .iter()
            .flat_map(|p| {
                Difficulty::ALL.into_iter().filter_map(move |d| {
                    p.highscore(d.level())
                        .map(|score| score_row(&p.id, d.level(), score))
                })
            })
            .collect();

        store.write_table(PLAYERS_TABLE, &players)?;
        store.write_table(HIGHSCORES_TABLE, &scores)?;
        Ok(())
    }

    /// Rebuild a leaderboard from storage.
    ///
    /// Missing tables mean an empty board. A score row for an unknown id
    /// registers that player with PIN 0.
    pub fn load<S: RecordStore + ?Sized>(store: &S) -> RankResult<Self> {
        let mut board = Leaderboard::default();

        for (i, row) in store
            .read_table(PLAYERS_TABLE)?
            .unwrap_or_default()
            .iter()
            .enumerate()
        {
            match parse_player(row) {
                Some(player) => {
                    board.add_player(player);
                }
                None => tracing::warn!(row = i + 1, "skipping malformed player row"),
            }
        }

        for (i, row) in store
            .read_table(HIGHSCORES_TABLE)?
            .unwrap_or_default()
            .iter()
            .enumerate()
        {
            match parse_score(row) {
                Some((id, level, score)) => {
                    board.record_score(id, level, score);
                }
                None => tracing::warn!(row = i + 1, "skipping malformed high score row"),
            }
        }

        tracing::debug!(players = board.len(), "loaded leaderboard");
        Ok(board)
    }

    /// Like [`load`](Self::load), but an unreadable store yields an empty
    /// board instead of an error.
    pub fn load_or_default<S: RecordStore + ?Sized>(store: &S) -> Self {
        Self::load(store).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot read leaderboard, starting empty");
            Self::default()
        })
    }
}

fn score_row(id: &str, level: Level, score: u32) -> Record {
    Record::new(vec![id.to_string(), level.to_string(), score.to_string()])
}

fn encode_achievements(flags: &[bool]) -> String {
    flags.iter().map(|&f| if f { '1' } else { '0' }).collect()
}

fn decode_achievements(text: &str) -> Option<Vec<bool>> {
    text.chars()
        .map(|c| match c {
            '1' => Some(true),
            '0' => Some(false),
            _ => None,
        })
        .collect()
}

fn parse_player(row: &Record) -> Option<Player> {
    let [id, pin, rank, achievements] = row.fields() else {
        return None;
    };
    if id.is_empty() {
        return None;
    }
    Some(
        Player::new(id.as_str(), pin.parse().ok()?)
            .with_rank(rank.parse().ok()?)
            .with_achievements(decode_achievements(achievements)?),
    )
}

fn parse_score(row: &Record) -> Option<(&str, Level, u32)> {
    let [id, level, score] = row.fields() else {
        return None;
    };
    if id.is_empty() {
        return None;
    }
    let level = Difficulty::from_level(level.parse().ok()?)?.level();
    Some((id.as_str(), level, score.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wc_core::MemoryStore;

    fn board() -> Leaderboard {
        Leaderboard::new([
            Player::new("Player1", 1234)
                .with_highscores([100, 200, 300])
                .with_achievements(vec![false, true, false]),
            Player::new("Player2", 4321)
                .with_highscores([150, 250, 350])
                .with_rank(1)
                .with_achievements(vec![true, false, true]),
        ])
    }

    fn rows(store: &MemoryStore, table: &str) -> Vec<Vec<String>> {
        store
            .read_table(table)
            .unwrap()
            .unwrap_or_default()
            .into_iter()
            .map(Record::into_fields)
            .collect()
    }

    #[test]
    fn save_high_scores_for_one_level() {
        let mut store = MemoryStore::new();
        assert_eq!(board().save_high_scores(&mut store, 1).unwrap(), 2);
        assert_eq!(
            rows(&store, HIGHSCORES_TABLE),
            vec![
                vec!["Player1", "1", "200"],
                vec!["Player2", "1", "250"],
            ]
        );
    }

    #[test]
    fn save_high_scores_replaces_only_that_level() {
        let mut store = MemoryStore::new()
            .with_text(
                HIGHSCORES_TABLE,
                "Player1,1,5\nPlayer1,0,7\nstranger,1,9\n",
            )
            .unwrap();
        board().save_high_scores(&mut store, 1).unwrap();
        assert_eq!(
            rows(&store, HIGHSCORES_TABLE),
            vec![
                vec!["Player1", "0", "7"],
                vec!["stranger", "1", "9"],
                vec!["Player1", "1", "200"],
                vec!["Player2", "1", "250"],
            ]
        );
    }

    #[test]
    fn save_high_scores_unsupported_level() {
        let mut store = MemoryStore::new();
        assert_eq!(board().save_high_scores(&mut store, 4).unwrap(), 0);
        assert!(!store.contains(HIGHSCORES_TABLE));
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut store = MemoryStore::new();
        let original = board();
        original.save(&mut store).unwrap();

        assert_eq!(
            rows(&store, PLAYERS_TABLE)[1],
            vec!["Player2", "4321", "1", "101"]
        );
        assert_eq!(rows(&store, HIGHSCORES_TABLE).len(), 6);

        let loaded = Leaderboard::load(&store).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.top_player().unwrap().id, "Player2");
    }

    #[test]
    fn load_empty_store() {
        let board = Leaderboard::load(&MemoryStore::new()).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn load_registers_players_seen_only_in_scores() {
        let store = MemoryStore::new()
            .with_text(HIGHSCORES_TABLE, "ghost,2,30\nghost,0,12\n")
            .unwrap();
        let board = Leaderboard::load(&store).unwrap();
        let ghost = board.get_player("ghost").unwrap();
        assert_eq!(ghost.pin, 0);
        assert_eq!(ghost.highscores, [12, 0, 30]);
    }

    #[test]
    fn load_skips_malformed_rows() {
        let store = MemoryStore::new()
            .with_text(PLAYERS_TABLE, "ok,1,0,10\nbad-pin,x,0,\nshort,1\nbad-flags,1,0,1a\n")
            .unwrap()
            .with_text(HIGHSCORES_TABLE, "ok,0,notanumber\nok,1,40\nok,9,100\n")
            .unwrap();
        let board = Leaderboard::load(&store).unwrap();
        assert_eq!(board.len(), 1);
        let ok = board.get_player("ok").unwrap();
        assert_eq!(ok.achievements, vec![true, false]);
        assert_eq!(ok.highscores, [0, 40, 0]);
    }

    #[test]
    fn load_ignores_unsupported_level_for_unknown_id() {
        let store = MemoryStore::new()
            .with_text(HIGHSCORES_TABLE, "ghost,9,100\n")
            .unwrap();
        let board = Leaderboard::load(&store).unwrap();
        assert!(board.is_empty());
        assert_eq!(board.report().to_string(), "LEADERBOARD:\n");
    }

    #[test]
    fn load_or_default_swallows_store_errors() {
        struct Broken;
        impl RecordStore for Broken {
            fn read_table(&self, table: &str) -> wc_core::StoreResult<Option<Vec<Record>>> {
                Err(wc_core::StoreError::InvalidTable(table.to_string()))
            }
            fn write_table(&mut self, table: &str, _: &[Record]) -> wc_core::StoreResult<()> {
                Err(wc_core::StoreError::InvalidTable(table.to_string()))
            }
        }
        assert!(Leaderboard::load(&Broken).is_err());
        assert!(Leaderboard::load_or_default(&Broken).is_empty());
    }
}
