pub mod facts;
pub mod leaderboard;
pub mod play;
pub mod rank;
pub mod register;

use wc_core::DirStore;
use wc_game::FactStore;
use wc_rank::Leaderboard;

/// Load the facts in `table`, failing if the source is unusable or empty.
fn load_facts(store: &DirStore, table: &str) -> Result<FactStore, String> {
    let mut facts = FactStore::new();
    let count = facts
        .load(store, table)
        .map_err(|e| format!("cannot load facts: {e}"))?;
    if count == 0 {
        return Err(format!("no facts in table \"{table}\""));
    }
    Ok(facts)
}

/// Load the leaderboard. An unreadable leaderboard is an error here so it is
/// never overwritten by a save.
fn load_board(store: &DirStore) -> Result<Leaderboard, String> {
    Leaderboard::load(store).map_err(|e| format!("cannot read leaderboard: {e}"))
}

fn save_board(board: &Leaderboard, store: &mut DirStore) -> Result<(), String> {
    board
        .save(store)
        .map_err(|e| format!("cannot save leaderboard: {e}"))
}
