use std::path::Path;

use wc_core::DirStore;

pub fn run(dir: &Path, json: bool) -> Result<(), String> {
    let board = super::load_board(&DirStore::new(dir))?;

    if json {
        let report = board.report();
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        board.display_leaderboard();
    }
    Ok(())
}
