use std::path::Path;

use wc_core::DirStore;
use wc_rank::Player;

pub fn run(dir: &Path, id: &str, pin: u32) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("player id must not be empty".into());
    }
    let mut store = DirStore::new(dir);
    let mut board = super::load_board(&store)?;

    if !board.add_player(Player::new(id, pin)) {
        return Err(format!("player '{id}' already exists"));
    }
    super::save_board(&board, &mut store)?;

    println!("Registered player '{id}' ({} players)", board.len());
    Ok(())
}
