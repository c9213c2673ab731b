use std::path::Path;

use wc_core::DirStore;

pub fn run(dir: &Path, id: &str, rank: usize) -> Result<(), String> {
    let mut store = DirStore::new(dir);
    let mut board = super::load_board(&store)?;

    if !board.contains(id) {
        return Err(format!("player '{id}' not found"));
    }
    if !board.change_rank(id, rank) {
        return Err(format!(
            "rank {rank} out of range (0..{})",
            board.len()
        ));
    }
    super::save_board(&board, &mut store)?;

    println!("Rank of '{id}' set to {rank}");
    Ok(())
}
