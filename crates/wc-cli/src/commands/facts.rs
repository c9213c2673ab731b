use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use wc_core::DirStore;

pub fn run(dir: &Path, table: &str) -> Result<(), String> {
    let facts = super::load_facts(&DirStore::new(dir), table)?;

    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(vec!["Location", "Fact"]);

    for location in facts.locations() {
        let fact = facts.fact_or_default(location);
        let shown = if fact.chars().count() > 60 {
            let cut: String = fact.chars().take(57).collect();
            format!("{cut}...")
        } else {
            fact.to_string()
        };
        out.add_row(vec![location.as_str(), shown.as_str()]);
    }

    println!("{out}");
    println!();
    println!("  {} locations", facts.len());

    Ok(())
}
