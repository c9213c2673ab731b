//! Location facts.
//!
//! A fact source is a table of `(location, fact)` records. An optional
//! `location,fact` header row is skipped. Fields beyond the second are
//! treated as unquoted commas inside the fact and re-joined.

use std::collections::HashMap;

use wc_core::{Record, RecordStore};

use crate::error::{GameError, GameResult};

/// Default table holding the fact source.
pub const FACTS_TABLE: &str = "facts";

/// Text shown when a location has no fact.
pub const FACT_NOT_FOUND: &str = "Fact not found";

/// Mapping of location to fact, plus the location list used for random prompts.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: HashMap<String, String>,
    locations: Vec<String>,
}

impl FactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the facts in `table`.
    ///
    /// Loading is all-or-nothing: if the table is missing, unreadable, or
    /// contains a malformed row, the store is left empty and the reason is
    /// returned. Returns the number of facts held on success.
    pub fn load<S: RecordStore + ?Sized>(&mut self, store: &S, table: &str) -> GameResult<usize> {
        self.clear();
        let entries = read_source(store, table).inspect_err(|e| {
            tracing::warn!(table, error = %e, "fact source rejected, store cleared");
        })?;
        for (location, fact) in entries {
            self.insert(location, fact);
        }
        tracing::debug!(table, facts = self.len(), "loaded facts");
        Ok(self.len())
    }

    /// Add the facts in `table` to the current contents.
    ///
    /// Existing locations are overwritten by the new fact. On failure the
    /// store is left exactly as it was. Returns the number of facts held.
    pub fn extend_from<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        table: &str,
    ) -> GameResult<usize> {
        let entries = read_source(store, table).inspect_err(|e| {
            tracing::warn!(table, error = %e, "fact source rejected, store unchanged");
        })?;
        for (location, fact) in entries {
            self.insert(location, fact);
        }
        Ok(self.len())
    }

    /// Insert or overwrite a single fact.
    pub fn insert(&mut self, location: impl Into<String>, fact: impl Into<String>) {
        let location = location.into();
        if !self.facts.contains_key(&location) {
            self.locations.push(location.clone());
        }
        self.facts.insert(location, fact.into());
    }

    /// Known locations in load order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// The full location to fact mapping.
    pub fn facts(&self) -> &HashMap<String, String> {
        &self.facts
    }

    /// The fact for an exact, case-sensitive location match.
    pub fn fact(&self, location: &str) -> Option<&str> {
        self.facts.get(location).map(String::as_str)
    }

    /// The fact for `location`, or [`FACT_NOT_FOUND`].
    pub fn fact_or_default(&self, location: &str) -> &str {
        self.fact(location).unwrap_or(FACT_NOT_FOUND)
    }

    /// Whether `location` is known.
    pub fn contains(&self, location: &str) -> bool {
        self.facts.contains_key(location)
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no facts are loaded.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Remove every fact and location.
    pub fn clear(&mut self) {
        self.facts.clear();
        self.locations.clear();
    }
}

fn invalid(table: &str, reason: impl Into<String>) -> GameError {
    GameError::InvalidSource {
        table: table.to_string(),
        reason: reason.into(),
    }
}

fn is_header(record: &Record) -> bool {
    matches!(
        (record.get(0), record.get(1)),
        (Some(a), Some(b)) if a.trim().eq_ignore_ascii_case("location") && b.trim().eq_ignore_ascii_case("fact")
    )
}

/// Read and validate every row of a fact source before anything is applied.
fn read_source<S: RecordStore + ?Sized>(
    store: &S,
    table: &str,
) -> GameResult<Vec<(String, String)>> {
    let records = store
        .read_table(table)
        .map_err(|e| invalid(table, e.to_string()))?
        .ok_or_else(|| invalid(table, "source not found"))?;

    let mut entries = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if i == 0 && is_header(record) {
            continue;
        }
        let fields = record.fields();
        if fields.len() < 2 {
            return Err(invalid(
                table,
                format!("row {} has {} field(s), expected 2", i + 1, fields.len()),
            ));
        }
        let location = fields[0].trim();
        if location.is_empty() {
            return Err(invalid(table, format!("row {} has an empty location", i + 1)));
        }
        let fact = fields[1..].join(",");
        entries.push((location.to_string(), fact.trim().to_string()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wc_core::MemoryStore;

    fn source(text: &str) -> MemoryStore {
        MemoryStore::new().with_text(FACTS_TABLE, text).unwrap()
    }

    #[test]
    fn load_valid_source() {
        let mut facts = FactStore::new();
        let n = facts
            .load(&source("Utah,The Beehive State\nOhio,Birthplace of aviation\n"), FACTS_TABLE)
            .unwrap();
        assert_eq!(n, 2);
        assert!(!facts.locations().is_empty());
        assert!(!facts.facts().is_empty());
        assert_eq!(facts.fact("Utah"), Some("The Beehive State"));
    }

    #[test]
    fn load_missing_source_leaves_store_empty() {
        let mut facts = FactStore::new();
        facts.insert("Utah", "stale");
        let err = facts.load(&MemoryStore::new(), FACTS_TABLE).unwrap_err();
        assert!(matches!(err, GameError::InvalidSource { .. }));
        assert!(facts.locations().is_empty());
        assert!(facts.facts().is_empty());
    }

    #[test]
    fn malformed_row_loads_nothing() {
        let mut facts = FactStore::new();
        let result = facts.load(&source("Utah,Beehive\nlonely\nOhio,Buckeye\n"), FACTS_TABLE);
        assert!(result.is_err());
        assert!(facts.is_empty());
        assert!(facts.fact("Utah").is_none());
    }

    #[test]
    fn empty_location_is_rejected() {
        let mut facts = FactStore::new();
        assert!(facts.load(&source("  ,no place\n"), FACTS_TABLE).is_err());
        assert!(facts.is_empty());
    }

    #[test]
    fn header_row_is_skipped() {
        let mut facts = FactStore::new();
        facts
            .load(&source("Location,Fact\nUtah,Beehive\n"), FACTS_TABLE)
            .unwrap();
        assert_eq!(facts.locations(), ["Utah".to_string()]);
    }

    #[test]
    fn unquoted_commas_stay_in_fact() {
        let mut facts = FactStore::new();
        facts
            .load(&source("Paris, Capital of France, on the Seine\n"), FACTS_TABLE)
            .unwrap();
        assert_eq!(facts.fact("Paris"), Some("Capital of France, on the Seine"));
    }

    #[test]
    fn reload_replaces_previous_contents() {
        let store = MemoryStore::new()
            .with_text("a", "Utah,one\n")
            .unwrap()
            .with_text("b", "Ohio,two\n")
            .unwrap();
        let mut facts = FactStore::new();
        facts.load(&store, "a").unwrap();
        facts.load(&store, "b").unwrap();
        assert_eq!(facts.len(), 1);
        assert!(!facts.contains("Utah"));
        assert!(facts.contains("Ohio"));
    }

    #[test]
    fn extend_accumulates_with_overwrite() {
        let store = MemoryStore::new()
            .with_text("a", "Utah,one\nOhio,two\n")
            .unwrap()
            .with_text("b", "Utah,updated\nIowa,three\n")
            .unwrap();
        let mut facts = FactStore::new();
        facts.load(&store, "a").unwrap();
        let n = facts.extend_from(&store, "b").unwrap();
        assert_eq!(n, 3);
        assert_eq!(facts.locations(), ["Utah", "Ohio", "Iowa"].map(String::from));
        assert_eq!(facts.fact("Utah"), Some("updated"));
    }

    #[test]
    fn failed_extend_keeps_contents() {
        let mut facts = FactStore::new();
        facts.insert("Utah", "one");
        assert!(facts.extend_from(&MemoryStore::new(), "missing").is_err());
        assert_eq!(facts.len(), 1);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut facts = FactStore::new();
        facts.insert("Utah", "Beehive");
        assert_eq!(facts.fact("utah"), None);
        assert_eq!(facts.fact_or_default("utah"), FACT_NOT_FOUND);
        assert_eq!(facts.fact_or_default("Utah"), "Beehive");
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut facts = FactStore::new();
        facts.insert("Utah", "Beehive");
        facts.clear();
        assert!(facts.locations().is_empty());
        assert!(facts.facts().is_empty());
    }
}
