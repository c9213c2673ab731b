//! In-memory record store.

use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};
use crate::record::{Record, decode};
use crate::store::RecordStore;

/// A [`RecordStore`] that keeps every table in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Record>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with records.
    pub fn with_table(mut self, table: impl Into<String>, records: Vec<Record>) -> Self {
        self.tables.insert(table.into(), records);
        self
    }

    /// Seed a table by decoding delimited text.
    pub fn with_text(self, table: impl Into<String>, text: &str) -> StoreResult<Self> {
        let table = table.into();
        let records = decode(text).map_err(|source| StoreError::Malformed {
            table: table.clone(),
            source,
        })?;
        Ok(self.with_table(table, records))
    }

    /// Whether `table` exists.
    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Drop a table entirely.
    pub fn remove(&mut self, table: &str) -> Option<Vec<Record>> {
        self.tables.remove(table)
    }
}

impl RecordStore for MemoryStore {
    fn read_table(&self, table: &str) -> StoreResult<Option<Vec<Record>>> {
        Ok(self.tables.get(table).cloned())
    }

    fn write_table(&mut self, table: &str, records: &[Record]) -> StoreResult<()> {
        self.tables.insert(table.to_string(), records.to_vec());
        Ok(())
    }
}
