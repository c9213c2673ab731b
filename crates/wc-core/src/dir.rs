//! Directory-backed record store.
//!
//! Table `name` lives at `<root>/<name>.csv`. Writes land in a temporary
//! sibling first and are renamed over the target, so a failed write never
//! leaves a half-written table behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::record::{Record, decode, encode};
use crate::store::RecordStore;

/// A [`RecordStore`] that keeps one `.csv` file per table in a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the tables.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for `table`.
    ///
    /// Names must be non-empty ASCII alphanumerics, `-` or `_`.
    pub fn table_path(&self, table: &str) -> StoreResult<PathBuf> {
        let valid = !table.is_empty()
            && table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidTable(table.to_string()));
        }
        Ok(self.root.join(format!("{table}.csv")))
    }
}

fn io_error(table: &str, source: io::Error) -> StoreError {
    StoreError::Io {
        table: table.to_string(),
        source,
    }
}

impl RecordStore for DirStore {
    fn read_table(&self, table: &str) -> StoreResult<Option<Vec<Record>>> {
        let path = self.table_path(table)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(table, e)),
        };
        tracing::debug!(table, path = %path.display(), "read table");
        decode(&text)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                table: table.to_string(),
                source,
            })
    }

    fn write_table(&mut self, table: &str, records: &[Record]) -> StoreResult<()> {
        let path = self.table_path(table)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(table, e))?;

        let tmp = path.with_extension("csv.tmp");
        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(encode(records).as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(table, e));
        }
        tracing::debug!(table, records = records.len(), "wrote table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rec(fields: &[&str]) -> Record {
        fields.iter().copied().collect()
    }

    #[test]
    fn missing_table_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = DirStore::new(dir.path());
        assert!(store.read_table("facts").unwrap().is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let mut store = DirStore::new(dir.path().join("nested"));
        let records = vec![rec(&["Paris", "Capital, of France"]), rec(&["Rome", ""])];
        store.write_table("facts", &records).unwrap();

        assert!(dir.path().join("nested/facts.csv").exists());
        assert!(!dir.path().join("nested/facts.csv.tmp").exists());
        assert_eq!(store.read_table("facts").unwrap().unwrap(), records);
    }

    #[test]
    fn reads_hand_written_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("facts.csv"), "location,fact\r\nUtah,Beehive State\r\n").unwrap();
        let store = DirStore::new(dir.path());
        let table = store.read_table("facts").unwrap().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[1], rec(&["Utah", "Beehive State"]));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("facts.csv"), "Utah,\"never closed\n").unwrap();
        let store = DirStore::new(dir.path());
        let err = store.read_table("facts").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn rejects_path_like_table_names() {
        let store = DirStore::new("/tmp");
        for bad in ["", "../etc", "a/b", "with space", "dot.csv"] {
            assert!(
                matches!(store.table_path(bad), Err(StoreError::InvalidTable(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(store.table_path("high_scores-2").is_ok());
    }

    #[test]
    fn upsert_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        DirStore::new(dir.path())
            .upsert("saves", &["alice"], rec(&["alice", "1", "12", "Utah", "0"]))
            .unwrap();
        let found = DirStore::new(dir.path())
            .find("saves", &["alice"])
            .unwrap()
            .unwrap();
        assert_eq!(found.get(3), Some("Utah"));
    }

    #[test]
    fn unreadable_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();
        let mut store = DirStore::new(&file);
        let err = store.write_table("facts", &[]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
