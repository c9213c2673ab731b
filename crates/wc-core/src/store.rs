//! The storage collaborator.

use crate::error::StoreResult;
use crate::record::Record;

/// Reads and writes named tables of delimited records.
///
/// Implementors only provide whole-table access. Keyed lookups and
/// overwrite-on-save come for free: a record's key is its leading fields.
pub trait RecordStore {
    /// Read every record of `table`. `Ok(None)` when the table does not exist.
    fn read_table(&self, table: &str) -> StoreResult<Option<Vec<Record>>>;

    /// Replace the whole contents of `table`, creating it if needed.
    fn write_table(&mut self, table: &str, records: &[Record]) -> StoreResult<()>;

    /// First record of `table` whose leading fields equal `key`.
    fn find(&self, table: &str, key: &[&str]) -> StoreResult<Option<Record>> {
        Ok(self
            .read_table(table)?
            .and_then(|records| records.into_iter().find(|r| r.starts_with(key))))
    }

    /// Store `record` as the only record for `key` in `table`.
    ///
    /// The first record carrying the key is replaced in place and any later
    /// duplicates are dropped; when none exists the record is appended.
    /// `record` is expected to start with `key`.
    fn upsert(&mut self, table: &str, key: &[&str], record: Record) -> StoreResult<()> {
        debug_assert!(record.starts_with(key), "record does not carry its key");

        let existing = self.read_table(table)?.unwrap_or_default();
        let mut pending = Some(record);
        let mut out = Vec::with_capacity(existing.len() + 1);
        for r in existing {
            if r.starts_with(key) {
                if let Some(new) = pending.take() {
                    out.push(new);
                }
            } else {
                out.push(r);
            }
        }
        if let Some(new) = pending {
            out.push(new);
        }
        self.write_table(table, &out)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn read_table(&self, table: &str) -> StoreResult<Option<Vec<Record>>> {
        (**self).read_table(table)
    }

    fn write_table(&mut self, table: &str, records: &[Record]) -> StoreResult<()> {
        (**self).write_table(table, records)
    }
}
