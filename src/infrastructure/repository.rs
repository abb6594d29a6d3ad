use crate::domain::{DiaryEntry, MonthIndexEntry, MonthKey};
use crate::infrastructure::StorageResult;
use chrono::NaiveDate;

/// Result of appending to a partition.
#[derive(Debug, Clone)]
pub struct Appended {
    pub entry: DiaryEntry,
    /// Partition length after the append.
    pub partition_len: usize,
}

/// Month-partitioned entry storage.
pub trait EntryRepository: Send + Sync {
    fn initialize(&self) -> StorageResult<()>;
    /// Entries of one month, newest date first. Empty if the month was never written.
    fn list_entries(&self, key: MonthKey) -> StorageResult<Vec<DiaryEntry>>;
    fn append_entry(&self, date: NaiveDate, content: &str) -> StorageResult<Appended>;
    fn list_partitions(&self) -> StorageResult<Vec<MonthKey>>;
}

/// Per-month entry counts, cached for listing.
pub trait MonthIndex: Send + Sync {
    fn initialize(&self) -> StorageResult<()>;
    fn list_months(&self) -> StorageResult<Vec<MonthIndexEntry>>;
    fn upsert(&self, key: MonthKey, entry_count: usize) -> StorageResult<MonthIndexEntry>;
}
