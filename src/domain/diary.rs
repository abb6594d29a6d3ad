use crate::domain::{DiaryEntry, MonthIndexEntry, MonthKey};
use crate::infrastructure::{
    EntryRepository, FileSystemRepository, MonthIndex, MonthIndexFile, StorageResult,
};
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Entry point for reading and writing the diary.
///
/// Appends touch two files, the month partition and the month index. They
/// are not written atomically together, but every write made through one
/// `Diary` is serialized, so appends from this process never overwrite each
/// other.
pub struct Diary {
    entries: Box<dyn EntryRepository>,
    index: Box<dyn MonthIndex>,
    write_lock: Mutex<()>,
}

impl Diary {
    pub fn new(entries: Box<dyn EntryRepository>, index: Box<dyn MonthIndex>) -> Self {
        Self {
            entries,
            index,
            write_lock: Mutex::new(()),
        }
    }

    /// Open a diary stored under `data_dir`, creating the directory and an
    /// empty index if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        let diary = Self::new(
            Box::new(FileSystemRepository::new(data_dir.clone())),
            Box::new(MonthIndexFile::new(data_dir)),
        );
        diary.initialize()?;
        Ok(diary)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Idempotent; never touches existing data.
    pub fn initialize(&self) -> StorageResult<()> {
        self.entries.initialize()?;
        self.index.initialize()
    }

    pub fn add_entry(&self, date: NaiveDate, content: &str) -> StorageResult<DiaryEntry> {
        let _guard = self.lock_writes();

        let appended = self.entries.append_entry(date, content)?;
        self.index
            .upsert(appended.entry.month_key(), appended.partition_len)?;

        info!("Added diary entry {} for {}", appended.entry.id, date);
        Ok(appended.entry)
    }

    pub fn entries_in_month(&self, key: MonthKey) -> StorageResult<Vec<DiaryEntry>> {
        self.entries.list_entries(key)
    }

    pub fn months(&self) -> StorageResult<Vec<MonthIndexEntry>> {
        self.initialize()?;
        self.index.list_months()
    }

    /// Recount every partition on disk and write the counts to the index.
    pub fn rebuild_index(&self) -> StorageResult<Vec<MonthIndexEntry>> {
        let _guard = self.lock_writes();

        for key in self.entries.list_partitions()? {
            let count = self.entries.list_entries(key)?.len();
            self.index.upsert(key, count)?;
        }

        info!("Rebuilt month index");
        self.index.list_months()
    }
}
