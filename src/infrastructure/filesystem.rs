use crate::domain::{DiaryEntry, MonthKey, sort_newest_first};
use crate::infrastructure::{
    Appended, EntryRepository, StorageError, StorageResult, ensure_dir, read_json_array,
    write_json_pretty,
};
use chrono::NaiveDate;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each month as `<data_dir>/YYYY-MM.json`.
pub struct FileSystemRepository {
    data_dir: PathBuf,
}

impl FileSystemRepository {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn partition_path(&self, key: MonthKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }
}

impl EntryRepository for FileSystemRepository {
    fn initialize(&self) -> StorageResult<()> {
        ensure_dir(&self.data_dir)
    }

    fn list_entries(&self, key: MonthKey) -> StorageResult<Vec<DiaryEntry>> {
        self.initialize()?;

        let mut entries: Vec<DiaryEntry> = read_json_array(&self.partition_path(key))?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    fn append_entry(&self, date: NaiveDate, content: &str) -> StorageResult<Appended> {
        self.initialize()?;

        let key = MonthKey::of(date);
        let path = self.partition_path(key);

        let mut entries: Vec<DiaryEntry> = read_json_array(&path)?;
        let entry = DiaryEntry::new(date, content);
        entries.push(entry.clone());
        write_json_pretty(&path, &entries)?;

        debug!("Wrote {} entries to {}", entries.len(), path.display());

        Ok(Appended {
            entry,
            partition_len: entries.len(),
        })
    }

    fn list_partitions(&self) -> StorageResult<Vec<MonthKey>> {
        self.initialize()?;

        let read_dir = fs::read_dir(&self.data_dir)
            .map_err(|e| StorageError::io(&self.data_dir, e))?;

        let mut keys = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| StorageError::io(&self.data_dir, e))?;
            if !dir_entry.path().is_file() {
                continue;
            }
            if let Some(key) = dir_entry.file_name().to_str().and_then(MonthKey::from_file_name) {
                keys.push(key);
            }
        }

        keys.sort_by(|a, b| (b.year(), b.month()).cmp(&(a.year(), a.month())));
        Ok(keys)
    }
}
