use crate::domain::{MonthIndexEntry, MonthKey, compare_newest_first};
use crate::infrastructure::{
    MonthIndex, StorageError, StorageResult, ensure_dir, read_json_array, write_json_pretty,
};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE_NAME: &str = "months.json";

/// The month index kept at `<data_dir>/months.json`.
pub struct MonthIndexFile {
    data_dir: PathBuf,
    path: PathBuf,
}

impl MonthIndexFile {
    pub fn new(data_dir: PathBuf) -> Self {
        let path = data_dir.join(INDEX_FILE_NAME);
        Self { data_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MonthIndex for MonthIndexFile {
    fn initialize(&self) -> StorageResult<()> {
        ensure_dir(&self.data_dir)?;

        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Creating empty month index at {}", self.path.display());
                write_json_pretty::<[MonthIndexEntry]>(&self.path, &[])
            }
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    fn list_months(&self) -> StorageResult<Vec<MonthIndexEntry>> {
        read_json_array(&self.path)
    }

    fn upsert(&self, key: MonthKey, entry_count: usize) -> StorageResult<MonthIndexEntry> {
        self.initialize()?;

        let mut months: Vec<MonthIndexEntry> = read_json_array(&self.path)?;

        let updated = match months.iter_mut().find(|m| m.matches(key)) {
            Some(existing) => {
                existing.entry_count = entry_count;
                existing.clone()
            }
            None => {
                let entry = MonthIndexEntry::new(key, entry_count);
                months.push(entry.clone());
                entry
            }
        };

        months.sort_by(compare_newest_first);
        write_json_pretty(&self.path, &months)?;

        debug!("Month index: {key} now has {entry_count} entries");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn initialize_creates_empty_index_once() {
        let dir = TempDir::new().unwrap();
        let index = MonthIndexFile::new(dir.path().join("diary"));

        index.initialize().unwrap();
        assert_eq!(fs::read_to_string(index.path()).unwrap(), "[]");

        index.upsert(key(2025, 3), 1).unwrap();
        index.initialize().unwrap();
        index.initialize().unwrap();

        assert_eq!(index.list_months().unwrap().len(), 1);
    }

    #[test]
    fn upsert_overwrites_count_and_keeps_id() {
        let dir = TempDir::new().unwrap();
        let index = MonthIndexFile::new(dir.path().to_path_buf());

        let first = index.upsert(key(2025, 3), 1).unwrap();
        let second = index.upsert(key(2025, 3), 2).unwrap();

        assert_eq!(first.id, second.id);
        let months = index.list_months().unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].year, "2025");
        assert_eq!(months[0].month, "03");
        assert_eq!(months[0].entry_count, 2);
    }

    #[test]
    fn index_is_kept_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        let index = MonthIndexFile::new(dir.path().to_path_buf());

        index.upsert(key(2024, 11), 1).unwrap();
        index.upsert(key(2025, 1), 4).unwrap();
        index.upsert(key(2025, 10), 2).unwrap();
        index.upsert(key(2024, 2), 3).unwrap();

        let order: Vec<(String, String)> = index
            .list_months()
            .unwrap()
            .into_iter()
            .map(|m| (m.year, m.month))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2025".into(), "10".into()),
                ("2025".into(), "01".into()),
                ("2024".into(), "11".into()),
                ("2024".into(), "02".into()),
            ]
        );
    }

    #[test]
    fn written_index_uses_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let index = MonthIndexFile::new(dir.path().to_path_buf());

        index.upsert(key(2025, 3), 7).unwrap();

        let raw = fs::read_to_string(index.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["entryCount"], 7);
        assert_eq!(json[0]["month"], "03");
    }

    #[test]
    fn corrupt_index_fails_without_rewriting() {
        let dir = TempDir::new().unwrap();
        let index = MonthIndexFile::new(dir.path().to_path_buf());
        fs::write(index.path(), "{oops").unwrap();

        let err = index.upsert(key(2025, 3), 1).unwrap_err();

        assert!(matches!(err, StorageError::Corrupt { .. }));
        assert_eq!(fs::read_to_string(index.path()).unwrap(), "{oops");
    }
}
