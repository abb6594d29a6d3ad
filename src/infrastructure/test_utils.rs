/// Test utilities for diary tests
///
/// Each harness owns a fresh temporary data directory that is removed when
/// the harness is dropped, so tests never share partitions or index files.
///
/// ## Usage Examples
///
/// ```ignore
/// use crate::infrastructure::test_utils::test_harness::TestDiary;
///
/// #[test]
/// fn my_test() {
///     let test_diary = TestDiary::new();
///     let diary = test_diary.diary();
///
///     // Use diary for testing...
/// }
///
/// // Or using the functional approach:
/// #[test]
/// fn my_test() {
///     test_harness::with_test_diary(|test_diary| {
///         // Use test_diary here...
///     });
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::{Diary, DiaryEntry};
    use crate::infrastructure::INDEX_FILE_NAME;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    pub struct TestDiary {
        diary: Diary,
        data_dir: PathBuf,
        _temp_dir: TempDir, // Keep temp dir alive
    }

    impl TestDiary {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let data_dir = temp_dir.path().join("data").join("diary");
            let diary = Diary::open(&data_dir).expect("Failed to open test diary");

            Self {
                diary,
                data_dir,
                _temp_dir: temp_dir,
            }
        }

        pub fn diary(&self) -> &Diary {
            &self.diary
        }

        pub fn data_dir(&self) -> &Path {
            &self.data_dir
        }

        pub fn index_path(&self) -> PathBuf {
            self.data_dir.join(INDEX_FILE_NAME)
        }

        /// Append one entry per `(date, content)` pair.
        pub fn seed(&self, entries: &[(&str, &str)]) -> Result<Vec<DiaryEntry>> {
            entries
                .iter()
                .map(|(date, content)| {
                    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
                    Ok(self.diary.add_entry(date, content)?)
                })
                .collect()
        }
    }

    /// Run a test with a fresh diary
    pub fn with_test_diary<F, R>(test_fn: F) -> R
    where
        F: FnOnce(&TestDiary) -> R,
    {
        let test_diary = TestDiary::new();
        test_fn(&test_diary)
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::domain::MonthKey;

    #[test]
    fn test_harness_basic_functionality() {
        let test_diary = TestDiary::new();
        let key = MonthKey::new(2024, 3).unwrap();

        // Initially empty, index already present
        assert!(test_diary.diary().entries_in_month(key).unwrap().is_empty());
        assert!(test_diary.index_path().is_file());

        let seeded = test_diary
            .seed(&[("2024-03-15", "one"), ("2024-03-16", "two")])
            .unwrap();
        assert_eq!(seeded.len(), 2);

        assert_eq!(test_diary.diary().entries_in_month(key).unwrap().len(), 2);
    }

    #[test]
    fn test_harness_with_function() {
        with_test_diary(|test_diary| {
            test_diary.seed(&[("2024-03-15", "one")]).unwrap();
            assert_eq!(test_diary.diary().months().unwrap().len(), 1);
        });
    }

    #[test]
    fn test_harness_isolation() {
        let test_diary1 = TestDiary::new();
        let test_diary2 = TestDiary::new();

        test_diary1.seed(&[("2024-03-15", "one")]).unwrap();

        assert!(test_diary2.diary().months().unwrap().is_empty());
    }
}
