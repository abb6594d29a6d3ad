use crate::domain::{EntryId, ValidationError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A validated (year, month) pair naming one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse the path form used by callers: a four-digit year and a
    /// zero-padded two-digit month, e.g. ("2025", "03").
    pub fn from_parts(year: &str, month: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidMonth(format!("{year}/{month}"));

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// Recognize a partition file name such as `2025-03.json`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".json")?;
        let (year, month) = stem.split_once('-')?;
        Self::from_parts(year, month).ok()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year_str(&self) -> String {
        format!("{:04}", self.year)
    }

    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the month index: a partition and its cached entry count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthIndexEntry {
    pub id: EntryId,
    pub year: String,
    pub month: String,
    pub entry_count: usize,
}

impl MonthIndexEntry {
    pub fn new(key: MonthKey, entry_count: usize) -> Self {
        Self {
            id: EntryId::generate(),
            year: key.year_str(),
            month: key.month_str(),
            entry_count,
        }
    }

    pub fn matches(&self, key: MonthKey) -> bool {
        numeric(&self.year) == i64::from(key.year())
            && numeric(&self.month) == i64::from(key.month())
    }
}

// Year and month are stored as strings; compare them as numbers so that a
// hand-edited "9" still sorts below "10".
fn numeric(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

/// Year descending, then month descending.
pub fn compare_newest_first(a: &MonthIndexEntry, b: &MonthIndexEntry) -> Ordering {
    numeric(&b.year)
        .cmp(&numeric(&a.year))
        .then_with(|| numeric(&b.month).cmp(&numeric(&a.month)))
}
