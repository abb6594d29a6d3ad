use crate::domain::MonthKey;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single diary entry as stored in its month partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        Self::at(date, content, Utc::now())
    }

    pub fn at(date: NaiveDate, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::generate(),
            date,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

/// Newest first. Entries sharing a date keep their stored order.
pub fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}
