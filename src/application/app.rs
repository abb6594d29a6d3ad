use crate::application::{Config, server};
use crate::domain::{Diary, DiaryEntry, MonthIndexEntry, MonthKey, NewEntry, ValidationError};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

pub struct DiaryApp {
    diary: Arc<Diary>,
    config: Config,
}

impl DiaryApp {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::from_env())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let diary = Diary::open(&config.data_dir).with_context(|| {
            format!("Failed to open diary at {}", config.data_dir.display())
        })?;

        Ok(Self {
            diary: Arc::new(diary),
            config,
        })
    }

    pub fn serve(&self) -> Result<()> {
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        runtime.block_on(server::serve(&self.config, Arc::clone(&self.diary)))
    }

    /// Validate and append an entry. Without `content`, the entry is written
    /// in `$EDITOR`.
    pub fn add_entry(&self, date: Option<String>, content: Option<String>) -> Result<DiaryEntry> {
        let date = date.unwrap_or_else(|| today().format("%Y-%m-%d").to_string());
        let content = match content {
            Some(content) => content,
            None => self.compose_in_editor(&date)?,
        };

        let new_entry = NewEntry::parse(Some(date.as_str()), Some(content.as_str()))?;
        let entry = self.diary.add_entry(new_entry.date, &new_entry.content)?;

        println!("Entry saved for {}", entry.date);
        Ok(entry)
    }

    fn compose_in_editor(&self, date: &str) -> Result<String> {
        use std::process::Command;

        let draft = tempfile::Builder::new()
            .prefix(&format!("diary-{date}-"))
            .suffix(".md")
            .tempfile()
            .context("Failed to create draft file")?;

        let status = Command::new(&self.config.editor)
            .arg(draft.path())
            .status()
            .with_context(|| format!("Failed to launch editor {:?}", self.config.editor))?;

        if !status.success() {
            return Err(anyhow::anyhow!("Editor exited with error: {}", status));
        }

        let content = std::fs::read_to_string(draft.path())?;
        let content = content.trim_end().to_string();
        if content.is_empty() {
            return Err(ValidationError::MissingField.into());
        }
        Ok(content)
    }

    pub fn months(&self) -> Result<Vec<MonthIndexEntry>> {
        Ok(self.diary.months()?)
    }

    pub fn entries(&self, year: &str, month: &str) -> Result<Vec<DiaryEntry>> {
        let key = MonthKey::from_parts(year, month)?;
        Ok(self.diary.entries_in_month(key)?)
    }

    pub fn print_months(&self) -> Result<()> {
        let months = self.months()?;
        if months.is_empty() {
            println!("No diary entries yet.");
        }
        for month in months {
            println!("{}-{}  {} entries", month.year, month.month, month.entry_count);
        }
        Ok(())
    }

    pub fn print_entries(&self, year: &str, month: &str) -> Result<()> {
        let entries = self.entries(year, month)?;
        if entries.is_empty() {
            println!("No entries for {year}-{month}.");
        }
        for entry in entries {
            println!("=== {} ===", entry.date);
            println!("{}\n", entry.content);
        }
        Ok(())
    }

    pub fn reindex(&self) -> Result<()> {
        let months = self.diary.rebuild_index()?;
        println!("Reindexed {} months", months.len());
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().naive_local().date()
}
