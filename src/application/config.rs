use log::warn;
use std::fmt::Display;
use std::net::IpAddr;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::{DEFAULT_RETENTION_HOURS, DEFAULT_SWEEP_INTERVAL};

pub const DEFAULT_AUTH_TOKEN: &str = "admin";

/// Ten years.
pub const MAX_RETENTION_HOURS: i64 = 10 * 365 * 24;
/// One week.
pub const MAX_SWEEP_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind: IpAddr,
    pub port: u16,
    pub auth_token: String,
    pub editor: String,
    pub glowbie_retention: chrono::Duration,
    pub glowbie_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DIARY_DIR").map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("choku-works")
                .join("diary")
        });

        let retention_hours = parse_in_range(
            &lookup,
            "GLOWBIE_RETENTION_HOURS",
            DEFAULT_RETENTION_HOURS,
            1..=MAX_RETENTION_HOURS,
        );
        let sweep_minutes = parse_in_range(
            &lookup,
            "GLOWBIE_SWEEP_MINUTES",
            DEFAULT_SWEEP_INTERVAL.as_secs() / 60,
            1..=MAX_SWEEP_MINUTES,
        );

        Self {
            data_dir,
            bind: parse_or_default(&lookup, "DIARY_BIND", IpAddr::from([127, 0, 0, 1])),
            port: parse_or_default(&lookup, "DIARY_PORT", 3000),
            auth_token: lookup("DIARY_AUTH_TOKEN")
                .filter(|token| !token.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTH_TOKEN.to_string()),
            editor: lookup("EDITOR").unwrap_or_else(|| "nano".to_string()),
            glowbie_retention: chrono::Duration::try_hours(retention_hours)
                .unwrap_or_else(|| chrono::Duration::hours(DEFAULT_RETENTION_HOURS)),
            glowbie_sweep_interval: sweep_minutes
                .checked_mul(60)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
        }
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}; using default {default}");
            default
        }),
    }
}

/// Like [`parse_or_default`], but values outside `range` also fall back.
fn parse_in_range<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    range: RangeInclusive<T>,
) -> T
where
    T: FromStr + Display + PartialOrd + Copy,
    T::Err: Display,
{
    let value = parse_or_default(lookup, key, default);
    if range.contains(&value) {
        value
    } else {
        warn!(
            "{key} value {value} is outside {}..={}; using default {default}",
            range.start(),
            range.end()
        );
        default
    }
}
