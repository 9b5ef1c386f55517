use std::env;

use chrono::Duration;
use thiserror::Error;

use crate::domain::policy::DEFAULT_REMOVAL_WINDOW_SECS;
use crate::domain::values::{Money, TableId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub table_id: TableId,
    pub starting_sales_total: Money,
    /// `None` when orders may be removed at any age.
    pub removal_window: Option<Duration>,
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` first if
    /// there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_id = parse(&lookup, "TABLE_ID", 1, TableId::new)?;
        let starting_sales_total = parse(&lookup, "STARTING_SALES_TOTAL", 0, Money::new)?;
        let removal_window = parse(&lookup, "REMOVAL_WINDOW_SECS", DEFAULT_REMOVAL_WINDOW_SECS, |s| match s {
            0 => Ok(None),
            s if s < 0 => Err(()),
            s => Duration::try_seconds(s).map(Some).ok_or(()),
        })?;

        Ok(Self {
            table_id,
            starting_sales_total,
            removal_window,
        })
    }
}

fn parse<T, E>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: i64,
    build: impl Fn(i64) -> Result<T, E>,
) -> Result<T, ConfigError> {
    let raw = match lookup(key) {
        Some(raw) => raw,
        None => return build(default).map_err(|_| invalid(key, default.to_string())),
    };
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| build(n).ok())
        .ok_or_else(|| invalid(key, raw.clone()))
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}
