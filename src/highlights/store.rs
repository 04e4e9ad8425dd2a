use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{FmError, YearMonth};

/// The highest monthly revenue ever declared a record for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// The record revenue.
    #[serde(with = "rust_decimal::serde::float")]
    pub record_high: Decimal,
    /// The month that produced the record.
    pub record_month: YearMonth,
    /// When the record was last written.
    #[serde(deserialize_with = "de_timestamp")]
    pub updated_at: DateTime<FixedOffset>,
}

/// Per-stock high-water marks, persisted as a single JSON object keyed by stock id.
///
/// The store is loaded once before a batch and written back in full after it.
/// There is no locking; concurrent writers are last-writer-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalStore {
    records: BTreeMap<String, HistoricalRecord>,
}

impl HistoricalStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the store from `path`.
    ///
    /// A missing file yields an empty store. So does an unreadable or malformed one,
    /// after logging a warning; a batch should never fail because of stale state.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable revenue records");
                Self::default()
            }
        }
    }

    /// Loads the store from `path`, reporting malformed content as an error.
    ///
    /// # Errors
    ///
    /// Returns `FmError::Io` if the file exists but cannot be read, and
    /// `FmError::Json` if it is not a valid records document. A missing file is not
    /// an error.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, FmError> {
        let path = path.as_ref();
        let body = match fs::read_to_string(path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&body)?)
    }

    /// Writes the whole store to `path`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file cannot
    /// be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FmError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        tracing::debug!(path = %path.display(), records = self.len(), "saved revenue records");
        Ok(())
    }

    pub fn get(&self, stock_id: &str) -> Option<&HistoricalRecord> {
        self.records.get(stock_id)
    }

    /// Overwrites the entry for `stock_id`, whatever was there before.
    pub fn record(
        &mut self,
        stock_id: impl Into<String>,
        revenue: Decimal,
        month: YearMonth,
        at: DateTime<FixedOffset>,
    ) {
        self.records.insert(
            stock_id.into(),
            HistoricalRecord {
                record_high: revenue,
                record_month: month,
                updated_at: at,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HistoricalRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// Older record files hold naive local timestamps; those are read as Asia/Taipei.
fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts);
    }
    let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(serde::de::Error::custom)?;
    chrono_tz::Asia::Taipei
        .from_local_datetime(&naive)
        .single()
        .map(|ts| ts.fixed_offset())
        .ok_or_else(|| serde::de::Error::custom(format!("ambiguous local timestamp {raw:?}")))
}
