//! The stock watchlist a batch run is driven from.
//!
//! ```toml
//! [tw_stocks]
//! core = [{ symbol = "2330" }, { symbol = "2454", name = "聯發科" }]
//! swing = [{ symbol = "3037" }]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::core::FmError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Watchlist {
    #[serde(default)]
    pub tw_stocks: WatchGroup,
}

/// Long-term holdings (`core`) and short-term trades (`swing`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchGroup {
    #[serde(default)]
    pub core: Vec<WatchEntry>,
    #[serde(default)]
    pub swing: Vec<WatchEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchEntry {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Watchlist {
    /// Reads a watchlist from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FmError> {
        let body = std::fs::read_to_string(path)?;
        body.parse()
    }

    /// Taiwan symbols, `core` before `swing`, first occurrence wins.
    pub fn tw_symbols(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tw_entries()
            .filter(|e| seen.insert(e.symbol.as_str()))
            .map(|e| e.symbol.clone())
            .collect()
    }

    /// `(symbol, name)` pairs for entries that carry a name.
    pub fn tw_names(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.tw_entries()
            .filter_map(|e| e.name.clone().map(|n| (e.symbol.clone(), n)))
    }

    fn tw_entries(&self) -> impl Iterator<Item = &WatchEntry> {
        self.tw_stocks.core.iter().chain(&self.tw_stocks.swing)
    }
}

impl std::str::FromStr for Watchlist {
    type Err = FmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
