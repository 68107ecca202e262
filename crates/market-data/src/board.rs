use analysis_core::{Market, SymbolSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Symbol identifiers the user pinned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    ids: HashSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn add(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Add when absent, remove when present. Returns true if now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Latest loaded rows plus the session's favorites.
///
/// Owned by whoever drives refreshes; nothing in the analysis path reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketBoard {
    pub bourse: Vec<SymbolSnapshot>,
    pub crypto: Vec<SymbolSnapshot>,
    pub favorites: Favorites,
    pub last_update: Option<DateTime<Utc>>,
}

impl MarketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh refresh cycle, keeping favorites
    pub fn replace(&mut self, bourse: Vec<SymbolSnapshot>, crypto: Vec<SymbolSnapshot>) {
        tracing::info!(
            "Market board refreshed: bourse {} symbols, crypto {} symbols",
            bourse.len(),
            crypto.len()
        );
        self.bourse = bourse;
        self.crypto = crypto;
        self.last_update = Some(Utc::now());
    }

    /// Rows backing a market selection: crypto rows for crypto, bourse rows otherwise
    pub fn rows_for(&self, market: Option<Market>) -> &[SymbolSnapshot] {
        match market {
            Some(Market::Crypto) => &self.crypto,
            _ => &self.bourse,
        }
    }

    pub fn find(&self, id: &str) -> Option<&SymbolSnapshot> {
        self.bourse
            .iter()
            .chain(self.crypto.iter())
            .find(|s| s.id == id)
    }
}
