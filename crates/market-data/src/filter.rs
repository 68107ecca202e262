//! Dashboard-style filtering and sorting of a board's rows.

use crate::board::Favorites;
use analysis_core::{AnalysisError, Market, SymbolSnapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Direction of the day's change to keep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFilter {
    #[default]
    All,
    Positive,
    Negative,
}

impl FromStr for ChangeFilter {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ChangeFilter::All),
            "positive" => Ok(ChangeFilter::Positive),
            "negative" => Ok(ChangeFilter::Negative),
            other => Err(AnalysisError::InvalidData(format!("unknown change filter: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep feed order
    None,
    /// Highest volume first
    #[default]
    Volume,
    /// Largest absolute percent change first
    Change,
    /// Symbol, ascending
    Name,
}

impl FromStr for SortKey {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(SortKey::None),
            "volume" => Ok(SortKey::Volume),
            "change" => Ok(SortKey::Change),
            "name" => Ok(SortKey::Name),
            other => Err(AnalysisError::InvalidData(format!("unknown sort key: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketFilter {
    /// `None` keeps every market
    pub market: Option<Market>,
    pub search_query: Option<String>,
    pub change: ChangeFilter,
    pub favorites_only: bool,
    pub sort_by: SortKey,
    pub limit: Option<usize>,
}

/// Filter then sort `data`; the input is left untouched.
pub fn filter_market_data(
    data: &[SymbolSnapshot],
    filter: &MarketFilter,
    favorites: &Favorites,
) -> Vec<SymbolSnapshot> {
    let query = filter
        .search_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<SymbolSnapshot> = data
        .iter()
        .filter(|item| filter.market.map_or(true, |m| item.market == m))
        .filter(|item| match &query {
            Some(q) => {
                item.symbol.to_lowercase().contains(q) || item.name.to_lowercase().contains(q)
            }
            None => true,
        })
        .filter(|item| match filter.change {
            ChangeFilter::All => true,
            ChangeFilter::Positive => item.change_percent > 0.0,
            ChangeFilter::Negative => item.change_percent < 0.0,
        })
        .filter(|item| !filter.favorites_only || favorites.contains(&item.id))
        .cloned()
        .collect();

    match filter.sort_by {
        SortKey::None => {}
        SortKey::Volume => filtered.sort_by(|a, b| {
            b.volume.partial_cmp(&a.volume).unwrap_or(Ordering::Equal)
        }),
        SortKey::Change => filtered.sort_by(|a, b| {
            b.change_percent
                .abs()
                .partial_cmp(&a.change_percent.abs())
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Name => filtered.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
    }

    if let Some(limit) = filter.limit {
        filtered.truncate(limit);
    }

    filtered
}
