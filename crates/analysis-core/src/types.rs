use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AnalysisError;

/// Exchange a symbol trades on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    #[default]
    Tehran,
    FaraBourse,
    Crypto,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Tehran => "tehran",
            Market::FaraBourse => "farabourse",
            Market::Crypto => "crypto",
        }
    }
}

impl FromStr for Market {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tehran" => Ok(Market::Tehran),
            "farabourse" => Ok(Market::FaraBourse),
            "crypto" => Ok(Market::Crypto),
            other => Err(AnalysisError::InvalidData(format!("unknown market: {}", other))),
        }
    }
}

/// One level of the buy side of the order book
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: f64,
    pub volume: f64,
}

/// Current-moment quote for one instrument, as handed over by the data layer.
///
/// Every field is defaulted so a sparse row (crypto samples carry no
/// fundamentals) still deserializes; missing numbers read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymbolSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub isin: String,
    pub market: Market,
    pub industry: String,

    pub last_price: f64,
    pub close_price: f64,
    pub previous_close: f64,
    pub first_price: f64,
    pub high: f64,
    pub low: f64,

    pub change: f64,
    pub change_percent: f64,

    pub volume: f64,
    pub value: f64,
    pub trade_count: f64,

    pub buy_individual_volume: f64,
    pub sell_individual_volume: f64,
    pub buy_legal_volume: f64,
    pub sell_legal_volume: f64,
    pub buy_orders: Vec<OrderLevel>,

    pub eps: f64,
    pub pe: f64,
    pub market_cap: f64,

    pub update_time: Option<String>,
}

/// One past daily observation, oldest first in any series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
}

macro_rules! display_via_label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

/// Direction of price relative to the short and long moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "strong uptrend")]
    StrongUptrend,
    #[serde(rename = "uptrend")]
    Uptrend,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "downtrend")]
    Downtrend,
    #[serde(rename = "strong downtrend")]
    StrongDowntrend,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::StrongUptrend => "strong uptrend",
            Trend::Uptrend => "uptrend",
            Trend::Neutral => "neutral",
            Trend::Downtrend => "downtrend",
            Trend::StrongDowntrend => "strong downtrend",
        }
    }
}

/// Current volume relative to its recent average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeStatus {
    #[serde(rename = "very high")]
    VeryHigh,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "very low")]
    VeryLow,
    #[serde(rename = "undefined")]
    Undefined,
}

impl VolumeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeStatus::VeryHigh => "very high",
            VolumeStatus::High => "high",
            VolumeStatus::Normal => "normal",
            VolumeStatus::Low => "low",
            VolumeStatus::VeryLow => "very low",
            VolumeStatus::Undefined => "undefined",
        }
    }
}

/// Net individual-investor money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoneyFlow {
    #[serde(rename = "strong inflow")]
    StrongInflow,
    #[serde(rename = "inflow")]
    Inflow,
    #[serde(rename = "balanced")]
    Balanced,
    #[serde(rename = "outflow")]
    Outflow,
    #[serde(rename = "strong outflow")]
    StrongOutflow,
    #[serde(rename = "undefined")]
    Undefined,
}

impl MoneyFlow {
    pub fn label(&self) -> &'static str {
        match self {
            MoneyFlow::StrongInflow => "strong inflow",
            MoneyFlow::Inflow => "inflow",
            MoneyFlow::Balanced => "balanced",
            MoneyFlow::Outflow => "outflow",
            MoneyFlow::StrongOutflow => "strong outflow",
            MoneyFlow::Undefined => "undefined",
        }
    }
}

/// P/E relative to the industry average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeEvaluation {
    #[serde(rename = "very cheap")]
    VeryCheap,
    #[serde(rename = "cheap")]
    Cheap,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "relatively expensive")]
    RelativelyExpensive,
    #[serde(rename = "expensive")]
    Expensive,
    #[serde(rename = "undefined")]
    Undefined,
}

impl PeEvaluation {
    pub fn label(&self) -> &'static str {
        match self {
            PeEvaluation::VeryCheap => "very cheap",
            PeEvaluation::Cheap => "cheap",
            PeEvaluation::Fair => "fair",
            PeEvaluation::RelativelyExpensive => "relatively expensive",
            PeEvaluation::Expensive => "expensive",
            PeEvaluation::Undefined => "undefined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundamentalStrength {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "weak")]
    Weak,
    #[serde(rename = "very weak")]
    VeryWeak,
}

impl FundamentalStrength {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 3 => FundamentalStrength::Strong,
            s if s >= 1 => FundamentalStrength::Moderate,
            s if s >= -1 => FundamentalStrength::Weak,
            _ => FundamentalStrength::VeryWeak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FundamentalStrength::Strong => "strong",
            FundamentalStrength::Moderate => "moderate",
            FundamentalStrength::Weak => "weak",
            FundamentalStrength::VeryWeak => "very weak",
        }
    }
}

/// A single check that moved the fundamental score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundamentalFactor {
    #[serde(rename = "excellent EPS")]
    ExcellentEps,
    #[serde(rename = "good EPS")]
    GoodEps,
    #[serde(rename = "weak EPS")]
    WeakEps,
    #[serde(rename = "attractive P/E")]
    AttractivePe,
    #[serde(rename = "reasonable P/E")]
    ReasonablePe,
    #[serde(rename = "high P/E")]
    HighPe,
    #[serde(rename = "large company")]
    LargeCompany,
}

impl FundamentalFactor {
    pub fn label(&self) -> &'static str {
        match self {
            FundamentalFactor::ExcellentEps => "excellent EPS",
            FundamentalFactor::GoodEps => "good EPS",
            FundamentalFactor::WeakEps => "weak EPS",
            FundamentalFactor::AttractivePe => "attractive P/E",
            FundamentalFactor::ReasonablePe => "reasonable P/E",
            FundamentalFactor::HighPe => "high P/E",
            FundamentalFactor::LargeCompany => "large company",
        }
    }
}

/// Recommended trading action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalAction {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    Avoid,
}

impl SignalAction {
    pub fn label(&self) -> &'static str {
        match self {
            SignalAction::StrongBuy => "STRONG_BUY",
            SignalAction::Buy => "BUY",
            SignalAction::Hold => "HOLD",
            SignalAction::Sell => "SELL",
            SignalAction::StrongSell => "STRONG_SELL",
            SignalAction::Avoid => "AVOID",
        }
    }
}

/// Why the signal confidence moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalReason {
    #[serde(rename = "strong uptrend")]
    StrongUptrend,
    #[serde(rename = "strong downtrend")]
    StrongDowntrend,
    #[serde(rename = "very high trading volume")]
    VeryHighVolume,
    #[serde(rename = "strong fundamentals")]
    StrongFundamentals,
    #[serde(rename = "weak fundamentals")]
    WeakFundamentals,
    #[serde(rename = "strong individual money inflow")]
    StrongInflow,
    #[serde(rename = "strong individual money outflow")]
    StrongOutflow,
}

impl SignalReason {
    pub fn label(&self) -> &'static str {
        match self {
            SignalReason::StrongUptrend => "strong uptrend",
            SignalReason::StrongDowntrend => "strong downtrend",
            SignalReason::VeryHighVolume => "very high trading volume",
            SignalReason::StrongFundamentals => "strong fundamentals",
            SignalReason::WeakFundamentals => "weak fundamentals",
            SignalReason::StrongInflow => "strong individual money inflow",
            SignalReason::StrongOutflow => "strong individual money outflow",
        }
    }
}

/// How much real history backed the technical indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryCoverage {
    /// No history supplied; indicators ran on the snapshot alone
    SnapshotOnly,
    /// Some history, but not enough for the long moving average
    Partial,
    Full,
}

impl HistoryCoverage {
    pub fn label(&self) -> &'static str {
        match self {
            HistoryCoverage::SnapshotOnly => "snapshot only",
            HistoryCoverage::Partial => "partial",
            HistoryCoverage::Full => "full",
        }
    }
}

display_via_label!(
    Trend,
    VolumeStatus,
    MoneyFlow,
    PeEvaluation,
    FundamentalStrength,
    FundamentalFactor,
    SignalAction,
    SignalReason,
    HistoryCoverage,
);

/// Support/resistance band around the current price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

/// Technical picture for one symbol. Averages and band edges are rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub trend: Trend,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub volume_status: VolumeStatus,
    pub support: f64,
    pub resistance: f64,
    pub money_flow: MoneyFlow,
    pub history_coverage: HistoryCoverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalReport {
    pub strength: FundamentalStrength,
    pub score: i32,
    /// In evaluation order: EPS, P/E, market cap
    pub factors: Vec<FundamentalFactor>,
    pub pe_evaluation: PeEvaluation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub action: SignalAction,
    /// Always within 10..=95
    pub confidence: i32,
    /// At most three, in evaluation order
    pub reasons: Vec<SignalReason>,
    pub timestamp: DateTime<Utc>,
}

/// Full analysis of one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub technical: TechnicalReport,
    pub fundamental: FundamentalReport,
    pub signal: SignalReport,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fundamental_strength_bands() {
        assert_eq!(FundamentalStrength::from_score(5), FundamentalStrength::Strong);
        assert_eq!(FundamentalStrength::from_score(3), FundamentalStrength::Strong);
        assert_eq!(FundamentalStrength::from_score(2), FundamentalStrength::Moderate);
        assert_eq!(FundamentalStrength::from_score(1), FundamentalStrength::Moderate);
        assert_eq!(FundamentalStrength::from_score(0), FundamentalStrength::Weak);
        assert_eq!(FundamentalStrength::from_score(-1), FundamentalStrength::Weak);
        assert_eq!(FundamentalStrength::from_score(-2), FundamentalStrength::VeryWeak);
    }

    #[test]
    fn test_labels_match_serialized_names() {
        let json = serde_json::to_string(&Trend::StrongDowntrend).unwrap();
        assert_eq!(json, "\"strong downtrend\"");
        assert_eq!(Trend::StrongDowntrend.to_string(), "strong downtrend");

        let json = serde_json::to_string(&SignalAction::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG_BUY\"");
        assert_eq!(SignalAction::StrongBuy.label(), "STRONG_BUY");

        let json = serde_json::to_string(&FundamentalFactor::AttractivePe).unwrap();
        assert_eq!(json, "\"attractive P/E\"");
    }

    #[test]
    fn test_snapshot_deserializes_sparse_row() {
        let snap: SymbolSnapshot = serde_json::from_str(
            r#"{"symbol":"BTC","name":"Bitcoin","lastPrice":64000.5,"changePercent":-1.2,"market":"crypto"}"#,
        )
        .unwrap();
        assert_eq!(snap.market, Market::Crypto);
        assert_eq!(snap.last_price, 64000.5);
        assert_eq!(snap.eps, 0.0);
        assert!(snap.buy_orders.is_empty());
        assert!(snap.update_time.is_none());
    }

    #[test]
    fn test_market_from_str() {
        assert_eq!("Tehran".parse::<Market>().unwrap(), Market::Tehran);
        assert_eq!("farabourse".parse::<Market>().unwrap(), Market::FaraBourse);
        assert!("nasdaq".parse::<Market>().is_err());
    }

    #[test]
    fn test_fundamental_strength_serializes_as_label() {
        for strength in [
            FundamentalStrength::Strong,
            FundamentalStrength::Moderate,
            FundamentalStrength::Weak,
            FundamentalStrength::VeryWeak,
        ] {
            let json = serde_json::to_string(&strength).unwrap();
            assert_eq!(json, format!("\"{}\"", strength.label()));
        }
        let parsed: FundamentalStrength = serde_json::from_str("\"very weak\"").unwrap();
        assert_eq!(parsed, FundamentalStrength::VeryWeak);
    }
}
