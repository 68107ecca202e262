use analysis_core::{
    AnalysisConfig, AnalysisResult, FundamentalReport, HistoricalPoint, HistoryCoverage,
    SymbolSnapshot, TechnicalReport,
};
use fundamental_analysis::FundamentalAnalysisEngine;
use technical_analysis::{
    classify_money_flow, classify_trend, classify_volume, moving_average, support_resistance,
};

pub mod signal;
pub use signal::{score_confidence, select_action, synthesize_signal};

/// Price, volume, high and low columns pulled out of a history
struct PriceSeries {
    prices: Vec<f64>,
    volumes: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
}

impl PriceSeries {
    fn from_history(history: &[HistoricalPoint]) -> Self {
        Self {
            prices: history.iter().map(|p| p.price).collect(),
            volumes: history.iter().map(|p| p.volume).collect(),
            highs: history.iter().map(|p| p.high).collect(),
            lows: history.iter().map(|p| p.low).collect(),
        }
    }

    /// Single-point series from the snapshot itself
    fn from_snapshot(snapshot: &SymbolSnapshot) -> Self {
        Self {
            prices: vec![snapshot.last_price],
            volumes: vec![snapshot.volume],
            highs: vec![snapshot.high],
            lows: vec![snapshot.low],
        }
    }
}

/// Runs the indicator, fundamental and signal stages for one symbol at a time.
///
/// Holds no state besides configuration: every call recomputes from scratch.
pub struct AnalysisOrchestrator {
    config: AnalysisConfig,
    fundamental_analyzer: FundamentalAnalysisEngine,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            fundamental_analyzer: FundamentalAnalysisEngine::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one symbol. `history` is oldest first and may be empty.
    pub fn analyze(
        &self,
        snapshot: &SymbolSnapshot,
        history: &[HistoricalPoint],
    ) -> AnalysisResult {
        let technical = self.technical(snapshot, history);
        let fundamental = self.fundamental(snapshot);
        let signal = synthesize_signal(&technical, &fundamental, snapshot.change_percent);

        let summary = format!(
            "Trend {} | {} | Fundamentals {}",
            technical.trend, technical.money_flow, fundamental.strength
        );

        tracing::debug!(
            "Analyzed {}: {} (confidence {}) - {}",
            snapshot.symbol,
            signal.action,
            signal.confidence,
            summary
        );

        AnalysisResult {
            symbol: snapshot.symbol.clone(),
            technical,
            fundamental,
            signal,
            summary,
        }
    }

    /// Analyze a batch one symbol after another, pairing each with its history
    pub fn analyze_all<'a, I>(&self, items: I) -> Vec<AnalysisResult>
    where
        I: IntoIterator<Item = (&'a SymbolSnapshot, &'a [HistoricalPoint])>,
    {
        items
            .into_iter()
            .map(|(snapshot, history)| self.analyze(snapshot, history))
            .collect()
    }

    pub fn technical(
        &self,
        snapshot: &SymbolSnapshot,
        history: &[HistoricalPoint],
    ) -> TechnicalReport {
        let series = if history.is_empty() {
            tracing::warn!(
                "No history for {}, indicators fall back to the snapshot alone",
                snapshot.symbol
            );
            PriceSeries::from_snapshot(snapshot)
        } else {
            PriceSeries::from_history(history)
        };

        let short_ma = moving_average(&series.prices, self.config.short_ma_period);
        let long_ma = moving_average(&series.prices, self.config.long_ma_period);
        let average_volume = moving_average(&series.volumes, self.config.volume_ma_period);

        let trend = classify_trend(snapshot.last_price, short_ma, long_ma);
        let volume_status = classify_volume(snapshot.volume, average_volume);
        let band = support_resistance(
            &series.highs,
            &series.lows,
            snapshot.last_price,
            &self.config,
        );
        let money_flow = classify_money_flow(
            snapshot.buy_individual_volume,
            snapshot.sell_individual_volume,
            snapshot.volume,
        );

        let history_coverage = if history.is_empty() {
            HistoryCoverage::SnapshotOnly
        } else if short_ma.is_some() && long_ma.is_some() {
            HistoryCoverage::Full
        } else {
            HistoryCoverage::Partial
        };

        TechnicalReport {
            trend,
            short_ma: display_average(short_ma),
            long_ma: display_average(long_ma),
            volume_status,
            support: round_half_up(band.support),
            resistance: round_half_up(band.resistance),
            money_flow,
            history_coverage,
        }
    }

    pub fn fundamental(&self, snapshot: &SymbolSnapshot) -> FundamentalReport {
        self.fundamental_analyzer.evaluate(snapshot)
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze with the default configuration
pub fn analyze(snapshot: &SymbolSnapshot, history: &[HistoricalPoint]) -> AnalysisResult {
    AnalysisOrchestrator::new().analyze(snapshot, history)
}

/// Nearest integer, halves rounding up (towards +inf)
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounded average for display; a zero average is reported as missing
fn display_average(average: Option<f64>) -> Option<f64> {
    average.filter(|v| *v != 0.0).map(round_half_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{
        FundamentalStrength, MoneyFlow, SignalAction, SignalReason, Trend, VolumeStatus,
    };
    use chrono::{Duration, NaiveDate};

    fn snapshot() -> SymbolSnapshot {
        SymbolSnapshot {
            id: "IRO1FOLD0001".to_string(),
            symbol: "FOLD".to_string(),
            name: "Mobarakeh Steel".to_string(),
            last_price: 1000.0,
            previous_close: 952.0,
            high: 1010.0,
            low: 950.0,
            change_percent: 5.0,
            volume: 3_000_000.0,
            eps: 600.0,
            pe: 12.0,
            ..Default::default()
        }
    }

    /// Rising path ending just under the snapshot price, flat 1M volume
    fn rising_history(points: usize, start: f64, step: f64) -> Vec<HistoricalPoint> {
        let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..points)
            .map(|i| {
                let price = start + step * i as f64;
                HistoricalPoint {
                    date: first_day + Duration::days(i as i64),
                    price,
                    high: price + 10.0,
                    low: price - 10.0,
                    volume: 1_000_000.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(949.99), 950.0);
    }

    #[test]
    fn test_twenty_five_rising_points() {
        let history = rising_history(25, 900.0, 4.0);
        let result = analyze(&snapshot(), &history);

        // 25 points: short MA present, long MA absent
        assert_eq!(result.technical.short_ma, Some(958.0));
        assert_eq!(result.technical.long_ma, None);
        assert_eq!(result.technical.trend, Trend::Neutral);
        assert_eq!(result.technical.history_coverage, HistoryCoverage::Partial);
        assert_eq!(result.technical.volume_status, VolumeStatus::VeryHigh);
        assert_eq!(result.technical.money_flow, MoneyFlow::Balanced);

        assert_eq!(result.fundamental.strength, FundamentalStrength::Moderate);
        assert_eq!(result.signal.confidence, 60);
        assert_eq!(result.signal.action, SignalAction::Buy);
        assert_eq!(result.signal.reasons, vec![SignalReason::VeryHighVolume]);
    }

    #[test]
    fn test_long_rising_history_is_strong_buy() {
        let history = rising_history(60, 700.0, 5.0);
        let result = analyze(&snapshot(), &history);

        assert_eq!(result.technical.short_ma, Some(948.0)); // 947.5 rounds up
        assert_eq!(result.technical.long_ma, Some(873.0)); // 872.5 rounds up
        assert_eq!(result.technical.trend, Trend::StrongUptrend);
        assert_eq!(result.technical.history_coverage, HistoryCoverage::Full);
        assert_eq!(result.signal.confidence, 80);
        assert_eq!(result.signal.action, SignalAction::StrongBuy);
        assert_eq!(
            result.signal.reasons,
            vec![SignalReason::StrongUptrend, SignalReason::VeryHighVolume]
        );
        assert!(result.technical.support <= result.technical.resistance);
    }

    #[test]
    fn test_shorter_long_period_from_config() {
        let config = AnalysisConfig {
            long_ma_period: 25,
            ..Default::default()
        };
        let orchestrator = AnalysisOrchestrator::with_config(config);
        let result = orchestrator.analyze(&snapshot(), &rising_history(25, 900.0, 4.0));

        // ma20 = 958 > ma25 = 948
        assert_eq!(result.technical.trend, Trend::StrongUptrend);
        assert_eq!(result.signal.action, SignalAction::StrongBuy);
    }

    #[test]
    fn test_empty_history_falls_back_to_snapshot() {
        let result = analyze(&snapshot(), &[]);

        assert_eq!(result.technical.history_coverage, HistoryCoverage::SnapshotOnly);
        assert_eq!(result.technical.short_ma, None);
        assert_eq!(result.technical.long_ma, None);
        assert_eq!(result.technical.trend, Trend::Neutral);
        assert_eq!(result.technical.volume_status, VolumeStatus::Undefined);
        assert_eq!(result.technical.support, 950.0);
        assert_eq!(result.technical.resistance, 1050.0);
    }

    #[test]
    fn test_band_uses_history_highs_and_lows() {
        let result = analyze(&snapshot(), &rising_history(25, 900.0, 4.0));
        // mean low 938 vs 970 -> 938; mean high 958 vs 1030 -> 1030
        assert_eq!(result.technical.support, 938.0);
        assert_eq!(result.technical.resistance, 1030.0);
    }

    #[test]
    fn test_summary_line() {
        let mut snap = snapshot();
        snap.buy_individual_volume = 2_000_000.0;
        snap.sell_individual_volume = 500_000.0;
        let result = analyze(&snap, &rising_history(60, 700.0, 5.0));

        assert_eq!(
            result.summary,
            "Trend strong uptrend | strong inflow | Fundamentals moderate"
        );
        assert_eq!(result.symbol, "FOLD");
    }

    #[test]
    fn test_zeroed_snapshot_never_fails() {
        let result = analyze(&SymbolSnapshot::default(), &[]);

        assert_eq!(result.technical.money_flow, MoneyFlow::Undefined);
        assert_eq!(result.technical.volume_status, VolumeStatus::Undefined);
        assert_eq!(result.fundamental.pe_evaluation, analysis_core::PeEvaluation::Undefined);
        // EPS 0 is weak EPS: score -1, weak fundamentals, 50 - 10
        assert_eq!(result.fundamental.strength, FundamentalStrength::Weak);
        assert_eq!(result.signal.confidence, 40);
        assert_eq!(result.signal.action, SignalAction::Hold);
    }

    #[test]
    fn test_analyze_all_preserves_order() {
        let orchestrator = AnalysisOrchestrator::new();
        let history = rising_history(60, 700.0, 5.0);
        let first = snapshot();
        let second = SymbolSnapshot {
            symbol: "SHATRAN".to_string(),
            ..snapshot()
        };

        let results = orchestrator.analyze_all([
            (&first, history.as_slice()),
            (&second, &[][..]),
        ]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symbol, "FOLD");
        assert_eq!(results[1].symbol, "SHATRAN");
        assert_eq!(results[1].technical.history_coverage, HistoryCoverage::SnapshotOnly);
    }

    #[test]
    fn test_result_serializes_labels() {
        let result = analyze(&snapshot(), &rising_history(60, 700.0, 5.0));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["technical"]["trend"], "strong uptrend");
        assert_eq!(json["technical"]["volume_status"], "very high");
        assert_eq!(json["signal"]["action"], "STRONG_BUY");
        assert_eq!(json["technical"]["history_coverage"], "full");
    }
}
