use analysis_core::{AnalysisConfig, MoneyFlow, SupportResistance, Trend, VolumeStatus};

/// Arithmetic mean; `None` for an empty slice
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Simple Moving Average of the last `period` values.
///
/// Absent (not zero) when the series is shorter than `period`.
pub fn moving_average(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    mean(&series[series.len() - period..])
}

/// Classify the trend from price vs the short MA and short MA vs the long MA.
///
/// A zero average counts as missing, matching defaulted upstream data.
pub fn classify_trend(current_price: f64, short_ma: Option<f64>, long_ma: Option<f64>) -> Trend {
    let (short, long) = match (short_ma, long_ma) {
        (Some(s), Some(l)) if s != 0.0 && l != 0.0 => (s, l),
        _ => return Trend::Neutral,
    };

    if current_price > short && short > long {
        Trend::StrongUptrend
    } else if current_price > short {
        Trend::Uptrend
    } else if current_price < short && short < long {
        Trend::StrongDowntrend
    } else if current_price < short {
        Trend::Downtrend
    } else {
        Trend::Neutral
    }
}

/// Support/resistance band from recent highs and lows.
///
/// With fewer than `min_band_points` observations the band is a flat
/// `fallback_band_pct` either side of the price. Otherwise support is the lower
/// of the mean low and `price * (1 - band_pct)`, resistance the higher of the
/// mean high and `price * (1 + band_pct)`.
pub fn support_resistance(
    highs: &[f64],
    lows: &[f64],
    current_price: f64,
    config: &AnalysisConfig,
) -> SupportResistance {
    if highs.len() < config.min_band_points || lows.len() < config.min_band_points {
        return SupportResistance {
            support: current_price * (1.0 - config.fallback_band_pct),
            resistance: current_price * (1.0 + config.fallback_band_pct),
        };
    }

    // Both slices hold at least min_band_points (>= 1 after validation) values here
    let avg_high = mean(highs).unwrap_or(current_price);
    let avg_low = mean(lows).unwrap_or(current_price);

    SupportResistance {
        support: avg_low.min(current_price * (1.0 - config.band_pct)),
        resistance: avg_high.max(current_price * (1.0 + config.band_pct)),
    }
}

/// Current volume over its average; `None` when the average is missing or zero
pub fn volume_ratio(current_volume: f64, average_volume: Option<f64>) -> Option<f64> {
    match average_volume {
        Some(avg) if avg != 0.0 && avg.is_finite() => Some(current_volume / avg),
        _ => None,
    }
}

pub fn classify_volume(current_volume: f64, average_volume: Option<f64>) -> VolumeStatus {
    let ratio = match volume_ratio(current_volume, average_volume) {
        Some(r) => r,
        None => return VolumeStatus::Undefined,
    };

    if ratio > 2.5 {
        VolumeStatus::VeryHigh
    } else if ratio > 1.8 {
        VolumeStatus::High
    } else if ratio < 0.5 {
        VolumeStatus::VeryLow
    } else if ratio < 0.8 {
        VolumeStatus::Low
    } else {
        VolumeStatus::Normal
    }
}

/// Net individual buy/sell imbalance as a share of total volume
pub fn net_flow_ratio(buy_individual: f64, sell_individual: f64, volume: f64) -> Option<f64> {
    if volume == 0.0 || !volume.is_finite() {
        return None;
    }
    Some((buy_individual - sell_individual) / volume)
}

pub fn classify_money_flow(buy_individual: f64, sell_individual: f64, volume: f64) -> MoneyFlow {
    let flow = match net_flow_ratio(buy_individual, sell_individual, volume) {
        Some(f) => f,
        None => return MoneyFlow::Undefined,
    };

    if flow > 0.3 {
        MoneyFlow::StrongInflow
    } else if flow > 0.1 {
        MoneyFlow::Inflow
    } else if flow < -0.3 {
        MoneyFlow::StrongOutflow
    } else if flow < -0.1 {
        MoneyFlow::Outflow
    } else {
        MoneyFlow::Balanced
    }
}
