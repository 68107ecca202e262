//! Synthetic market data for demos and offline runs.
//!
//! Nothing here is real market data, and the analysis path never calls into
//! this module on its own: callers opt in explicitly, for example when the
//! exchange feed is unavailable or a chart needs a placeholder series.

use analysis_core::{HistoricalPoint, Market, SymbolSnapshot};
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

/// Largest daily move of the random walk, either direction
const DAILY_SWING: f64 = 0.04;
/// Largest intraday distance of high/low from the close
const INTRADAY_RANGE: f64 = 0.02;

const SAMPLE_BOURSE: &[(&str, &str, Market)] = &[
    ("SHATRAN", "Tehran Oil Refining", Market::Tehran),
    ("FOLAD", "Mobarakeh Steel", Market::Tehran),
    ("KHSAPA", "Saipa", Market::Tehran),
    ("VBSADER", "Bank Saderat Iran", Market::Tehran),
    ("SHAPNA", "Isfahan Oil Refining", Market::Tehran),
    ("FAMELI", "National Iranian Copper", Market::FaraBourse),
    ("KEGOL", "Golgohar Mining", Market::FaraBourse),
    ("SHARAK", "Iran Kish", Market::FaraBourse),
    ("VGHADIR", "Golsaran Sugar", Market::FaraBourse),
    ("SHAPDIS", "Pardis Petrochemical", Market::FaraBourse),
];

const SAMPLE_INDUSTRIES: &[&str] = &["refining", "basic metals", "automotive", "banking", "sugar"];

const SAMPLE_CRYPTO: &[(&str, &str)] = &[
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("BNB", "Binance Coin"),
    ("XRP", "Ripple"),
    ("ADA", "Cardano"),
    ("SOL", "Solana"),
    ("DOT", "Polkadot"),
    ("DOGE", "Dogecoin"),
    ("AVAX", "Avalanche"),
    ("LINK", "Chainlink"),
];

/// Random-walk daily series ending on `end_date`, oldest first.
///
/// Produces `days + 1` points. The walk starts from the previous close (95% of
/// the last price when that is zero) and the final point is pinned to the
/// snapshot's last price.
pub fn sample_chart_series<R: Rng>(
    snapshot: &SymbolSnapshot,
    days: u32,
    end_date: NaiveDate,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let mut price = if snapshot.previous_close != 0.0 {
        snapshot.previous_close
    } else {
        snapshot.last_price * 0.95
    };

    let mut series: Vec<HistoricalPoint> = (0..=days)
        .rev()
        .map(|days_back| {
            let change = (rng.gen::<f64>() - 0.5) * DAILY_SWING;
            price *= 1.0 + change;

            let high = price * (1.0 + rng.gen::<f64>() * INTRADAY_RANGE);
            let low = price * (1.0 - rng.gen::<f64>() * INTRADAY_RANGE);
            let volume = (snapshot.volume * (0.5 + rng.gen::<f64>())).round();

            HistoricalPoint {
                date: end_date - Duration::days(days_back as i64),
                price: round2(price),
                high: round2(high),
                low: round2(low),
                volume,
            }
        })
        .collect();

    if let Some(last) = series.last_mut() {
        last.price = snapshot.last_price;
        last.high = last.high.max(last.price);
        last.low = last.low.min(last.price);
    }

    series
}

/// Ten made-up bourse symbols with plausible prices, volumes and fundamentals
pub fn sample_bourse_board<R: Rng>(rng: &mut R) -> Vec<SymbolSnapshot> {
    let update_time = Utc::now().format("%H:%M:%S").to_string();

    SAMPLE_BOURSE
        .iter()
        .enumerate()
        .map(|(index, (symbol, name, market))| {
            let base_price = 1000.0 + rng.gen::<f64>() * 50_000.0;
            let change_percent = round2((rng.gen::<f64>() - 0.5) * 10.0);
            let change = base_price * (change_percent / 100.0);

            SymbolSnapshot {
                id: format!("sample_{}", index),
                symbol: symbol.to_string(),
                name: name.to_string(),
                market: *market,
                industry: SAMPLE_INDUSTRIES[index % SAMPLE_INDUSTRIES.len()].to_string(),
                last_price: base_price.round(),
                close_price: (base_price - change * 0.3).round(),
                previous_close: (base_price - change).round(),
                high: (base_price * (1.0 + rng.gen::<f64>() * 0.05)).round(),
                low: (base_price * (1.0 - rng.gen::<f64>() * 0.05)).round(),
                change: change.round(),
                change_percent,
                volume: (1_000_000.0 + rng.gen::<f64>() * 10_000_000.0).round(),
                value: (base_price * (1_000_000.0 + rng.gen::<f64>() * 10_000_000.0)).round(),
                buy_individual_volume: (rng.gen::<f64>() * 500_000.0).round(),
                sell_individual_volume: (rng.gen::<f64>() * 500_000.0).round(),
                eps: rng.gen::<f64>() * 1000.0,
                pe: rng.gen::<f64>() * 20.0,
                market_cap: (base_price * 10_000_000.0).round(),
                update_time: Some(update_time.clone()),
                ..Default::default()
            }
        })
        .collect()
}

/// Ten well-known coins with random prices; no fundamentals
pub fn sample_crypto_board<R: Rng>(rng: &mut R) -> Vec<SymbolSnapshot> {
    let update_time = Utc::now().format("%H:%M:%S").to_string();

    SAMPLE_CRYPTO
        .iter()
        .map(|(symbol, name)| {
            let base_price = 10.0 + rng.gen::<f64>() * 100_000.0;
            let change_percent = round2((rng.gen::<f64>() - 0.5) * 15.0);

            SymbolSnapshot {
                id: format!("crypto_{}", symbol),
                symbol: symbol.to_string(),
                name: name.to_string(),
                market: Market::Crypto,
                last_price: round2(base_price),
                change_percent,
                change: round2(base_price * change_percent / 100.0),
                volume: round2(base_price * (10_000.0 + rng.gen::<f64>() * 100_000.0)),
                market_cap: round2(base_price * (1_000_000.0 + rng.gen::<f64>() * 10_000_000.0)),
                update_time: Some(update_time.clone()),
                ..Default::default()
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot() -> SymbolSnapshot {
        SymbolSnapshot {
            symbol: "FOLAD".to_string(),
            last_price: 5_430.0,
            previous_close: 5_300.0,
            volume: 2_000_000.0,
            ..Default::default()
        }
    }

    fn end_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_chart_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = sample_chart_series(&snapshot(), 30, end_date(), &mut rng);

        assert_eq!(series.len(), 31);
        assert_eq!(series.first().unwrap().date, end_date() - Duration::days(30));
        assert_eq!(series.last().unwrap().date, end_date());
        assert!(series.windows(2).all(|w| w[1].date - w[0].date == Duration::days(1)));
        assert_eq!(series.last().unwrap().price, 5_430.0);
    }

    #[test]
    fn test_chart_series_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let snap = snapshot();
        let series = sample_chart_series(&snap, 60, end_date(), &mut rng);

        for point in &series {
            assert!(point.high >= point.price - 0.01);
            assert!(point.low <= point.price + 0.01);
            assert!(point.volume >= snap.volume * 0.5 - 1.0);
            assert!(point.volume <= snap.volume * 1.5 + 1.0);
        }
        for pair in series[..series.len() - 1].windows(2) {
            let step = pair[1].price / pair[0].price - 1.0;
            assert!(step.abs() <= DAILY_SWING / 2.0 + 0.001);
        }
    }

    #[test]
    fn test_chart_series_is_reproducible_with_seed() {
        let a = sample_chart_series(&snapshot(), 10, end_date(), &mut StdRng::seed_from_u64(1));
        let b = sample_chart_series(&snapshot(), 10, end_date(), &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_previous_close_starts_below_last_price() {
        let snap = SymbolSnapshot {
            previous_close: 0.0,
            ..snapshot()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let series = sample_chart_series(&snap, 0, end_date(), &mut rng);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].price, 5_430.0);
    }

    #[test]
    fn test_sample_bourse_board() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = sample_bourse_board(&mut rng);

        assert_eq!(board.len(), 10);
        assert_eq!(board[0].id, "sample_0");
        assert_eq!(board[0].market, Market::Tehran);
        assert_eq!(board[9].market, Market::FaraBourse);
        for row in &board {
            assert!(row.last_price >= 1000.0 && row.last_price <= 51_000.0);
            assert!(row.change_percent.abs() <= 5.0);
            assert!(row.volume >= 1_000_000.0);
            assert!(row.pe >= 0.0 && row.pe < 20.0);
            assert!(row.low <= row.last_price && row.last_price <= row.high);
        }
    }

    #[test]
    fn test_sample_crypto_board() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = sample_crypto_board(&mut rng);

        assert_eq!(board.len(), 10);
        assert!(board.iter().all(|row| row.market == Market::Crypto));
        assert_eq!(board[0].id, "crypto_BTC");
        assert!(board.iter().all(|row| row.eps == 0.0 && row.pe == 0.0));
        assert!(board.iter().all(|row| row.change_percent.abs() <= 7.5));
    }
}
