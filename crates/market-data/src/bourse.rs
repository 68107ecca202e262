//! Decoding of the exchange's all-symbols feed into [`SymbolSnapshot`]s.
//!
//! The feed mixes numbers, numeric strings and nulls for the same field, so
//! every numeric field is read leniently: anything that does not parse is zero.

use analysis_core::{AnalysisError, Market, OrderLevel, SymbolSnapshot};
use serde::Deserialize;
use serde_json::Value;

/// Sector codes below this are listed on the Tehran exchange, the rest on Farabourse
const TEHRAN_SECTOR_LIMIT: f64 = 60.0;
const UNKNOWN: &str = "unknown";

/// One row of the all-symbols response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSymbolRow {
    id: Value,
    l18: Value,  // symbol
    l30: Value,  // company name
    isin: Value,
    pl: Value,   // last trade price
    pc: Value,   // closing price
    py: Value,   // previous close
    pmax: Value, // day high
    pmin: Value, // day low
    pf: Value,   // first price
    plc: Value,  // change
    plp: Value,  // change percent
    tvol: Value, // volume
    tval: Value, // traded value
    tno: Value,  // trade count
    #[serde(rename = "Buy_I_Volume")]
    buy_i_volume: Value,
    #[serde(rename = "Sell_I_Volume")]
    sell_i_volume: Value,
    #[serde(rename = "Buy_N_Volume")]
    buy_n_volume: Value,
    #[serde(rename = "Sell_N_Volume")]
    sell_n_volume: Value,
    pd1: Value,
    pd2: Value,
    pd3: Value,
    pd4: Value,
    pd5: Value,
    qd1: Value,
    qd2: Value,
    qd3: Value,
    qd4: Value,
    qd5: Value,
    eps: Value,
    pe: Value,
    mv: Value, // market value
    cs_id: Value,
    cs: Value, // sector name
    time: Value,
}

impl RawSymbolRow {
    pub fn into_snapshot(self) -> SymbolSnapshot {
        let symbol = text(&self.l18).unwrap_or_else(|| UNKNOWN.to_string());
        let id = text(&self.id)
            .or_else(|| text(&self.l18))
            .unwrap_or_default();
        let market = match number(&self.cs_id) {
            Some(code) if code < TEHRAN_SECTOR_LIMIT => Market::Tehran,
            _ => Market::FaraBourse,
        };

        let buy_orders = [
            (&self.pd1, &self.qd1),
            (&self.pd2, &self.qd2),
            (&self.pd3, &self.qd3),
            (&self.pd4, &self.qd4),
            (&self.pd5, &self.qd5),
        ]
        .into_iter()
        .map(|(price, volume)| OrderLevel {
            price: float(price),
            volume: whole(volume),
        })
        .collect();

        SymbolSnapshot {
            id,
            symbol,
            name: text(&self.l30).unwrap_or_else(|| UNKNOWN.to_string()),
            isin: text(&self.isin).unwrap_or_default(),
            market,
            industry: text(&self.cs).unwrap_or_else(|| UNKNOWN.to_string()),

            last_price: float(&self.pl),
            close_price: float(&self.pc),
            previous_close: float(&self.py),
            first_price: float(&self.pf),
            high: float(&self.pmax),
            low: float(&self.pmin),

            change: float(&self.plc),
            change_percent: float(&self.plp),

            volume: whole(&self.tvol),
            value: whole(&self.tval),
            trade_count: whole(&self.tno),

            buy_individual_volume: whole(&self.buy_i_volume),
            sell_individual_volume: whole(&self.sell_i_volume),
            buy_legal_volume: whole(&self.buy_n_volume),
            sell_legal_volume: whole(&self.sell_n_volume),
            buy_orders,

            eps: float(&self.eps),
            pe: float(&self.pe),
            market_cap: whole(&self.mv),

            update_time: text(&self.time),
        }
    }
}

/// Decode the all-symbols JSON array.
///
/// Fails only when the document is not a JSON array; individual rows that are
/// not objects are skipped with a warning.
pub fn parse_bourse_rows(json: &str) -> Result<Vec<SymbolSnapshot>, AnalysisError> {
    let rows: Vec<Value> = serde_json::from_str(json)?;
    let total = rows.len();

    let snapshots: Vec<SymbolSnapshot> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value::<RawSymbolRow>(row) {
            Ok(raw) => Some(raw.into_snapshot()),
            Err(e) => {
                tracing::warn!("Skipping exchange row {}: {}", idx, e);
                None
            }
        })
        .collect();

    tracing::info!("Decoded {} of {} exchange rows", snapshots.len(), total);
    Ok(snapshots)
}

/// Non-empty string content; numbers are rendered as text
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric content of a number or a string with a leading number
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn float(value: &Value) -> f64 {
    number(value).unwrap_or(0.0)
}

/// Integer-valued fields drop any fractional part
fn whole(value: &Value) -> f64 {
    float(value).trunc()
}

/// Parse the longest numeric prefix, so "1250 rial" reads as 1250.
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// exponent only when it has digits ("1e5" is 100000, "2e" is 2).
fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    let digits_from = |start: usize| {
        start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse().ok()
}
