/// Rendered in place of a missing number
pub const PLACEHOLDER: &str = "--";

pub const POSITIVE_COLOR: &str = "#10b981";
pub const NEGATIVE_COLOR: &str = "#ef4444";
pub const NEUTRAL_COLOR: &str = "#94a3b8";

/// Abbreviate a number for display.
///
/// Values from 1e9, 1e6 and 1e3 upward become `B`, `M` and `K` with one
/// decimal. Anything smaller (negatives included) keeps `decimals` places with
/// comma-grouped thousands. `None` and NaN render as [`PLACEHOLDER`].
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    let num = match value {
        Some(v) if !v.is_nan() => v,
        _ => return PLACEHOLDER.to_string(),
    };

    if num >= 1_000_000_000.0 {
        return format!("{}B", fixed(num / 1_000_000_000.0, 1));
    }
    if num >= 1_000_000.0 {
        return format!("{}M", fixed(num / 1_000_000.0, 1));
    }
    if num >= 1_000.0 {
        return format!("{}K", fixed(num / 1_000.0, 1));
    }

    group_thousands(&fixed(num, decimals))
}

/// Fixed-point rendering with halves rounded away from zero
fn fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", decimals, rounded)
}

/// Color token for a percent change: green up, red down, grey flat
pub fn color_for_change(change_percent: f64) -> &'static str {
    if change_percent > 0.0 {
        POSITIVE_COLOR
    } else if change_percent < 0.0 {
        NEGATIVE_COLOR
    } else {
        NEUTRAL_COLOR
    }
}

fn group_thousands(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(rendered.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(frac_part);
    grouped
}
