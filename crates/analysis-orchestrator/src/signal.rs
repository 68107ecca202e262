//! Combines the technical and fundamental reports into one trading signal.

use analysis_core::{
    FundamentalReport, FundamentalStrength, MoneyFlow, SignalAction, SignalReason, SignalReport,
    TechnicalReport, Trend, VolumeStatus,
};
use chrono::Utc;

pub const BASE_CONFIDENCE: i32 = 50;
pub const MIN_CONFIDENCE: i32 = 10;
pub const MAX_CONFIDENCE: i32 = 95;
pub const MAX_REASONS: usize = 3;

/// Confidence (clamped) and the reasons behind it, in evaluation order:
/// trend, volume, fundamentals, money flow.
pub fn score_confidence(
    trend: Trend,
    volume: VolumeStatus,
    strength: FundamentalStrength,
    money_flow: MoneyFlow,
) -> (i32, Vec<SignalReason>) {
    let mut adjustments: Vec<(SignalReason, i32)> = Vec::new();

    match trend {
        Trend::StrongUptrend => adjustments.push((SignalReason::StrongUptrend, 20)),
        Trend::StrongDowntrend => adjustments.push((SignalReason::StrongDowntrend, -20)),
        _ => {}
    }

    if volume == VolumeStatus::VeryHigh {
        adjustments.push((SignalReason::VeryHighVolume, 10));
    }

    // Only "weak" is penalised; "very weak" leaves confidence untouched
    match strength {
        FundamentalStrength::Strong => adjustments.push((SignalReason::StrongFundamentals, 15)),
        FundamentalStrength::Weak => adjustments.push((SignalReason::WeakFundamentals, -10)),
        _ => {}
    }

    match money_flow {
        MoneyFlow::StrongInflow => adjustments.push((SignalReason::StrongInflow, 15)),
        MoneyFlow::StrongOutflow => adjustments.push((SignalReason::StrongOutflow, -15)),
        _ => {}
    }

    let raw = BASE_CONFIDENCE + adjustments.iter().map(|(_, delta)| delta).sum::<i32>();
    let confidence = raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
    let reasons = adjustments
        .into_iter()
        .map(|(reason, _)| reason)
        .take(MAX_REASONS)
        .collect();

    (confidence, reasons)
}

/// Pick the action from the clamped confidence; the day's change sets direction.
pub fn select_action(confidence: i32, change_percent: f64) -> SignalAction {
    let rising = change_percent > 0.0;
    match confidence {
        c if c >= 70 => {
            if rising {
                SignalAction::StrongBuy
            } else {
                SignalAction::StrongSell
            }
        }
        c if c >= 60 => {
            if rising {
                SignalAction::Buy
            } else {
                SignalAction::Sell
            }
        }
        c if c <= 30 => SignalAction::Avoid,
        _ => SignalAction::Hold,
    }
}

pub fn synthesize_signal(
    technical: &TechnicalReport,
    fundamental: &FundamentalReport,
    change_percent: f64,
) -> SignalReport {
    let (confidence, reasons) = score_confidence(
        technical.trend,
        technical.volume_status,
        fundamental.strength,
        technical.money_flow,
    );

    SignalReport {
        action: select_action(confidence, change_percent),
        confidence,
        reasons,
        timestamp: Utc::now(),
    }
}
