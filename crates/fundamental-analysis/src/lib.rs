use analysis_core::{
    AnalysisConfig, FundamentalFactor, FundamentalReport, FundamentalStrength, PeEvaluation,
    SymbolSnapshot,
};
use serde::{Deserialize, Serialize};

/// Additive score from the EPS, P/E and market-cap checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalScore {
    pub strength: FundamentalStrength,
    pub score: i32,
    pub factors: Vec<FundamentalFactor>,
}

/// Band a P/E ratio against the industry average.
///
/// Non-positive or missing ratios are undefined. Checks run cheapest first:
/// below 0.7x, below 0.9x, above 1.3x, above 1.1x, otherwise fair.
pub fn evaluate_pe(pe_ratio: Option<f64>, industry_average: f64) -> PeEvaluation {
    let pe = match pe_ratio {
        Some(pe) if pe > 0.0 => pe,
        _ => return PeEvaluation::Undefined,
    };

    if pe < industry_average * 0.7 {
        PeEvaluation::VeryCheap
    } else if pe < industry_average * 0.9 {
        PeEvaluation::Cheap
    } else if pe > industry_average * 1.3 {
        PeEvaluation::Expensive
    } else if pe > industry_average * 1.1 {
        PeEvaluation::RelativelyExpensive
    } else {
        PeEvaluation::Fair
    }
}

/// Score EPS, P/E and market cap.
///
/// Each group contributes at most one factor (first matching branch).
pub fn score_fundamentals(
    eps: f64,
    pe: f64,
    market_cap: f64,
    large_cap_threshold: f64,
) -> FundamentalScore {
    let mut score = 0;
    let mut factors = Vec::new();

    // EPS
    if eps > 1000.0 {
        score += 2;
        factors.push(FundamentalFactor::ExcellentEps);
    } else if eps > 500.0 {
        score += 1;
        factors.push(FundamentalFactor::GoodEps);
    } else if eps < 100.0 {
        score -= 1;
        factors.push(FundamentalFactor::WeakEps);
    }

    // P/E
    if pe > 0.0 && pe < 6.0 {
        score += 2;
        factors.push(FundamentalFactor::AttractivePe);
    } else if pe > 0.0 && pe < 10.0 {
        score += 1;
        factors.push(FundamentalFactor::ReasonablePe);
    } else if pe > 15.0 {
        score -= 1;
        factors.push(FundamentalFactor::HighPe);
    }

    // Market cap
    if market_cap > large_cap_threshold {
        score += 1;
        factors.push(FundamentalFactor::LargeCompany);
    }

    FundamentalScore {
        strength: FundamentalStrength::from_score(score),
        score,
        factors,
    }
}

pub struct FundamentalAnalysisEngine {
    industry_pe: f64,
    large_cap_threshold: f64,
}

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            industry_pe: config.industry_pe,
            large_cap_threshold: config.large_cap_threshold,
        }
    }

    /// P/E band plus fundamental score for one snapshot
    pub fn evaluate(&self, snapshot: &SymbolSnapshot) -> FundamentalReport {
        let pe_evaluation = evaluate_pe(Some(snapshot.pe), self.industry_pe);
        let FundamentalScore {
            strength,
            score,
            factors,
        } = score_fundamentals(
            snapshot.eps,
            snapshot.pe,
            snapshot.market_cap,
            self.large_cap_threshold,
        );

        FundamentalReport {
            strength,
            score,
            factors,
            pe_evaluation,
        }
    }
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
