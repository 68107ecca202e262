use crate::AnalysisError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tunable constants of the analysis pipeline.
///
/// Defaults reproduce the dashboard's behaviour: 20/50-period moving averages,
/// a 20-period volume average, an industry P/E of 8, a ±3% band once at least
/// 5 highs/lows are known (±5% otherwise), and a 1e12 large-cap threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub short_ma_period: usize,
    pub long_ma_period: usize,
    pub volume_ma_period: usize,
    pub industry_pe: f64,
    pub min_band_points: usize,
    pub fallback_band_pct: f64,
    pub band_pct: f64,
    pub large_cap_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            short_ma_period: 20,
            long_ma_period: 50,
            volume_ma_period: 20,
            industry_pe: 8.0,
            min_band_points: 5,
            fallback_band_pct: 0.05,
            band_pct: 0.03,
            large_cap_threshold: 1e12,
        }
    }
}

impl AnalysisConfig {
    /// Build from defaults, overriding any field set through `BOURSE_*` env vars.
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_with(&lookup, "BOURSE_SHORT_MA", &mut config.short_ma_period)?;
        override_with(&lookup, "BOURSE_LONG_MA", &mut config.long_ma_period)?;
        override_with(&lookup, "BOURSE_VOLUME_MA", &mut config.volume_ma_period)?;
        override_with(&lookup, "BOURSE_INDUSTRY_PE", &mut config.industry_pe)?;
        override_with(&lookup, "BOURSE_MIN_BAND_POINTS", &mut config.min_band_points)?;
        override_with(&lookup, "BOURSE_FALLBACK_BAND_PCT", &mut config.fallback_band_pct)?;
        override_with(&lookup, "BOURSE_BAND_PCT", &mut config.band_pct)?;
        override_with(&lookup, "BOURSE_LARGE_CAP", &mut config.large_cap_threshold)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.short_ma_period == 0 || self.long_ma_period == 0 || self.volume_ma_period == 0 {
            return Err(AnalysisError::InvalidConfig(
                "moving-average periods must be at least 1".to_string(),
            ));
        }
        if !(self.industry_pe.is_finite() && self.industry_pe > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "industry P/E must be positive, got {}",
                self.industry_pe
            )));
        }
        for (name, pct) in [
            ("band_pct", self.band_pct),
            ("fallback_band_pct", self.fallback_band_pct),
        ] {
            if !(pct > 0.0 && pct < 1.0) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} must be within (0, 1), got {}",
                    name, pct
                )));
            }
        }
        Ok(())
    }
}

fn override_with<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<(), AnalysisError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| {
            AnalysisError::InvalidConfig(format!("{} has unparseable value {:?}", key, raw))
        })?;
    }
    Ok(())
}
