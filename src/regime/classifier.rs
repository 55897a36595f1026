// =============================================================================
// Market Regime Classifier
// =============================================================================
//
// Maps the volatility window and cross-asset snapshot onto one of four
// regimes. Each regime selects a weight row in `regime::weights`.
//
// Detection hierarchy (evaluated top-to-bottom; first match wins):
//
//   1. CENTRAL_BANK_WEEK: policy week flag set
//   2. RISK_OFF         : VIX > p75 OR hedge outperformed >= 5 in a row
//   3. RISK_ON          : VIX < p25 AND primary price above its MA20
//   4. NEUTRAL          : everything else
//
// Percentiles are nearest-rank over a 20-observation window. A short window is
// padded locally with the current reading; the caller's data is not modified.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::history::VolatilityState;
use crate::indicators::percentile::{nearest_rank, padded_window, sorted, WINDOW_LEN};
use crate::types::MarketSnapshot;

/// Streak length at which sustained hedge outperformance forces RISK_OFF.
pub const HEDGE_STREAK_RISK_OFF: u32 = 5;

// =============================================================================
// Types
// =============================================================================

/// Discrete market-condition classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    /// Elevated volatility or flight to the hedge asset.
    RiskOff,
    /// Subdued volatility with the primary asset trending up.
    RiskOn,
    /// No rule fired.
    Neutral,
    /// A scheduled central bank decision dominates price action.
    CentralBankWeek,
}

impl Regime {
    pub const ALL: [Regime; 4] = [
        Regime::RiskOff,
        Regime::RiskOn,
        Regime::Neutral,
        Regime::CentralBankWeek,
    ];

    /// Parse a regime label. Unrecognised labels map to NEUTRAL.
    pub fn from_label(label: &str) -> Self {
        let normalised = label.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalised.as_str() {
            "RISK_OFF" => Self::RiskOff,
            "RISK_ON" => Self::RiskOn,
            "CENTRAL_BANK_WEEK" => Self::CentralBankWeek,
            _ => Self::Neutral,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RiskOff => write!(f, "RISK_OFF"),
            Self::RiskOn => write!(f, "RISK_ON"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::CentralBankWeek => write!(f, "CENTRAL_BANK_WEEK"),
        }
    }
}

/// Detected regime plus the metrics that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeState {
    pub regime: Regime,

    /// Current volatility reading.
    pub current: f64,

    /// Nearest-rank 25th / 75th percentile of the (padded) window. `None`
    /// when the policy-week override short-circuits detection.
    pub p25: Option<f64>,
    pub p75: Option<f64>,

    pub hedge_outperform_streak: u32,

    /// How many copies of `current` were prepended to reach a full window.
    /// Non-zero means the percentiles are degraded.
    pub padded_observations: usize,

    /// Which rule fired.
    pub reason: String,
}

impl RegimeState {
    pub fn is_degraded(&self) -> bool {
        self.padded_observations > 0
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classify the regime. See [`detect_regime`] for the full state.
pub fn classify_regime(vol: &VolatilityState, market: &MarketSnapshot, is_policy_week: bool) -> Regime {
    detect_regime(vol, market, is_policy_week).regime
}

/// Run regime detection and return the regime together with its inputs.
pub fn detect_regime(vol: &VolatilityState, market: &MarketSnapshot, is_policy_week: bool) -> RegimeState {
    let streak = market.hedge_outperform_streak;

    if is_policy_week {
        debug!(regime = %Regime::CentralBankWeek, "Regime: policy week override");
        return RegimeState {
            regime: Regime::CentralBankWeek,
            current: vol.current,
            p25: None,
            p75: None,
            hedge_outperform_streak: streak,
            padded_observations: 0,
            reason: "central bank policy week".to_string(),
        };
    }

    let (window, padded) = padded_window(vol.current, &vol.window);
    if padded > 0 {
        warn!(
            observed = vol.window.len(),
            padded,
            expected = WINDOW_LEN,
            "volatility window incomplete, padding with current value for percentiles"
        );
    }

    let ordered = sorted(&window);
    // `window` always holds at least WINDOW_LEN values, so both ranks exist.
    let p75 = nearest_rank(&ordered, 0.75).unwrap_or(vol.current);
    let p25 = nearest_rank(&ordered, 0.25).unwrap_or(vol.current);

    let (regime, reason) = if vol.current > p75 {
        (Regime::RiskOff, format!("volatility {:.2} above p75 {:.2}", vol.current, p75))
    } else if streak >= HEDGE_STREAK_RISK_OFF {
        (Regime::RiskOff, format!("hedge asset outperformed {streak} consecutive observations"))
    } else if vol.current < p25 && market.primary_price > market.primary_ma20 {
        (
            Regime::RiskOn,
            format!(
                "volatility {:.2} below p25 {:.2} with price above MA20",
                vol.current, p25
            ),
        )
    } else {
        (Regime::Neutral, "no regime rule matched".to_string())
    };

    debug!(
        regime = %regime,
        current = format!("{:.2}", vol.current),
        p25 = format!("{:.2}", p25),
        p75 = format!("{:.2}", p75),
        streak,
        padded,
        "Regime detected"
    );

    RegimeState {
        regime,
        current: vol.current,
        p25: Some(p25),
        p75: Some(p75),
        hedge_outperform_streak: streak,
        padded_observations: padded,
        reason,
    }
}
