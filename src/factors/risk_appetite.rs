// =============================================================================
// Risk Appetite Factor
// =============================================================================
//
// Two parts, combined per currency:
//
//   vol_score   (60%): current volatility bracketed against the 20/40/60/80th
//                       nearest-rank percentiles of the window
//   cross_asset (40%): clamp((primary - hedge) * 2, -1, 1), routed through
//                       the currency's risk classification
//
// Risk-on (cross_asset > 0) only pays risk-on beneficiaries; risk-off only
// pays safe havens. Everyone else gets zero from the cross-asset part.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factors::tables::{risk_class, risk_factor, RiskClass};
use crate::history::VolatilityState;
use crate::indicators::percentile::{nearest_rank, padded_window, sorted};
use crate::types::MarketSnapshot;

const VOL_WEIGHT: f64 = 0.6;
const CROSS_ASSET_WEIGHT: f64 = 0.4;
const CROSS_ASSET_SCALE: f64 = 2.0;

/// Market-wide inputs to the risk appetite factor, shared by all currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAppetiteComponents {
    pub vol_score: f64,
    pub cross_asset_score: f64,
}

/// Bracket the current volatility reading against the window quintiles:
/// 1.0 in the lowest bracket down to -1.0 in the highest.
pub fn volatility_score(vol: &VolatilityState) -> f64 {
    let (window, padded) = padded_window(vol.current, &vol.window);
    if padded > 0 {
        debug!(padded, "volatility score computed on padded window");
    }
    let ordered = sorted(&window);
    let brackets: Vec<f64> = [0.2, 0.4, 0.6, 0.8]
        .into_iter()
        .map(|p| nearest_rank(&ordered, p).unwrap_or(vol.current))
        .collect();

    let current = vol.current;
    if current < brackets[0] {
        1.0
    } else if current < brackets[1] {
        0.5
    } else if current < brackets[2] {
        0.0
    } else if current < brackets[3] {
        -0.5
    } else {
        -1.0
    }
}

/// Equity-minus-hedge return spread, doubled and clamped to `[-1, 1]`.
pub fn cross_asset_score(market: &MarketSnapshot) -> f64 {
    ((market.primary_asset_return - market.hedge_asset_return) * CROSS_ASSET_SCALE).clamp(-1.0, 1.0)
}

pub fn risk_appetite_components(vol: &VolatilityState, market: &MarketSnapshot) -> RiskAppetiteComponents {
    RiskAppetiteComponents {
        vol_score: volatility_score(vol),
        cross_asset_score: cross_asset_score(market),
    }
}

/// Route the cross-asset sentiment to `currency_code` via its risk class.
pub fn apply_to_currency(currency_code: &str, cross_asset_score: f64) -> f64 {
    let factor = risk_factor(currency_code);
    match (risk_class(currency_code), cross_asset_score > 0.0) {
        (Some(RiskClass::RiskOnBeneficiary), true) => factor * cross_asset_score,
        (Some(RiskClass::SafeHaven), false) => factor * cross_asset_score.abs(),
        _ => 0.0,
    }
}

/// Final risk appetite factor score for one currency.
pub fn risk_appetite_score(currency_code: &str, components: &RiskAppetiteComponents) -> f64 {
    VOL_WEIGHT * components.vol_score
        + CROSS_ASSET_WEIGHT * apply_to_currency(currency_code, components.cross_asset_score)
}
