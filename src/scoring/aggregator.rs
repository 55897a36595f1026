// =============================================================================
// Currency Score Aggregator
// =============================================================================
//
// Computes the five factor scores for one currency and folds them into a
// regime-weighted total. A score is produced whole on every recompute; nothing
// here updates an existing score.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::factors::{
    growth_momentum_score, positioning_score, rate_policy_score, real_interest_edge_score,
    risk_appetite_components, risk_appetite_score, RiskAppetiteComponents,
};
use crate::history::VolatilityState;
use crate::regime::{weights_for, Regime, WeightVector};
use crate::types::{
    CurrencyInputs, GrowthInput, MarketSnapshot, PositioningInput, RatePolicyInput, RealRateInput,
};

/// Factor breakdown and weighted total for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyScore {
    pub currency_code: String,
    pub rate_policy: f64,
    pub growth_momentum: f64,
    pub real_interest_edge: f64,
    pub risk_appetite: f64,
    pub positioning: f64,
    pub total_score: f64,
}

impl CurrencyScore {
    /// Factor scores in the same order as [`WeightVector::values`].
    pub fn factors(&self) -> [f64; 5] {
        [
            self.rate_policy,
            self.growth_momentum,
            self.real_interest_edge,
            self.risk_appetite,
            self.positioning,
        ]
    }
}

/// Score one currency from its raw inputs under `regime`.
#[allow(clippy::too_many_arguments)]
pub fn score_currency(
    currency_code: &str,
    rate_input: &RatePolicyInput,
    growth_input: &GrowthInput,
    real_rate_input: &RealRateInput,
    vol: &VolatilityState,
    market: &MarketSnapshot,
    positioning_input: &PositioningInput,
    regime: Regime,
) -> CurrencyScore {
    let components = risk_appetite_components(vol, market);
    score_with_components(
        currency_code,
        rate_input,
        growth_input,
        real_rate_input,
        positioning_input,
        &components,
        &weights_for(regime),
    )
}

/// Score one currency from its bundled inputs.
pub fn score_currency_inputs(
    currency_code: &str,
    inputs: &CurrencyInputs,
    vol: &VolatilityState,
    market: &MarketSnapshot,
    regime: Regime,
) -> CurrencyScore {
    score_currency(
        currency_code,
        &inputs.rate_policy,
        &inputs.growth,
        &inputs.real_rate,
        vol,
        market,
        &inputs.positioning,
        regime,
    )
}

/// Score with the market-wide risk components and weights already in hand.
/// Used by the full recompute cycle so they are derived once per snapshot.
pub(crate) fn score_with_components(
    currency_code: &str,
    rate_input: &RatePolicyInput,
    growth_input: &GrowthInput,
    real_rate_input: &RealRateInput,
    positioning_input: &PositioningInput,
    components: &RiskAppetiteComponents,
    weights: &WeightVector,
) -> CurrencyScore {
    let rate_policy = rate_policy_score(rate_input);
    let growth_momentum = growth_momentum_score(growth_input);
    let real_interest_edge = real_interest_edge_score(real_rate_input);
    let risk_appetite = risk_appetite_score(currency_code, components);
    let positioning = positioning_score(positioning_input);

    let total_score = rate_policy * weights.rate_policy
        + growth_momentum * weights.growth_momentum
        + real_interest_edge * weights.real_interest_edge
        + risk_appetite * weights.risk_appetite
        + positioning * weights.positioning;

    trace!(
        currency = currency_code,
        rate_policy = format!("{:.4}", rate_policy),
        growth = format!("{:.4}", growth_momentum),
        real_rate = format!("{:.4}", real_interest_edge),
        risk_appetite = format!("{:.4}", risk_appetite),
        positioning = format!("{:.4}", positioning),
        total = format!("{:.4}", total_score),
        "currency scored"
    );

    CurrencyScore {
        currency_code: currency_code.to_string(),
        rate_policy,
        growth_momentum,
        real_interest_edge,
        risk_appetite,
        positioning,
        total_score,
    }
}
