// =============================================================================
// Shared input types for the FX strength engine
// =============================================================================
//
// Plain value types supplied by the caller once per recompute cycle. None of
// them reference each other; the engine only ever reads them.

use serde::{Deserialize, Serialize};

/// Cross-asset snapshot: primary (equity) vs hedge (gold) weekly returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub primary_asset_return: f64,
    pub hedge_asset_return: f64,
    pub primary_ma20: f64,
    pub primary_price: f64,
    /// Consecutive observations in which the hedge asset outperformed.
    #[serde(default)]
    pub hedge_outperform_streak: u32,
}

/// Central bank policy inputs for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePolicyInput {
    pub currency_code: String,
    pub current_rate: f64,
    pub terminal_rate: f64,
    #[serde(default)]
    pub hawkish_mentions: u32,
    #[serde(default)]
    pub dovish_mentions: u32,
}

/// Headline labour-market reading. What `value` measures depends on the
/// currency: nonfarm payrolls (k) for USD, claimant count change for GBP,
/// job-to-applicant ratio for JPY, unemployment rate for CHF, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentMetric {
    pub currency_code: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthInput {
    pub employment_metric: EmploymentMetric,
    pub pmi: f64,
    pub gdp_qoq: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealRateInput {
    pub currency_code: String,
    pub two_year_yield: f64,
    pub breakeven_inflation_5y5y: f64,
}

/// COT-style speculative positioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositioningInput {
    pub currency_code: String,
    pub net_position: i64,
    /// Expected in `[0, 100]`; values outside fall into the edge buckets.
    pub percentile_52_week: f64,
}

/// Everything the scorers need for one currency apart from the shared
/// volatility and market snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInputs {
    pub rate_policy: RatePolicyInput,
    pub growth: GrowthInput,
    pub real_rate: RealRateInput,
    pub positioning: PositioningInput,
}

impl CurrencyInputs {
    /// Currency codes carried inside the bundle that differ from `code`.
    pub fn mismatched_codes(&self, code: &str) -> Vec<&str> {
        let mut codes = vec![
            self.rate_policy.currency_code.as_str(),
            self.growth.employment_metric.currency_code.as_str(),
            self.real_rate.currency_code.as_str(),
            self.positioning.currency_code.as_str(),
        ];
        codes.retain(|c| !c.eq_ignore_ascii_case(code));
        codes.dedup();
        codes
    }

    /// Rewrite every embedded currency code to `code`.
    pub fn with_currency_code(mut self, code: &str) -> Self {
        self.rate_policy.currency_code = code.to_string();
        self.growth.employment_metric.currency_code = code.to_string();
        self.real_rate.currency_code = code.to_string();
        self.positioning.currency_code = code.to_string();
        self
    }
}
