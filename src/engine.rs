// =============================================================================
// Recompute Cycle
// =============================================================================
//
// One pass over a caller-supplied snapshot:
//
//   volatility + market -> regime -> weights -> per-currency scores
//
// The pass is a pure function of `ModelInputs`; running it twice on the same
// snapshot produces the same `Evaluation`. Pair signals are derived on demand
// from the evaluated scores.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::factors::{risk_appetite_components, RiskAppetiteComponents};
use crate::history::VolatilityState;
use crate::regime::{detect_regime, weights_for, Regime, RegimeState, WeightVector};
use crate::scoring::aggregator::score_with_components;
use crate::scoring::{signal, CurrencyScore, TradingSignal};
use crate::types::{
    CurrencyInputs, EmploymentMetric, GrowthInput, MarketSnapshot, PositioningInput,
    RatePolicyInput, RealRateInput,
};

// =============================================================================
// Inputs
// =============================================================================

/// Full input snapshot for one recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInputs {
    pub volatility: VolatilityState,
    pub market: MarketSnapshot,
    #[serde(default)]
    pub is_policy_week: bool,
    /// Per-currency bundles keyed by currency code.
    #[serde(default)]
    pub currencies: BTreeMap<String, CurrencyInputs>,
}

impl ModelInputs {
    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model inputs from {}", path.display()))?;
        let inputs: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse model inputs from {}", path.display()))?;
        info!(
            path = %path.display(),
            currencies = inputs.currencies.len(),
            "model inputs loaded"
        );
        Ok(inputs)
    }

    /// Built-in dataset: a risk-off week with VIX at 35 against a 20-day
    /// window of 20.0..29.5, equities down 2.5% and gold up 1.5%.
    pub fn sample() -> Self {
        let currencies = [
            sample_currency("USD", (5.25, 5.50, 3, 1), (175.0, 48.5, 1.5), (4.7, 2.3), (50_000, 75.0)),
            sample_currency("EUR", (4.00, 3.75, 1, 2), (-0.2, 47.2, 0.8), (3.2, 2.0), (-30_000, 25.0)),
            sample_currency("GBP", (5.25, 5.00, 2, 1), (15.0, 49.8, 1.2), (4.3, 2.2), (20_000, 60.0)),
            sample_currency("JPY", (0.10, 0.25, 1, 3), (1.28, 50.1, 0.3), (0.5, 2.0), (-80_000, 15.0)),
            sample_currency("AUD", (4.35, 4.50, 2, 1), (66.3, 51.2, 2.1), (4.1, 2.1), (35_000, 80.0)),
            sample_currency("CAD", (5.00, 4.75, 1, 2), (62.2, 50.8, 1.8), (4.0, 2.0), (15_000, 55.0)),
            sample_currency("CHF", (1.75, 1.50, 1, 2), (2.1, 49.0, 0.6), (1.2, 1.4), (5_000, 45.0)),
        ]
        .into_iter()
        .collect();

        Self {
            volatility: VolatilityState {
                current: 35.0,
                window: (0..20).map(|i| 20.0 + i as f64 * 0.5).collect(),
            },
            market: MarketSnapshot {
                primary_asset_return: -2.5,
                hedge_asset_return: 1.5,
                primary_ma20: 450.0,
                primary_price: 440.0,
                hedge_outperform_streak: 0,
            },
            is_policy_week: false,
            currencies,
        }
    }
}

fn sample_currency(
    code: &str,
    (current_rate, terminal_rate, hawkish, dovish): (f64, f64, u32, u32),
    (employment, pmi, gdp_qoq): (f64, f64, f64),
    (two_year_yield, breakeven): (f64, f64),
    (net_position, percentile_52_week): (i64, f64),
) -> (String, CurrencyInputs) {
    let inputs = CurrencyInputs {
        rate_policy: RatePolicyInput {
            currency_code: code.to_string(),
            current_rate,
            terminal_rate,
            hawkish_mentions: hawkish,
            dovish_mentions: dovish,
        },
        growth: GrowthInput {
            employment_metric: EmploymentMetric {
                currency_code: code.to_string(),
                value: employment,
            },
            pmi,
            gdp_qoq,
        },
        real_rate: RealRateInput {
            currency_code: code.to_string(),
            two_year_yield,
            breakeven_inflation_5y5y: breakeven,
        },
        positioning: PositioningInput {
            currency_code: code.to_string(),
            net_position,
            percentile_52_week,
        },
    };
    (code.to_string(), inputs)
}

// =============================================================================
// Pairs
// =============================================================================

/// A currency pair written `BASE/QUOTE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// EUR/USD, GBP/USD, USD/JPY, AUD/USD, USD/CAD.
    pub fn majors() -> Vec<Self> {
        vec![
            Self::new("EUR", "USD"),
            Self::new("GBP", "USD"),
            Self::new("USD", "JPY"),
            Self::new("AUD", "USD"),
            Self::new("USD", "CAD"),
        ]
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((base, quote)) = s.split_once('/') else {
            bail!("currency pair {s:?} is not of the form BASE/QUOTE");
        };
        let (base, quote) = (base.trim(), quote.trim());
        if base.is_empty() || quote.is_empty() {
            bail!("currency pair {s:?} has an empty side");
        }
        Ok(Self::new(base.to_ascii_uppercase(), quote.to_ascii_uppercase()))
    }
}

/// Signal for one configured pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSignal {
    pub pair: String,
    pub base: String,
    pub quote: String,
    pub signal: TradingSignal,
}

// =============================================================================
// Evaluation
// =============================================================================

/// Output of one recompute cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub regime: Regime,
    pub regime_state: RegimeState,
    pub weights: WeightVector,
    pub risk_components: RiskAppetiteComponents,
    /// Scores keyed by currency code.
    pub scores: BTreeMap<String, CurrencyScore>,
}

/// Run the full cycle over `inputs`.
pub fn evaluate(inputs: &ModelInputs) -> Evaluation {
    let regime_state = detect_regime(&inputs.volatility, &inputs.market, inputs.is_policy_week);
    let regime = regime_state.regime;
    let weights = weights_for(regime);
    let risk_components = risk_appetite_components(&inputs.volatility, &inputs.market);

    let scores: BTreeMap<String, CurrencyScore> = inputs
        .currencies
        .iter()
        .map(|(code, bundle)| {
            let score = score_with_components(
                code,
                &bundle.rate_policy,
                &bundle.growth,
                &bundle.real_rate,
                &bundle.positioning,
                &risk_components,
                &weights,
            );
            (code.clone(), score)
        })
        .collect();

    debug!(
        regime = %regime,
        currencies = scores.len(),
        degraded = regime_state.is_degraded(),
        "evaluation complete"
    );

    Evaluation {
        regime,
        regime_state,
        weights,
        risk_components,
        scores,
    }
}

impl Evaluation {
    /// Scores ordered strongest first; ties broken by currency code.
    pub fn ranked(&self) -> Vec<&CurrencyScore> {
        let mut out: Vec<&CurrencyScore> = self.scores.values().collect();
        out.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.currency_code.cmp(&b.currency_code))
        });
        out
    }

    /// Signal for `base` against `quote`, if both were scored.
    pub fn signal_for(&self, base: &str, quote: &str) -> Option<TradingSignal> {
        let a = self.scores.get(base)?;
        let b = self.scores.get(quote)?;
        Some(signal(a, b))
    }

    /// Signals for each pair with both sides scored, in the given order.
    pub fn pair_signals(&self, pairs: &[CurrencyPair]) -> Vec<PairSignal> {
        pairs
            .iter()
            .filter_map(|pair| {
                let signal = self.signal_for(&pair.base, &pair.quote)?;
                Some(PairSignal {
                    pair: pair.to_string(),
                    base: pair.base.clone(),
                    quote: pair.quote.clone(),
                    signal,
                })
            })
            .collect()
    }

    /// Only the VERY_STRONG / STRONG pair signals.
    pub fn strong_setups(&self, pairs: &[CurrencyPair]) -> Vec<PairSignal> {
        self.pair_signals(pairs)
            .into_iter()
            .filter(|p| p.signal.strength.is_strong())
            .collect()
    }
}
