// =============================================================================
// Regime Weight Table
// =============================================================================
//
// One weight row per regime over the five factors. The published rows carry
// the relative emphasis of each factor; `weights_for` hands out the row
// normalised by its sum so the weights always add up to 1.0.

use serde::{Deserialize, Serialize};

use super::classifier::Regime;

/// Factor names in aggregation order.
pub const FACTOR_NAMES: [&str; 5] = [
    "rate_policy",
    "growth_momentum",
    "real_interest_edge",
    "risk_appetite",
    "positioning",
];

/// Non-negative weights keyed by factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub rate_policy: f64,
    pub growth_momentum: f64,
    pub real_interest_edge: f64,
    pub risk_appetite: f64,
    pub positioning: f64,
}

impl WeightVector {
    const fn row(rate: f64, growth: f64, real_rate: f64, risk: f64, positioning: f64) -> Self {
        Self {
            rate_policy: rate,
            growth_momentum: growth,
            real_interest_edge: real_rate,
            risk_appetite: risk,
            positioning,
        }
    }

    /// The weight row as published for `regime`, before normalisation.
    pub fn published(regime: Regime) -> Self {
        match regime {
            Regime::RiskOff => Self::row(0.45, 0.15, 0.25, 0.15, 0.05),
            Regime::RiskOn => Self::row(0.30, 0.35, 0.25, 0.10, 0.05),
            Regime::CentralBankWeek => Self::row(0.55, 0.15, 0.25, 0.05, 0.05),
            Regime::Neutral => Self::row(0.35, 0.25, 0.30, 0.10, 0.05),
        }
    }

    /// Weights in [`FACTOR_NAMES`] order.
    pub fn values(&self) -> [f64; 5] {
        [
            self.rate_policy,
            self.growth_momentum,
            self.real_interest_edge,
            self.risk_appetite,
            self.positioning,
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FACTOR_NAMES.into_iter().zip(self.values())
    }

    pub fn sum(&self) -> f64 {
        self.values().iter().sum()
    }

    /// Scale every weight by the row sum. A zero row is returned unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total <= 0.0 {
            return *self;
        }
        Self::row(
            self.rate_policy / total,
            self.growth_momentum / total,
            self.real_interest_edge / total,
            self.risk_appetite / total,
            self.positioning / total,
        )
    }
}

/// Weight vector applied under `regime`.
pub fn weights_for(regime: Regime) -> WeightVector {
    WeightVector::published(regime).normalized()
}

/// Weight vector for a regime label; unknown labels get the NEUTRAL row.
pub fn weights_for_label(label: &str) -> WeightVector {
    weights_for(Regime::from_label(label))
}
