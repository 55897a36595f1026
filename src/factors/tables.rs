// =============================================================================
// Per-Currency Constant Tables
// =============================================================================
//
// The single home for every currency-specific constant the scorers use: rate
// sensitivity, risk classification, and the employment scale. Codes are
// upper-case ISO 4217. Unlisted codes get the documented defaults below.

use serde::Serialize;

/// Rate sensitivity used for currencies missing from the table.
pub const DEFAULT_RATE_SENSITIVITY: f64 = 0.5;

/// Risk factor used for currencies missing from the table.
pub const DEFAULT_RISK_FACTOR: f64 = 0.0;

/// How a currency reacts to shifts in global risk sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskClass {
    /// Gains when equities outperform the hedge asset.
    RiskOnBeneficiary,
    /// Gains when the hedge asset outperforms equities.
    SafeHaven,
}

/// Piecewise-linear map from a raw employment reading to a score.
///
/// Non-inverted: `value > good` → 1.0, `value < bad` → -1.0.
/// Inverted (lower is better): `value < good` → 1.0, `value > bad` → -1.0.
/// Between the thresholds the score is `(value - center) / span`, negated
/// when inverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmploymentScale {
    pub good: f64,
    pub bad: f64,
    pub center: f64,
    pub span: f64,
    pub inverted: bool,
}

impl EmploymentScale {
    pub fn score(&self, value: f64) -> f64 {
        if self.inverted {
            if value < self.good {
                1.0
            } else if value > self.bad {
                -1.0
            } else {
                (self.center - value) / self.span
            }
        } else if value > self.good {
            1.0
        } else if value < self.bad {
            -1.0
        } else {
            (value - self.center) / self.span
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyProfile {
    pub rate_sensitivity: f64,
    pub risk_factor: f64,
    pub risk_class: RiskClass,
    pub employment: EmploymentScale,
}

pub static CURRENCY_PROFILES: phf::Map<&'static str, CurrencyProfile> = phf::phf_map! {
    // Nonfarm payrolls, thousands.
    "USD" => CurrencyProfile {
        rate_sensitivity: 0.4,
        risk_factor: 0.3,
        risk_class: RiskClass::SafeHaven,
        employment: EmploymentScale { good: 180.0, bad: 100.0, center: 140.0, span: 40.0, inverted: false },
    },
    // Employment growth, % YoY.
    "EUR" => CurrencyProfile {
        rate_sensitivity: 0.6,
        risk_factor: 0.5,
        risk_class: RiskClass::RiskOnBeneficiary,
        employment: EmploymentScale { good: 0.3, bad: -0.1, center: -0.1, span: 0.4, inverted: false },
    },
    // Claimant count change, thousands. Falling claims are good.
    "GBP" => CurrencyProfile {
        rate_sensitivity: 0.5,
        risk_factor: 0.2,
        risk_class: RiskClass::RiskOnBeneficiary,
        employment: EmploymentScale { good: -20.0, bad: 40.0, center: 10.0, span: 30.0, inverted: true },
    },
    // Job-to-applicant ratio.
    "JPY" => CurrencyProfile {
        rate_sensitivity: 1.0,
        risk_factor: 1.0,
        risk_class: RiskClass::SafeHaven,
        employment: EmploymentScale { good: 1.30, bad: 1.25, center: 1.275, span: 0.025, inverted: false },
    },
    // Participation rate, %.
    "AUD" => CurrencyProfile {
        rate_sensitivity: 0.4,
        risk_factor: 1.0,
        risk_class: RiskClass::RiskOnBeneficiary,
        employment: EmploymentScale { good: 66.5, bad: 66.0, center: 66.25, span: 0.25, inverted: false },
    },
    // Employment rate, %.
    "CAD" => CurrencyProfile {
        rate_sensitivity: 0.3,
        risk_factor: 0.3,
        risk_class: RiskClass::RiskOnBeneficiary,
        employment: EmploymentScale { good: 62.5, bad: 61.5, center: 62.0, span: 0.5, inverted: false },
    },
    // Unemployment rate, %. Lower is better.
    "CHF" => CurrencyProfile {
        rate_sensitivity: 0.8,
        risk_factor: 0.8,
        risk_class: RiskClass::SafeHaven,
        employment: EmploymentScale { good: 2.0, bad: 3.0, center: 2.5, span: 0.5, inverted: true },
    },
};

/// Currencies with a full profile, in display order.
pub const SUPPORTED_CURRENCIES: [&str; 7] = ["USD", "EUR", "GBP", "JPY", "AUD", "CAD", "CHF"];

pub fn profile(currency_code: &str) -> Option<&'static CurrencyProfile> {
    CURRENCY_PROFILES.get(currency_code)
}

pub fn rate_sensitivity(currency_code: &str) -> f64 {
    profile(currency_code).map_or(DEFAULT_RATE_SENSITIVITY, |p| p.rate_sensitivity)
}

pub fn risk_factor(currency_code: &str) -> f64 {
    profile(currency_code).map_or(DEFAULT_RISK_FACTOR, |p| p.risk_factor)
}

pub fn risk_class(currency_code: &str) -> Option<RiskClass> {
    profile(currency_code).map(|p| p.risk_class)
}

pub fn employment_scale(currency_code: &str) -> Option<EmploymentScale> {
    profile(currency_code).map(|p| p.employment)
}
