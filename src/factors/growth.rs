// =============================================================================
// Growth Momentum Factor
// =============================================================================
//
// Composite of three sub-scores:
//   employment (40%): currency-specific piecewise-linear scale
//   PMI        (30%): manufacturing PMI step function
//   GDP        (30%): quarter-on-quarter growth step function

use tracing::trace;

use crate::factors::tables::employment_scale;
use crate::types::{EmploymentMetric, GrowthInput};

const EMPLOYMENT_WEIGHT: f64 = 0.4;
const PMI_WEIGHT: f64 = 0.3;
const GDP_WEIGHT: f64 = 0.3;

/// Employment reading mapped to `[-1, 1]` on the metric's own scale.
/// Currencies without a scale score 0.
pub fn employment_score(metric: &EmploymentMetric) -> f64 {
    match employment_scale(&metric.currency_code) {
        Some(scale) => scale.score(metric.value),
        None => {
            trace!(currency = %metric.currency_code, "no employment scale, scoring neutral");
            0.0
        }
    }
}

pub fn pmi_score(pmi: f64) -> f64 {
    if pmi > 52.0 {
        1.0
    } else if pmi >= 50.0 {
        0.5
    } else if pmi >= 48.0 {
        0.0
    } else if pmi >= 45.0 {
        -0.5
    } else {
        -1.0
    }
}

pub fn gdp_score(gdp_qoq: f64) -> f64 {
    if gdp_qoq > 3.0 {
        1.0
    } else if gdp_qoq >= 2.0 {
        0.5
    } else if gdp_qoq >= 1.0 {
        0.0
    } else if gdp_qoq >= 0.0 {
        -0.5
    } else {
        -1.0
    }
}

pub fn growth_momentum_score(input: &GrowthInput) -> f64 {
    EMPLOYMENT_WEIGHT * employment_score(&input.employment_metric)
        + PMI_WEIGHT * pmi_score(input.pmi)
        + GDP_WEIGHT * gdp_score(input.gdp_qoq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(code: &str, value: f64) -> EmploymentMetric {
        EmploymentMetric {
            currency_code: code.to_string(),
            value,
        }
    }

    fn growth(code: &str, value: f64, pmi: f64, gdp: f64) -> GrowthInput {
        GrowthInput {
            employment_metric: metric(code, value),
            pmi,
            gdp_qoq: gdp,
        }
    }

    #[test]
    fn test_pmi_steps() {
        assert_eq!(pmi_score(55.0), 1.0);
        assert_eq!(pmi_score(52.0), 0.5);
        assert_eq!(pmi_score(50.0), 0.5);
        assert_eq!(pmi_score(49.9), 0.0);
        assert_eq!(pmi_score(48.0), 0.0);
        assert_eq!(pmi_score(45.0), -0.5);
        assert_eq!(pmi_score(44.9), -1.0);
    }

    #[test]
    fn test_gdp_steps() {
        assert_eq!(gdp_score(3.1), 1.0);
        assert_eq!(gdp_score(3.0), 0.5);
        assert_eq!(gdp_score(2.0), 0.5);
        assert_eq!(gdp_score(1.5), 0.0);
        assert_eq!(gdp_score(0.0), -0.5);
        assert_eq!(gdp_score(-0.1), -1.0);
    }

    #[test]
    fn test_employment_interpolation_per_currency() {
        assert!((employment_score(&metric("USD", 175.0)) - 0.875).abs() < 1e-9);
        assert!((employment_score(&metric("EUR", 0.1)) - 0.5).abs() < 1e-9);
        assert!((employment_score(&metric("JPY", 1.28)) - 0.2).abs() < 1e-9);
        assert!((employment_score(&metric("AUD", 66.3)) - 0.2).abs() < 1e-9);
        assert!((employment_score(&metric("CAD", 62.2)) - 0.4).abs() < 1e-9);
        assert!((employment_score(&metric("CHF", 2.25)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_employment_thresholds_saturate() {
        assert_eq!(employment_score(&metric("EUR", -0.2)), -1.0);
        assert_eq!(employment_score(&metric("JPY", 1.35)), 1.0);
        assert_eq!(employment_score(&metric("CHF", 1.8)), 1.0);
        assert_eq!(employment_score(&metric("CHF", 3.2)), -1.0);
    }

    #[test]
    fn test_unknown_currency_employment_is_neutral() {
        assert_eq!(employment_score(&metric("SEK", 7.5)), 0.0);
    }

    #[test]
    fn test_chf_lower_unemployment_scores_higher() {
        let good = growth_momentum_score(&growth("CHF", 1.8, 50.0, 1.5));
        let bad = growth_momentum_score(&growth("CHF", 3.2, 50.0, 1.5));
        assert!(good > bad);

        let mut last = f64::INFINITY;
        for step in 0..=20 {
            let value = 1.5 + step as f64 * 0.1;
            let score = employment_score(&metric("CHF", value));
            assert!(score <= last);
            last = score;
        }
    }

    #[test]
    fn test_composite_weights() {
        // 0.4 * 0.875 + 0.3 * 0.0 + 0.3 * 0.0
        let usd = growth_momentum_score(&growth("USD", 175.0, 48.5, 1.5));
        assert!((usd - 0.35).abs() < 1e-9);
    }
}
