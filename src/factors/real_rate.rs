// =============================================================================
// Real Interest Edge Factor
// =============================================================================
//
// Real rate = 2Y government yield - 5Y5Y breakeven inflation, scaled by 1.5.
// Unbounded: the edge is only meaningful relative to other currencies.

use crate::types::RealRateInput;

const REAL_RATE_MULTIPLIER: f64 = 1.5;

pub fn real_rate(input: &RealRateInput) -> f64 {
    input.two_year_yield - input.breakeven_inflation_5y5y
}

pub fn real_interest_edge_score(input: &RealRateInput) -> f64 {
    real_rate(input) * REAL_RATE_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_fixture() {
        let usd = RealRateInput {
            currency_code: "USD".to_string(),
            two_year_yield: 4.7,
            breakeven_inflation_5y5y: 2.3,
        };
        assert!((real_interest_edge_score(&usd) - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_negative_real_rate() {
        let jpy = RealRateInput {
            currency_code: "JPY".to_string(),
            two_year_yield: 0.5,
            breakeven_inflation_5y5y: 2.0,
        };
        assert!((real_interest_edge_score(&jpy) - (-2.25)).abs() < 1e-9);
    }
}
