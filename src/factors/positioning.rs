// =============================================================================
// Positioning Factor
// =============================================================================
//
// Step function on the 52-week percentile of net speculative positioning.
// Inputs outside [0, 100] land in the top or bottom bucket.

use crate::types::PositioningInput;

pub fn positioning_score(input: &PositioningInput) -> f64 {
    let pct = input.percentile_52_week;
    if pct > 90.0 {
        1.0
    } else if pct > 70.0 {
        0.5
    } else if pct > 30.0 {
        0.0
    } else if pct > 10.0 {
        -0.5
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(pct: f64) -> f64 {
        positioning_score(&PositioningInput {
            currency_code: "USD".to_string(),
            net_position: 0,
            percentile_52_week: pct,
        })
    }

    #[test]
    fn test_buckets() {
        assert_eq!(at(95.0), 1.0);
        assert_eq!(at(90.0), 0.5);
        assert_eq!(at(75.0), 0.5);
        assert_eq!(at(70.0), 0.0);
        assert_eq!(at(30.0), -0.5);
        assert_eq!(at(10.0), -1.0);
    }

    #[test]
    fn test_out_of_range_falls_into_edge_buckets() {
        assert_eq!(at(140.0), 1.0);
        assert_eq!(at(-5.0), -1.0);
    }
}
