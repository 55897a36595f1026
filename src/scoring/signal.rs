// =============================================================================
// Pairwise Trading Signal
// =============================================================================
//
// Buckets the total-score differential between two currencies:
//
//   |diff| >  2.0  VERY_STRONG
//   |diff| >= 1.5  STRONG
//   |diff| >= 1.0  MODERATE
//   |diff| >= 0.5  WEAK      (wait)
//   otherwise      NEUTRAL   (no trade)
//
// The buy side is the first currency when the differential is positive and
// the second otherwise.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::aggregator::CurrencyScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    Neutral,
}

impl SignalStrength {
    pub fn from_abs_differential(abs_diff: f64) -> Self {
        if abs_diff > 2.0 {
            Self::VeryStrong
        } else if abs_diff >= 1.5 {
            Self::Strong
        } else if abs_diff >= 1.0 {
            Self::Moderate
        } else if abs_diff >= 0.5 {
            Self::Weak
        } else {
            Self::Neutral
        }
    }

    /// VERY_STRONG and STRONG are the actionable setups.
    pub fn is_strong(self) -> bool {
        matches!(self, Self::VeryStrong | Self::Strong)
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryStrong => write!(f, "VERY_STRONG"),
            Self::Strong => write!(f, "STRONG"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Weak => write!(f, "WEAK"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub differential: f64,
    pub strength: SignalStrength,
    pub recommendation: String,
}

/// Compare `score_a` against `score_b`.
pub fn signal(score_a: &CurrencyScore, score_b: &CurrencyScore) -> TradingSignal {
    let differential = score_a.total_score - score_b.total_score;
    let strength = SignalStrength::from_abs_differential(differential.abs());

    let (buy, sell) = if differential > 0.0 {
        (&score_a.currency_code, &score_b.currency_code)
    } else {
        (&score_b.currency_code, &score_a.currency_code)
    };

    let recommendation = match strength {
        SignalStrength::VeryStrong => format!("STRONG BUY {buy}, SELL {sell}"),
        SignalStrength::Strong => format!("BUY {buy}, SELL {sell} (wait for pullback)"),
        SignalStrength::Moderate => format!("MODERATE BUY {buy}, SELL {sell}"),
        SignalStrength::Weak => "WAIT FOR BETTER SETUP".to_string(),
        SignalStrength::Neutral => "NO CLEAR SIGNAL - DO NOT TRADE".to_string(),
    };

    TradingSignal {
        differential,
        strength,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(code: &str, total: f64) -> CurrencyScore {
        CurrencyScore {
            currency_code: code.to_string(),
            rate_policy: 0.0,
            growth_momentum: 0.0,
            real_interest_edge: 0.0,
            risk_appetite: 0.0,
            positioning: 0.0,
            total_score: total,
        }
    }

    #[test]
    fn test_very_strong_names_first_as_buy() {
        let s = signal(&score("USD", 1.2), &score("EUR", -0.9));
        assert!((s.differential - 2.1).abs() < 1e-9);
        assert_eq!(s.strength, SignalStrength::VeryStrong);
        assert_eq!(s.recommendation, "STRONG BUY USD, SELL EUR");
    }

    #[test]
    fn test_negative_differential_buys_second() {
        let s = signal(&score("AUD", -0.9), &score("JPY", 0.7));
        assert_eq!(s.strength, SignalStrength::Strong);
        assert_eq!(s.recommendation, "BUY JPY, SELL AUD (wait for pullback)");
    }

    #[test]
    fn test_moderate() {
        let s = signal(&score("GBP", 0.6), &score("CAD", -0.5));
        assert_eq!(s.strength, SignalStrength::Moderate);
        assert_eq!(s.recommendation, "MODERATE BUY GBP, SELL CAD");
    }

    #[test]
    fn test_weak_and_neutral() {
        let weak = signal(&score("GBP", 0.5), &score("CAD", -0.2));
        assert_eq!(weak.strength, SignalStrength::Weak);
        assert_eq!(weak.recommendation, "WAIT FOR BETTER SETUP");

        let flat = signal(&score("GBP", 0.1), &score("CAD", 0.1));
        assert_eq!(flat.strength, SignalStrength::Neutral);
        assert_eq!(flat.recommendation, "NO CLEAR SIGNAL - DO NOT TRADE");
    }

    #[test]
    fn test_threshold_edges() {
        assert_eq!(SignalStrength::from_abs_differential(2.0), SignalStrength::Strong);
        assert_eq!(SignalStrength::from_abs_differential(1.5), SignalStrength::Strong);
        assert_eq!(SignalStrength::from_abs_differential(1.0), SignalStrength::Moderate);
        assert_eq!(SignalStrength::from_abs_differential(0.5), SignalStrength::Weak);
        assert_eq!(SignalStrength::from_abs_differential(0.49), SignalStrength::Neutral);
    }

    #[test]
    fn test_swapping_sides_flips_sign_only() {
        let ab = signal(&score("USD", 1.2), &score("EUR", -0.9));
        let ba = signal(&score("EUR", -0.9), &score("USD", 1.2));
        assert_eq!(ab.strength, ba.strength);
        assert!((ab.differential + ba.differential).abs() < 1e-12);
        assert_eq!(ab.recommendation, ba.recommendation);
    }

    #[test]
    fn test_strength_serde_label() {
        let json = serde_json::to_string(&SignalStrength::VeryStrong).unwrap();
        assert_eq!(json, "\"VERY_STRONG\"");
        assert!(SignalStrength::Strong.is_strong());
        assert!(!SignalStrength::Moderate.is_strong());
    }
}
