// =============================================================================
// Regime Module
// =============================================================================
//
// Market regime classification and the regime-dependent factor weights:
// - Classifier (volatility percentiles, hedge streak, trend filter)
// - Weight table (one row per regime, normalised to 1.0)

pub mod classifier;
pub mod weights;

pub use classifier::{classify_regime, detect_regime, Regime, RegimeState};
pub use weights::{weights_for, weights_for_label, WeightVector};
