// =============================================================================
// Scoring Module
// =============================================================================
//
// - Aggregator: factor scores x regime weights -> one total per currency
// - Signal: pairwise differential -> strength bucket + recommendation

pub mod aggregator;
pub mod signal;

pub use aggregator::{score_currency, score_currency_inputs, CurrencyScore};
pub use signal::{signal, SignalStrength, TradingSignal};
