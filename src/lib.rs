// =============================================================================
// FX Strength: currency strength scoring engine
// =============================================================================
//
// Pure scoring core:
//   history   : rolling volatility window, hedge outperformance streak
//   regime    : regime classifier and regime weight table
//   factors   : five per-currency factor scorers and their constant tables
//   scoring   : weighted aggregation and pairwise signals
//   engine    : full recompute over one input snapshot
//
// Service around the core:
//   runtime_config, app_state, api

pub mod api;
pub mod app_state;
pub mod engine;
pub mod factors;
pub mod history;
pub mod indicators;
pub mod regime;
pub mod runtime_config;
pub mod scoring;
pub mod types;

pub use engine::{evaluate, CurrencyPair, Evaluation, ModelInputs, PairSignal};
pub use history::{append_observation, update_outperform_streak, VolatilityState};
pub use regime::{classify_regime, detect_regime, weights_for, Regime, RegimeState, WeightVector};
pub use scoring::{score_currency, signal, CurrencyScore, SignalStrength, TradingSignal};
pub use types::{
    CurrencyInputs, EmploymentMetric, GrowthInput, MarketSnapshot, PositioningInput,
    RatePolicyInput, RealRateInput,
};

/// Alias matching the external API name for appending a volatility reading.
pub use history::append_observation as update_volatility_window;
