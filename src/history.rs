// =============================================================================
// Volatility History Tracker
// =============================================================================
//
// Rolling 20-observation volatility window plus the hedge-outperformance
// streak. The tracker owns no state: every function takes the previous value
// and returns the next one, and the caller decides where to keep it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::indicators::percentile::WINDOW_LEN;
use crate::types::MarketSnapshot;

/// Latest volatility index reading and its trailing window (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityState {
    pub current: f64,
    #[serde(default)]
    pub window: Vec<f64>,
}

impl VolatilityState {
    /// Seed a state from existing history. Anything beyond the most recent
    /// [`WINDOW_LEN`] observations is dropped.
    pub fn new(current: f64, history: &[f64]) -> Self {
        let start = history.len().saturating_sub(WINDOW_LEN);
        Self {
            current,
            window: history[start..].to_vec(),
        }
    }

    /// Record a new reading: it becomes `current` and is appended to the
    /// window.
    pub fn observe(&self, value: f64) -> Self {
        Self {
            current: value,
            window: append_observation(value, &self.window),
        }
    }

    /// True when the window has fewer observations than the percentile
    /// calculations expect.
    pub fn is_incomplete(&self) -> bool {
        self.window.len() < WINDOW_LEN
    }
}

/// Append `value` to a copy of `window`, keeping only the most recent
/// [`WINDOW_LEN`] observations.
pub fn append_observation(value: f64, window: &[f64]) -> Vec<f64> {
    let mut next = Vec::with_capacity(WINDOW_LEN);
    let keep = window.len().min(WINDOW_LEN - 1);
    next.extend_from_slice(&window[window.len() - keep..]);
    next.push(value);
    trace!(len = next.len(), value, "volatility observation appended");
    next
}

/// Consecutive-observation counter for the hedge asset beating the primary.
///
/// Increments when `hedge_return > primary_return`, resets to zero otherwise.
pub fn update_outperform_streak(primary_return: f64, hedge_return: f64, previous_streak: u32) -> u32 {
    if hedge_return > primary_return {
        previous_streak.saturating_add(1)
    } else {
        0
    }
}

impl MarketSnapshot {
    /// Apply a fresh pair of returns, advancing or resetting the streak.
    pub fn with_returns(&self, primary_return: f64, hedge_return: f64) -> Self {
        Self {
            primary_asset_return: primary_return,
            hedge_asset_return: hedge_return,
            hedge_outperform_streak: update_outperform_streak(
                primary_return,
                hedge_return,
                self.hedge_outperform_streak,
            ),
            ..self.clone()
        }
    }
}
