// =============================================================================
// Central Application State
// =============================================================================
//
// Owns the mutable side of the service: the current input snapshot and the
// latest evaluation derived from it. The engine never sees this struct; every
// mutation here rebuilds `ModelInputs`, reruns `engine::evaluate` on it in
// full, and swaps the result in.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for the inputs and the latest evaluation.
// =============================================================================

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{evaluate, CurrencyPair, Evaluation, ModelInputs, PairSignal};
use crate::runtime_config::RuntimeConfig;
use crate::scoring::CurrencyScore;
use crate::types::CurrencyInputs;

// =============================================================================
// Records
// =============================================================================

/// An evaluation together with when and at which version it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub version: u64,
    pub computed_at: String,
    pub evaluation: Evaluation,
}

/// Partial update for the cross-asset snapshot. Supplying both returns
/// advances the hedge-outperformance streak.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketUpdate {
    #[serde(default)]
    pub primary_asset_return: Option<f64>,
    #[serde(default)]
    pub hedge_asset_return: Option<f64>,
    #[serde(default)]
    pub primary_price: Option<f64>,
    #[serde(default)]
    pub primary_ma20: Option<f64>,
}

/// Full serialisable view served by `GET /api/v1/state`.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub version: u64,
    pub computed_at: String,
    pub uptime_secs: u64,
    pub inputs: ModelInputs,
    pub evaluation: Evaluation,
    pub ranked: Vec<CurrencyScore>,
    pub pairs: Vec<PairSignal>,
}

// =============================================================================
// AppState
// =============================================================================

pub struct AppState {
    /// Monotonically increasing version counter, bumped on every recompute.
    pub state_version: AtomicU64,

    pub runtime_config: Arc<RwLock<RuntimeConfig>>,

    /// Where config changes are written back. `None` disables saving.
    pub config_path: Option<PathBuf>,

    inputs: RwLock<ModelInputs>,
    latest: RwLock<EvaluationRecord>,

    pub start_time: Instant,
}

impl AppState {
    /// Build state from `config` and a seed snapshot, running the first
    /// evaluation immediately.
    pub fn new(config: RuntimeConfig, mut inputs: ModelInputs, config_path: Option<PathBuf>) -> Self {
        if config.central_bank_week {
            inputs.is_policy_week = true;
        }
        let latest = EvaluationRecord {
            version: 1,
            computed_at: Utc::now().to_rfc3339(),
            evaluation: evaluate(&inputs),
        };
        info!(
            regime = %latest.evaluation.regime,
            currencies = inputs.currencies.len(),
            "initial evaluation complete"
        );

        Self {
            state_version: AtomicU64::new(1),
            runtime_config: Arc::new(RwLock::new(config)),
            config_path,
            inputs: RwLock::new(inputs),
            latest: RwLock::new(latest),
            start_time: Instant::now(),
        }
    }

    // ── Version Management ──────────────────────────────────────────────

    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn inputs(&self) -> ModelInputs {
        self.inputs.read().clone()
    }

    pub fn latest(&self) -> EvaluationRecord {
        self.latest.read().clone()
    }

    pub fn major_pairs(&self) -> Vec<CurrencyPair> {
        self.runtime_config.read().major_pairs.clone()
    }

    // ── Mutations (each one triggers a full recompute) ──────────────────

    /// Apply `mutate` to the inputs, then re-evaluate everything.
    fn update_inputs(&self, mutate: impl FnOnce(&mut ModelInputs)) -> EvaluationRecord {
        let mut inputs = self.inputs.write();
        mutate(&mut inputs);
        let evaluation = evaluate(&inputs);
        let record = EvaluationRecord {
            version: self.increment_version(),
            computed_at: Utc::now().to_rfc3339(),
            evaluation,
        };
        *self.latest.write() = record.clone();
        drop(inputs);
        record
    }

    /// Recompute without changing any input.
    pub fn refresh(&self) -> EvaluationRecord {
        self.update_inputs(|_| {})
    }

    /// Record a new volatility index observation.
    pub fn record_volatility(&self, value: f64) -> EvaluationRecord {
        let record = self.update_inputs(|inputs| {
            inputs.volatility = inputs.volatility.observe(value);
        });
        info!(value, regime = %record.evaluation.regime, "volatility observation recorded");
        record
    }

    /// Apply a partial market update. Any update carrying a return advances
    /// or resets the hedge-outperformance streak.
    pub fn update_market(&self, update: MarketUpdate) -> EvaluationRecord {
        let record = self.update_inputs(|inputs| {
            let market = &mut inputs.market;
            if update.primary_asset_return.is_some() || update.hedge_asset_return.is_some() {
                // A single supplied return is paired with the stored other one.
                let primary = update.primary_asset_return.unwrap_or(market.primary_asset_return);
                let hedge = update.hedge_asset_return.unwrap_or(market.hedge_asset_return);
                *market = market.with_returns(primary, hedge);
            }
            if let Some(price) = update.primary_price {
                market.primary_price = price;
            }
            if let Some(ma20) = update.primary_ma20 {
                market.primary_ma20 = ma20;
            }
        });
        info!(
            streak = record.evaluation.regime_state.hedge_outperform_streak,
            regime = %record.evaluation.regime,
            "market snapshot updated"
        );
        record
    }

    /// Replace (or add) the input bundle for one currency.
    pub fn set_currency(&self, currency_code: &str, bundle: CurrencyInputs) -> EvaluationRecord {
        let code = currency_code.trim().to_ascii_uppercase();
        let mismatched = bundle.mismatched_codes(&code);
        if !mismatched.is_empty() {
            warn!(
                currency = %code,
                embedded = ?mismatched,
                "currency bundle carries codes that differ from its key"
            );
        }
        let record = self.update_inputs(|inputs| {
            inputs.currencies.insert(code.clone(), bundle);
        });
        info!(currency = %code, "currency inputs replaced");
        record
    }

    /// Toggle the central bank policy-week override and persist it.
    pub fn set_policy_week(&self, enabled: bool) -> EvaluationRecord {
        let record = self.update_inputs(|inputs| inputs.is_policy_week = enabled);

        let config_clone = {
            let mut config = self.runtime_config.write();
            config.central_bank_week = enabled;
            config.clone()
        };
        if let Some(path) = &self.config_path {
            if let Err(e) = config_clone.save(path) {
                warn!(error = %e, "Failed to save policy-week flag to disk");
            }
        }

        info!(enabled, regime = %record.evaluation.regime, "policy week flag set");
        record
    }

    // ── Snapshot Builder ────────────────────────────────────────────────

    pub fn build_snapshot(&self) -> StateSnapshot {
        let (inputs, record) = {
            let inputs = self.inputs.read();
            (inputs.clone(), self.latest.read().clone())
        };
        let pairs = record.evaluation.pair_signals(&self.major_pairs());
        let ranked = record.evaluation.ranked().into_iter().cloned().collect();

        StateSnapshot {
            version: record.version,
            computed_at: record.computed_at,
            uptime_secs: self.start_time.elapsed().as_secs(),
            inputs,
            evaluation: record.evaluation,
            ranked,
            pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regime::Regime;

    fn state() -> AppState {
        AppState::new(RuntimeConfig::default(), ModelInputs::sample(), None)
    }

    #[test]
    fn test_initial_evaluation() {
        let s = state();
        let latest = s.latest();
        assert_eq!(latest.version, 1);
        assert_eq!(latest.evaluation.regime, Regime::RiskOff);
        assert_eq!(latest.evaluation.scores.len(), 7);
    }

    #[test]
    fn test_config_policy_week_applies_on_start() {
        let mut cfg = RuntimeConfig::default();
        cfg.central_bank_week = true;
        let s = AppState::new(cfg, ModelInputs::sample(), None);
        assert_eq!(s.latest().evaluation.regime, Regime::CentralBankWeek);
        assert!(s.inputs().is_policy_week);
    }

    #[test]
    fn test_every_mutation_bumps_version() {
        let s = state();
        let a = s.record_volatility(18.0);
        let b = s.refresh();
        assert_eq!(a.version, 2);
        assert_eq!(b.version, 3);
        assert_eq!(s.current_state_version(), 3);
    }

    #[test]
    fn test_record_volatility_rolls_window() {
        let s = state();
        s.record_volatility(19.0);
        let inputs = s.inputs();
        assert_eq!(inputs.volatility.current, 19.0);
        assert_eq!(inputs.volatility.window.len(), 20);
        assert_eq!(inputs.volatility.window[19], 19.0);
        assert_eq!(inputs.volatility.window[0], 20.5);
    }

    #[test]
    fn test_market_update_advances_streak() {
        let s = state();
        for _ in 0..5 {
            s.update_market(MarketUpdate {
                primary_asset_return: Some(-1.0),
                hedge_asset_return: Some(0.5),
                ..Default::default()
            });
        }
        // Low volatility would otherwise allow a non-risk-off regime.
        s.record_volatility(20.0);
        let latest = s.latest();
        assert_eq!(latest.evaluation.regime_state.hedge_outperform_streak, 5);
        assert_eq!(latest.evaluation.regime, Regime::RiskOff);

        s.update_market(MarketUpdate {
            primary_asset_return: Some(1.0),
            hedge_asset_return: Some(0.5),
            ..Default::default()
        });
        assert_eq!(s.inputs().market.hedge_outperform_streak, 0);
    }

    #[test]
    fn test_price_only_update_keeps_streak() {
        let s = state();
        s.update_market(MarketUpdate {
            primary_asset_return: Some(-1.0),
            hedge_asset_return: Some(0.5),
            ..Default::default()
        });
        s.update_market(MarketUpdate {
            primary_price: Some(470.0),
            ..Default::default()
        });
        let market = s.inputs().market;
        assert_eq!(market.hedge_outperform_streak, 1);
        assert_eq!(market.primary_price, 470.0);
    }

    #[test]
    fn test_single_return_update_resets_streak() {
        let s = state();
        for _ in 0..5 {
            s.update_market(MarketUpdate {
                primary_asset_return: Some(-1.0),
                hedge_asset_return: Some(0.5),
                ..Default::default()
            });
        }
        s.record_volatility(20.0);
        assert_eq!(s.latest().evaluation.regime, Regime::RiskOff);

        let record = s.update_market(MarketUpdate {
            primary_asset_return: Some(3.0),
            ..Default::default()
        });
        let market = s.inputs().market;
        assert_eq!(market.primary_asset_return, 3.0);
        assert_eq!(market.hedge_asset_return, 0.5);
        assert_eq!(market.hedge_outperform_streak, 0);
        assert_ne!(record.evaluation.regime, Regime::RiskOff);
    }

    #[test]
    fn test_hedge_only_update_extends_streak() {
        let s = state();
        s.update_market(MarketUpdate {
            primary_asset_return: Some(-1.0),
            hedge_asset_return: Some(0.5),
            ..Default::default()
        });
        s.update_market(MarketUpdate {
            hedge_asset_return: Some(0.8),
            ..Default::default()
        });
        let market = s.inputs().market;
        assert_eq!(market.hedge_asset_return, 0.8);
        assert_eq!(market.hedge_outperform_streak, 2);
    }

    #[test]
    fn test_snapshot_inputs_match_evaluation() {
        let s = state();
        s.record_volatility(18.0);
        let snap = s.build_snapshot();
        assert_eq!(snap.evaluation, evaluate(&snap.inputs));
        assert_eq!(snap.version, s.current_state_version());
    }

    #[test]
    fn test_set_currency_regenerates_scores() {
        let s = state();
        let before = s.latest().evaluation.scores["EUR"].clone();
        let mut bundle = s.inputs().currencies["EUR"].clone();
        bundle.real_rate.two_year_yield = 5.0;
        let after = s.set_currency("eur", bundle);
        assert!(after.evaluation.scores["EUR"].total_score > before.total_score);
        assert_eq!(after.evaluation.scores.len(), 7);
    }

    #[test]
    fn test_policy_week_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtime_config.json");
        let s = AppState::new(RuntimeConfig::default(), ModelInputs::sample(), Some(path.clone()));
        let record = s.set_policy_week(true);
        assert_eq!(record.evaluation.regime, Regime::CentralBankWeek);
        assert!(RuntimeConfig::load(&path).unwrap().central_bank_week);

        let record = s.set_policy_week(false);
        assert_eq!(record.evaluation.regime, Regime::RiskOff);
    }

    #[test]
    fn test_snapshot_contents() {
        let snap = state().build_snapshot();
        assert_eq!(snap.ranked.len(), 7);
        assert_eq!(snap.pairs.len(), 5);
        assert_eq!(snap.version, 1);
    }
}
