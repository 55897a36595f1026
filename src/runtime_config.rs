// =============================================================================
// Runtime Configuration: service settings with atomic save
// =============================================================================
//
// Settings for the service wrapped around the scoring engine. The scoring
// constants themselves are compile-time tables and do not live here.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::CurrencyPair;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_major_pairs() -> Vec<CurrencyPair> {
    CurrencyPair::majors()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the REST API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Optional JSON snapshot of `ModelInputs` used to seed the service.
    /// When absent the built-in sample dataset is used.
    #[serde(default)]
    pub inputs_path: Option<PathBuf>,

    /// Pairs shown on the signal board, in display order.
    #[serde(default = "default_major_pairs")]
    pub major_pairs: Vec<CurrencyPair>,

    /// Start with the central bank policy-week override enabled.
    #[serde(default)]
    pub central_bank_week: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            inputs_path: None,
            major_pairs: default_major_pairs(),
            central_bank_week: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            pairs = config.major_pairs.len(),
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Per-run overrides
// =============================================================================

/// Settings for one process run after environment overrides. Kept apart from
/// `RuntimeConfig` so overrides are never persisted by `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSettings {
    pub bind_addr: String,
    pub inputs_path: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Resolve the run settings, preferring `bind_addr` / `inputs_path` when given.
    pub fn launch_settings(
        &self,
        bind_addr: Option<String>,
        inputs_path: Option<PathBuf>,
    ) -> LaunchSettings {
        LaunchSettings {
            bind_addr: bind_addr.unwrap_or_else(|| self.bind_addr.clone()),
            inputs_path: inputs_path.or_else(|| self.inputs_path.clone()),
        }
    }
}
