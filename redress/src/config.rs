//! Daemon and core configuration.
//!
//! Defaults come from environment variables; a TOML file can override any
//! field. `validate()` guards the invariants the sweep relies on.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// AI predictor endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// When false, categorization runs on keywords alone.
    pub enabled: bool,
    pub url: String,
    pub model: String,
    /// Short by design: a slow model server must not stall complaint
    /// creation.
    pub timeout_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            enabled: env_flag("REDRESS_PREDICTOR_ENABLED", true),
            url: std::env::var("REDRESS_OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434/api/generate".into()),
            model: std::env::var("REDRESS_OLLAMA_MODEL").unwrap_or_else(|_| "phi3:mini".into()),
            timeout_secs: env_parse("REDRESS_PREDICTOR_TIMEOUT_SECS", 5),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedressConfig {
    /// Days a complaint may stay open before it is escalation-eligible.
    pub sla_days: u32,
    pub escalation_enabled: bool,
    pub sweep_interval_secs: u64,
    /// Path of the JSON state file backing the daemon.
    pub state_path: PathBuf,
    pub predictor: PredictorConfig,
}

impl Default for RedressConfig {
    fn default() -> Self {
        Self {
            sla_days: env_parse("REDRESS_SLA_DAYS", 3),
            escalation_enabled: env_flag("REDRESS_ESCALATION_ENABLED", true),
            sweep_interval_secs: env_parse("REDRESS_SWEEP_INTERVAL_SECS", 3600),
            state_path: std::env::var("REDRESS_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("redress-state.json")),
            predictor: PredictorConfig::default(),
        }
    }
}

impl RedressConfig {
    /// Load from a TOML file; unset fields fall back to env/defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.sla_days >= 1, "sla_days must be at least 1");
        anyhow::ensure!(
            self.sweep_interval_secs >= 1,
            "sweep_interval_secs must be at least 1"
        );
        anyhow::ensure!(
            self.predictor.timeout_secs >= 1,
            "predictor.timeout_secs must be at least 1"
        );
        Ok(())
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
