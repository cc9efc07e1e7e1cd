//! Engine settings.
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fit::{FitMode, SearchBounds};
use crate::time::ROLLOVER_THRESHOLD_H;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Forward jump (hours) treated as a relative-clock restart
    pub rollover_threshold_h: f64,
    /// Fit algorithm used for interactive window fits
    pub fit_mode: FitMode,
    /// Limits for the best-window search
    pub search: SearchBounds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rollover_threshold_h: ROLLOVER_THRESHOLD_H,
            fit_mode: FitMode::default(),
            search: SearchBounds::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing engine config")?;
        if !(config.rollover_threshold_h > 0.0) {
            anyhow::bail!(
                "rollover_threshold_h must be positive, got {}",
                config.rollover_threshold_h
            );
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.rollover_threshold_h, 1.0);
        assert_eq!(config.fit_mode, FitMode::TwoPoint);
        assert_eq!(config.search.min_window, 10);
        assert_eq!(config.search.step, 1);
        assert_eq!(config.search.max_points, 2000);
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json(r#"{"fit_mode": "regression", "search": {"step": 2}}"#)
                .unwrap();
        assert_eq!(config.fit_mode, FitMode::Regression);
        assert_eq!(config.search.step, 2);
        assert_eq!(config.search.min_window, 10);
        assert_eq!(config.rollover_threshold_h, 1.0);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(EngineConfig::from_json(r#"{"rollover_threshold_h": 0}"#).is_err());
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_round_trip() {
        let config = EngineConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&text).unwrap(), config);
    }
}
