//! Configuration for the rating scale, classifier tolerances and gating

use crate::classifier::Strategy;
use ratelex_core::{Error, RatingScale, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the whole engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of rating levels (even, at least 2)
    #[serde(default)]
    pub scale: RatingScale,

    /// Strategy used when a caller does not pick one
    #[serde(default)]
    pub default_strategy: Strategy,

    /// Threshold classifier tolerances
    #[serde(default)]
    pub threshold: ThresholdConfig,

    /// Window classifier settings
    #[serde(default)]
    pub window: WindowConfig,

    /// Minimum evidence before a term is classified at all
    #[serde(default)]
    pub gating: GatingConfig,
}

/// Tolerances of the threshold classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// A term is objective when `max(f) - min(f) < objectivity_tolerance * avg(f)`
    #[serde(default = "default_objectivity_tolerance")]
    pub objectivity_tolerance: f64,

    /// A rating is dominant when `f > (1 + polarity_tolerance) * avg(f)`
    #[serde(default = "default_polarity_tolerance")]
    pub polarity_tolerance: f64,
}

/// Settings of the window classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Same range test as [`ThresholdConfig::objectivity_tolerance`]
    #[serde(default = "default_objectivity_tolerance")]
    pub objectivity_tolerance: f64,
}

/// Minimum evidence for a term to be classifiable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatingConfig {
    /// Minimum total observations across all ratings
    #[serde(default = "default_min_observations")]
    pub min_observations: u64,

    /// Minimum number of distinct documents the term appears in
    #[serde(default = "default_min_documents")]
    pub min_documents: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: RatingScale::default(),
            default_strategy: Strategy::default(),
            threshold: ThresholdConfig::default(),
            window: WindowConfig::default(),
            gating: GatingConfig::default(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            objectivity_tolerance: default_objectivity_tolerance(),
            polarity_tolerance: default_polarity_tolerance(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            objectivity_tolerance: default_objectivity_tolerance(),
        }
    }
}

impl Default for GatingConfig {
    fn default() -> Self {
        Self {
            min_observations: default_min_observations(),
            min_documents: default_min_documents(),
        }
    }
}

impl EngineConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Check every tolerance
    pub fn validate(&self) -> Result<()> {
        self.threshold.validate()?;
        self.window.validate()
    }
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<()> {
        check_tolerance("objectivity_tolerance", self.objectivity_tolerance)?;
        check_tolerance("polarity_tolerance", self.polarity_tolerance)
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<()> {
        check_tolerance("objectivity_tolerance", self.objectivity_tolerance)
    }
}

fn check_tolerance(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}

fn default_objectivity_tolerance() -> f64 {
    1.0
}

fn default_polarity_tolerance() -> f64 {
    0.1
}

fn default_min_observations() -> u64 {
    5
}

fn default_min_documents() -> usize {
    2
}
