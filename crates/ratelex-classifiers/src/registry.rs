//! Classifier registry initialization and management

use crate::{
    ClassifiabilityGate, CorpusLengthStats, EngineConfig, RatingWeights, SentimentClassifier,
    Strategy, ThresholdClassifier, WindowClassifier,
};
use ratelex_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Registry holding every configured classification strategy, keyed by name
pub struct ClassifierRegistry {
    /// Loaded engine configuration
    config: EngineConfig,

    /// Corpus weights shared by all classifiers
    weights: Arc<RatingWeights>,

    /// Instantiated classifiers by name
    classifiers: HashMap<String, Arc<dyn SentimentClassifier>>,
}

impl ClassifierRegistry {
    /// Create a registry with both built-in strategies registered under
    /// their strategy names
    pub fn from_config(config: EngineConfig, weights: Arc<RatingWeights>) -> Result<Self> {
        config.validate()?;
        if weights.scale() != config.scale {
            return Err(Error::ScaleMismatch {
                expected: config.scale.size(),
                actual: weights.scale().size(),
            });
        }

        let mut registry = Self {
            config,
            weights,
            classifiers: HashMap::new(),
        };
        registry.initialize_classifiers()?;
        Ok(registry)
    }

    /// Build a registry from corpus statistics, deriving the weight table
    pub fn from_corpus(config: EngineConfig, corpus: &CorpusLengthStats) -> Result<Self> {
        Self::from_config(config, Arc::new(corpus.rating_weights()))
    }

    /// Load configuration from file and build a registry over `corpus`
    pub fn from_file(path: impl AsRef<Path>, corpus: &CorpusLengthStats) -> Result<Self> {
        let config = EngineConfig::from_file(path)?;
        Self::from_corpus(config, corpus)
    }

    fn initialize_classifiers(&mut self) -> Result<()> {
        info!("Initializing classifiers");

        let threshold = ThresholdClassifier::new(Arc::clone(&self.weights), self.config.threshold)?;
        self.register(Strategy::Threshold.as_str(), Arc::new(threshold));

        let window = WindowClassifier::new(Arc::clone(&self.weights), self.config.window)?;
        self.register(Strategy::Window.as_str(), Arc::new(window));

        info!("Initialized {} classifiers", self.classifiers.len());
        Ok(())
    }

    /// Add or replace a classifier under `name`
    pub fn register(&mut self, name: impl Into<String>, classifier: Arc<dyn SentimentClassifier>) {
        self.classifiers.insert(name.into(), classifier);
    }

    /// Look up a classifier by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn SentimentClassifier>> {
        self.classifiers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::config(format!("Classifier '{}' not found", name)))
    }

    /// The classifier for `strategy`
    pub fn for_strategy(&self, strategy: Strategy) -> Result<Arc<dyn SentimentClassifier>> {
        self.get(strategy.as_str())
    }

    /// The classifier for the configured default strategy
    pub fn default_classifier(&self) -> Result<Arc<dyn SentimentClassifier>> {
        self.for_strategy(self.config.default_strategy)
    }

    /// Gate built from the configured minimums
    pub fn gate(&self) -> ClassifiabilityGate {
        ClassifiabilityGate::new(self.config.gating)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn weights(&self) -> &Arc<RatingWeights> {
        &self.weights
    }

    /// Get the number of loaded classifiers
    pub fn count(&self) -> usize {
        self.classifiers.len()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classifiers.keys().cloned().collect();
        names.sort();
        names
    }
}
