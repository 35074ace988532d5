//! Classifier trait and strategy selection

use crate::histogram::TermHistogram;
use crate::result::ClassificationResult;
use ratelex_core::{Error, RatingScale, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for all sentiment classification strategies.
///
/// Implementations are pure: classifying the same histogram twice yields
/// identical results, and separate terms can be classified on separate
/// threads with nothing shared but the read-only corpus weights.
pub trait SentimentClassifier: Send + Sync {
    /// Classify one term's rating histogram
    fn classify(&self, histogram: &TermHistogram) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Get the strategy this classifier implements
    fn strategy(&self) -> Strategy;

    /// Scale of the corpus weights the classifier was built with
    fn scale(&self) -> RatingScale;
}

/// Available classification strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Subjectivity plus one dominant-mass score per polarity half
    #[default]
    Threshold,
    /// Greedy decomposition into contiguous sentiment windows
    Window,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Threshold, Strategy::Window];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Window => "window",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "threshold" => Ok(Self::Threshold),
            "window" => Ok(Self::Window),
            other => Err(Error::config(format!(
                "unknown strategy '{other}', expected 'threshold' or 'window'"
            ))),
        }
    }
}
