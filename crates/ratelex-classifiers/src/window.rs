//! Window classifier: greedy decomposition into contiguous sentiment windows
//!
//! A term that is praised in one context and criticised in another spreads
//! its usage over two separate stretches of the rating axis. Instead of
//! forcing one polarity, this strategy grows intervals around the most
//! frequent ratings:
//!
//! 1. Ratings are visited by descending relative frequency.
//! 2. A rating adjacent to an existing window extends it; the grown window
//!    then absorbs neighbours it now touches while the covered share of the
//!    term's mass is still within [`required_coverage`] for the current
//!    window count.
//! 3. A rating adjacent to no window opens a new one, unless the covered
//!    share already exceeds the requirement, in which case the walk stops.
//!
//! The requirement grows with every window opened, so the walk favours a
//! few wide windows. The procedure is a single greedy pass per rating, not a
//! global optimum: two windows that become adjacent after coverage is
//! reached stay separate.

use crate::classifier::{SentimentClassifier, Strategy};
use crate::config::WindowConfig;
use crate::corpus::RatingWeights;
use crate::histogram::{RelativeFrequencies, TermHistogram};
use crate::result::{ClassificationResult, SentimentComponent};
use ratelex_core::{Polarity, Rating, RatingScale, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// Share of the term's mass that must be covered before a window beyond
/// the `windows`-th may be opened: 0, 1/2, 3/4, 7/8, then `1 - 0.5^(k+1)`.
///
/// Non-decreasing and always below 1.
pub fn required_coverage(windows: usize) -> f64 {
    match windows {
        0 => 0.0,
        1 => 0.5,
        2 => 0.75,
        3 => 0.875,
        k => {
            let exponent = i32::try_from(k.saturating_add(1)).unwrap_or(i32::MAX);
            (1.0 - 0.5f64.powi(exponent)).min(1.0 - f64::EPSILON)
        }
    }
}

/// Closed rating interval `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentWindow {
    pub lo: Rating,
    pub hi: Rating,
}

impl SentimentWindow {
    pub fn singleton(rating: Rating) -> Self {
        Self {
            lo: rating,
            hi: rating,
        }
    }

    pub fn contains(&self, rating: Rating) -> bool {
        (self.lo..=self.hi).contains(&rating)
    }

    /// `rating` sits directly below or above the interval
    pub fn can_include(&self, rating: Rating) -> bool {
        rating + 1 == self.lo || rating == self.hi + 1
    }

    /// The intervals touch or overlap
    pub fn can_be_merged_with(&self, other: &SentimentWindow) -> bool {
        self.lo <= other.hi + 1 && other.lo <= self.hi + 1
    }

    /// Grow by one adjacent rating
    pub fn include(&mut self, rating: Rating) {
        self.lo = self.lo.min(rating);
        self.hi = self.hi.max(rating);
    }

    /// Absorb a mergeable window
    pub fn merge(&mut self, other: &SentimentWindow) {
        self.lo = self.lo.min(other.lo);
        self.hi = self.hi.max(other.hi);
    }

    pub fn ratings(&self) -> std::ops::RangeInclusive<Rating> {
        self.lo..=self.hi
    }
}

/// Classifies a term as a set of sentiment windows
pub struct WindowClassifier {
    name: String,
    weights: Arc<RatingWeights>,
    config: WindowConfig,
}

impl WindowClassifier {
    pub fn new(weights: Arc<RatingWeights>, config: WindowConfig) -> Result<Self> {
        Self::with_name("window", weights, config)
    }

    pub fn with_name(
        name: impl Into<String>,
        weights: Arc<RatingWeights>,
        config: WindowConfig,
    ) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        debug!(
            classifier = %name,
            scale = weights.scale().size(),
            objectivity_tolerance = config.objectivity_tolerance,
            "created window classifier"
        );
        Ok(Self {
            name,
            weights,
            config,
        })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Run the greedy walk and return the final windows in creation order.
    ///
    /// Every rating is visited, including those with no mass. A zero-mass
    /// rating adjacent to a window still extends it, so windows can reach
    /// past the ratings that carry the term's usage.
    pub fn find_windows(&self, freqs: &RelativeFrequencies) -> Vec<SentimentWindow> {
        let mut windows: Vec<SentimentWindow> = Vec::new();
        if freqs.is_degenerate() {
            return windows;
        }

        let mut included = 0.0;
        for rating in freqs.ranked() {
            let mass = freqs.get(rating);
            if let Some(index) = windows.iter().position(|w| w.can_include(rating)) {
                windows[index].include(rating);
                included += mass;
                trace!(rating, window = ?windows[index], coverage = freqs.share(included), "extended window");
                merge_neighbours(&mut windows, index, freqs.share(included));
            } else if freqs.share(included) <= required_coverage(windows.len()) {
                windows.push(SentimentWindow::singleton(rating));
                included += mass;
                trace!(rating, coverage = freqs.share(included), "opened window");
            } else {
                debug!(
                    rating,
                    windows = windows.len(),
                    coverage = freqs.share(included),
                    "required coverage reached"
                );
                break;
            }
        }

        windows
    }

    /// Classify pre-normalized frequencies
    pub fn classify_frequencies(&self, freqs: &RelativeFrequencies) -> ClassificationResult {
        let scale = freqs.scale();
        let mut result = ClassificationResult::neutral(Strategy::Window, scale);
        if freqs.is_degenerate() {
            debug!(classifier = %self.name, "no observed mass, returning neutral result");
            return result;
        }

        result.set_total_mass(freqs.sum());
        result.set_subjectivity(freqs.subjectivity(self.config.objectivity_tolerance));

        let components: Vec<SentimentComponent> = self
            .find_windows(freqs)
            .into_iter()
            .map(|window| SentimentComponent {
                lo: window.lo,
                hi: window.hi,
                coverage: freqs.share(freqs.mass(window.ratings())),
                avg_rating: freqs.weighted_rating(window.ratings()),
            })
            .collect();

        for polarity in Polarity::ALL {
            let members = components.iter().filter(|c| c.polarity(scale) == polarity);
            let (coverage, moment, lowest, highest) = members.fold(
                (0.0, 0.0, f64::INFINITY, f64::NEG_INFINITY),
                |(coverage, moment, lowest, highest), c| {
                    (
                        coverage + c.coverage,
                        moment + c.coverage * c.avg_rating,
                        lowest.min(c.avg_rating),
                        highest.max(c.avg_rating),
                    )
                },
            );
            // The mean lies within its inputs' span; clamp away float drift
            let intensity = if coverage > 0.0 {
                (moment / coverage).clamp(lowest, highest)
            } else {
                0.0
            };
            result.set_polarity(polarity, coverage, intensity);
        }

        for component in components {
            result.push_component(component);
        }
        result
    }
}

/// Merge the window at `grown` with any window it now touches, for as long
/// as `coverage` stays within the requirement for the current window count.
fn merge_neighbours(windows: &mut Vec<SentimentWindow>, mut grown: usize, coverage: f64) {
    while coverage <= required_coverage(windows.len()) {
        let target = windows[grown];
        let Some(other) = windows
            .iter()
            .enumerate()
            .find(|(i, w)| *i != grown && target.can_be_merged_with(w))
            .map(|(i, _)| i)
        else {
            break;
        };

        let absorbed = windows.remove(other);
        if other < grown {
            grown -= 1;
        }
        windows[grown].merge(&absorbed);
        trace!(window = ?windows[grown], "merged windows");
    }
}

impl SentimentClassifier for WindowClassifier {
    fn classify(&self, histogram: &TermHistogram) -> Result<ClassificationResult> {
        let freqs = histogram.relative_frequencies(&self.weights)?;
        Ok(self.classify_frequencies(&freqs))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> Strategy {
        Strategy::Window
    }

    fn scale(&self) -> RatingScale {
        self.weights.scale()
    }
}
