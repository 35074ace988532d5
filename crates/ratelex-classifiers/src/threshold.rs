//! Threshold classifier: subjectivity plus dominant mass per polarity half

use crate::classifier::{SentimentClassifier, Strategy};
use crate::config::ThresholdConfig;
use crate::corpus::RatingWeights;
use crate::histogram::{RelativeFrequencies, TermHistogram};
use crate::result::ClassificationResult;
use ratelex_core::{Polarity, Rating, RatingScale, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// Classifies a term by which ratings of each half rise clearly above the
/// term's average relative frequency.
///
/// With `f` the relative frequencies, `S` their sum and `avg = S / N`:
/// - the term is objective when `max(f) - min(f) < objectivity_tolerance * avg`;
/// - the dominant set of a half holds its ratings with
///   `f > (1 + polarity_tolerance) * avg`;
/// - the polarity score of a half is its dominant mass over `S`, and its
///   intensity score is the dominant mass-weighted mean rating.
pub struct ThresholdClassifier {
    name: String,
    weights: Arc<RatingWeights>,
    config: ThresholdConfig,
}

impl ThresholdClassifier {
    pub fn new(weights: Arc<RatingWeights>, config: ThresholdConfig) -> Result<Self> {
        Self::with_name("threshold", weights, config)
    }

    pub fn with_name(
        name: impl Into<String>,
        weights: Arc<RatingWeights>,
        config: ThresholdConfig,
    ) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        debug!(
            classifier = %name,
            scale = weights.scale().size(),
            objectivity_tolerance = config.objectivity_tolerance,
            polarity_tolerance = config.polarity_tolerance,
            "created threshold classifier"
        );
        Ok(Self {
            name,
            weights,
            config,
        })
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Ratings of `polarity`'s half whose frequency exceeds the dominance bound
    pub fn dominant_set(&self, freqs: &RelativeFrequencies, polarity: Polarity) -> Vec<Rating> {
        let bound = (1.0 + self.config.polarity_tolerance) * freqs.average();
        freqs
            .scale()
            .half(polarity)
            .filter(|&rating| freqs.get(rating) > bound)
            .collect()
    }

    /// Classify pre-normalized frequencies
    pub fn classify_frequencies(&self, freqs: &RelativeFrequencies) -> ClassificationResult {
        let mut result = ClassificationResult::neutral(Strategy::Threshold, freqs.scale());
        if freqs.is_degenerate() {
            debug!(classifier = %self.name, "no observed mass, returning neutral result");
            return result;
        }

        result.set_total_mass(freqs.sum());
        result.set_subjectivity(freqs.subjectivity(self.config.objectivity_tolerance));

        for polarity in Polarity::ALL {
            let dominant = self.dominant_set(freqs, polarity);
            let mass = freqs.mass(dominant.iter().copied());
            let score = freqs.share(mass);
            let intensity = freqs.weighted_rating(dominant.iter().copied());
            trace!(%polarity, ?dominant, score, intensity, "dominant set");
            result.set_polarity(polarity, score, intensity);
        }

        result
    }
}

impl SentimentClassifier for ThresholdClassifier {
    fn classify(&self, histogram: &TermHistogram) -> Result<ClassificationResult> {
        let freqs = histogram.relative_frequencies(&self.weights)?;
        Ok(self.classify_frequencies(&freqs))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> Strategy {
        Strategy::Threshold
    }

    fn scale(&self) -> RatingScale {
        self.weights.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Intensity;
    use ratelex_core::{Error, Subjectivity};

    fn classifier(objectivity_tolerance: f64, polarity_tolerance: f64) -> ThresholdClassifier {
        ThresholdClassifier::new(
            Arc::new(RatingWeights::uniform(RatingScale::default())),
            ThresholdConfig {
                objectivity_tolerance,
                polarity_tolerance,
            },
        )
        .unwrap()
    }

    fn histogram(counts: &[(Rating, u64)]) -> TermHistogram {
        TermHistogram::from_counts(RatingScale::default(), counts.iter().copied()).unwrap()
    }

    #[test]
    fn test_rejects_negative_tolerances() {
        let weights = Arc::new(RatingWeights::uniform(RatingScale::default()));
        let config = ThresholdConfig {
            objectivity_tolerance: -1.0,
            polarity_tolerance: 0.0,
        };
        assert!(matches!(
            ThresholdClassifier::new(weights, config),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_strongly_positive_term() {
        let result = classifier(1.0, 0.0)
            .classify(&histogram(&[(8, 1), (9, 5), (10, 4)]))
            .unwrap();

        assert_eq!(result.total_mass(), 10.0);
        assert_eq!(result.subjectivity(), Subjectivity::Subjective);
        assert!((result.polarity_score(Polarity::Positive) - 0.9).abs() < 1e-12);
        assert!((result.intensity_score(Polarity::Positive) - 85.0 / 9.0).abs() < 1e-12);
        assert_eq!(result.polarity_score(Polarity::Negative), 0.0);
        assert_eq!(result.intensity(Polarity::Negative).unwrap(), None);
        assert_eq!(result.winning_polarity(), Some(Polarity::Positive));
        assert_eq!(
            result.intensity(Polarity::Positive).unwrap(),
            Some(Intensity::Strong)
        );
    }

    #[test]
    fn test_polarity_tolerance_raises_the_bar() {
        // avg = 1.0; with tolerance 4.0 the bound is 5.0 and rating 9 (f = 5) is no longer dominant
        let result = classifier(1.0, 4.0)
            .classify(&histogram(&[(8, 1), (9, 5), (10, 4)]))
            .unwrap();

        assert_eq!(result.polarity_score(Polarity::Positive), 0.0);
        assert_eq!(result.winning_polarity(), None);
    }

    #[test]
    fn test_flat_term_is_objective() {
        let counts: Vec<(Rating, u64)> = (1..=10).map(|r| (r, 7)).collect();
        let result = classifier(0.1, 0.0).classify(&histogram(&counts)).unwrap();

        assert_eq!(result.subjectivity(), Subjectivity::Objective);
        assert_eq!(result.polarity_score(Polarity::Negative), 0.0);
        assert_eq!(result.polarity_score(Polarity::Positive), 0.0);
    }

    #[test]
    fn test_zero_histogram_is_neutral() {
        let result = classifier(1.0, 0.1)
            .classify(&TermHistogram::new(RatingScale::default()))
            .unwrap();

        assert_eq!(result, ClassificationResult::neutral(Strategy::Threshold, RatingScale::default()));
        assert!(result.polarity_score(Polarity::Negative).is_finite());
    }

    #[test]
    fn test_corpus_weights_shift_polarity() {
        // Positive reviews are four times longer, so raw positive counts shrink
        let scale = RatingScale::new(4).unwrap();
        let weights = RatingWeights::from_weights(scale, &[2.0, 2.0, 0.5, 0.5]).unwrap();
        let classifier =
            ThresholdClassifier::new(Arc::new(weights), ThresholdConfig::default()).unwrap();
        let histogram = TermHistogram::from_counts(scale, [(1, 4), (4, 8)]).unwrap();

        // f = [8, 0, 0, 4], S = 12, avg = 3, bound = 3.3
        let result = classifier.classify(&histogram).unwrap();
        assert!((result.polarity_score(Polarity::Negative) - 8.0 / 12.0).abs() < 1e-12);
        assert!((result.polarity_score(Polarity::Positive) - 4.0 / 12.0).abs() < 1e-12);
        assert_eq!(result.winning_polarity(), Some(Polarity::Negative));
    }
}
