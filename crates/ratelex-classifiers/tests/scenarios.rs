//! End-to-end classification scenarios on a ten-star scale

use ratelex_classifiers::prelude::*;
use ratelex_classifiers::{ThresholdConfig, WindowConfig};
use ratelex_core::Rating;
use std::sync::Arc;

fn uniform() -> Arc<RatingWeights> {
    Arc::new(RatingWeights::uniform(RatingScale::default()))
}

fn histogram(counts: &[(Rating, u64)]) -> TermHistogram {
    TermHistogram::from_counts(RatingScale::default(), counts.iter().copied()).unwrap()
}

fn threshold(objectivity_tolerance: f64, polarity_tolerance: f64) -> ThresholdClassifier {
    ThresholdClassifier::new(
        uniform(),
        ThresholdConfig {
            objectivity_tolerance,
            polarity_tolerance,
        },
    )
    .unwrap()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

/// `{8:1, 9:5, 10:4}`: a clearly positive, strong term
#[test]
fn test_positive_term_scores() {
    let term = histogram(&[(8, 1), (9, 5), (10, 4)]);
    let freqs = term
        .relative_frequencies(&RatingWeights::uniform(RatingScale::default()))
        .unwrap();
    assert_eq!(freqs.sum(), 10.0);
    assert_eq!(freqs.average(), 1.0);

    let classifier = threshold(1.0, 0.0);
    assert_eq!(classifier.dominant_set(&freqs, Polarity::Positive), vec![9, 10]);
    assert!(classifier.dominant_set(&freqs, Polarity::Negative).is_empty());

    let result = classifier.classify(&term).unwrap();
    assert_eq!(result.subjectivity(), Subjectivity::Subjective);
    assert!(close(result.polarity_score(Polarity::Positive), 0.9));
    assert!(close(result.intensity_score(Polarity::Positive), 85.0 / 9.0));
    assert_eq!(result.winning_polarity(), Some(Polarity::Positive));

    // Discretized by level = round(score) - (N/2 + 1): round(9.44) = 9 gives level 3,
    // which is Strong, not VeryStrong
    assert_eq!(
        result.intensity(Polarity::Positive).unwrap(),
        Some(Intensity::Strong)
    );
}

/// `{3:10, 4:10, 7:10, 8:10}`: equal mass in both halves
#[test]
fn test_split_term_ties_to_negative() {
    let term = histogram(&[(3, 10), (4, 10), (7, 10), (8, 10)]);

    for tolerance in [0.5, 1.0, 2.0, 2.5] {
        let result = threshold(tolerance, 0.0).classify(&term).unwrap();
        assert_eq!(result.subjectivity(), Subjectivity::Subjective, "tolerance {tolerance}");
    }

    let result = threshold(1.0, 0.0).classify(&term).unwrap();
    assert_eq!(result.total_mass(), 40.0);
    assert_eq!(result.polarity_score(Polarity::Negative), 0.5);
    assert_eq!(result.polarity_score(Polarity::Positive), 0.5);
    assert_eq!(result.winning_polarity(), Some(Polarity::Negative));

    assert!(close(result.intensity_score(Polarity::Negative), 3.5));
    assert!(close(result.intensity_score(Polarity::Positive), 7.5));
    assert_eq!(
        result.intensity(Polarity::Negative).unwrap(),
        Some(Intensity::Weak)
    );
    assert_eq!(
        result.intensity(Polarity::Positive).unwrap(),
        Some(Intensity::Normal)
    );

    // Above 2.5 the spread of 10 falls under tolerance * avg and the term flattens out
    let result = threshold(2.6, 0.0).classify(&term).unwrap();
    assert_eq!(result.subjectivity(), Subjectivity::Objective);
}

/// Ranks 9, 10, 8, 3, 4, 7, then the 1/2/5/6 tail
#[test]
fn test_context_dependent_term_opens_two_windows() {
    let term = histogram(&[
        (9, 10),
        (10, 9),
        (8, 8),
        (3, 7),
        (4, 7),
        (7, 6),
        (1, 2),
        (2, 2),
        (5, 2),
        (6, 2),
    ]);
    let classifier = WindowClassifier::new(uniform(), WindowConfig::default()).unwrap();
    let result = classifier.classify(&term).unwrap();

    let windows: Vec<(Rating, Rating)> = result.components().iter().map(|c| (c.lo, c.hi)).collect();
    assert_eq!(windows, vec![(7, 10), (3, 4)]);

    let coverage: f64 = result.components().iter().map(|c| c.coverage).sum();
    assert!(close(coverage, 47.0 / 55.0));
    assert!(coverage > ratelex_classifiers::required_coverage(2));

    let scale = RatingScale::default();
    assert_eq!(result.components()[0].polarity(scale), Polarity::Positive);
    assert_eq!(result.components()[1].polarity(scale), Polarity::Negative);
    assert_eq!(
        result.components()[0].intensity(scale).unwrap(),
        Intensity::Strong
    );
}

#[test]
fn test_empty_ratings_are_walked_like_any_other() {
    // Ranks 1, 3, then the empty ratings 2, 4..=10 in ascending order
    let classifier = WindowClassifier::new(uniform(), WindowConfig::default()).unwrap();
    let result = classifier.classify(&histogram(&[(1, 5), (3, 5)])).unwrap();

    let windows: Vec<(Rating, Rating)> = result.components().iter().map(|c| (c.lo, c.hi)).collect();
    assert_eq!(windows, vec![(1, 2), (3, 10)]);

    let components = result.components();
    assert!(close(components[0].coverage, 0.5));
    assert!(close(components[0].avg_rating, 1.0));
    assert!(close(components[1].coverage, 0.5));
    assert!(close(components[1].avg_rating, 3.0));

    assert!(close(result.polarity_score(Polarity::Negative), 1.0));
    assert!(close(result.intensity_score(Polarity::Negative), 2.0));
    assert_eq!(result.polarity_score(Polarity::Positive), 0.0);
}

#[test]
fn test_unimodal_term_has_one_window() {
    let classifier = WindowClassifier::new(uniform(), WindowConfig::default()).unwrap();
    let result = classifier
        .classify(&histogram(&[(8, 1), (9, 5), (10, 4)]))
        .unwrap();

    assert_eq!(result.components().len(), 1);
    assert!(!result.is_multimodal());
    assert!(close(result.components()[0].coverage, 1.0));
    assert!(close(result.components()[0].avg_rating, 93.0 / 10.0));
    assert!(close(result.polarity_score(Polarity::Positive), 1.0));
}

#[test]
fn test_zero_histogram_is_neutral_for_both_strategies() {
    let empty = TermHistogram::new(RatingScale::default());
    let classifiers: Vec<Box<dyn SentimentClassifier>> = vec![
        Box::new(threshold(1.0, 0.1)),
        Box::new(WindowClassifier::new(uniform(), WindowConfig::default()).unwrap()),
    ];

    for classifier in classifiers {
        let result = classifier.classify(&empty).unwrap();
        assert_eq!(result.subjectivity(), Subjectivity::Objective);
        assert_eq!(result.polarity_score(Polarity::Negative), 0.0);
        assert_eq!(result.polarity_score(Polarity::Positive), 0.0);
        assert!(result.components().is_empty());
        assert_eq!(result.winning_polarity(), None);
        assert_eq!(result.strategy(), classifier.strategy());
    }
}

#[test]
fn test_empty_corpus_buckets_are_excluded() {
    // The corpus has no reviews at 4..=7; the term's stray counts there carry no weight
    let scale = RatingScale::default();
    let corpus = CorpusLengthStats::from_totals(
        scale,
        [
            (1, 1_000, 10),
            (2, 1_000, 10),
            (3, 1_000, 10),
            (8, 2_000, 20),
            (9, 2_000, 20),
            (10, 3_000, 30),
        ],
    )
    .unwrap();
    let weights = Arc::new(corpus.rating_weights());
    assert_eq!(weights.get(5), 0.0);

    let term = TermHistogram::from_counts(scale, [(5, 50), (9, 4), (10, 6)]).unwrap();
    let classifier = ThresholdClassifier::new(weights, ThresholdConfig::default()).unwrap();
    let result = classifier.classify(&term).unwrap();

    assert!(result.total_mass().is_finite());
    assert_eq!(result.polarity_score(Polarity::Negative), 0.0);
    assert!(close(result.polarity_score(Polarity::Positive), 1.0));
}

#[test]
fn test_classification_is_idempotent() {
    let term = histogram(&[(1, 3), (2, 9), (5, 1), (9, 4), (10, 2)]);
    let threshold = threshold(0.5, 0.2);
    let window = WindowClassifier::new(uniform(), WindowConfig::default()).unwrap();

    assert_eq!(threshold.classify(&term).unwrap(), threshold.classify(&term).unwrap());
    assert_eq!(window.classify(&term).unwrap(), window.classify(&term).unwrap());
}
