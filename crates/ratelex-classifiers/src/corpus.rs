//! Corpus-wide review length totals and the per-rating weight table
//!
//! Reviews at some ratings are longer or more numerous than at others, so a
//! raw occurrence count over-represents those buckets. The weight of a rating
//! is the grand total review length divided by the total length at that
//! rating; multiplying a term's raw count by it yields the term's relative
//! frequency.

use ratelex_core::{Error, Rating, RatingScale, Result};
use serde::Serialize;
use tracing::debug;

/// Total review length and review count per rating, accumulated once over
/// the whole corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusLengthStats {
    scale: RatingScale,
    lengths: Vec<u64>,
    reviews: Vec<u64>,
    grand_total_length: u64,
    grand_total_reviews: u64,
}

impl CorpusLengthStats {
    /// Create empty statistics for a scale
    pub fn new(scale: RatingScale) -> Self {
        Self {
            scale,
            lengths: vec![0; scale.capacity()],
            reviews: vec![0; scale.capacity()],
            grand_total_length: 0,
            grand_total_reviews: 0,
        }
    }

    /// Build statistics from pre-aggregated `(rating, total_length, review_count)` rows
    pub fn from_totals(
        scale: RatingScale,
        totals: impl IntoIterator<Item = (Rating, u64, u64)>,
    ) -> Result<Self> {
        let mut stats = Self::new(scale);
        for (rating, length, reviews) in totals {
            stats.add_totals(rating, length, reviews)?;
        }
        Ok(stats)
    }

    /// Record one review of `length` words at `rating`
    pub fn add_review(&mut self, rating: Rating, length: u64) -> Result<()> {
        self.add_totals(rating, length, 1)
    }

    /// Record a batch of reviews at `rating` totalling `length` words.
    ///
    /// # Errors
    ///
    /// [`Error::Internal`] if any total would overflow `u64`; the statistics
    /// are left unchanged.
    pub fn add_totals(&mut self, rating: Rating, length: u64, reviews: u64) -> Result<()> {
        self.scale.check(rating)?;
        let slot = rating as usize;
        let overflow = || Error::internal(format!("corpus totals overflow at rating {rating}"));

        let bucket_length = self.lengths[slot].checked_add(length).ok_or_else(overflow)?;
        let bucket_reviews = self.reviews[slot].checked_add(reviews).ok_or_else(overflow)?;
        let grand_length = self.grand_total_length.checked_add(length).ok_or_else(overflow)?;
        let grand_reviews = self.grand_total_reviews.checked_add(reviews).ok_or_else(overflow)?;

        self.lengths[slot] = bucket_length;
        self.reviews[slot] = bucket_reviews;
        self.grand_total_length = grand_length;
        self.grand_total_reviews = grand_reviews;
        Ok(())
    }

    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    /// Accumulated review length at `rating` (0 for ratings off the scale)
    pub fn total_length(&self, rating: Rating) -> u64 {
        self.lengths.get(rating as usize).copied().unwrap_or(0)
    }

    /// Number of reviews at `rating` (0 for ratings off the scale)
    pub fn review_count(&self, rating: Rating) -> u64 {
        self.reviews.get(rating as usize).copied().unwrap_or(0)
    }

    pub fn grand_total_length(&self) -> u64 {
        self.grand_total_length
    }

    pub fn grand_total_reviews(&self) -> u64 {
        self.grand_total_reviews
    }

    /// `grand_total_length / total_length(rating)`.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedWeight`] if the corpus has no text at `rating`,
    /// [`Error::RatingOutOfRange`] if `rating` is off the scale.
    pub fn weight(&self, rating: Rating) -> Result<f64> {
        self.scale.check(rating)?;
        let length = self.total_length(rating);
        if length == 0 {
            return Err(Error::UndefinedWeight { rating });
        }
        Ok(self.grand_total_length as f64 / length as f64)
    }

    /// Weights for every rating on the scale.
    ///
    /// Ratings with no corpus text get weight `0.0`, which removes them from
    /// normalization; sparse corpora routinely have such buckets.
    pub fn rating_weights(&self) -> RatingWeights {
        let mut weights = vec![0.0; self.scale.capacity()];
        for rating in self.scale.ratings() {
            weights[rating as usize] = match self.weight(rating) {
                Ok(weight) => weight,
                Err(e) => {
                    debug!(rating, error = %e, "excluding rating from normalization");
                    0.0
                }
            };
        }
        RatingWeights {
            scale: self.scale,
            weights,
        }
    }
}

/// Read-only per-rating weight table derived from [`CorpusLengthStats`].
///
/// Indexed directly by rating; slot 0 is always zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingWeights {
    scale: RatingScale,
    weights: Vec<f64>,
}

impl RatingWeights {
    /// Every rating weighted 1.0 (raw counts are used as-is)
    pub fn uniform(scale: RatingScale) -> Self {
        let mut weights = vec![1.0; scale.capacity()];
        weights[0] = 0.0;
        Self { scale, weights }
    }

    /// Build a table from weights for ratings `1..=N`, lowest first
    pub fn from_weights(scale: RatingScale, values: &[f64]) -> Result<Self> {
        if values.len() != scale.size() as usize {
            return Err(Error::ScaleMismatch {
                expected: scale.size(),
                actual: values.len() as Rating,
            });
        }
        if let Some(bad) = values.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::invalid(format!(
                "rating weights must be finite and non-negative, got {bad}"
            )));
        }
        let mut weights = Vec::with_capacity(scale.capacity());
        weights.push(0.0);
        weights.extend_from_slice(values);
        Ok(Self { scale, weights })
    }

    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    /// Weight of `rating`, 0.0 for ratings off the scale
    pub fn get(&self, rating: Rating) -> f64 {
        self.weights.get(rating as usize).copied().unwrap_or(0.0)
    }

    /// `(rating, weight)` pairs, lowest rating first
    pub fn iter(&self) -> impl Iterator<Item = (Rating, f64)> + '_ {
        self.scale.ratings().map(move |rating| (rating, self.get(rating)))
    }
}
