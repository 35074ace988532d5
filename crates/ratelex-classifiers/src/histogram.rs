//! Per-term rating histograms and their corpus-normalized frequencies

use crate::corpus::RatingWeights;
use ratelex_core::{Error, Rating, RatingScale, Result, Subjectivity};
use std::collections::HashSet;

/// Identifier of a review document, supplied by the indexing pass
pub type DocumentId = u64;

/// Raw occurrence counts of one term (or word sense) per rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermHistogram {
    scale: RatingScale,
    counts: Vec<u64>,
    total: u64,
    documents: HashSet<DocumentId>,
}

impl TermHistogram {
    /// Create an empty histogram
    pub fn new(scale: RatingScale) -> Self {
        Self {
            scale,
            counts: vec![0; scale.capacity()],
            total: 0,
            documents: HashSet::new(),
        }
    }

    /// Build a histogram from `(rating, count)` pairs
    pub fn from_counts(
        scale: RatingScale,
        counts: impl IntoIterator<Item = (Rating, u64)>,
    ) -> Result<Self> {
        let mut histogram = Self::new(scale);
        for (rating, amount) in counts {
            histogram.add_observation(rating, amount)?;
        }
        Ok(histogram)
    }

    /// Add `amount` observations at `rating`.
    ///
    /// # Errors
    ///
    /// [`Error::RatingOutOfRange`] for ratings off the scale,
    /// [`Error::Internal`] if a count would overflow `u64`.
    pub fn add_observation(&mut self, rating: Rating, amount: u64) -> Result<()> {
        self.scale.check(rating)?;
        let slot = rating as usize;
        let overflow = || Error::internal(format!("observation count overflow at rating {rating}"));

        let count = self.counts[slot].checked_add(amount).ok_or_else(overflow)?;
        let total = self.total.checked_add(amount).ok_or_else(overflow)?;
        self.counts[slot] = count;
        self.total = total;
        Ok(())
    }

    /// Record a single occurrence in `document` at `rating`
    pub fn observe(&mut self, rating: Rating, document: DocumentId) -> Result<()> {
        self.add_observation(rating, 1)?;
        self.record_document(document);
        Ok(())
    }

    /// Note that the term appears in `document`
    pub fn record_document(&mut self, document: DocumentId) {
        self.documents.insert(document);
    }

    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    /// Raw count at `rating` (0 for ratings off the scale)
    pub fn raw_count(&self, rating: Rating) -> u64 {
        self.counts.get(rating as usize).copied().unwrap_or(0)
    }

    pub fn total_observations(&self) -> u64 {
        self.total
    }

    pub fn distinct_documents(&self) -> usize {
        self.documents.len()
    }

    /// `raw_count(rating) * weights[rating]`
    pub fn relative_frequency(&self, rating: Rating, weights: &RatingWeights) -> f64 {
        self.raw_count(rating) as f64 * weights.get(rating)
    }

    /// Total normalized mass across all ratings
    pub fn sum(&self, weights: &RatingWeights) -> f64 {
        self.scale
            .ratings()
            .map(|rating| self.relative_frequency(rating, weights))
            .sum()
    }

    /// `sum / N`
    pub fn average(&self, weights: &RatingWeights) -> f64 {
        self.sum(weights) / self.scale.size() as f64
    }

    /// Normalize the whole histogram in one pass.
    ///
    /// # Errors
    ///
    /// [`Error::ScaleMismatch`] if `weights` was built for a different scale.
    pub fn relative_frequencies(&self, weights: &RatingWeights) -> Result<RelativeFrequencies> {
        if weights.scale() != self.scale {
            return Err(Error::ScaleMismatch {
                expected: self.scale.size(),
                actual: weights.scale().size(),
            });
        }

        let mut values = vec![0.0; self.scale.capacity()];
        for rating in self.scale.ratings() {
            values[rating as usize] = self.relative_frequency(rating, weights);
        }
        let sum = values.iter().sum();

        Ok(RelativeFrequencies {
            scale: self.scale,
            values,
            sum,
        })
    }
}

/// Relative frequency per rating for one term, computed once per
/// classification and shared by every strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeFrequencies {
    scale: RatingScale,
    values: Vec<f64>,
    sum: f64,
}

impl RelativeFrequencies {
    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    /// Relative frequency at `rating` (0.0 off the scale)
    pub fn get(&self, rating: Rating) -> f64 {
        self.values.get(rating as usize).copied().unwrap_or(0.0)
    }

    /// Total normalized mass `S`
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// `S / N`
    pub fn average(&self) -> f64 {
        self.sum / self.scale.size() as f64
    }

    /// No observed mass anywhere on the scale
    pub fn is_degenerate(&self) -> bool {
        self.sum <= 0.0
    }

    /// `mass / S`, or 0.0 for a degenerate histogram
    pub fn share(&self, mass: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            mass / self.sum
        }
    }

    /// `(rating, frequency)` pairs, lowest rating first
    pub fn iter(&self) -> impl Iterator<Item = (Rating, f64)> + '_ {
        self.scale.ratings().map(move |rating| (rating, self.get(rating)))
    }

    pub fn max(&self) -> f64 {
        self.iter().map(|(_, f)| f).fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.iter().map(|(_, f)| f).fold(f64::INFINITY, f64::min)
    }

    /// Spread between the most and least frequent rating
    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }

    /// A flat distribution is objective: `range < tolerance * average`.
    /// Degenerate histograms are reported objective.
    pub fn subjectivity(&self, objectivity_tolerance: f64) -> Subjectivity {
        if self.is_degenerate() || self.range() < objectivity_tolerance * self.average() {
            Subjectivity::Objective
        } else {
            Subjectivity::Subjective
        }
    }

    /// All ratings ordered by descending frequency; equal frequencies keep
    /// ascending rating order.
    pub fn ranked(&self) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = self.scale.ratings().collect();
        ratings.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        ratings
    }

    /// Frequency-weighted mean rating over `ratings`, 0.0 if they carry no mass
    pub fn weighted_rating(&self, ratings: impl IntoIterator<Item = Rating>) -> f64 {
        let (mass, moment) = ratings.into_iter().fold((0.0, 0.0), |(mass, moment), rating| {
            let f = self.get(rating);
            (mass + f, moment + f * rating as f64)
        });
        if mass > 0.0 {
            moment / mass
        } else {
            0.0
        }
    }

    /// Summed frequency over `ratings`
    pub fn mass(&self, ratings: impl IntoIterator<Item = Rating>) -> f64 {
        ratings.into_iter().map(|rating| self.get(rating)).sum()
    }
}
