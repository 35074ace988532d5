//! Core types for ratelex

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// A point on the discrete review-score scale (1 = worst)
pub type Rating = u32;

/// The ordinal rating axis and its split into two polarity halves.
///
/// A scale of size `N` covers ratings `1..=N`. The lower half `1..=N/2` is
/// [`Polarity::Negative`], the upper half `N/2+1..=N` is
/// [`Polarity::Positive`]. Rating-indexed vectors are allocated with
/// [`capacity`](Self::capacity) slots so a rating can index them directly;
/// slot 0 is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RatingScale {
    size: Rating,
}

impl RatingScale {
    /// Lowest rating on every scale
    pub const MIN: Rating = 1;

    /// Largest supported scale. Rating-indexed vectors are sized from it.
    pub const MAX_SIZE: Rating = 1_000;

    /// Create a scale with `size` levels. `size` must be even, at least 2
    /// and at most [`MAX_SIZE`](Self::MAX_SIZE).
    pub fn new(size: Rating) -> Result<Self> {
        if size < 2 {
            return Err(Error::invalid(format!(
                "rating scale needs at least 2 levels, got {size}"
            )));
        }
        if size > Self::MAX_SIZE {
            return Err(Error::invalid(format!(
                "rating scale supports at most {} levels, got {size}",
                Self::MAX_SIZE
            )));
        }
        if size % 2 != 0 {
            return Err(Error::invalid(format!(
                "rating scale size must be even, got {size}"
            )));
        }
        Ok(Self { size })
    }

    /// Total number of rating levels (`N`)
    pub fn size(&self) -> Rating {
        self.size
    }

    /// Highest rating (`N`)
    pub fn max(&self) -> Rating {
        self.size
    }

    /// Slots needed for a vector indexed directly by rating
    pub fn capacity(&self) -> usize {
        self.size as usize + 1
    }

    /// Number of ratings in each polarity half
    pub fn half_size(&self) -> Rating {
        self.size / 2
    }

    /// All ratings, lowest first
    pub fn ratings(&self) -> RangeInclusive<Rating> {
        Self::MIN..=self.size
    }

    pub fn contains(&self, rating: Rating) -> bool {
        (Self::MIN..=self.size).contains(&rating)
    }

    /// Fail with [`Error::RatingOutOfRange`] unless `rating` is on the scale
    pub fn check(&self, rating: Rating) -> Result<()> {
        if self.contains(rating) {
            Ok(())
        } else {
            Err(Error::RatingOutOfRange {
                rating,
                max: self.size,
            })
        }
    }

    /// Ratings belonging to one polarity half
    pub fn half(&self, polarity: Polarity) -> RangeInclusive<Rating> {
        match polarity {
            Polarity::Negative => Self::MIN..=self.half_size(),
            Polarity::Positive => self.half_size() + 1..=self.size,
        }
    }

    /// The half a rating belongs to, or `None` if it is off the scale
    pub fn polarity_of(&self, rating: Rating) -> Option<Polarity> {
        if !self.contains(rating) {
            None
        } else if rating <= self.half_size() {
            Some(Polarity::Negative)
        } else {
            Some(Polarity::Positive)
        }
    }

    /// The rating of a half closest to neutral: `N/2` for negative, `N/2+1`
    /// for positive
    pub fn boundary_rating(&self, polarity: Polarity) -> Rating {
        match polarity {
            Polarity::Negative => self.half_size(),
            Polarity::Positive => self.half_size() + 1,
        }
    }
}

impl Default for RatingScale {
    /// The common ten-star scale
    fn default() -> Self {
        Self { size: 10 }
    }
}

impl TryFrom<u32> for RatingScale {
    type Error = Error;

    fn try_from(size: u32) -> Result<Self> {
        Self::new(size)
    }
}

impl From<RatingScale> for u32 {
    fn from(scale: RatingScale) -> Self {
        scale.size
    }
}

impl fmt::Display for RatingScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1..={}", self.size)
    }
}

/// Sentiment direction of a polarity half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Negative,
    Positive,
}

impl Polarity {
    /// Enumeration order. Ties between halves resolve to the earlier entry.
    pub const ALL: [Polarity; 2] = [Polarity::Negative, Polarity::Positive];

    /// Position in [`Polarity::ALL`]
    pub fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a term's rating distribution is opinion-bearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subjectivity {
    Objective,
    Subjective,
}

impl Subjectivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Objective => "objective",
            Self::Subjective => "subjective",
        }
    }
}

impl fmt::Display for Subjectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
