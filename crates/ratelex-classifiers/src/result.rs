//! Classification output and intensity discretization

use crate::classifier::Strategy;
use ratelex_core::{Error, Polarity, Rating, RatingScale, Result, Subjectivity};
use serde::Serialize;

/// Five-level ordinal strength of a polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    VeryWeak,
    Weak,
    Normal,
    Strong,
    VeryStrong,
}

impl Intensity {
    /// Weakest first
    pub const LEVELS: [Intensity; 5] = [
        Intensity::VeryWeak,
        Intensity::Weak,
        Intensity::Normal,
        Intensity::Strong,
        Intensity::VeryStrong,
    ];

    /// Map a continuous intensity score onto the ordinal levels.
    ///
    /// The score is rounded to the nearest rating and measured from the
    /// half's boundary rating: `round(score) - (N/2 + 1)` for positive,
    /// `N/2 - round(score)` for negative. The distance must lie in
    /// `0..=N/2 - 1`; on a ten-star scale it is the level index itself, on
    /// other scales it is stretched so both ends of the half map to
    /// `VeryWeak` and `VeryStrong`.
    ///
    /// # Errors
    ///
    /// [`Error::IntensityOutOfRange`] if the rounded score falls outside the
    /// polarity's half. That only happens when a classifier hands over a
    /// score it did not derive from the half, so it is never clamped.
    pub fn discretize(scale: RatingScale, polarity: Polarity, score: f64) -> Result<Self> {
        let rounded = score.round() as i64;
        let boundary = i64::from(scale.boundary_rating(polarity));
        let level = match polarity {
            Polarity::Positive => rounded - boundary,
            Polarity::Negative => boundary - rounded,
        };
        let max = i64::from(scale.half_size()) - 1;
        if !(0..=max).contains(&level) {
            return Err(Error::IntensityOutOfRange { level, max });
        }

        let top = (Self::LEVELS.len() - 1) as i64;
        let index = if max == 0 { top / 2 } else { level * top / max };
        Ok(Self::LEVELS[index as usize])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Normal => "normal",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }
}

/// Share of a term's mass attributed to one polarity half, and the
/// mass-weighted mean rating of that share
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityScore {
    pub polarity: Polarity,
    /// Fraction of the term's normalized mass (nominally 0..=1, not clamped)
    pub score: f64,
    /// Weighted-average rating inside the half, 0.0 when `score` is 0
    pub intensity: f64,
}

impl PolarityScore {
    fn empty(polarity: Polarity) -> Self {
        Self {
            polarity,
            score: 0.0,
            intensity: 0.0,
        }
    }
}

/// One sentiment window: a contiguous rating interval and the share of the
/// term's usage it covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentComponent {
    pub lo: Rating,
    pub hi: Rating,
    /// Member mass divided by the term's total mass
    pub coverage: f64,
    /// Mass-weighted mean rating of the members
    pub avg_rating: f64,
}

impl SentimentComponent {
    pub fn contains(&self, rating: Rating) -> bool {
        (self.lo..=self.hi).contains(&rating)
    }

    /// Number of ratings in the window
    pub fn width(&self) -> Rating {
        self.hi - self.lo + 1
    }

    /// Half containing the rounded average rating
    pub fn polarity(&self, scale: RatingScale) -> Polarity {
        if self.avg_rating.round() <= f64::from(scale.half_size()) {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    pub fn intensity(&self, scale: RatingScale) -> Result<Intensity> {
        Intensity::discretize(scale, self.polarity(scale), self.avg_rating)
    }
}

/// The outcome of classifying one term.
///
/// Threshold classification fills subjectivity and both polarity scores;
/// window classification additionally lists its components. A term without
/// any observed mass yields the neutral result: objective, both scores 0,
/// no components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    strategy: Strategy,
    scale: RatingScale,
    subjectivity: Subjectivity,
    total_mass: f64,
    scores: [PolarityScore; 2],
    components: Vec<SentimentComponent>,
}

impl ClassificationResult {
    /// The neutral result
    pub fn neutral(strategy: Strategy, scale: RatingScale) -> Self {
        Self {
            strategy,
            scale,
            subjectivity: Subjectivity::Objective,
            total_mass: 0.0,
            scores: Polarity::ALL.map(PolarityScore::empty),
            components: Vec::new(),
        }
    }

    pub(crate) fn set_subjectivity(&mut self, subjectivity: Subjectivity) {
        self.subjectivity = subjectivity;
    }

    pub(crate) fn set_total_mass(&mut self, mass: f64) {
        self.total_mass = mass;
    }

    pub(crate) fn set_polarity(&mut self, polarity: Polarity, score: f64, intensity: f64) {
        self.scores[polarity.index()] = PolarityScore {
            polarity,
            score,
            intensity,
        };
    }

    pub(crate) fn push_component(&mut self, component: SentimentComponent) {
        self.components.push(component);
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    pub fn subjectivity(&self) -> Subjectivity {
        self.subjectivity
    }

    pub fn is_subjective(&self) -> bool {
        self.subjectivity == Subjectivity::Subjective
    }

    /// Total normalized mass `S` the scores were computed from
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// No observed mass; every score is the 0.0 sentinel
    pub fn is_degenerate(&self) -> bool {
        self.total_mass <= 0.0
    }

    pub fn scores(&self) -> &[PolarityScore; 2] {
        &self.scores
    }

    pub fn polarity_score(&self, polarity: Polarity) -> f64 {
        self.scores[polarity.index()].score
    }

    pub fn intensity_score(&self, polarity: Polarity) -> f64 {
        self.scores[polarity.index()].intensity
    }

    /// Discretized intensity of a polarity, `None` if the half carries no
    /// dominant mass.
    pub fn intensity(&self, polarity: Polarity) -> Result<Option<Intensity>> {
        let entry = &self.scores[polarity.index()];
        if entry.score <= 0.0 || entry.intensity <= 0.0 {
            return Ok(None);
        }
        Intensity::discretize(self.scale, polarity, entry.intensity).map(Some)
    }

    /// The polarity with the larger score. Exact ties go to
    /// [`Polarity::Negative`], the first entry of [`Polarity::ALL`]; `None`
    /// when neither half has any score.
    pub fn winning_polarity(&self) -> Option<Polarity> {
        let mut best: Option<&PolarityScore> = None;
        for entry in &self.scores {
            if entry.score <= 0.0 {
                continue;
            }
            match best {
                Some(current) if entry.score <= current.score => {}
                _ => best = Some(entry),
            }
        }
        best.map(|entry| entry.polarity)
    }

    /// Sentiment windows in creation order (most frequent rating first)
    pub fn components(&self) -> &[SentimentComponent] {
        &self.components
    }

    /// More than one sentiment window: the term reads differently in
    /// different contexts
    pub fn is_multimodal(&self) -> bool {
        self.components.len() > 1
    }
}
