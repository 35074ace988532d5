//! ratelex Core
//!
//! Core types and error handling shared across ratelex components.
//!
//! This crate provides:
//! - The ordinal rating scale and its split into two polarity halves
//! - Subjectivity and polarity enumerations used by every classifier
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Polarity, Rating, RatingScale, Subjectivity};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Polarity, Rating, RatingScale, Subjectivity};
}
