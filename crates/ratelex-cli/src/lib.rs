//! ratelex command-line front end
//!
//! Loads corpus length totals and term histograms from JSON, classifies the
//! terms in parallel and prints one JSON outcome per term.

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{ClassifyArgs, Cli, Commands, WeightsArgs};
