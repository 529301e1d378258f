//! Insight Generator — turns the campaign rollup and aggregated
//! sentiment into a short list of ranked qualitative statements.

pub mod generator;

pub use generator::generate_insights;
