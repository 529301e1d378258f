//! Post Metric Normalizer — per-record transform from raw provider
//! records to the canonical `NormalizedPostMetrics`. Never fails: missing
//! or malformed data resolves to zero-filled defaults.

pub mod fallback;
pub mod normalize;

pub use normalize::{normalize_post, normalize_posts, PLACEHOLDER_THUMBNAIL};
