//! Sentiment Aggregator — folds per-post sentiment analysis outputs into
//! one comment-weighted campaign distribution, with trend classification,
//! emoji percentage normalization, and word/flagged-message merging. The
//! ML labeling itself happens upstream; this crate only aggregates.

pub mod aggregate;
pub mod emoji;
pub mod words;

pub use aggregate::aggregate_sentiment;
pub use emoji::normalize_emoji;
pub use words::merge_word_counts;
