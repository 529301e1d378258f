//! Campaign analytics reducers — per-influencer rollups, campaign-level
//! totals and derived ratios, and the date-bucketed publication timeline.
//! All three are pure folds over the normalized batch.

pub mod campaign;
pub mod influencer;
pub mod timeseries;

pub use campaign::rollup_campaign;
pub use influencer::rollup_influencers;
pub use timeseries::bucket_by_date;
