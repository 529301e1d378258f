//! Campaign report assembly — wires the pure components (normalizer,
//! rollup aggregators, time-series bucketer, sentiment aggregator,
//! insight generator) into one `CampaignReport` per request.

pub mod report_builder;

pub use report_builder::{ReportBuilder, ReportInput};
