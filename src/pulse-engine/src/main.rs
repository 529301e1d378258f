//! CreatorPulse — influencer campaign analytics aggregation engine.
//!
//! Batch entry point: reads already-fetched campaign JSON snapshots,
//! runs the aggregation pipeline, and writes the report as JSON. All
//! network fetching happens upstream; this binary only transforms.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use pulse_core::config::AppConfig;
use pulse_core::error::{PulseError, PulseResult};
use pulse_core::raw::{InfluencerIdentity, MetricOverride, RawPostRecord};
use pulse_core::types::SentimentRecord;
use pulse_reporting::{ReportBuilder, ReportInput};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pulse-engine")]
#[command(about = "Influencer campaign analytics aggregation engine")]
#[command(version)]
struct Cli {
    /// Campaign identifier stamped onto the report
    #[arg(long, env = "CREATOR_PULSE__CAMPAIGN_ID")]
    campaign_id: String,

    /// JSON file with the fetched raw post records
    #[arg(long)]
    posts: PathBuf,

    /// JSON file with per-post sentiment analysis records
    #[arg(long)]
    sentiment: Option<PathBuf>,

    /// JSON file with influencer identity records (YouTube subscriber lookup)
    #[arg(long)]
    influencers: Option<PathBuf>,

    /// JSON file with preserved manual metric overrides, keyed by post id
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the report JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> PulseResult<T> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        PulseError::InvalidInput(format!("failed to decode {}: {e}", path.display()))
    })
}

fn read_json_or_default<T>(path: Option<&PathBuf>) -> PulseResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match path {
        Some(path) => read_json(path),
        None => Ok(T::default()),
    }
}

fn main() -> PulseResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_engine=info,pulse_reporting=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let posts: Vec<RawPostRecord> = read_json(&cli.posts)?;
    let sentiment: Vec<SentimentRecord> = read_json_or_default(cli.sentiment.as_ref())?;
    let influencers: Vec<InfluencerIdentity> = read_json_or_default(cli.influencers.as_ref())?;
    let overrides: HashMap<String, MetricOverride> =
        read_json_or_default(cli.overrides.as_ref())?;

    info!(
        campaign_id = %cli.campaign_id,
        posts = posts.len(),
        sentiment_records = sentiment.len(),
        "Input batch loaded"
    );

    let report = ReportBuilder::new(config).build(ReportInput {
        campaign_id: cli.campaign_id,
        posts,
        influencers,
        sentiment,
        overrides,
    });

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match cli.out {
        Some(path) => {
            fs::write(&path, rendered)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
