//! Builds a full campaign report from one fetched batch. Pure and
//! stateless: every call recomputes everything from its inputs, so
//! concurrent report builds for independent campaigns are inherently
//! safe.

use std::collections::HashMap;

use chrono::Utc;
use pulse_core::config::AppConfig;
use pulse_core::raw::{InfluencerIdentity, MetricOverride, RawPostRecord};
use pulse_core::types::{CampaignReport, SentimentRecord};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Everything the caller fetched for one campaign, handed over as plain
/// values. Upstream fetch failures are the caller's problem; by the time
/// this struct exists the data is final.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportInput {
    pub campaign_id: String,
    pub posts: Vec<RawPostRecord>,
    /// Identity records from the campaign list service, used only for
    /// the YouTube subscriber-count substitution.
    pub influencers: Vec<InfluencerIdentity>,
    pub sentiment: Vec<SentimentRecord>,
    /// Preserved manual metric edits, keyed by post id.
    pub overrides: HashMap<String, MetricOverride>,
}

pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full aggregation pipeline over one campaign batch.
    pub fn build(&self, input: ReportInput) -> CampaignReport {
        info!(
            campaign_id = %input.campaign_id,
            posts = input.posts.len(),
            sentiment_records = input.sentiment.len(),
            overrides = input.overrides.len(),
            "Building campaign report"
        );

        let posts = pulse_normalizer::normalize_posts(&input.posts, &input.overrides);

        let subscriber_counts = subscriber_lookup(&input.influencers);
        let influencers = pulse_analytics::rollup_influencers(&posts, &subscriber_counts);
        let campaign =
            pulse_analytics::rollup_campaign(&posts, &influencers, &self.config.estimation);
        let timeline = pulse_analytics::bucket_by_date(&posts);
        let sentiment = pulse_sentiment::aggregate_sentiment(&input.sentiment, &self.config.engine);
        let insights = pulse_insights::generate_insights(
            &campaign,
            &sentiment,
            self.config.engine.max_insights,
        );

        info!(
            campaign_id = %input.campaign_id,
            influencers = influencers.len(),
            total_views = campaign.total_views,
            timeline_buckets = timeline.len(),
            insights = insights.len(),
            "Campaign report built"
        );

        CampaignReport {
            report_id: Uuid::new_v4(),
            campaign_id: input.campaign_id,
            posts,
            influencers,
            campaign,
            timeline,
            sentiment,
            insights,
            generated_at: Utc::now(),
        }
    }
}

/// Lower-cased handle → positive YouTube subscriber count.
fn subscriber_lookup(identities: &[InfluencerIdentity]) -> HashMap<String, u64> {
    let mut lookup = HashMap::new();
    for identity in identities {
        let Some(handle) = identity.handle.as_deref() else {
            continue;
        };
        if let Some(subscribers) = identity.youtube_subscribers {
            if subscribers > 0 {
                lookup.insert(
                    handle.trim().trim_start_matches('@').to_lowercase(),
                    subscribers as u64,
                );
            }
        }
    }
    lookup
}
