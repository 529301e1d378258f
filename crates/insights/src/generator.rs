//! Rule-based insight generation. Rules are evaluated in a fixed order,
//! emission order is preserved, and the list is capped.

use pulse_core::types::{
    AggregatedSentiment, CampaignRollup, Insight, InsightKind, SentimentTrend,
};
use tracing::debug;
use uuid::Uuid;

/// Comment-positivity share above which the campaign is called out.
const POSITIVE_SHARE_THRESHOLD: f64 = 0.70;
/// Model-confidence level worth surfacing on its own.
const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.9;
/// Emoji volume at which emoji reactions become reportable.
const EMOJI_VOLUME_THRESHOLD: u64 = 50;

fn insight(kind: InsightKind, title: &str, description: String) -> Insight {
    Insight {
        id: Uuid::new_v4(),
        kind,
        title: title.to_string(),
        description,
    }
}

/// Evaluate the insight rules in order against the campaign and
/// sentiment rollups, keeping at most `max_insights`.
pub fn generate_insights(
    campaign: &CampaignRollup,
    sentiment: &AggregatedSentiment,
    max_insights: usize,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    match sentiment.trend {
        SentimentTrend::Improving => insights.push(insight(
            InsightKind::Positive,
            "Sentiment is improving",
            format!(
                "Audience sentiment has turned more positive over the course of the campaign \
                 ({} comments analyzed across {} posts).",
                sentiment.total_comments, campaign.post_count
            ),
        )),
        SentimentTrend::Declining => insights.push(insight(
            InsightKind::Warning,
            "Sentiment is declining",
            format!(
                "Audience sentiment has shifted negative over the course of the campaign \
                 ({} comments analyzed). Review recent posts for the cause.",
                sentiment.total_comments
            ),
        )),
        SentimentTrend::Stable => {}
    }

    if sentiment.average_confidence > HIGH_CONFIDENCE_THRESHOLD {
        insights.push(insight(
            InsightKind::Success,
            "High-confidence analysis",
            format!(
                "The sentiment model reports {:.0}% average confidence, so the distribution \
                 is reliable.",
                sentiment.average_confidence * 100.0
            ),
        ));
    }

    if sentiment.total_emoji_count > EMOJI_VOLUME_THRESHOLD {
        insights.push(insight(
            InsightKind::Info,
            "Strong emoji engagement",
            format!(
                "{} emoji reactions were observed ({}% positive).",
                sentiment.total_emoji_count, sentiment.emoji.positive
            ),
        ));
    }

    if sentiment.risk_counts.elevated() > 0 {
        insights.push(insight(
            InsightKind::Warning,
            "Flagged comments need review",
            format!(
                "{} comments were flagged at high or critical risk.",
                sentiment.risk_counts.elevated()
            ),
        ));
    }

    if sentiment.distribution.positive > POSITIVE_SHARE_THRESHOLD {
        insights.push(insight(
            InsightKind::Success,
            "Overwhelmingly positive reception",
            format!(
                "{:.0}% of weighted comment sentiment is positive across {} views.",
                sentiment.distribution.positive * 100.0,
                campaign.total_views
            ),
        ));
    }

    insights.truncate(max_insights);
    debug!(count = insights.len(), "Generated insights");
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::{RiskCounts, SentimentDistribution, SentimentLabel};

    fn sentiment() -> AggregatedSentiment {
        AggregatedSentiment {
            total_comments: 500,
            distribution: SentimentDistribution {
                positive: 0.5,
                neutral: 0.3,
                negative: 0.15,
                mixed: 0.05,
            },
            dominant: SentimentLabel::Positive,
            trend: SentimentTrend::Stable,
            average_confidence: 0.8,
            emoji: Default::default(),
            total_emoji_count: 0,
            top_words: Vec::new(),
            rare_words: Vec::new(),
            flagged: Vec::new(),
            risk_counts: RiskCounts::default(),
        }
    }

    #[test]
    fn stable_low_signal_campaign_emits_nothing() {
        let insights = generate_insights(&CampaignRollup::default(), &sentiment(), 4);
        assert!(insights.is_empty());
    }

    #[test]
    fn improving_trend_emits_positive_insight() {
        let mut s = sentiment();
        s.trend = SentimentTrend::Improving;
        let insights = generate_insights(&CampaignRollup::default(), &s, 4);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Positive);
    }

    #[test]
    fn declining_trend_emits_warning() {
        let mut s = sentiment();
        s.trend = SentimentTrend::Declining;
        let insights = generate_insights(&CampaignRollup::default(), &s, 4);
        assert_eq!(insights[0].kind, InsightKind::Warning);
    }

    #[test]
    fn rules_emit_in_order_and_cap_at_four() {
        let mut s = sentiment();
        s.trend = SentimentTrend::Improving;
        s.average_confidence = 0.95;
        s.total_emoji_count = 120;
        s.risk_counts = RiskCounts {
            high: 2,
            ..Default::default()
        };
        s.distribution.positive = 0.85;

        // All five rules fire; only the first four survive.
        let insights = generate_insights(&CampaignRollup::default(), &s, 4);
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].kind, InsightKind::Positive);
        assert_eq!(insights[1].kind, InsightKind::Success);
        assert_eq!(insights[2].kind, InsightKind::Info);
        assert_eq!(insights[3].kind, InsightKind::Warning);
    }

    #[test]
    fn positive_share_rule_fires_when_room_remains() {
        let mut s = sentiment();
        s.distribution.positive = 0.75;
        let insights = generate_insights(&CampaignRollup::default(), &s, 4);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert!(insights[0].title.contains("positive reception"));
    }

    #[test]
    fn boundary_values_do_not_fire() {
        let mut s = sentiment();
        s.average_confidence = 0.9;
        s.total_emoji_count = 50;
        s.distribution.positive = 0.70;
        let insights = generate_insights(&CampaignRollup::default(), &s, 4);
        assert!(insights.is_empty());
    }
}
