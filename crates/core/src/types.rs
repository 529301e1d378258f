//! Canonical value model produced by the engine. Everything here is a
//! plain immutable, JSON-serializable structure with no behavior beyond
//! small derived-metric helpers; UI and export collaborators consume
//! these as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Social platform a post was published on, parsed from the raw
/// provider's platform string or the post URL host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
    Facebook,
    Other,
}

impl Platform {
    pub fn detect(platform: Option<&str>, post_url: Option<&str>) -> Self {
        let hint = platform
            .map(|s| s.to_ascii_lowercase())
            .or_else(|| post_url.map(|s| s.to_ascii_lowercase()))
            .unwrap_or_default();

        if hint.contains("youtube") || hint.contains("youtu.be") {
            Platform::Youtube
        } else if hint.contains("instagram") {
            Platform::Instagram
        } else if hint.contains("tiktok") {
            Platform::Tiktok
        } else if hint.contains("facebook") {
            Platform::Facebook
        } else {
            Platform::Other
        }
    }
}

/// Canonical per-post record after normalization. All counts are
/// non-negative; `video_play_count` is the one true "views" value used by
/// every downstream rollup. `raw_views` exists only for backward-compatible
/// engagement-rate math and must never be displayed or summed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPostMetrics {
    pub post_id: String,
    pub influencer_handle: String,
    pub influencer_name: String,
    pub platform: Platform,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub raw_views: u64,
    pub raw_plays: u64,
    pub video_play_count: u64,
    pub follower_count: u64,
    pub engagement_rate_percent: f64,
    pub is_video: bool,
    pub duration_seconds: f64,
    pub collaboration_price: f64,
    pub cost_per_view: f64,
    pub cost_per_engagement: f64,
    pub thumbnail_url: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl NormalizedPostMetrics {
    /// Likes + comments + shares.
    pub fn engagement_total(&self) -> u64 {
        self.likes + self.comments + self.shares
    }
}

/// Deduplicated per-influencer rollup, keyed by lower-cased handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerRollup {
    pub handle: String,
    pub display_name: String,
    pub post_count: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub video_play_count: u64,
    /// Max follower snapshot across the handle's posts, or the YouTube
    /// subscriber count when substituted.
    pub follower_count: u64,
    pub engagement_rate_percent: f64,
    /// True when `follower_count` is a YouTube subscriber count rather
    /// than a follower snapshot.
    pub subscriber_substituted: bool,
}

/// Campaign-level totals and derived ratios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignRollup {
    pub post_count: u64,
    pub influencer_count: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_engagement: u64,
    pub total_views: u64,
    /// Sum of each unique influencer's follower value, once per
    /// influencer.
    pub total_followers: u64,
    pub average_engagement_rate: f64,
    pub total_spend: f64,
    /// Posts that carried a positive collaboration price.
    pub priced_post_count: u64,
    pub cost_per_view: f64,
    pub cost_per_engagement: f64,
    pub video_impressions: u64,
    pub photo_impressions: u64,
    pub estimated_impressions: u64,
    pub estimated_reach: u64,
}

/// One calendar-date bucket of the publication timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub post_count: u64,
    pub views: u64,
    pub cumulative_views: u64,
    pub posts: Vec<PostSummary>,
}

/// Drill-down summary of a post contributing to a date bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub post_id: String,
    pub influencer_handle: String,
    pub video_play_count: u64,
}

// ─── Sentiment ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

/// Fraction vector over the four sentiment categories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub mixed: f64,
}

impl SentimentDistribution {
    pub fn sum(&self) -> f64 {
        self.positive + self.neutral + self.negative + self.mixed
    }

    /// Category with the highest share. Ties resolve in declaration
    /// order: positive, neutral, negative, mixed.
    pub fn dominant(&self) -> SentimentLabel {
        let pairs = [
            (SentimentLabel::Positive, self.positive),
            (SentimentLabel::Neutral, self.neutral),
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Mixed, self.mixed),
        ];
        let mut best = pairs[0];
        for pair in &pairs[1..] {
            if pair.1 > best.1 {
                best = *pair;
            }
        }
        best.0
    }
}

/// Per-post sentiment output from the external ML labeling service.
/// `comment_count` is the aggregation weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentRecord {
    pub post_id: String,
    pub distribution: SentimentDistribution,
    pub dominant: Option<SentimentLabel>,
    pub confidence: f64,
    pub comment_count: u64,
    /// Start of the analysis window; orders records for trend detection.
    pub window_start: Option<DateTime<Utc>>,
    pub emoji: Option<EmojiCounts>,
    pub flagged: Vec<FlaggedMessage>,
    pub words: Vec<WordCount>,
}

/// Raw emoji reaction counts from one post.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub none: u64,
}

impl EmojiCounts {
    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative + self.none
    }
}

/// Integer emoji percentages. Always sums to exactly 100, or to 0 when
/// no emoji were observed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmojiPercentages {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
    pub none: u32,
}

impl EmojiPercentages {
    pub fn sum(&self) -> u32 {
        self.positive + self.neutral + self.negative + self.none
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// A comment flagged by the labeling service. Each flagged comment is a
/// distinct instance; aggregation never dedups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedMessage {
    pub message: String,
    pub author: Option<String>,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTrend {
    Improving,
    Stable,
    Declining,
}

/// Count of flagged messages per risk level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

impl RiskCounts {
    /// Messages at a level that warrants attention.
    pub fn elevated(&self) -> u64 {
        self.high + self.critical
    }
}

/// Campaign-wide sentiment, comment-weighted across posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedSentiment {
    pub total_comments: u64,
    pub distribution: SentimentDistribution,
    pub dominant: SentimentLabel,
    pub trend: SentimentTrend,
    /// Unweighted mean of per-record model confidence.
    pub average_confidence: f64,
    pub emoji: EmojiPercentages,
    pub total_emoji_count: u64,
    pub top_words: Vec<WordCount>,
    pub rare_words: Vec<WordCount>,
    pub flagged: Vec<FlaggedMessage>,
    pub risk_counts: RiskCounts,
}

impl AggregatedSentiment {
    /// Zeroed result for campaigns with no weighted comments.
    pub fn empty() -> Self {
        Self {
            total_comments: 0,
            distribution: SentimentDistribution::default(),
            dominant: SentimentLabel::Neutral,
            trend: SentimentTrend::Stable,
            average_confidence: 0.0,
            emoji: EmojiPercentages::default(),
            total_emoji_count: 0,
            top_words: Vec::new(),
            rare_words: Vec::new(),
            flagged: Vec::new(),
            risk_counts: RiskCounts::default(),
        }
    }
}

// ─── Insights ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Warning,
    Success,
    Info,
}

/// A qualitative statement derived from the campaign and sentiment
/// rollups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

/// The assembled report: everything the UI and export collaborators
/// consume for one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub report_id: Uuid,
    pub campaign_id: String,
    pub posts: Vec<NormalizedPostMetrics>,
    pub influencers: Vec<InfluencerRollup>,
    pub campaign: CampaignRollup,
    pub timeline: Vec<DateBucket>,
    pub sentiment: AggregatedSentiment,
    pub insights: Vec<Insight>,
    pub generated_at: DateTime<Utc>,
}
