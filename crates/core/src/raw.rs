//! Raw upstream record model. Two incompatible provider schemas feed the
//! engine; neither guarantees field presence, types, or sign. Every field
//! here is optional and numeric values are decoded leniently (numbers,
//! numeric strings, anything else treated as absent).

use serde::{Deserialize, Deserializer, Serialize};

/// One raw per-post engagement record as fetched upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPostRecord {
    pub post_id: Option<String>,
    pub influencer_handle: Option<String>,
    pub influencer_name: Option<String>,
    pub platform: Option<String>,
    pub post_url: Option<String>,

    #[serde(deserialize_with = "lenient_i64")]
    pub likes: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub comments: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub shares: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub views: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub plays: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub followers: Option<i64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub collaboration_price: Option<f64>,

    pub is_video: Option<bool>,
    #[serde(deserialize_with = "lenient_f64")]
    pub duration_seconds: Option<f64>,
    pub published_at: Option<String>,

    pub thumbnail_url: Option<String>,
    pub cover_url: Option<String>,
    pub display_url: Option<String>,
    pub video_url: Option<String>,

    pub data: Option<RawPostData>,
}

/// Provider `data` wrapper: its own price field plus the shape-dependent
/// engagement payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPostData {
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub shares: Option<i64>,
    pub provider: ProviderPayload,
}

/// The two upstream payload shapes, dispatched explicitly. The legacy
/// provider sends a single nested engagement object; the newer one sends
/// an array of engagement objects. Anything else is carried through as
/// `Unrecognized` and normalization falls back to flat post-level fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderPayload {
    EngagementList(Vec<EngagementEntry>),
    Nested(NestedEngagement),
    Unrecognized(serde_json::Value),
}

impl Default for ProviderPayload {
    fn default() -> Self {
        ProviderPayload::Unrecognized(serde_json::Value::Null)
    }
}

/// Legacy nested-object shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedEngagement {
    #[serde(deserialize_with = "lenient_i64")]
    pub likes: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub comments: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub shares: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub views: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub plays: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub followers: Option<i64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
}

/// One element of the array-wrapped engagement-object shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementEntry {
    #[serde(deserialize_with = "lenient_i64")]
    pub like_count: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub comment_count: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub share_count: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub view_count: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub play_count: Option<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub follower_count: Option<i64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    pub display_url: Option<String>,
}

/// A preserved manual metric edit, keyed by post id by the caller. An
/// override survives refetches: it beats every provider value for the
/// fields it sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricOverride {
    pub video_play_count: Option<u64>,
}

/// Influencer identity record from the campaign list service. Only used
/// for the YouTube subscriber-count substitution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluencerIdentity {
    pub handle: Option<String>,
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub youtube_subscribers: Option<i64>,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_i64))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

fn coerce_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
