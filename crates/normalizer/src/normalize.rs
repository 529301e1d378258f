//! Raw record → canonical metrics. One pass per record, no cross-record
//! state; the caller may map records in any order.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use pulse_core::raw::{MetricOverride, ProviderPayload, RawPostData, RawPostRecord};
use pulse_core::types::{NormalizedPostMetrics, Platform};
use tracing::debug;

use crate::fallback::{clamp_count, first_count, first_non_empty, first_positive, guarded_ratio};

/// Served when no thumbnail candidate is populated.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/640x640?text=No+Preview";

/// Shape-dependent fields lifted out of the provider payload. Exactly one
/// source shape contributes, resolved by exhaustive match.
#[derive(Debug, Default)]
struct ShapeFields<'a> {
    likes: Option<i64>,
    comments: Option<i64>,
    shares: Option<i64>,
    provider_view: Option<i64>,
    followers: Option<i64>,
    price: Option<f64>,
    thumbnail: Option<&'a str>,
}

fn shape_fields(data: Option<&RawPostData>) -> ShapeFields<'_> {
    match data.map(|d| &d.provider) {
        Some(ProviderPayload::Nested(nested)) => ShapeFields {
            likes: nested.likes,
            comments: nested.comments,
            shares: nested.shares,
            provider_view: nested.views.or(nested.plays),
            followers: nested.followers,
            price: nested.price,
            thumbnail: nested.thumbnail_url.as_deref(),
        },
        Some(ProviderPayload::EngagementList(entries)) => match entries.first() {
            Some(entry) => ShapeFields {
                likes: entry.like_count,
                comments: entry.comment_count,
                shares: entry.share_count,
                provider_view: entry.view_count.or(entry.play_count),
                followers: entry.follower_count,
                price: entry.price,
                thumbnail: entry.display_url.as_deref(),
            },
            None => ShapeFields::default(),
        },
        Some(ProviderPayload::Unrecognized(_)) | None => ShapeFields::default(),
    }
}

/// Parse a publish timestamp: RFC 3339 first, bare `YYYY-MM-DD` as a
/// fallback (midnight UTC). Anything else is `None`; the post still
/// participates in every rollup except the timeline.
fn parse_publish_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn clean_handle(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .trim()
        .trim_start_matches('@')
        .to_string()
}

/// Normalize one raw post record. Total: every input, however degenerate,
/// yields a canonical record with all counts >= 0.
pub fn normalize_post(
    raw: &RawPostRecord,
    overrides: &HashMap<String, MetricOverride>,
) -> NormalizedPostMetrics {
    let shape = shape_fields(raw.data.as_ref());
    let post_id = raw.post_id.clone().unwrap_or_default();

    let likes = first_count(&[shape.likes, raw.likes]);
    let comments = first_count(&[shape.comments, raw.comments]);
    let shares = first_count(&[
        raw.shares,
        raw.data.as_ref().and_then(|d| d.shares),
        shape.shares,
    ]);

    let provider_view = clamp_count(shape.provider_view);
    let post_level_views = clamp_count(raw.views);
    let post_level_plays = clamp_count(raw.plays);

    // A preserved manual edit always beats provider values. Otherwise the
    // provider's own view field is canonical, with post-level plays as the
    // only fallback.
    let video_play_count = match overrides.get(&post_id).and_then(|o| o.video_play_count) {
        Some(preserved) => preserved,
        None if provider_view > 0 => provider_view,
        None => post_level_plays,
    };

    // Legacy value kept solely for backward-compatible engagement-rate
    // math. Never display it, never roll it up.
    let raw_views = provider_view.max(post_level_views).max(post_level_plays);

    let follower_count = first_count(&[shape.followers, raw.followers]);
    let engagement = likes + comments + shares;
    let engagement_rate_percent =
        guarded_ratio(engagement as f64, follower_count as f64) * 100.0;

    let collaboration_price = first_positive(&[
        raw.collaboration_price,
        raw.data.as_ref().and_then(|d| d.price),
        shape.price,
    ]);
    let cost_per_view = guarded_ratio(collaboration_price, video_play_count as f64);
    let cost_per_engagement = guarded_ratio(collaboration_price, engagement as f64);

    // Post-level candidates first, provider-shape thumbnail last. The
    // nested and entry thumbnails share one slot; only one shape is ever
    // present.
    let thumbnail_url = first_non_empty(&[
        raw.thumbnail_url.as_deref(),
        raw.cover_url.as_deref(),
        raw.display_url.as_deref(),
        raw.video_url.as_deref(),
        shape.thumbnail,
    ])
    .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string());

    let handle = clean_handle(raw.influencer_handle.as_deref());
    let influencer_name = raw
        .influencer_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| handle.clone());

    NormalizedPostMetrics {
        post_id,
        influencer_handle: handle,
        influencer_name,
        platform: Platform::detect(raw.platform.as_deref(), raw.post_url.as_deref()),
        likes,
        comments,
        shares,
        raw_views,
        raw_plays: post_level_plays,
        video_play_count,
        follower_count,
        engagement_rate_percent,
        is_video: raw
            .is_video
            .unwrap_or(raw.video_url.is_some() || post_level_plays > 0),
        duration_seconds: raw.duration_seconds.unwrap_or(0.0).max(0.0),
        collaboration_price,
        cost_per_view,
        cost_per_engagement,
        thumbnail_url,
        published_at: parse_publish_timestamp(raw.published_at.as_deref()),
    }
}

/// Normalize a fetched batch in order.
pub fn normalize_posts(
    raws: &[RawPostRecord],
    overrides: &HashMap<String, MetricOverride>,
) -> Vec<NormalizedPostMetrics> {
    let normalized: Vec<NormalizedPostMetrics> = raws
        .iter()
        .map(|raw| normalize_post(raw, overrides))
        .collect();
    debug!(
        raw = raws.len(),
        overridden = overrides.len(),
        "Normalized post batch"
    );
    normalized
}
