//! Publication timeline — posts bucketed by calendar date with a running
//! cumulative-views sum. Posts without a parseable publish timestamp or
//! with zero canonical views are excluded here entirely; they still count
//! in the campaign and influencer rollups.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pulse_core::types::{DateBucket, NormalizedPostMetrics, PostSummary};
use tracing::debug;

/// Bucket the normalized batch into an ascending date series.
pub fn bucket_by_date(posts: &[NormalizedPostMetrics]) -> Vec<DateBucket> {
    let mut buckets: BTreeMap<NaiveDate, DateBucket> = BTreeMap::new();
    let mut excluded = 0usize;

    for post in posts {
        let date = match post.published_at {
            Some(published) if post.video_play_count > 0 => published.date_naive(),
            _ => {
                excluded += 1;
                continue;
            }
        };

        let bucket = buckets.entry(date).or_insert_with(|| DateBucket {
            date,
            post_count: 0,
            views: 0,
            cumulative_views: 0,
            posts: Vec::new(),
        });
        bucket.post_count += 1;
        bucket.views += post.video_play_count;
        bucket.posts.push(PostSummary {
            post_id: post.post_id.clone(),
            influencer_handle: post.influencer_handle.clone(),
            video_play_count: post.video_play_count,
        });
    }

    // BTreeMap iteration is already date-ascending; one prefix-sum pass.
    let mut cumulative = 0u64;
    let mut series: Vec<DateBucket> = buckets.into_values().collect();
    for bucket in series.iter_mut() {
        cumulative += bucket.views;
        bucket.cumulative_views = cumulative;
    }

    debug!(
        buckets = series.len(),
        excluded = excluded,
        "Bucketed publication timeline"
    );
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::Platform;

    fn post(id: &str, published: Option<&str>, views: u64) -> NormalizedPostMetrics {
        NormalizedPostMetrics {
            post_id: id.to_string(),
            influencer_handle: "creator".to_string(),
            influencer_name: "creator".to_string(),
            platform: Platform::Tiktok,
            likes: 0,
            comments: 0,
            shares: 0,
            raw_views: views,
            raw_plays: 0,
            video_play_count: views,
            follower_count: 0,
            engagement_rate_percent: 0.0,
            is_video: true,
            duration_seconds: 0.0,
            collaboration_price: 0.0,
            cost_per_view: 0.0,
            cost_per_engagement: 0.0,
            thumbnail_url: String::new(),
            published_at: published.map(|p| {
                NaiveDate::parse_from_str(p, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
                    .and_utc()
            }),
        }
    }

    #[test]
    fn buckets_ascending_with_cumulative_views() {
        let posts = vec![
            post("p3", Some("2026-02-03"), 300),
            post("p1", Some("2026-02-01"), 100),
            post("p2", Some("2026-02-01"), 150),
        ];
        let series = bucket_by_date(&posts);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date.to_string(), "2026-02-01");
        assert_eq!(series[0].post_count, 2);
        assert_eq!(series[0].views, 250);
        assert_eq!(series[0].cumulative_views, 250);
        assert_eq!(series[1].views, 300);
        assert_eq!(series[1].cumulative_views, 550);
    }

    #[test]
    fn excludes_unparseable_dates_and_zero_view_posts() {
        let posts = vec![
            post("kept", Some("2026-02-01"), 100),
            post("no-date", None, 100),
            post("no-views", Some("2026-02-01"), 0),
        ];
        let series = bucket_by_date(&posts);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].post_count, 1);
        assert_eq!(series[0].posts.len(), 1);
        assert_eq!(series[0].posts[0].post_id, "kept");
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(bucket_by_date(&[]).is_empty());
    }

    #[test]
    fn contributing_posts_retained_for_drilldown() {
        let posts = vec![
            post("a", Some("2026-02-01"), 100),
            post("b", Some("2026-02-01"), 200),
        ];
        let series = bucket_by_date(&posts);
        let ids: Vec<&str> = series[0].posts.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
