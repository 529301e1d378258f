//! Campaign-level rollup: totals across every normalized post plus
//! ratios derived from aggregate sums. Per-post ratios are never
//! averaged; small denominators would distort them.

use pulse_core::config::EstimationConfig;
use pulse_core::types::{CampaignRollup, InfluencerRollup, NormalizedPostMetrics};
use tracing::debug;

/// Fold the normalized batch and the influencer rollups into one
/// campaign rollup. Zero posts yields an all-zero rollup.
pub fn rollup_campaign(
    posts: &[NormalizedPostMetrics],
    influencers: &[InfluencerRollup],
    estimation: &EstimationConfig,
) -> CampaignRollup {
    let total_likes: u64 = posts.iter().map(|p| p.likes).sum();
    let total_comments: u64 = posts.iter().map(|p| p.comments).sum();
    let total_shares: u64 = posts.iter().map(|p| p.shares).sum();
    let total_engagement: u64 = posts.iter().map(|p| p.engagement_total()).sum();
    let total_views: u64 = posts.iter().map(|p| p.video_play_count).sum();

    // Once per unique influencer, already subscriber-substituted where
    // applicable. Summing per post would multiply-count each audience.
    let total_followers: u64 = influencers.iter().map(|i| i.follower_count).sum();

    let priced: Vec<f64> = posts
        .iter()
        .map(|p| p.collaboration_price)
        .filter(|price| *price > 0.0)
        .collect();
    let total_spend: f64 = priced.iter().sum();
    let priced_post_count = priced.len() as u64;

    let average_engagement_rate = if total_followers > 0 {
        total_engagement as f64 / total_followers as f64 * 100.0
    } else {
        0.0
    };

    // Ratios from aggregate sums only.
    let cost_per_view = if total_spend > 0.0 && total_views > 0 {
        total_spend / total_views as f64
    } else {
        0.0
    };
    let cost_per_engagement = if total_spend > 0.0 && total_engagement > 0 {
        total_spend / total_engagement as f64
    } else {
        0.0
    };

    let influencer_count = influencers.len() as u64;
    let photo_post_count = posts.iter().filter(|p| !p.is_video).count() as u64;

    let video_impressions =
        (total_views as f64 * estimation.video_impression_factor).round() as u64;
    let photo_impressions = if influencer_count > 0 {
        (photo_post_count as f64 * total_followers as f64 * estimation.photo_engagement_share
            / influencer_count as f64)
            .round() as u64
    } else {
        0
    };
    let estimated_impressions = video_impressions + photo_impressions;

    // Reach can never exceed its share of impressions and never falls
    // below the views actually observed.
    let reach_estimate = (estimated_impressions as f64 * estimation.reach_factor).round() as u64;
    let reach_floor = total_views
        .max((estimated_impressions as f64 * estimation.reach_floor_factor).round() as u64);
    let estimated_reach = reach_estimate.min(reach_floor);

    let rollup = CampaignRollup {
        post_count: posts.len() as u64,
        influencer_count,
        total_likes,
        total_comments,
        total_shares,
        total_engagement,
        total_views,
        total_followers,
        average_engagement_rate,
        total_spend,
        priced_post_count,
        cost_per_view,
        cost_per_engagement,
        video_impressions,
        photo_impressions,
        estimated_impressions,
        estimated_reach,
    };

    debug!(
        posts = rollup.post_count,
        influencers = rollup.influencer_count,
        total_views = rollup.total_views,
        total_spend = rollup.total_spend,
        "Rolled up campaign"
    );
    rollup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::influencer::rollup_influencers;
    use pulse_core::types::Platform;
    use std::collections::HashMap;

    fn post(
        handle: &str,
        followers: u64,
        likes: u64,
        views: u64,
        price: f64,
        is_video: bool,
    ) -> NormalizedPostMetrics {
        NormalizedPostMetrics {
            post_id: format!("{handle}-{views}"),
            influencer_handle: handle.to_string(),
            influencer_name: handle.to_string(),
            platform: Platform::Instagram,
            likes,
            comments: 0,
            shares: 0,
            raw_views: views,
            raw_plays: 0,
            video_play_count: views,
            follower_count: followers,
            engagement_rate_percent: 0.0,
            is_video,
            duration_seconds: 0.0,
            collaboration_price: price,
            cost_per_view: 0.0,
            cost_per_engagement: 0.0,
            thumbnail_url: String::new(),
            published_at: None,
        }
    }

    fn build(posts: &[NormalizedPostMetrics]) -> CampaignRollup {
        let influencers = rollup_influencers(posts, &HashMap::new());
        rollup_campaign(posts, &influencers, &EstimationConfig::default())
    }

    #[test]
    fn empty_input_yields_zeroed_rollup() {
        let rollup = build(&[]);
        assert_eq!(rollup.post_count, 0);
        assert_eq!(rollup.total_views, 0);
        assert_eq!(rollup.average_engagement_rate, 0.0);
        assert_eq!(rollup.cost_per_view, 0.0);
        assert_eq!(rollup.estimated_impressions, 0);
        assert_eq!(rollup.estimated_reach, 0);
    }

    #[test]
    fn cost_per_view_uses_aggregate_sums() {
        // (price=100, views=1000) and (price=0, views=5000):
        // CPV = 100 / 6000, not average(0.1, 0).
        let posts = vec![
            post("a", 1_000, 0, 1_000, 100.0, true),
            post("b", 1_000, 0, 5_000, 0.0, true),
        ];
        let rollup = build(&posts);
        assert!((rollup.cost_per_view - 100.0 / 6_000.0).abs() < 1e-12);
        assert_eq!(rollup.priced_post_count, 1);
        assert!((rollup.total_spend - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn followers_counted_once_per_influencer() {
        let posts = vec![
            post("a", 1_000, 0, 0, 0.0, true),
            post("a", 1_200, 0, 0, 0.0, true),
            post("b", 500, 0, 0, 0.0, true),
        ];
        let rollup = build(&posts);
        assert_eq!(rollup.total_followers, 1_700);
    }

    #[test]
    fn average_engagement_rate_over_unique_followers() {
        let posts = vec![
            post("a", 1_000, 100, 0, 0.0, true),
            post("b", 1_000, 100, 0, 0.0, true),
        ];
        let rollup = build(&posts);
        assert!((rollup.average_engagement_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn impressions_combine_video_and_photo_estimates() {
        let posts = vec![
            post("a", 10_000, 0, 1_000, 0.0, true),
            post("a", 10_000, 0, 0, 0.0, false),
            post("b", 10_000, 0, 0, 0.0, false),
        ];
        let rollup = build(&posts);
        // video: 1000 * 1.3 = 1300
        assert_eq!(rollup.video_impressions, 1_300);
        // photo: 2 posts * 20000 followers * 0.4 / 2 influencers = 8000
        assert_eq!(rollup.photo_impressions, 8_000);
        assert_eq!(rollup.estimated_impressions, 9_300);
    }

    #[test]
    fn reach_is_clamped_between_views_and_impressions_share() {
        let posts = vec![post("a", 100, 0, 10_000, 0.0, true)];
        let rollup = build(&posts);
        let impressions = rollup.estimated_impressions;
        assert_eq!(impressions, 13_000);
        // 0.65 * 13000 = 8450, but raw views (10000) act as the floor cap
        // input: min(8450, max(10000, 6500)) = 8450.
        assert_eq!(rollup.estimated_reach, 8_450);
        assert!(rollup.estimated_reach <= impressions);
    }

    #[test]
    fn photo_impressions_guard_zero_influencers() {
        let rollup = rollup_campaign(&[], &[], &EstimationConfig::default());
        assert_eq!(rollup.photo_impressions, 0);
    }
}
