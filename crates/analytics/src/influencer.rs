//! Per-influencer rollups. Posts group by lower-cased handle; audience
//! size is deduplicated by taking the max follower snapshot, never a sum.

use std::collections::{BTreeMap, HashMap};

use pulse_core::types::{InfluencerRollup, NormalizedPostMetrics, Platform};
use tracing::debug;

/// Fold normalized posts into one rollup per influencer, ordered by
/// handle.
///
/// `subscriber_counts` maps lower-cased handles to YouTube subscriber
/// counts from the campaign list service. A positive entry replaces the
/// follower value for that influencer everywhere downstream: subscriber
/// and follower counts are different audience metrics and must never be
/// summed into the same total.
pub fn rollup_influencers(
    posts: &[NormalizedPostMetrics],
    subscriber_counts: &HashMap<String, u64>,
) -> Vec<InfluencerRollup> {
    let mut rollups: BTreeMap<String, InfluencerRollup> = BTreeMap::new();
    let mut has_youtube_post: BTreeMap<String, bool> = BTreeMap::new();

    for post in posts {
        let key = post.influencer_handle.to_lowercase();
        let entry = rollups.entry(key.clone()).or_insert_with(|| InfluencerRollup {
            handle: key.clone(),
            display_name: post.influencer_name.clone(),
            post_count: 0,
            likes: 0,
            comments: 0,
            shares: 0,
            video_play_count: 0,
            follower_count: 0,
            engagement_rate_percent: 0.0,
            subscriber_substituted: false,
        });

        entry.post_count += 1;
        entry.likes += post.likes;
        entry.comments += post.comments;
        entry.shares += post.shares;
        entry.video_play_count += post.video_play_count;
        // Follower counts are repeated snapshots of one audience: keep
        // the largest, do not sum.
        entry.follower_count = entry.follower_count.max(post.follower_count);

        if post.platform == Platform::Youtube {
            has_youtube_post.insert(key, true);
        }
    }

    for (key, rollup) in rollups.iter_mut() {
        if has_youtube_post.get(key).copied().unwrap_or(false) {
            if let Some(&subscribers) = subscriber_counts.get(key) {
                if subscribers > 0 {
                    rollup.follower_count = subscribers;
                    rollup.subscriber_substituted = true;
                }
            }
        }

        let engagement = rollup.likes + rollup.comments + rollup.shares;
        rollup.engagement_rate_percent = if rollup.follower_count > 0 {
            engagement as f64 / rollup.follower_count as f64 * 100.0
        } else {
            0.0
        };
    }

    debug!(
        posts = posts.len(),
        influencers = rollups.len(),
        "Rolled up influencers"
    );
    rollups.into_values().collect()
}
