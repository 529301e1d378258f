//! Comment-weighted sentiment aggregation. Each post's distribution is
//! weighted by its comment count, then the combined vector is
//! renormalized so the four fractions sum to exactly 1.0.

use pulse_core::config::EngineConfig;
use pulse_core::types::{
    AggregatedSentiment, EmojiCounts, FlaggedMessage, RiskCounts, RiskLevel, SentimentDistribution,
    SentimentRecord, SentimentTrend,
};
use tracing::debug;

/// Fold per-post sentiment records into one campaign aggregate.
/// Zero total comments yields the neutral zeroed result, no division.
pub fn aggregate_sentiment(
    records: &[SentimentRecord],
    engine: &EngineConfig,
) -> AggregatedSentiment {
    let total_comments: u64 = records.iter().map(|r| r.comment_count).sum();
    if total_comments == 0 {
        debug!(records = records.len(), "No weighted comments, neutral sentiment");
        return AggregatedSentiment::empty();
    }

    let mut weighted = SentimentDistribution::default();
    for record in records {
        let weight = record.comment_count as f64 / total_comments as f64;
        weighted.positive += weight * record.distribution.positive;
        weighted.neutral += weight * record.distribution.neutral;
        weighted.negative += weight * record.distribution.negative;
        weighted.mixed += weight * record.distribution.mixed;
    }

    // Correct floating-point drift; upstream fractions are not guaranteed
    // to sum to one either. All-zero distributions collapse to neutral.
    let sum = weighted.sum();
    let distribution = if sum > 0.0 {
        SentimentDistribution {
            positive: weighted.positive / sum,
            neutral: weighted.neutral / sum,
            negative: weighted.negative / sum,
            mixed: weighted.mixed / sum,
        }
    } else {
        SentimentDistribution {
            neutral: 1.0,
            ..Default::default()
        }
    };

    // Model certainty, not audience size: unweighted mean.
    let average_confidence =
        records.iter().map(|r| r.confidence).sum::<f64>() / records.len() as f64;

    let mut emoji_counts = EmojiCounts::default();
    for record in records.iter().filter_map(|r| r.emoji.as_ref()) {
        emoji_counts.positive += record.positive;
        emoji_counts.neutral += record.neutral;
        emoji_counts.negative += record.negative;
        emoji_counts.none += record.none;
    }

    let (top_words, rare_words) =
        crate::words::merge_word_counts(records, engine.top_word_limit, engine.rare_word_limit);

    // Each flagged comment is a distinct instance: concatenate, no dedup.
    let flagged: Vec<FlaggedMessage> = records
        .iter()
        .flat_map(|r| r.flagged.iter().cloned())
        .collect();
    let mut risk_counts = RiskCounts::default();
    for message in &flagged {
        match message.risk {
            RiskLevel::Low => risk_counts.low += 1,
            RiskLevel::Medium => risk_counts.medium += 1,
            RiskLevel::High => risk_counts.high += 1,
            RiskLevel::Critical => risk_counts.critical += 1,
        }
    }

    let aggregated = AggregatedSentiment {
        total_comments,
        distribution,
        dominant: distribution.dominant(),
        trend: classify_trend(records, engine.trend_threshold),
        average_confidence,
        emoji: crate::emoji::normalize_emoji(&emoji_counts),
        total_emoji_count: emoji_counts.total(),
        top_words,
        rare_words,
        flagged,
        risk_counts,
    };

    debug!(
        records = records.len(),
        total_comments = aggregated.total_comments,
        dominant = ?aggregated.dominant,
        trend = ?aggregated.trend,
        "Aggregated sentiment"
    );
    aggregated
}

/// Compare the mean positive share of the chronologically first and
/// second halves of the records. Fewer than two records is always
/// `Stable`.
fn classify_trend(records: &[SentimentRecord], threshold: f64) -> SentimentTrend {
    if records.len() < 2 {
        return SentimentTrend::Stable;
    }

    let mut ordered: Vec<&SentimentRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.window_start);

    let mid = ordered.len() / 2;
    let mean_positive = |slice: &[&SentimentRecord]| {
        slice.iter().map(|r| r.distribution.positive).sum::<f64>() / slice.len() as f64
    };

    let diff = mean_positive(&ordered[mid..]) - mean_positive(&ordered[..mid]);
    if diff > threshold {
        SentimentTrend::Improving
    } else if diff < -threshold {
        SentimentTrend::Declining
    } else {
        SentimentTrend::Stable
    }
}
