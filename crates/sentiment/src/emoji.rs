//! Emoji count → integer percentage normalization. The four integers
//! must always sum to exactly 100 (or all be zero): naive rounding can
//! drift by ±1, so the largest bucket absorbs the residual.

use pulse_core::types::{EmojiCounts, EmojiPercentages};

/// Convert raw emoji counts to integer percentages summing to 100.
/// A zero total yields all zeros.
pub fn normalize_emoji(counts: &EmojiCounts) -> EmojiPercentages {
    let total = counts.total();
    if total == 0 {
        return EmojiPercentages::default();
    }

    let pct = |count: u64| (count as f64 / total as f64 * 100.0).round() as i64;
    let mut values = [
        pct(counts.positive),
        pct(counts.neutral),
        pct(counts.negative),
        pct(counts.none),
    ];

    // Push the rounding residual onto the single largest bucket. Ties go
    // to the first in category order.
    let residual = 100 - values.iter().sum::<i64>();
    if residual != 0 {
        let mut largest = 0;
        for (i, value) in values.iter().enumerate() {
            if *value > values[largest] {
                largest = i;
            }
        }
        values[largest] += residual;
    }

    EmojiPercentages {
        positive: values[0].max(0) as u32,
        neutral: values[1].max(0) as u32,
        negative: values[2].max(0) as u32,
        none: values[3].max(0) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(positive: u64, neutral: u64, negative: u64, none: u64) -> EmojiCounts {
        EmojiCounts {
            positive,
            neutral,
            negative,
            none,
        }
    }

    #[test]
    fn zero_total_yields_all_zero() {
        let pct = normalize_emoji(&counts(0, 0, 0, 0));
        assert_eq!(pct.sum(), 0);
    }

    #[test]
    fn percentages_always_sum_to_exactly_100() {
        let cases = [
            counts(1, 1, 1, 0),
            counts(2, 1, 1, 1),
            counts(33, 33, 33, 1),
            counts(1, 0, 0, 0),
            counts(7, 11, 13, 17),
            counts(999, 1, 0, 0),
        ];
        for case in &cases {
            let pct = normalize_emoji(case);
            assert_eq!(pct.sum(), 100, "failed for {case:?}");
        }
    }

    #[test]
    fn residual_lands_on_largest_bucket() {
        // 1/3 each rounds to 33+33+33 = 99; the largest bucket picks up
        // the missing point. All equal, so the first (positive) wins.
        let pct = normalize_emoji(&counts(1, 1, 1, 0));
        assert_eq!(pct.positive, 34);
        assert_eq!(pct.neutral, 33);
        assert_eq!(pct.negative, 33);
        assert_eq!(pct.none, 0);
    }

    #[test]
    fn single_bucket_takes_the_full_hundred() {
        let pct = normalize_emoji(&counts(0, 0, 42, 0));
        assert_eq!(pct.negative, 100);
        assert_eq!(pct.sum(), 100);
    }
}
