//! Word-frequency merging across posts. Recurring words sum their
//! counts; unique words contribute once. Output is a top slice by count
//! and a reversed bottom slice for the rare end.

use std::collections::HashMap;

use pulse_core::types::{SentimentRecord, WordCount};

/// Merge per-post frequency lists into (top, rare) slices.
///
/// Ordering is descending count, ties broken by ascending word, so both
/// slices are deterministic. The rare slice is the bottom of the ranking
/// reversed (least frequent first), capped at `rare_limit`.
pub fn merge_word_counts(
    records: &[SentimentRecord],
    top_limit: usize,
    rare_limit: usize,
) -> (Vec<WordCount>, Vec<WordCount>) {
    let mut merged: HashMap<String, u64> = HashMap::new();
    for record in records {
        for word in &record.words {
            let key = word.word.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            *merged.entry(key).or_insert(0) += word.count;
        }
    }

    let mut ranked: Vec<WordCount> = merged
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));

    let top: Vec<WordCount> = ranked.iter().take(top_limit).cloned().collect();

    let rare_len = rare_limit.min(ranked.len());
    let mut rare: Vec<WordCount> = ranked[ranked.len() - rare_len..].to_vec();
    rare.reverse();

    (top, rare)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(words: &[(&str, u64)]) -> SentimentRecord {
        SentimentRecord {
            words: words
                .iter()
                .map(|(word, count)| WordCount {
                    word: word.to_string(),
                    count: *count,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn recurring_words_sum_counts() {
        let records = vec![
            record(&[("great", 5), ("launch", 2)]),
            record(&[("great", 3), ("video", 1)]),
        ];
        let (top, _) = merge_word_counts(&records, 30, 30);
        assert_eq!(top[0], WordCount { word: "great".into(), count: 8 });
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn merging_is_case_insensitive() {
        let records = vec![record(&[("Great", 2)]), record(&[("great", 2)])];
        let (top, _) = merge_word_counts(&records, 30, 30);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].count, 4);
    }

    #[test]
    fn top_slice_capped_and_ordered() {
        let words: Vec<(String, u64)> = (0..50)
            .map(|i| (format!("word{i:02}"), 50 - i as u64))
            .collect();
        let borrowed: Vec<(&str, u64)> = words.iter().map(|(w, c)| (w.as_str(), *c)).collect();
        let records = vec![record(&borrowed)];

        let (top, rare) = merge_word_counts(&records, 30, 30);
        assert_eq!(top.len(), 30);
        assert_eq!(top[0].count, 50);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));

        // Rare slice is the bottom of the ranking, least frequent first.
        assert_eq!(rare.len(), 30);
        assert_eq!(rare[0].count, 1);
        assert!(rare.windows(2).all(|w| w[0].count <= w[1].count));
    }

    #[test]
    fn small_vocabularies_overlap_top_and_rare() {
        let records = vec![record(&[("alpha", 3), ("beta", 1)])];
        let (top, rare) = merge_word_counts(&records, 30, 30);
        assert_eq!(top.len(), 2);
        assert_eq!(rare.len(), 2);
        assert_eq!(rare[0].word, "beta");
    }

    #[test]
    fn empty_input_yields_empty_slices() {
        let (top, rare) = merge_word_counts(&[], 30, 30);
        assert!(top.is_empty());
        assert!(rare.is_empty());
    }
}
