//! Ordered fallback chains. Every priority rule in the normalizer is an
//! explicit candidate list evaluated first-match-wins, so the policy is
//! auditable and testable on its own.

/// First candidate that is present, clamped to zero when negative.
/// Missing everywhere resolves to 0.
pub fn first_count(candidates: &[Option<i64>]) -> u64 {
    for candidate in candidates {
        if let Some(value) = candidate {
            return (*value).max(0) as u64;
        }
    }
    0
}

/// First candidate that is present and strictly positive; 0 otherwise.
/// Used for prices, where a zero entry means "keep looking".
pub fn first_positive(candidates: &[Option<f64>]) -> f64 {
    for candidate in candidates.iter().flatten() {
        if *candidate > 0.0 {
            return *candidate;
        }
    }
    0.0
}

/// First candidate that is present and non-empty after trimming.
pub fn first_non_empty(candidates: &[Option<&str>]) -> Option<String> {
    for candidate in candidates.iter().flatten() {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    None
}

/// Clamp an optional raw count to a non-negative value.
pub fn clamp_count(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

/// Guarded ratio: 0.0 whenever the denominator is not positive.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
