/// Descriptive statistics over accumulated integer samples.
///
/// All functions are pure free functions. An empty sample sequence yields
/// `None` so the reporting layer can render "no data" instead of dividing
/// by zero or fabricating a number.
use rustc_hash::FxHashMap;

pub fn mean(samples: &[u64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|&s| s as f64).sum();
    Some(sum / samples.len() as f64)
}

/// Middle element for odd lengths; floating-point average of the two middle
/// elements for even lengths, so `median(&[10, 20, 30, 40])` is 25.0 rather
/// than an integer-division artifact.
pub fn median(samples: &[u64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    }
}

/// Most frequent value. Ties resolve to the smallest value among the tied
/// candidates, so the result is independent of accumulation order.
pub fn mode(samples: &[u64]) -> Option<u64> {
    occurrence_counts(samples)
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(value, _)| value)
}

/// Least frequent value, with the same smallest-value tie-break as `mode`.
pub fn anti_mode(samples: &[u64]) -> Option<u64> {
    occurrence_counts(samples)
        .into_iter()
        .min_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(value, _)| value)
}

fn occurrence_counts(samples: &[u64]) -> FxHashMap<u64, usize> {
    let mut counts = FxHashMap::default();
    for &sample in samples {
        *counts.entry(sample).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10, 20, 30]), Some(20.0));
        assert_eq!(mean(&[80]), Some(80.0));
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[30, 10, 20]), Some(20.0));
    }

    #[test]
    fn test_median_even_length_averages_middles() {
        assert_eq!(median(&[10, 20, 30, 40]), Some(25.0));
        // non-integral average survives as a float
        assert_eq!(median(&[10, 15]), Some(12.5));
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode(&[1, 1, 2, 3]), Some(1));
        assert_eq!(mode(&[5, 4, 4, 4, 9]), Some(4));
    }

    #[test]
    fn test_mode_tie_break_is_smallest() {
        // 2 and 7 both occur twice
        assert_eq!(mode(&[7, 2, 7, 2, 9]), Some(2));
    }

    #[test]
    fn test_anti_mode() {
        assert_eq!(anti_mode(&[1, 1, 2, 2, 3]), Some(3));
    }

    #[test]
    fn test_anti_mode_tie_break_is_smallest() {
        // every value occurs once
        assert_eq!(anti_mode(&[9, 4, 7]), Some(4));
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mode(&[]), None);
        assert_eq!(anti_mode(&[]), None);
    }
}
