/// Per-category accumulation of request counts and numeric samples.
use crate::event_classifier::CategoryKey;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Append-only accumulator for one category. Grows monotonically for the
/// lifetime of a single parse run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CategoryBucket {
    pub request_count: u64,
    pub dyno_samples: Vec<u64>,
    pub response_time_samples: Vec<u64>,
}

impl CategoryBucket {
    /// Record one event. The request always counts; samples are appended
    /// only when present.
    pub fn record(&mut self, response_time: Option<u64>, dyno_id: Option<u64>) {
        self.request_count += 1;
        if let Some(dyno) = dyno_id {
            self.dyno_samples.push(dyno);
        }
        if let Some(sample) = response_time {
            self.response_time_samples.push(sample);
        }
    }

    /// Fold another bucket in: counts sum, samples concatenate. Statistics
    /// must be recomputed over the merged samples, never averaged across
    /// buckets.
    pub fn merge(&mut self, other: &CategoryBucket) {
        self.request_count += other.request_count;
        self.dyno_samples.extend_from_slice(&other.dyno_samples);
        self.response_time_samples
            .extend_from_slice(&other.response_time_samples);
    }
}

/// Owns one bucket per category plus the running request total. Exclusively
/// owned by the orchestrator for the run's lifetime.
#[derive(Debug, Default)]
pub struct CategoryAggregator {
    buckets: FxHashMap<CategoryKey, CategoryBucket>,
    total_requests: u64,
}

impl CategoryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: CategoryKey, response_time: Option<u64>, dyno_id: Option<u64>) {
        self.buckets.entry(key).or_default().record(response_time, dyno_id);
        self.total_requests += 1;
    }

    pub fn bucket(&self, key: CategoryKey) -> Option<&CategoryBucket> {
        self.buckets.get(&key)
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Response-time samples across every category, in emission order.
    pub fn all_response_times(&self) -> Vec<u64> {
        CategoryKey::ALL
            .iter()
            .filter_map(|key| self.buckets.get(key))
            .flat_map(|bucket| bucket.response_time_samples.iter().copied())
            .collect()
    }

    /// Dyno samples across every category, in emission order.
    pub fn all_dynos(&self) -> Vec<u64> {
        CategoryKey::ALL
            .iter()
            .filter_map(|key| self.buckets.get(key))
            .flat_map(|bucket| bucket.dyno_samples.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_counts_even_without_samples() {
        let mut agg = CategoryAggregator::new();
        agg.record(CategoryKey::UserGet, None, None);
        agg.record(CategoryKey::UserGet, Some(80), Some(3));

        let bucket = agg.bucket(CategoryKey::UserGet).unwrap();
        assert_eq!(bucket.request_count, 2);
        assert_eq!(bucket.response_time_samples, vec![80]);
        assert_eq!(bucket.dyno_samples, vec![3]);
    }

    #[test]
    fn test_total_tracks_all_categories() {
        let mut agg = CategoryAggregator::new();
        agg.record(CategoryKey::GetMessages, Some(15), Some(3));
        agg.record(CategoryKey::Other, None, Some(4));
        agg.record(CategoryKey::UserPost, Some(30), None);

        assert_eq!(agg.total_requests(), 3);
        let sum: u64 = CategoryKey::ALL
            .iter()
            .filter_map(|key| agg.bucket(*key))
            .map(|bucket| bucket.request_count)
            .sum();
        assert_eq!(sum, agg.total_requests());
    }

    #[test]
    fn test_cross_category_sample_views() {
        let mut agg = CategoryAggregator::new();
        agg.record(CategoryKey::GetMessages, Some(15), Some(3));
        agg.record(CategoryKey::UserPost, Some(30), Some(3));
        agg.record(CategoryKey::Other, Some(10), Some(4));

        assert_eq!(agg.all_response_times(), vec![15, 30, 10]);
        assert_eq!(agg.all_dynos(), vec![3, 3, 4]);
    }

    #[test]
    fn test_merge_sums_counts_and_concatenates_samples() {
        let mut left = CategoryBucket::default();
        left.record(Some(10), Some(1));
        left.record(None, None);

        let mut right = CategoryBucket::default();
        right.record(Some(20), Some(2));

        left.merge(&right);
        assert_eq!(left.request_count, 3);
        assert_eq!(left.response_time_samples, vec![10, 20]);
        assert_eq!(left.dyno_samples, vec![1, 2]);
    }
}
