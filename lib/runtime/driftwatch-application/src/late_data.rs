use driftwatch_domain::LateDataConfig;
use driftwatch_ports::CounterStorePort;

use crate::best_effort::attempt;

/// Share of late records, in [0, 1]. No records means no lateness.
pub fn late_data_ratio(late_count: u64, total_count: u64) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    (late_count as f64 / total_count as f64).min(1.0)
}

/// Reads the late/total counters and turns them into a ratio.
#[derive(Debug, Clone)]
pub struct LateDataTracker {
    late_counter: String,
    total_counter: String,
}

impl LateDataTracker {
    pub fn new(late_counter: impl Into<String>, total_counter: impl Into<String>) -> Self {
        Self {
            late_counter: late_counter.into(),
            total_counter: total_counter.into(),
        }
    }

    pub fn from_config(config: &LateDataConfig) -> Self {
        Self::new(&config.late_counter, &config.total_counter)
    }

    /// Absent counters default to late = 0 and total = 1. A store failure
    /// is logged and reported as 0.0.
    pub fn measure(&self, counters: &dyn CounterStorePort) -> f64 {
        attempt("read late data counters", || {
            let late = counters.get(&self.late_counter)?.unwrap_or(0);
            let total = counters.get(&self.total_counter)?.unwrap_or(1);
            Ok(late_data_ratio(clamp_count(late), clamp_count(total)))
        })
        .unwrap_or(0.0)
    }
}

impl Default for LateDataTracker {
    fn default() -> Self {
        Self::from_config(&LateDataConfig::default())
    }
}

fn clamp_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use driftwatch_ports::InMemoryCounterStore;

    struct BrokenStore;

    impl CounterStorePort for BrokenStore {
        fn get(&self, _name: &str) -> Result<Option<i64>> {
            anyhow::bail!("connection refused")
        }
    }

    #[test]
    fn test_zero_late_is_zero_for_any_total() {
        for total in [0, 1, 10, u64::MAX] {
            assert_eq!(late_data_ratio(0, total), 0.0);
        }
    }

    #[test]
    fn test_zero_total_is_not_an_error() {
        assert_eq!(late_data_ratio(5, 0), 0.0);
    }

    #[test]
    fn test_ratio_is_clamped() {
        assert_eq!(late_data_ratio(25, 100), 0.25);
        assert_eq!(late_data_ratio(300, 100), 1.0);
    }

    #[test]
    fn test_missing_counters_use_defaults() {
        let store = InMemoryCounterStore::default();
        let tracker = LateDataTracker::default();
        assert_eq!(tracker.measure(&store), 0.0);

        store.set("late_data_count", 1);
        assert_eq!(tracker.measure(&store), 1.0);

        store.set("total_data_count", 4);
        assert_eq!(tracker.measure(&store), 0.25);
    }

    #[test]
    fn test_negative_counts_are_treated_as_zero() {
        let store = InMemoryCounterStore::default();
        store.set("late_data_count", -3);
        store.set("total_data_count", 10);
        assert_eq!(LateDataTracker::default().measure(&store), 0.0);
    }

    #[test]
    fn test_store_failure_yields_zero() {
        assert_eq!(LateDataTracker::default().measure(&BrokenStore), 0.0);
    }
}
