//! Utilization records of ended intervals.

use std::fmt;
use std::sync::Mutex;

use crate::{CoreId, ERR_POISONED_LOCK, Error, OsThreadId, Result};

/// The utilization measured over one ended interval.
///
/// The utilization is the busy time of the thread as a percentage of the busy time of the
/// processor over the same interval. It is reported exactly as calculated. A value outside
/// 0-100 indicates that the thread was not running exclusively on the tracked processor
/// or that the counters are inconsistent.
#[derive(Clone, Debug, PartialEq)]
pub struct UtilizationRecord {
    name: String,
    core_id: CoreId,
    thread_id: OsThreadId,
    utilization_percent: f64,
}

impl UtilizationRecord {
    pub(crate) fn new(
        name: String,
        core_id: CoreId,
        thread_id: OsThreadId,
        utilization_percent: f64,
    ) -> Self {
        Self {
            name,
            core_id,
            thread_id,
            utilization_percent,
        }
    }

    /// The name of the interval.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The processor whose busy time was tracked.
    #[must_use]
    pub const fn core_id(&self) -> CoreId {
        self.core_id
    }

    /// The operating system thread whose busy time was tracked.
    #[must_use]
    pub const fn thread_id(&self) -> OsThreadId {
        self.thread_id
    }

    /// The thread busy time as a percentage of the processor busy time.
    #[must_use]
    pub const fn utilization_percent(&self) -> f64 {
        self.utilization_percent
    }
}

impl fmt::Display for UtilizationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}% of core {} (thread {})",
            self.name, self.utilization_percent, self.core_id, self.thread_id
        )
    }
}

/// Calculates the thread busy time delta as a percentage of the processor busy time delta.
///
/// Returns `None` if the processor busy time did not advance, as the ratio is undefined.
#[expect(
    clippy::cast_precision_loss,
    reason = "tick counts stay far below 2^52 over any realistic interval"
)]
pub(crate) fn utilization_percent(core_delta: u64, thread_delta: u64) -> Option<f64> {
    if core_delta == 0 {
        return None;
    }

    Some(thread_delta as f64 * 100.0 / core_delta as f64)
}

/// Thread-safe collection of utilization records, one per name, in the order the intervals
/// were ended.
#[derive(Debug)]
pub(crate) struct Results {
    records: Mutex<Vec<UtilizationRecord>>,
}

impl Results {
    pub(crate) fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Stores the record, replacing any record with the same name.
    ///
    /// The record takes the last position regardless of where the replaced record was.
    pub(crate) fn insert(&self, record: UtilizationRecord) {
        let mut records = self.records.lock().expect(ERR_POISONED_LOCK);
        records.retain(|existing| existing.name != record.name);
        records.push(record);
    }

    /// Discards the record with the given name, if any.
    pub(crate) fn remove(&self, name: &str) {
        self.records
            .lock()
            .expect(ERR_POISONED_LOCK)
            .retain(|existing| existing.name != name);
    }

    pub(crate) fn get(&self, name: &str) -> Result<UtilizationRecord> {
        self.records
            .lock()
            .expect(ERR_POISONED_LOCK)
            .iter()
            .find(|record| record.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(name))
    }

    /// A consistent copy of all records, in the order the intervals were ended.
    pub(crate) fn get_all(&self) -> Vec<UtilizationRecord> {
        self.records.lock().expect(ERR_POISONED_LOCK).clone()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn record(name: &str, utilization_percent: f64) -> UtilizationRecord {
        UtilizationRecord::new(name.to_string(), 1, 100, utilization_percent)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn utilization_of_example_interval() {
        // Processor 150 -> 210 ticks, thread 15 -> 36 ticks.
        assert_close(utilization_percent(60, 21).unwrap(), 35.0);
    }

    #[test]
    fn utilization_undefined_without_processor_progress() {
        assert_eq!(utilization_percent(0, 0), None);
        assert_eq!(utilization_percent(0, 7), None);
    }

    #[test]
    fn utilization_is_not_clamped() {
        assert_close(utilization_percent(10, 25).unwrap(), 250.0);
        assert_close(utilization_percent(10, 0).unwrap(), 0.0);
    }

    #[test]
    fn get_missing_is_not_found() {
        let results = Results::new();

        assert!(matches!(results.get("x"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn insert_replaces_same_name_and_moves_to_end() {
        let results = Results::new();
        results.insert(record("a", 10.0));
        results.insert(record("b", 20.0));
        results.insert(record("a", 30.0));

        let all = results.get_all();
        let names: Vec<_> = all.iter().map(UtilizationRecord::name).collect();
        assert_eq!(names, ["b", "a"]);

        assert_close(results.get("a").unwrap().utilization_percent(), 30.0);
    }

    #[test]
    fn remove_discards_only_named_record() {
        let results = Results::new();
        results.insert(record("a", 10.0));
        results.insert(record("b", 20.0));

        results.remove("a");
        results.remove("never-inserted");

        assert!(results.get("a").is_err());
        assert!(results.get("b").is_ok());
        assert!(!results.is_empty());
    }

    #[test]
    fn display_shows_percentage() {
        let record = UtilizationRecord::new("work".to_string(), 2, 4242, 35.0);
        assert_eq!(record.to_string(), "work: 35.00% of core 2 (thread 4242)");
    }

    static_assertions::assert_impl_all!(UtilizationRecord: Send, Sync);
    static_assertions::assert_impl_all!(Results: Send, Sync);
}
