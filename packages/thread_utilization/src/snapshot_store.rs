//! Storage of in-flight and ended intervals, keyed by name.

use std::sync::Mutex;

use foldhash::{HashMap, HashMapExt};

use crate::{ERR_POISONED_LOCK, Error, NamedInterval, Result};

/// Thread-safe mapping from interval name to the most recent [`NamedInterval`] started under
/// that name.
///
/// Intervals are never removed, only overwritten when a name is started again. All operations
/// hold the lock only for the duration of the map access, never across counter reads.
#[derive(Debug)]
pub(crate) struct SnapshotStore {
    intervals: Mutex<HashMap<String, NamedInterval>>,
}

impl SnapshotStore {
    pub(crate) fn new() -> Self {
        Self {
            intervals: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts the interval, replacing any interval previously stored under the same name.
    pub(crate) fn put(&self, interval: NamedInterval) {
        let mut intervals = self.intervals.lock().expect(ERR_POISONED_LOCK);
        intervals.insert(interval.name().to_string(), interval);
    }

    pub(crate) fn get(&self, name: &str) -> Result<NamedInterval> {
        self.intervals
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(name))
    }

    /// Applies `f` to the stored interval as a single atomic read-modify-write.
    pub(crate) fn update<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut NamedInterval) -> R,
    ) -> Result<R> {
        let mut intervals = self.intervals.lock().expect(ERR_POISONED_LOCK);

        let interval = intervals
            .get_mut(name)
            .ok_or_else(|| Error::not_found(name))?;

        Ok(f(interval))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.intervals.lock().expect(ERR_POISONED_LOCK).len()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::TimeCounters;

    fn interval(name: &str, core_id: u32) -> NamedInterval {
        NamedInterval::new(
            name.to_string(),
            core_id,
            1000,
            TimeCounters::new(1, 1),
            TimeCounters::new(0, 0),
        )
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = SnapshotStore::new();

        let result = store.get("missing");
        assert!(matches!(result, Err(Error::NotFound { name }) if name == "missing"));
    }

    #[test]
    fn put_then_get() {
        let store = SnapshotStore::new();
        store.put(interval("a", 3));

        let stored = store.get("a").unwrap();
        assert_eq!(stored.core_id(), 3);
    }

    #[test]
    fn put_overwrites() {
        let store = SnapshotStore::new();
        store.put(interval("a", 3));
        store.put(interval("a", 7));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().core_id(), 7);
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = SnapshotStore::new();

        let result = store.update("missing", |_| ());
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn update_modifies_stored_interval() {
        let store = SnapshotStore::new();
        store.put(interval("a", 3));

        let completed = store
            .update("a", |interval| {
                interval.complete(TimeCounters::new(5, 5), TimeCounters::new(2, 2));
                interval.is_completed()
            })
            .unwrap();

        assert!(completed);
        assert!(store.get("a").unwrap().is_completed());
    }

    #[test]
    fn concurrent_puts_on_distinct_names_are_all_kept() {
        let store = Arc::new(SnapshotStore::new());

        let handles: Vec<_> = (0..8_u32)
            .map(|core_id| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for round in 0..100 {
                        store.put(interval(&format!("worker-{core_id}"), core_id));
                        store
                            .update(&format!("worker-{core_id}"), |interval| {
                                interval.complete(
                                    TimeCounters::new(round, 0),
                                    TimeCounters::new(0, 0),
                                );
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8);
        for core_id in 0..8_u32 {
            let stored = store.get(&format!("worker-{core_id}")).unwrap();
            assert_eq!(stored.core_id(), core_id);
            assert!(stored.is_completed());
        }
    }

    static_assertions::assert_impl_all!(SnapshotStore: Send, Sync);
}
