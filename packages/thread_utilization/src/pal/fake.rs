//! Fake counter source for testing.

use std::io;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use foldhash::{HashMap, HashMapExt};

use crate::pal::CounterSource;
use crate::{CoreId, Error, OsThreadId, Result, TimeCounters};

const ERR_POISONED_FAKE: &str = "FakeCounterSource state lock should not be poisoned";

/// Operating system thread IDs handed out to threads that did not set their own.
const FIRST_AUTO_THREAD_ID: OsThreadId = 10_000;

#[derive(Debug)]
struct FakeCounterSourceState {
    core_counters: HashMap<CoreId, TimeCounters>,
    thread_counters: HashMap<OsThreadId, TimeCounters>,
    thread_ids: HashMap<ThreadId, OsThreadId>,
    next_thread_id: OsThreadId,
}

/// Fake implementation of the counter source for testing.
///
/// Tests set the counters that the next reads will return. Multiple clones share the same
/// state, so a test can advance the counters after handing a clone to a tracker.
///
/// Each Rust thread gets a distinct operating system thread ID, assigned on first use unless
/// the thread sets its own via [`set_current_thread_id()`](Self::set_current_thread_id).
/// Reading counters that were never set behaves like the real source does for a missing
/// processor (parse error) or a terminated thread (unavailable).
#[derive(Clone, Debug)]
pub(crate) struct FakeCounterSource {
    state: Arc<Mutex<FakeCounterSourceState>>,
}

impl FakeCounterSource {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeCounterSourceState {
                core_counters: HashMap::new(),
                thread_counters: HashMap::new(),
                thread_ids: HashMap::new(),
                next_thread_id: FIRST_AUTO_THREAD_ID,
            })),
        }
    }

    pub(crate) fn set_core_counters(&self, core_id: CoreId, counters: TimeCounters) {
        self.state
            .lock()
            .expect(ERR_POISONED_FAKE)
            .core_counters
            .insert(core_id, counters);
    }

    pub(crate) fn set_thread_counters(&self, thread_id: OsThreadId, counters: TimeCounters) {
        self.state
            .lock()
            .expect(ERR_POISONED_FAKE)
            .thread_counters
            .insert(thread_id, counters);
    }

    /// Simulates the thread terminating, making its counters unavailable.
    pub(crate) fn remove_thread(&self, thread_id: OsThreadId) {
        self.state
            .lock()
            .expect(ERR_POISONED_FAKE)
            .thread_counters
            .remove(&thread_id);
    }

    /// Sets the operating system thread ID reported for the calling Rust thread.
    pub(crate) fn set_current_thread_id(&self, thread_id: OsThreadId) {
        self.state
            .lock()
            .expect(ERR_POISONED_FAKE)
            .thread_ids
            .insert(thread::current().id(), thread_id);
    }
}

impl CounterSource for FakeCounterSource {
    fn current_thread_id(&self) -> Result<OsThreadId> {
        let mut state = self.state.lock().expect(ERR_POISONED_FAKE);
        let next_thread_id = state.next_thread_id;

        let thread_id = *state
            .thread_ids
            .entry(thread::current().id())
            .or_insert(next_thread_id);

        if thread_id == next_thread_id {
            state.next_thread_id = next_thread_id
                .checked_add(1)
                .expect("fake thread IDs do not run out in tests");
        }

        Ok(thread_id)
    }

    fn core_counters(&self, core_id: CoreId) -> Result<TimeCounters> {
        self.state
            .lock()
            .expect(ERR_POISONED_FAKE)
            .core_counters
            .get(&core_id)
            .copied()
            .ok_or_else(|| Error::parse("processor counters", format!("no 'cpu{core_id}' line")))
    }

    fn thread_counters(&self, thread_id: OsThreadId) -> Result<TimeCounters> {
        self.state
            .lock()
            .expect(ERR_POISONED_FAKE)
            .thread_counters
            .get(&thread_id)
            .copied()
            .ok_or_else(|| {
                Error::unavailable(
                    format!("fake thread {thread_id}"),
                    io::Error::from(io::ErrorKind::NotFound),
                )
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn returns_counters_that_were_set() {
        let source = FakeCounterSource::new();
        source.set_core_counters(1, TimeCounters::new(100, 50));
        source.set_thread_counters(7, TimeCounters::new(10, 5));

        assert_eq!(source.core_counters(1).unwrap(), TimeCounters::new(100, 50));
        assert_eq!(source.thread_counters(7).unwrap(), TimeCounters::new(10, 5));
    }

    #[test]
    fn missing_counters_fail_like_real_source() {
        let source = FakeCounterSource::new();

        assert!(matches!(source.core_counters(1), Err(Error::Parse { .. })));
        assert!(matches!(
            source.thread_counters(7),
            Err(Error::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn removed_thread_is_unavailable() {
        let source = FakeCounterSource::new();
        source.set_thread_counters(7, TimeCounters::new(10, 5));
        source.remove_thread(7);

        assert!(source.thread_counters(7).is_err());
    }

    #[test]
    fn thread_ids_are_stable_per_thread_and_distinct_across_threads() {
        let source = FakeCounterSource::new();

        let first = source.current_thread_id().unwrap();
        assert_eq!(source.current_thread_id().unwrap(), first);

        let other_source = source.clone();
        let other = thread::spawn(move || other_source.current_thread_id().unwrap())
            .join()
            .unwrap();

        assert_ne!(first, other);
    }

    #[test]
    fn explicit_thread_id_wins() {
        let source = FakeCounterSource::new();
        source.set_current_thread_id(55);

        assert_eq!(source.current_thread_id().unwrap(), 55);
    }

    #[test]
    fn shared_state_between_clones() {
        let source1 = FakeCounterSource::new();
        let source2 = source1.clone();

        source1.set_core_counters(0, TimeCounters::new(1, 2));
        assert_eq!(source2.core_counters(0).unwrap(), TimeCounters::new(1, 2));
    }
}
