//! Named measurement intervals and their counter snapshots.

use crate::{CoreId, OsThreadId, TimeCounters};

/// The counters of one subject (a processor or a thread) captured at the start of an interval
/// and, once the interval has ended, at its end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntervalSnapshot {
    at_start: TimeCounters,
    at_end: Option<TimeCounters>,
}

impl IntervalSnapshot {
    pub(crate) const fn started(at_start: TimeCounters) -> Self {
        Self {
            at_start,
            at_end: None,
        }
    }

    /// The counters captured when the interval was started.
    #[must_use]
    pub const fn at_start(&self) -> TimeCounters {
        self.at_start
    }

    /// The counters captured when the interval was ended, if it has ended.
    #[must_use]
    pub const fn at_end(&self) -> Option<TimeCounters> {
        self.at_end
    }

    /// How much the busy time advanced over the interval, or `None` if it has not ended.
    ///
    /// A counter that went backwards (which the operating system does not do under correct
    /// operation) yields zero. Use [`went_backwards()`](Self::went_backwards) to tell this
    /// apart from a counter that did not advance.
    #[must_use]
    pub fn busy_delta(&self) -> Option<u64> {
        self.at_end
            .map(|at_end| at_end.busy_sum().saturating_sub(self.at_start.busy_sum()))
    }

    /// Whether the busy time at the end of the interval is lower than at its start.
    ///
    /// This indicates a counter anomaly, such as reading a different subject at the end than
    /// at the start. Always `false` before the interval has ended.
    #[must_use]
    pub fn went_backwards(&self) -> bool {
        self.at_end
            .is_some_and(|at_end| at_end.busy_sum() < self.at_start.busy_sum())
    }

    fn complete(&mut self, at_end: TimeCounters) {
        self.at_end = Some(at_end);
    }
}

/// An interval started under a specific name, bracketing work done by one thread on one
/// processor.
///
/// The processor and thread are fixed when the interval is started. Ending the interval fills
/// in the end snapshots of both.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedInterval {
    name: String,
    core_id: CoreId,
    thread_id: OsThreadId,
    core: IntervalSnapshot,
    thread: IntervalSnapshot,
}

impl NamedInterval {
    pub(crate) fn new(
        name: String,
        core_id: CoreId,
        thread_id: OsThreadId,
        core_at_start: TimeCounters,
        thread_at_start: TimeCounters,
    ) -> Self {
        Self {
            name,
            core_id,
            thread_id,
            core: IntervalSnapshot::started(core_at_start),
            thread: IntervalSnapshot::started(thread_at_start),
        }
    }

    /// The name the interval was started under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The processor whose busy time is tracked.
    #[must_use]
    pub const fn core_id(&self) -> CoreId {
        self.core_id
    }

    /// The operating system thread that started the interval.
    #[must_use]
    pub const fn thread_id(&self) -> OsThreadId {
        self.thread_id
    }

    /// Counter snapshots of the processor.
    #[must_use]
    pub const fn core(&self) -> &IntervalSnapshot {
        &self.core
    }

    /// Counter snapshots of the thread.
    #[must_use]
    pub const fn thread(&self) -> &IntervalSnapshot {
        &self.thread
    }

    /// Whether both the processor and the thread snapshots have been ended.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.core.at_end.is_some() && self.thread.at_end.is_some()
    }

    pub(crate) fn complete(&mut self, core_at_end: TimeCounters, thread_at_end: TimeCounters) {
        self.core.complete(core_at_end);
        self.thread.complete(thread_at_end);
    }
}
