//! The utilization tracker.

use std::fmt;

use tracing::{debug, warn};

use crate::pal::CounterSourceFacade;
use crate::results::{Results, utilization_percent};
use crate::snapshot_store::SnapshotStore;
use crate::{
    CoreId, CounterSource, EndThreadPolicy, Error, NamedInterval, Report, Result, TrackerBuilder,
    UtilizationRecord,
};

/// Measures which share of a processor's busy time a thread consumed over named intervals.
///
/// Bracket a region of code with [`start()`](Self::start) and [`end()`](Self::end) on the
/// same name, with the calling thread pinned to the processor passed to both. Ending the
/// interval calculates the busy time of the thread that started it as a percentage of the
/// busy time of the processor, and records the result under the interval name.
///
/// The tracker is thread-safe. Share it by reference or via `Arc` with the threads that do the
/// work. Intervals with different names can be started and ended concurrently. The caller is
/// responsible for ending an interval only after it was started.
///
/// Starting a name again discards the previous interval and result of that name.
///
/// # Examples
///
/// ```no_run
/// use thread_utilization::UtilizationTracker;
///
/// # fn main() -> thread_utilization::Result<()> {
/// let tracker = UtilizationTracker::new();
///
/// // The calling thread is assumed to be pinned to processor 1.
/// tracker.start("checksum", 1)?;
/// let mut sum = 0_u64;
/// for i in 0..10_000_000_u64 {
///     sum = sum.wrapping_add(i);
/// }
/// std::hint::black_box(sum);
/// let record = tracker.end("checksum", 1)?;
///
/// println!("{record}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UtilizationTracker {
    source: CounterSourceFacade,
    end_thread: EndThreadPolicy,

    // Never locked at the same time, so lock order does not matter.
    intervals: SnapshotStore,
    results: Results,
}

impl UtilizationTracker {
    /// Creates a tracker that reads counters from the procfs mounted at `/proc`.
    #[expect(
        clippy::new_without_default,
        reason = "the procfs-backed tracker is not an obvious default for all platforms"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a tracker.
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    pub(crate) fn with_parts(source: CounterSourceFacade, end_thread: EndThreadPolicy) -> Self {
        Self {
            source,
            end_thread,
            intervals: SnapshotStore::new(),
            results: Results::new(),
        }
    }

    /// Starts an interval, capturing the counters of the processor and of the calling thread.
    ///
    /// Any interval or result previously recorded under the same name is discarded, even if
    /// that interval has not been ended yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the counters cannot be read. Nothing is recorded in that case.
    pub fn start(&self, name: impl Into<String>, core_id: CoreId) -> Result<()> {
        let name = name.into();

        let thread_id = self.source.current_thread_id()?;
        let core_at_start = self.source.core_counters(core_id)?;
        let thread_at_start = self.source.thread_counters(thread_id)?;

        debug!(
            interval = %name,
            core_id,
            thread_id,
            core_busy = core_at_start.busy_sum(),
            thread_busy = thread_at_start.busy_sum(),
            "interval started"
        );

        self.intervals.put(NamedInterval::new(
            name.clone(),
            core_id,
            thread_id,
            core_at_start,
            thread_at_start,
        ));

        self.results.remove(&name);

        Ok(())
    }

    /// Ends an interval and records the utilization of the thread that started it.
    ///
    /// The processor counters are read for `core_id`. This is expected to be the same
    /// processor the interval was started with; the record always names the processor given
    /// to [`start()`](Self::start).
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] if no interval was started under this name.
    /// * [`Error::DegenerateInterval`] if the processor busy time did not advance, as the
    ///   utilization is undefined. No result is recorded.
    /// * [`Error::SourceUnavailable`] or [`Error::Parse`] if the counters cannot be read.
    ///   The interval is left unchanged in that case.
    pub fn end(&self, name: &str, core_id: CoreId) -> Result<UtilizationRecord> {
        let started = self.intervals.get(name)?;

        if started.core_id() != core_id {
            warn!(
                interval = %name,
                started_core_id = started.core_id(),
                core_id,
                "interval ended on a different processor than it was started on"
            );
        }

        let thread_id = match self.end_thread {
            EndThreadPolicy::StartThread => started.thread_id(),
            EndThreadPolicy::CallingThread => self.source.current_thread_id()?,
        };

        let core_at_end = self.source.core_counters(core_id)?;
        let thread_at_end = self.source.thread_counters(thread_id)?;

        let interval = self.intervals.update(name, |interval| {
            interval.complete(core_at_end, thread_at_end);
            interval.clone()
        })?;

        // Both are Some because the interval was just completed.
        let core_delta = interval.core().busy_delta().unwrap_or_default();
        let thread_delta = interval.thread().busy_delta().unwrap_or_default();

        if interval.core().went_backwards() {
            warn!(
                interval = %name,
                core_id,
                "processor busy time went backwards during interval"
            );
        }

        if interval.thread().went_backwards() {
            warn!(
                interval = %name,
                thread_id,
                "thread busy time went backwards during interval"
            );
        }

        let Some(percent) = utilization_percent(core_delta, thread_delta) else {
            warn!(
                interval = %name,
                core_id,
                "processor busy time did not advance during interval"
            );
            return Err(Error::DegenerateInterval {
                name: name.to_string(),
            });
        };

        let record = UtilizationRecord::new(
            name.to_string(),
            interval.core_id(),
            interval.thread_id(),
            percent,
        );

        debug!(
            interval = %name,
            core_id = record.core_id(),
            thread_id = record.thread_id(),
            core_delta,
            thread_delta,
            utilization_percent = percent,
            "interval ended"
        );

        self.results.insert(record.clone());

        Ok(record)
    }

    /// Returns the interval most recently started under the given name, including its counter
    /// snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no interval was started under this name.
    pub fn interval(&self, name: &str) -> Result<NamedInterval> {
        self.intervals.get(name)
    }

    /// Returns the utilization recorded when the interval with the given name was last ended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no interval with this name has been ended since it was
    /// last started.
    pub fn get(&self, name: &str) -> Result<UtilizationRecord> {
        self.results.get(name)
    }

    /// Returns all recorded utilizations, in the order their intervals were ended.
    #[must_use]
    pub fn get_all(&self) -> Vec<UtilizationRecord> {
        self.results.get_all()
    }

    /// Creates a report of all recorded utilizations.
    ///
    /// The report is a snapshot that can be sent to other threads.
    #[must_use]
    pub fn to_report(&self) -> Report {
        Report::new(self.results.get_all())
    }

    /// Prints the report of all recorded utilizations to stdout.
    ///
    /// Prints nothing if no interval has been ended.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        self.to_report().print_to_stdout();
    }

    /// Whether no utilization has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl fmt::Display for UtilizationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_report())
    }
}
