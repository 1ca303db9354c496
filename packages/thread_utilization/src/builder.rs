//! Configuration of a [`UtilizationTracker`].

use std::path::PathBuf;
use std::sync::Arc;

#[cfg(test)]
use crate::pal::FakeCounterSource;
use crate::pal::{CounterSourceFacade, ProcFilesystem, ProcfsCounterSource};
use crate::{CounterSource, UtilizationTracker};

/// Selects which thread's counters are read when an interval is ended.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum EndThreadPolicy {
    /// Read the counters of the thread that started the interval.
    ///
    /// The utilization then describes the thread that did the work, even if a different
    /// thread ends the interval.
    #[default]
    StartThread,

    /// Read the counters of the thread that ends the interval.
    ///
    /// This only differs from [`StartThread`](Self::StartThread) when `end()` is called on a
    /// different thread than `start()`, in which case the start and end snapshots describe
    /// different threads and the result is not meaningful.
    CallingThread,
}

/// Builds a [`UtilizationTracker`] with a non-default configuration.
///
/// # Examples
///
/// ```
/// use thread_utilization::{EndThreadPolicy, UtilizationTracker};
///
/// let tracker = UtilizationTracker::builder()
///     .proc_root("/host/proc")
///     .end_thread(EndThreadPolicy::StartThread)
///     .build();
/// # drop(tracker);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct TrackerBuilder {
    proc_root: Option<PathBuf>,
    end_thread: EndThreadPolicy,
    source: Option<CounterSourceFacade>,
}

impl TrackerBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reads counters from a procfs mounted at `path` instead of `/proc`.
    ///
    /// This is useful in containers that expose the host procfs under a different path.
    /// Ignored if a custom [`counter_source()`](Self::counter_source) is set.
    pub fn proc_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_root = Some(path.into());
        self
    }

    /// Selects which thread's counters are read when an interval is ended.
    ///
    /// Defaults to [`EndThreadPolicy::StartThread`].
    pub fn end_thread(mut self, policy: EndThreadPolicy) -> Self {
        self.end_thread = policy;
        self
    }

    /// Reads counters from a custom source instead of the procfs.
    pub fn counter_source(mut self, source: Arc<dyn CounterSource>) -> Self {
        self.source = Some(CounterSourceFacade::custom(source));
        self
    }

    #[cfg(test)]
    pub(crate) fn fake(mut self, source: FakeCounterSource) -> Self {
        self.source = Some(CounterSourceFacade::fake(source));
        self
    }

    /// Creates the tracker.
    #[must_use]
    pub fn build(self) -> UtilizationTracker {
        let source = self.source.unwrap_or_else(|| {
            let filesystem = self
                .proc_root
                .map_or_else(ProcFilesystem::default, ProcFilesystem::new);

            CounterSourceFacade::procfs(ProcfsCounterSource::new(filesystem))
        });

        UtilizationTracker::with_parts(source, self.end_thread)
    }
}
