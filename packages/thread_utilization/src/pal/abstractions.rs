//! Counter source trait definition.

use std::fmt::Debug;

use crate::{CoreId, OsThreadId, Result, TimeCounters};

/// Provides cumulative time counters for processors and operating system threads.
///
/// The default implementation reads the Linux procfs. Implement this trait to supply counters
/// from elsewhere and pass the implementation to
/// [`TrackerBuilder::counter_source()`](crate::TrackerBuilder::counter_source).
///
/// Every call is a fresh query. Implementations are not expected to cache.
///
/// # Examples
///
/// ```
/// use thread_utilization::{CoreId, CounterSource, OsThreadId, Result, TimeCounters};
///
/// #[derive(Debug)]
/// struct Constant;
///
/// impl CounterSource for Constant {
///     fn current_thread_id(&self) -> Result<OsThreadId> {
///         Ok(1)
///     }
///
///     fn core_counters(&self, _core_id: CoreId) -> Result<TimeCounters> {
///         Ok(TimeCounters::new(100, 50))
///     }
///
///     fn thread_counters(&self, _thread_id: OsThreadId) -> Result<TimeCounters> {
///         Ok(TimeCounters::new(10, 5))
///     }
/// }
/// ```
pub trait CounterSource: Debug + Send + Sync + 'static {
    /// Identifies the operating system thread that is calling this method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`](crate::Error::SourceUnavailable) if the platform
    /// cannot identify threads.
    fn current_thread_id(&self) -> Result<OsThreadId>;

    /// Reads the current cumulative counters of a processor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`](crate::Error::SourceUnavailable) if the counter
    /// data cannot be read and [`Error::Parse`](crate::Error::Parse) if the data is malformed
    /// or has no entry for the processor.
    fn core_counters(&self, core_id: CoreId) -> Result<TimeCounters>;

    /// Reads the current cumulative counters of an operating system thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`](crate::Error::SourceUnavailable) if the thread no
    /// longer exists or its data cannot be read and [`Error::Parse`](crate::Error::Parse) if
    /// the data is malformed.
    fn thread_counters(&self, thread_id: OsThreadId) -> Result<TimeCounters>;
}
