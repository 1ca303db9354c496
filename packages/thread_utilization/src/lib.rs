#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures which share of a processor's busy time was consumed by one thread over a named
//! interval.
//!
//! Pin a thread to a processor, bracket a region of code with
//! [`UtilizationTracker::start()`] and [`UtilizationTracker::end()`], and the tracker reports
//! the busy time (user plus system time) of the thread as a percentage of the busy time of the
//! processor over the same wall-clock span. A thread that had the processor to itself and never
//! blocked scores close to 100%. Time the processor spent on other threads, interrupts or the
//! kernel on behalf of others lowers the score.
//!
//! The counters come from the Linux procfs (`/proc/stat` for processors and
//! `/proc/{tid}/task/{tid}/stat` for threads). A custom [`CounterSource`] can be supplied via
//! [`TrackerBuilder::counter_source()`].
//!
//! This package is meant for lightweight in-process profiling during development. It is not a
//! sampling profiler and does not support nested intervals under the same name.
//!
//! The core functionality includes:
//! - [`UtilizationTracker`] - Starts and ends named intervals and keeps the results
//! - [`TrackerBuilder`] - Configures the counter source and the end-of-interval thread policy
//! - [`UtilizationRecord`] - The utilization measured over one interval
//! - [`Report`] - A printable snapshot of all results
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::thread;
//!
//! use thread_utilization::UtilizationTracker;
//!
//! # fn main() -> thread_utilization::Result<()> {
//! let tracker = Arc::new(UtilizationTracker::new());
//!
//! let handles: Vec<_> = [1, 2]
//!     .into_iter()
//!     .map(|core_id| {
//!         let tracker = Arc::clone(&tracker);
//!         thread::spawn(move || -> thread_utilization::Result<()> {
//!             // Pin the thread to `core_id` here.
//!             let name = format!("Tester@{core_id}");
//!             tracker.start(name.as_str(), core_id)?;
//!             let mut sum = 0_u64;
//!             for i in 0..50_000_000_u64 {
//!                 sum = sum.wrapping_add(i);
//!             }
//!             std::hint::black_box(sum);
//!             tracker.end(&name, core_id)?;
//!             Ok(())
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().expect("worker thread panicked")?;
//! }
//!
//! tracker.print_to_stdout();
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every failure is returned to the caller. Ending an interval whose processor busy time did not
//! advance fails with [`Error::DegenerateInterval`] instead of producing an infinite or NaN
//! percentage.

mod builder;
mod counters;
mod error;
mod interval;
mod pal;
mod primitive_types;
mod report;
mod results;
mod snapshot_store;
mod tracker;

pub use builder::*;
pub use counters::*;
pub use error::*;
pub use interval::*;
pub use pal::CounterSource;
pub use primitive_types::*;
pub use report::*;
pub use results::UtilizationRecord;
pub use tracker::*;

pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - recorded intervals can no longer be trusted";
