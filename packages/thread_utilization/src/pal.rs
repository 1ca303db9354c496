//! Platform abstraction layer for reading processor and thread time counters.
//!
//! The tracker only ever sees structured [`TimeCounters`](crate::TimeCounters). Reading and
//! parsing the operating system data happens here, behind the [`CounterSource`] trait, so that
//! tests can substitute scripted counters.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod filesystem;
mod parse;
mod proc_filesystem;
mod procfs;

pub use abstractions::CounterSource;
pub(crate) use facade::CounterSourceFacade;
#[cfg(test)]
pub(crate) use fake::FakeCounterSource;
pub(crate) use filesystem::{Filesystem, FilesystemFacade};
#[cfg(test)]
pub(crate) use filesystem::MockFilesystem;
pub(crate) use proc_filesystem::ProcFilesystem;
pub(crate) use procfs::ProcfsCounterSource;
