//! Access to the procfs files the counter source reads.
#![cfg_attr(test, expect(
    clippy::struct_field_names,
    reason = "false positive from automock generated code"
))]

use std::fmt::Debug;
#[cfg(test)]
use std::sync::Arc;

use crate::pal::ProcFilesystem;
use crate::{OsThreadId, Result};

/// Linux exposes processor and thread accounting as a virtual filesystem. This trait abstracts
/// the parts of it we read, to allow it to be mocked.
///
/// All I/O is synchronous and blocking because we expect it to hit a fast path in the OS,
/// given the data is never on a real storage device.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Filesystem: Debug + Send + Sync + 'static {
    /// Gets the contents of the `/proc/stat` file.
    ///
    /// This is a plaintext file with one `cpuN` line per processor, the label followed by
    /// whitespace-separated tick counters.
    fn get_stat_contents(&self) -> Result<String>;

    /// Gets the contents of the `/proc/{tid}/task/{tid}/stat` file.
    ///
    /// This is a single line of space-separated fields, the second of which is the
    /// parenthesized thread name.
    fn get_thread_stat_contents(&self, thread_id: OsThreadId) -> Result<String>;
}

/// Enum to hide the different filesystem implementations behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum FilesystemFacade {
    Real(ProcFilesystem),

    #[cfg(test)]
    Mock(Arc<MockFilesystem>),
}

impl FilesystemFacade {
    pub(crate) fn real(filesystem: ProcFilesystem) -> Self {
        Self::Real(filesystem)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockFilesystem) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Filesystem for FilesystemFacade {
    fn get_stat_contents(&self) -> Result<String> {
        match self {
            Self::Real(filesystem) => filesystem.get_stat_contents(),
            #[cfg(test)]
            Self::Mock(mock) => mock.get_stat_contents(),
        }
    }

    fn get_thread_stat_contents(&self, thread_id: OsThreadId) -> Result<String> {
        match self {
            Self::Real(filesystem) => filesystem.get_thread_stat_contents(thread_id),
            #[cfg(test)]
            Self::Mock(mock) => mock.get_thread_stat_contents(thread_id),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for FilesystemFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
