//! Counter source backed by the Linux procfs.

use std::io;

use crate::pal::parse::{parse_core_counters, parse_thread_counters};
use crate::pal::{CounterSource, Filesystem, FilesystemFacade, ProcFilesystem};
use crate::{CoreId, Error, OsThreadId, Result, TimeCounters};

/// Reads counters from the Linux procfs.
#[derive(Clone, Debug)]
pub(crate) struct ProcfsCounterSource {
    filesystem: FilesystemFacade,
}

impl ProcfsCounterSource {
    pub(crate) fn new(filesystem: ProcFilesystem) -> Self {
        Self {
            filesystem: FilesystemFacade::real(filesystem),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_filesystem(filesystem: FilesystemFacade) -> Self {
        Self { filesystem }
    }
}

impl CounterSource for ProcfsCounterSource {
    fn current_thread_id(&self) -> Result<OsThreadId> {
        current_os_thread_id()
    }

    fn core_counters(&self, core_id: CoreId) -> Result<TimeCounters> {
        parse_core_counters(&self.filesystem.get_stat_contents()?, core_id)
    }

    fn thread_counters(&self, thread_id: OsThreadId) -> Result<TimeCounters> {
        parse_thread_counters(&self.filesystem.get_thread_stat_contents(thread_id)?)
    }
}

#[cfg(target_os = "linux")]
#[cfg_attr(coverage_nightly, coverage(off))]
fn current_os_thread_id() -> Result<OsThreadId> {
    // SAFETY: gettid has no safety requirements and cannot fail.
    let thread_id = unsafe { libc::syscall(libc::SYS_gettid) };

    OsThreadId::try_from(thread_id).map_err(|inner| {
        Error::unavailable(
            "gettid",
            io::Error::new(io::ErrorKind::InvalidData, inner),
        )
    })
}

#[cfg(not(target_os = "linux"))]
#[cfg_attr(coverage_nightly, coverage(off))]
fn current_os_thread_id() -> Result<OsThreadId> {
    Err(Error::unavailable(
        "gettid",
        io::Error::new(
            io::ErrorKind::Unsupported,
            "operating system thread IDs are only available on Linux",
        ),
    ))
}
