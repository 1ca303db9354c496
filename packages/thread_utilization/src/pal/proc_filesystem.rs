//! The real procfs, read from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::pal::Filesystem;
use crate::{Error, OsThreadId, Result};

/// The mount point of procfs on a standard Linux system.
pub(crate) const DEFAULT_PROC_ROOT: &str = "/proc";

/// The procfs of the real operating system, optionally mounted somewhere other than `/proc`.
#[derive(Clone, Debug)]
pub(crate) struct ProcFilesystem {
    root: PathBuf,
}

impl ProcFilesystem {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::unavailable(path.display().to_string(), e))
    }
}

impl Default for ProcFilesystem {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl Filesystem for ProcFilesystem {
    fn get_stat_contents(&self) -> Result<String> {
        Self::read(&self.root.join("stat"))
    }

    fn get_thread_stat_contents(&self, thread_id: OsThreadId) -> Result<String> {
        let thread_id = thread_id.to_string();

        Self::read(
            &self
                .root
                .join(&thread_id)
                .join("task")
                .join(&thread_id)
                .join("stat"),
        )
    }
}
