/// Identifies a specific processor.
///
/// This matches the numeric identifier used by standard tooling of the operating system
/// (e.g. the `cpu3` line in `/proc/stat` belongs to processor 3).
pub type CoreId = u32;

/// Identifies a specific operating system thread.
///
/// On Linux this is the kernel thread ID returned by `gettid()`, not the Rust
/// [`std::thread::ThreadId`], which has no meaning to the operating system.
pub type OsThreadId = u32;
