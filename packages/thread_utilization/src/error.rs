use std::io;

use thiserror::Error;

/// Errors that can occur when tracking thread utilization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The counter data for a processor or thread could not be obtained.
    ///
    /// This is expected when the thread has already terminated, in which case its counter
    /// file no longer exists.
    #[error("counter data is unavailable from '{resource}': {source}")]
    SourceUnavailable {
        /// The resource (typically a file path) that could not be read.
        resource: String,

        /// The underlying I/O failure.
        source: io::Error,
    },

    /// The counter data was read but did not have the expected shape.
    #[error("could not parse {what}: {problem}")]
    Parse {
        /// The kind of counter data that was being parsed.
        what: &'static str,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// No interval was started, or no utilization was recorded, under the given name.
    #[error("no interval named '{name}' has been recorded")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The processor busy time did not advance between the start and the end of the interval,
    /// so the utilization ratio is undefined.
    #[error("processor busy time did not advance during interval '{name}'")]
    DegenerateInterval {
        /// The name of the interval.
        name: String,
    },
}

impl Error {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub(crate) fn parse(what: &'static str, problem: impl Into<String>) -> Self {
        Self::Parse {
            what,
            problem: problem.into(),
        }
    }

    pub(crate) fn unavailable(resource: impl Into<String>, source: io::Error) -> Self {
        Self::SourceUnavailable {
            resource: resource.into(),
            source,
        }
    }
}

/// A specialized `Result` type for utilization tracking operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
