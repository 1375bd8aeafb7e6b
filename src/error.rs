use std::{ffi::OsString, io, path::PathBuf, process::ExitStatus, string::FromUtf8Error};

use glob::{GlobError, PatternError};
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while resolving, running, or chaining invocations.
#[derive(Debug, Error)]
pub enum Error {
    /// The executable could not be found; nothing was spawned.
    #[error("command {program:?} not found in search path ({} entries)", .searched.len())]
    NotFound {
        program: OsString,
        searched: Vec<PathBuf>,
    },
    /// The program ran and exited unsuccessfully.
    #[error("command {program:?} exited with {status} (stderr: {})", .stderr.trim_end())]
    Execution {
        program: OsString,
        status: ExitStatus,
        stderr: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("command output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("invalid glob pattern: {0}")]
    GlobPattern(#[from] PatternError),
    #[error("glob resolution failed: {0}")]
    Glob(#[from] GlobError),
}

impl Error {
    /// Returns `true` when the executable was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Exit code of a failed execution, if the process exited normally.
    ///
    /// Returns `None` for every other variant and for processes killed by a
    /// signal.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Execution { status, .. } => status.code(),
            _ => None,
        }
    }

    /// Name of the program this error refers to, when there is one.
    pub fn program(&self) -> Option<&OsString> {
        match self {
            Error::NotFound { program, .. } | Error::Execution { program, .. } => Some(program),
            _ => None,
        }
    }
}
