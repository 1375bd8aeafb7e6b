use std::{
    ffi::{OsStr, OsString},
    fmt,
    process::ExitStatus,
};

/// Output of a successfully executed invocation.
///
/// `text` has already been normalized according to the invoker's
/// [`Trim`](crate::Trim) mode; stderr is kept as the program wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    program: OsString,
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

impl Captured {
    pub(crate) fn new(program: OsString, status: ExitStatus, stdout: String, stderr: String) -> Self {
        Self {
            program,
            status,
            stdout,
            stderr,
        }
    }

    /// Program name as it was given to the invocation.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Exit status of the finished process.
    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// Exit code; always `Some(0)` for output returned by the invoker.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Whether the process exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Captured stdout.
    pub fn text(&self) -> &str {
        &self.stdout
    }

    /// Captured stderr, decoded lossily.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Splits stdout into lines, dropping `\r` from Windows-style line ends.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Consumes the output, returning stdout.
    pub fn into_text(self) -> String {
        self.stdout
    }
}

impl fmt::Display for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stdout)
    }
}

impl AsRef<str> for Captured {
    fn as_ref(&self) -> &str {
        &self.stdout
    }
}

impl AsRef<OsStr> for Captured {
    fn as_ref(&self) -> &OsStr {
        OsStr::new(&self.stdout)
    }
}

impl From<Captured> for OsString {
    fn from(value: Captured) -> Self {
        value.stdout.into()
    }
}

impl From<Captured> for String {
    fn from(value: Captured) -> Self {
        value.stdout
    }
}
