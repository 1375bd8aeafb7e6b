use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use crate::{Captured, Pipeline};

/// A single request to run one external program.
///
/// Built with consuming setters and then handed to an
/// [`Invoker`](crate::Invoker) by reference; running it never mutates it, so the
/// same invocation can be executed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    current_dir: Option<PathBuf>,
    stdin: Option<Vec<u8>>,
}

impl Invocation {
    /// Creates a new invocation. Use [`invoke!`](crate::invoke) for a terser helper.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
            stdin: None,
        }
    }

    /// Adds a single argument. Captured output can be passed directly.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Extends the invocation with multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds one argument per non-empty line of a prior invocation's output.
    pub fn arg_lines(mut self, output: &Captured) -> Self {
        self.args
            .extend(output.lines().filter(|line| !line.is_empty()).map(OsString::from));
        self
    }

    /// Sets/overrides an environment variable for this invocation only.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Sets the working directory, overriding the invoker's.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Feeds data into the program's stdin. Without it stdin is closed.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Feeds a prior invocation's output into stdin, restoring the trailing
    /// newline that line-oriented tools expect.
    pub fn stdin_from(self, output: &Captured) -> Self {
        let mut data = output.text().as_bytes().to_vec();
        if !data.is_empty() && !data.ends_with(b"\n") {
            data.push(b'\n');
        }
        self.stdin(data)
    }

    /// Starts a [`Pipeline`] whose next stage reads this output on stdin.
    pub fn pipe(self, next: Invocation) -> Pipeline {
        Pipeline::new(self).pipe(next)
    }

    /// Program name to resolve.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments in the order they will be passed.
    pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsString::as_os_str)
    }

    pub(crate) fn env_overrides(&self) -> &[(OsString, OsString)] {
        &self.env
    }

    pub(crate) fn dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    pub(crate) fn input(&self) -> Option<&[u8]> {
        self.stdin.as_deref()
    }
}
