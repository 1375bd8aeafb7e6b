use std::{
    env,
    ffi::OsString,
    io::{self, Read, Write},
    path::PathBuf,
    process::{ChildStderr, ChildStdin, Command as StdCommand, ExitStatus, Output, Stdio},
    thread,
};

use tracing::debug;

use crate::{Captured, Error, Invocation, InvokerBuilder, InvokerConfig, Result, SearchPath, Trim};

type StdinJoinHandle = thread::JoinHandle<io::Result<()>>;
type PipeJoinHandle = thread::JoinHandle<io::Result<Vec<u8>>>;

/// Runs [`Invocation`]s synchronously and captures their output.
///
/// All configuration (search path, working directory, trim mode, extra
/// environment) is fixed when the invoker is built; nothing is looked up from
/// the process environment per call.
#[derive(Debug, Clone)]
pub struct Invoker {
    config: InvokerConfig,
}

impl Default for Invoker {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Invoker {
    /// Creates an invoker from an explicit configuration.
    pub fn new(config: InvokerConfig) -> Self {
        Self { config }
    }

    /// Snapshots `PATH` now and uses the default [`Trim`] mode.
    pub fn from_env() -> Self {
        Self::new(InvokerConfig::default())
    }

    /// Starts an [`InvokerBuilder`] seeded with the ambient defaults.
    pub fn builder() -> InvokerBuilder {
        InvokerBuilder::new()
    }

    /// Returns the configuration fixed at construction.
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Returns the directories searched for executables.
    pub fn search_path(&self) -> &SearchPath {
        &self.config.search_path
    }

    /// Returns how captured stdout is normalized.
    pub fn trim(&self) -> Trim {
        self.config.trim
    }

    /// Runs `program` with `args` and returns its captured stdout.
    ///
    /// ```no_run
    /// let invoker = shcall::Invoker::from_env();
    /// let greeting = invoker.invoke("echo", ["hello"])?;
    /// assert_eq!(greeting.text(), "hello");
    /// # Ok::<(), shcall::Error>(())
    /// ```
    pub fn invoke<I, S>(&self, program: impl Into<OsString>, args: I) -> Result<Captured>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.run(&Invocation::new(program).args(args))
    }

    /// Executes a prepared invocation, failing on a non-zero exit status.
    pub fn run(&self, invocation: &Invocation) -> Result<Captured> {
        let output = self.execute(invocation)?;
        let program = invocation.program().to_os_string();
        if !output.status.success() {
            return Err(Error::Execution {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        let stdout = String::from_utf8(output.stdout)?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        Ok(Captured::new(
            program,
            output.status,
            self.config.trim.apply(stdout),
            stderr,
        ))
    }

    /// Executes a prepared invocation and returns its exit status, whatever it is.
    ///
    /// A missing executable is still an error.
    pub fn status(&self, invocation: &Invocation) -> Result<ExitStatus> {
        Ok(self.execute(invocation)?.status)
    }

    /// Resolves `program` against the configured search path without running it.
    pub fn resolve(&self, program: impl Into<OsString>) -> Result<PathBuf> {
        let cwd = self.working_dir(None)?;
        self.config.search_path.resolve(program.into(), &cwd)
    }

    fn working_dir(&self, invocation_dir: Option<&PathBuf>) -> Result<PathBuf> {
        let base = match &self.config.current_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        Ok(match invocation_dir {
            Some(dir) => base.join(dir),
            None => base,
        })
    }

    fn execute(&self, invocation: &Invocation) -> Result<Output> {
        let cwd = self.working_dir(invocation.dir())?;
        let program = invocation.program();
        let path = self.config.search_path.resolve(program, &cwd)?;

        let mut command = StdCommand::new(&path);
        command
            .args(invocation.get_args())
            .current_dir(&cwd)
            .env("PATH", self.config.search_path.to_os_string()?)
            .envs(self.config.env.iter().cloned())
            .envs(invocation.env_overrides().iter().cloned())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        match invocation.input() {
            Some(_) => command.stdin(Stdio::piped()),
            None => command.stdin(Stdio::null()),
        };

        debug!(
            ?program,
            path = %path.display(),
            args = invocation.get_args().count(),
            "spawning command"
        );
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !path.exists() => {
                return Err(Error::NotFound {
                    program: program.to_os_string(),
                    searched: self.config.search_path.entries().to_vec(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let writer = match (invocation.input(), child.stdin.take()) {
            (Some(data), Some(stdin)) => Some(feed_stdin(stdin, data.to_vec())),
            _ => None,
        };
        let stderr_reader = child.stderr.take().map(drain_pipe);
        let mut stdout = Vec::new();
        let read = match child.stdout.take() {
            Some(mut pipe) => pipe.read_to_end(&mut stdout).map(drop),
            None => Ok(()),
        };
        if read.is_err() {
            // Nobody is draining stdout any more; stop the child so the wait
            // below and the stdin writer cannot hang.
            let _ = child.kill();
        }
        // Reap the child before looking at the pipes or the writer so no
        // failure path leaves a zombie behind.
        let status = child.wait();
        let stderr = join_reader(stderr_reader);
        let written = wait_stdin_writer(writer);
        read?;
        let status = status?;
        let stderr = stderr?;
        written?;

        debug!(?program, code = ?status.code(), "command exited");
        Ok(Output {
            status,
            stdout,
            stderr,
        })
    }
}

fn drain_pipe(mut pipe: ChildStderr) -> PipeJoinHandle {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(handle: Option<PipeJoinHandle>) -> Result<Vec<u8>> {
    let Some(handle) = handle else {
        return Ok(Vec::new());
    };
    handle
        .join()
        .map_err(|err| Error::Io(io::Error::other(format!("stderr reader panicked: {err:?}"))))?
        .map_err(Error::Io)
}

fn feed_stdin(mut stdin: ChildStdin, data: Vec<u8>) -> StdinJoinHandle {
    thread::spawn(move || {
        stdin.write_all(&data)?;
        stdin.flush()
    })
}

fn wait_stdin_writer(handle: Option<StdinJoinHandle>) -> Result<()> {
    let Some(handle) = handle else {
        return Ok(());
    };
    let result = handle
        .join()
        .map_err(|err| Error::Io(io::Error::other(format!("stdin writer panicked: {err:?}"))))?;
    match result {
        // The child is free to exit without reading all of its input.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(Error::Io),
    }
}
