use tracing::debug;

use crate::{Captured, Invocation, Invoker, Result};

/// How a stage receives the captured output of the stage before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feed {
    /// Written to the stage's stdin.
    #[default]
    Stdin,
    /// Appended as one trailing argument.
    Argument,
    /// Appended as one argument per non-empty line.
    Lines,
}

/// Invocations evaluated one after another, each fed the previous output.
///
/// This is sugar over nested calls: a stage starts only after the previous
/// one has exited and its output has been fully captured, and the first
/// failure aborts the remaining stages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    first: Invocation,
    stages: Vec<(Invocation, Feed)>,
}

impl Pipeline {
    /// Creates a pipeline that starts with `first`.
    pub fn new(first: Invocation) -> Self {
        Self {
            first,
            stages: Vec::new(),
        }
    }

    /// Adds a stage that reads the previous output from stdin.
    pub fn pipe(self, next: Invocation) -> Self {
        self.then(next, Feed::Stdin)
    }

    /// Adds a stage, choosing how it receives the previous output.
    pub fn then(mut self, next: Invocation, feed: Feed) -> Self {
        self.stages.push((next, feed));
        self
    }

    /// Number of invocations, including the first.
    pub fn stage_count(&self) -> usize {
        self.stages.len() + 1
    }

    /// Executes every stage and returns the last stage's output.
    pub fn run(&self, invoker: &Invoker) -> Result<Captured> {
        debug!(stages = self.stage_count(), "running pipeline");
        let mut output = invoker.run(&self.first)?;
        for (idx, (stage, feed)) in self.stages.iter().enumerate() {
            let stage = stage.clone();
            let stage = match feed {
                Feed::Stdin => stage.stdin_from(&output),
                Feed::Argument => stage.arg(&output),
                Feed::Lines => stage.arg_lines(&output),
            };
            debug!(stage = idx + 1, program = ?stage.program(), ?feed, "pipeline stage");
            output = invoker.run(&stage)?;
        }
        Ok(output)
    }

    /// Executes the pipeline and returns the last stage's stdout.
    pub fn text(&self, invoker: &Invoker) -> Result<String> {
        Ok(self.run(invoker)?.into_text())
    }
}
