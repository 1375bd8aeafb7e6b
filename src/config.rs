use std::{ffi::OsString, path::PathBuf};

use crate::{Invoker, SearchPath};

/// How captured stdout is normalized before it is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trim {
    /// Keep the bytes exactly as the program wrote them.
    Raw,
    /// Drop a single trailing `\n` (or `\r\n`), like `$(...)` drops one line end.
    #[default]
    TrailingNewline,
    /// Drop all leading and trailing whitespace.
    Whitespace,
}

impl Trim {
    pub(crate) fn apply(self, mut text: String) -> String {
        match self {
            Trim::Raw => text,
            Trim::TrailingNewline => {
                if text.ends_with('\n') {
                    text.pop();
                    if text.ends_with('\r') {
                        text.pop();
                    }
                }
                text
            }
            Trim::Whitespace => {
                let trimmed = text.trim();
                if trimmed.len() == text.len() {
                    text
                } else {
                    trimmed.to_string()
                }
            }
        }
    }
}

/// Settings fixed for the lifetime of an [`Invoker`].
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Directories searched for executables, captured once.
    pub search_path: SearchPath,
    /// Working directory for children; `None` means the parent's directory.
    pub current_dir: Option<PathBuf>,
    /// Normalization applied to captured stdout.
    pub trim: Trim,
    /// Variables added to every child's environment.
    pub env: Vec<(OsString, OsString)>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            search_path: SearchPath::from_env(),
            current_dir: None,
            trim: Trim::default(),
            env: Vec::new(),
        }
    }
}

/// Builder for [`Invoker`], mirroring the consuming style of [`Invocation`](crate::Invocation).
#[derive(Debug, Clone, Default)]
pub struct InvokerBuilder {
    config: InvokerConfig,
}

impl InvokerBuilder {
    /// Creates a builder with the ambient defaults (`PATH` snapshot, trailing-newline trim).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the search path captured from `PATH`.
    pub fn search_path(mut self, search_path: SearchPath) -> Self {
        self.config.search_path = search_path;
        self
    }

    /// Sets the working directory for every child.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.current_dir = Some(dir.into());
        self
    }

    /// Sets how captured stdout is normalized.
    pub fn trim(mut self, trim: Trim) -> Self {
        self.config.trim = trim;
        self
    }

    /// Adds a variable to every child's environment.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.config.env.push((key.into(), value.into()));
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> Invoker {
        Invoker::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_drops_one_line_end() {
        assert_eq!(Trim::TrailingNewline.apply("a\n\n".into()), "a\n");
        assert_eq!(Trim::TrailingNewline.apply("a\r\n".into()), "a");
        assert_eq!(Trim::TrailingNewline.apply("a".into()), "a");
        assert_eq!(Trim::TrailingNewline.apply(String::new()), "");
    }

    #[test]
    fn raw_and_whitespace_modes() {
        assert_eq!(Trim::Raw.apply(" a \n".into()), " a \n");
        assert_eq!(Trim::Whitespace.apply(" a \n".into()), "a");
        assert_eq!(Trim::Whitespace.apply("a".into()), "a");
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = InvokerBuilder::new()
            .search_path(SearchPath::empty())
            .trim(Trim::Raw)
            .current_dir("/tmp")
            .env("SHCALL_TEST", "1")
            .config;
        assert!(config.search_path.is_empty());
        assert_eq!(config.trim, Trim::Raw);
        assert_eq!(config.current_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(config.env.len(), 1);
    }
}
