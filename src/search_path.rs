use std::{
    env,
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Ordered list of directories searched for executables.
///
/// A `SearchPath` is captured once (usually from `PATH` via [`SearchPath::from_env`])
/// and then owned by an [`Invoker`](crate::Invoker); later changes to the process
/// environment do not affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    /// Snapshots the current `PATH`. A missing `PATH` yields an empty search path.
    pub fn from_env() -> Self {
        let entries = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self { entries }
    }

    /// Builds a search path from explicit directories, in lookup order.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// A search path with no directories; only names containing a path
    /// separator can be resolved.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Directories in lookup order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Returns `true` when no directory will be searched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins the entries into a `PATH`-style value for child processes.
    pub fn to_os_string(&self) -> Result<OsString> {
        env::join_paths(&self.entries)
            .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidInput, err)))
    }

    /// Finds `program`, similar to the `which` command.
    ///
    /// Names containing a path separator are resolved against `cwd` and never
    /// consult the search path.
    pub fn resolve(&self, program: impl AsRef<OsStr>, cwd: &Path) -> Result<PathBuf> {
        let program = program.as_ref();
        let has_separator = Path::new(program).components().count() > 1;
        if self.entries.is_empty() && !has_separator {
            return Err(self.not_found(program));
        }
        let paths = self.to_os_string()?;
        match which::which_in(program, Some(paths), cwd) {
            Ok(path) => {
                tracing::trace!(?program, path = %path.display(), "resolved executable");
                Ok(path)
            }
            Err(err) => {
                tracing::trace!(?program, %err, "executable lookup failed");
                Err(self.not_found(program))
            }
        }
    }

    fn not_found(&self, program: &OsStr) -> Error {
        Error::NotFound {
            program: program.to_os_string(),
            searched: self.entries.clone(),
        }
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cwd() -> PathBuf {
        env::current_dir().unwrap()
    }

    #[test]
    fn from_env_finds_sh() {
        let search = SearchPath::from_env();
        assert!(!search.is_empty());
        let sh = search.resolve("sh", &cwd()).unwrap();
        assert!(sh.is_absolute());
    }

    #[test]
    fn empty_search_path_finds_nothing() {
        let err = SearchPath::empty().resolve("sh", &cwd()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn explicit_entries_are_honoured() {
        let dir = tempdir().unwrap();
        let search = SearchPath::from_entries([dir.path()]);
        assert!(search.resolve("sh", &cwd()).unwrap_err().is_not_found());
        assert_eq!(search.entries(), &[dir.path().to_path_buf()]);
    }

    #[test]
    fn absolute_names_skip_the_search_path() {
        let sh = SearchPath::from_env().resolve("sh", &cwd()).unwrap();
        let resolved = SearchPath::empty().resolve(&sh, &cwd()).unwrap();
        assert_eq!(resolved, sh);

        let missing = SearchPath::empty()
            .resolve("/definitely/not/here/tool", &cwd())
            .unwrap_err();
        assert!(missing.is_not_found());
    }

    #[test]
    fn joins_back_into_path_value() {
        let search: SearchPath = ["/usr/bin", "/bin"].into_iter().collect();
        let joined = search.to_os_string().unwrap();
        assert_eq!(env::split_paths(&joined).count(), 2);
    }
}
