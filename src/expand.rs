use std::{ffi::OsString, path::Path};

use glob::{MatchOptions, Pattern, glob_with};

use crate::{Error, Result};

/// Shell-like matching: `*` and `?` do not match a leading dot.
const SHELL_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Expands a filesystem glob (e.g. `*.rs`) into sorted invocation arguments.
///
/// Invocations never go through a shell, so patterns have to be expanded
/// before they are passed on. A pattern that matches nothing is returned
/// as-is, the way a POSIX shell leaves unmatched globs alone.
pub fn glob_args(pattern: impl AsRef<str>) -> Result<Vec<OsString>> {
    let pattern = pattern.as_ref();
    let mut matches = glob_with(pattern, SHELL_OPTIONS)?
        .map(|entry| entry.map(OsString::from).map_err(Error::from))
        .collect::<Result<Vec<_>>>()?;
    if matches.is_empty() {
        tracing::trace!(pattern, "glob matched nothing, passing pattern through");
        return Ok(vec![OsString::from(pattern)]);
    }
    matches.sort();
    Ok(matches)
}

/// Like [`glob_args`], but matches relative to `dir` and yields paths
/// relative to it.
pub fn glob_args_in(dir: impl AsRef<Path>, pattern: impl AsRef<str>) -> Result<Vec<OsString>> {
    let dir = dir.as_ref();
    let pattern = pattern.as_ref();
    let rooted = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        pattern
    );
    let mut matches = glob_with(&rooted, SHELL_OPTIONS)?
        .map(|entry| -> Result<OsString> {
            let path = entry?;
            let relative = path.strip_prefix(dir).unwrap_or(&path);
            Ok(relative.as_os_str().to_os_string())
        })
        .collect::<Result<Vec<_>>>()?;
    if matches.is_empty() {
        return Ok(vec![OsString::from(pattern)]);
    }
    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn expands_and_sorts_matches() -> Result<()> {
        let dir = tempdir()?;
        for name in ["b.txt", "a.txt", "c.log"] {
            fs::write(dir.path().join(name), name)?;
        }
        let args = glob_args_in(dir.path(), "*.txt")?;
        assert_eq!(args, ["a.txt", "b.txt"]);

        let absolute = glob_args(format!("{}/*.log", dir.path().display()))?;
        assert_eq!(absolute, [dir.path().join("c.log").into_os_string()]);
        Ok(())
    }

    #[test]
    fn star_skips_hidden_entries() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(".hidden"), "h")?;
        fs::write(dir.path().join("shown"), "s")?;
        assert_eq!(glob_args_in(dir.path(), "*")?, ["shown"]);
        assert_eq!(glob_args_in(dir.path(), ".*")?, [".hidden"]);

        let absolute = glob_args(format!("{}/*", dir.path().display()))?;
        assert_eq!(absolute, [dir.path().join("shown").into_os_string()]);
        Ok(())
    }

    #[test]
    fn unmatched_pattern_passes_through() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(glob_args_in(dir.path(), "*.none")?, ["*.none"]);
        Ok(())
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(matches!(
            glob_args("[unclosed"),
            Err(Error::GlobPattern(_))
        ));
    }
}
