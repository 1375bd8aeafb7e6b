use shcall::prelude::*;
use tempfile::tempdir;

#[test]
fn echo_hello_is_captured() -> shcall::Result<()> {
    let out = Invoker::from_env().invoke("echo", ["hello"])?;
    assert_eq!(out.text(), "hello");
    Ok(())
}

#[test]
fn false_fails_with_status_one() {
    let err = Invoker::from_env().run(&invoke!("false")).unwrap_err();
    assert!(matches!(err, Error::Execution { .. }));
    assert_eq!(err.exit_code(), Some(1));
}

#[test]
fn arbitrary_exit_status_is_propagated() {
    let invoker = Invoker::from_env();
    for code in [2, 42, 255] {
        let err = invoker
            .run(&invoke!("sh", "-c", format!("exit {code}")))
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(code));
    }
}

#[test]
fn missing_executable_never_spawns() -> shcall::Result<()> {
    // A marker file proves the program did not run, even if it existed elsewhere.
    let dir = tempdir()?;
    let marker = dir.path().join("ran");
    let invoker = Invoker::builder()
        .search_path(SearchPath::from_entries([dir.path()]))
        .build();
    let err = invoker
        .run(&invoke!("touch", &marker))
        .unwrap_err();
    match &err {
        Error::NotFound { program, searched } => {
            assert_eq!(program, "touch");
            assert_eq!(searched, &[dir.path().to_path_buf()]);
        }
        other => panic!("expected NotFound, got {other}"),
    }
    assert!(!marker.exists());
    Ok(())
}

#[test]
fn arguments_are_not_interpreted_by_a_shell() -> shcall::Result<()> {
    let out = Invoker::from_env().invoke("echo", ["$HOME && ls", "*"])?;
    assert_eq!(out.text(), "$HOME && ls *");
    Ok(())
}

#[test]
fn listing_unchanged_directory_is_idempotent() -> shcall::Result<()> {
    let dir = tempdir()?;
    for name in ["one", "two", "three"] {
        std::fs::write(dir.path().join(name), name)?;
    }
    let invoker = Invoker::builder().current_dir(dir.path()).build();
    let first = invoker.invoke("ls", ["-1"])?;
    let second = invoker.invoke("ls", ["-1"])?;
    assert_eq!(first.text(), second.text());
    assert_eq!(first.lines().count(), 3);
    Ok(())
}

#[test]
fn trim_modes_are_explicit() -> shcall::Result<()> {
    let inv = invoke!("printf", "  padded\\n\\n");
    let raw = Invoker::builder().trim(Trim::Raw).build().run(&inv)?;
    let newline = Invoker::builder().trim(Trim::TrailingNewline).build().run(&inv)?;
    let whitespace = Invoker::builder().trim(Trim::Whitespace).build().run(&inv)?;
    assert_eq!(raw.text(), "  padded\n\n");
    assert_eq!(newline.text(), "  padded\n");
    assert_eq!(whitespace.text(), "padded");
    Ok(())
}
