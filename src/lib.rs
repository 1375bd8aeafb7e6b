//! Shcall - typed helpers for invoking external commands.
//!
//! An [`Invoker`] runs one external program at a time, synchronously, and
//! hands back its captured stdout as text. Chaining commands is plain nesting:
//! the [`Captured`] output of one invocation becomes an argument of, or the
//! stdin for, the next one. Arguments are passed straight to the OS; no shell
//! is involved, so there is nothing to quote or escape.
//!
//! ```no_run
//! use shcall::prelude::*;
//!
//! fn main() -> shcall::Result<()> {
//!     let invoker = Invoker::from_env();
//!     let sizes = invoker.run(&invoke!("du", "-sk").args(glob_args("*")?))?;
//!     let sorted = invoker.run(&invoke!("sort", "-n").stdin_from(&sizes))?;
//!     let largest = invoker.run(&invoke!("tail", "-n", "5").stdin_from(&sorted))?;
//!     println!("{largest}");
//!     Ok(())
//! }
//! ```

mod captured;
mod chain;
mod config;
mod error;
mod expand;
mod invocation;
mod invoker;
#[doc(hidden)]
pub mod macros;
mod search_path;

pub mod prelude;

pub use captured::Captured;
pub use chain::{Feed, Pipeline};
pub use config::{InvokerBuilder, InvokerConfig, Trim};
pub use error::{Error, Result};
pub use expand::{glob_args, glob_args_in};
pub use invocation::Invocation;
pub use invoker::Invoker;
pub use search_path::SearchPath;

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_types_are_thread_safe() {
        assert_send_sync::<Invoker>();
        assert_send_sync::<Invocation>();
        assert_send_sync::<Captured>();
        assert_send_sync::<Error>();
    }

    #[cfg(unix)]
    #[test]
    fn nested_calls_evaluate_innermost_first() -> Result<()> {
        let invoker = Invoker::from_env();
        let inner = invoker.invoke("echo", ["inner"])?;
        let outer = invoker.invoke("echo", [OsString::from("outer"), inner.into()])?;
        assert_eq!(outer.text(), "outer inner");
        Ok(())
    }
}
