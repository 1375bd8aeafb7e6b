use shcall::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> shcall::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let invoker = Invoker::from_env();

    let files = glob_args("*")?;
    println!("== {} entries ==", files.len());

    let sizes = invoker.run(&invoke!("du", "-k").args(files))?;
    let sorted = invoker.run(&invoke!("sort", "-n").stdin_from(&sizes))?;
    let largest = invoker.run(&invoke!("tail", "-n", "5").stdin_from(&sorted))?;

    println!("== largest (KiB) ==");
    for line in largest.lines() {
        println!("{line}");
    }
    Ok(())
}
