use std::fs;

use shcall::prelude::*;
use tracing_subscriber::EnvFilter;

const FILENAME: &str = "test_file.txt";

fn main() -> shcall::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let invoker = Invoker::from_env();

    match invoker.invoke("ls", ["-al", FILENAME]) {
        Ok(listing) => println!("{listing}"),
        Err(err @ (Error::Execution { .. } | Error::NotFound { .. })) => {
            tracing::debug!(%err, "listing failed");
            println!("{FILENAME} was not found");
        }
        Err(err) => return Err(err),
    }

    invoker.invoke("touch", [FILENAME])?;
    println!("{}", invoker.invoke("ls", ["-al", FILENAME])?);

    fs::remove_file(FILENAME)?;
    Ok(())
}
