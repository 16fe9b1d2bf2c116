#![forbid(unsafe_code)]

//! Binary entrypoint for the `realmlist` command.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = realmlist_cli::run().await;
    process::exit(exit_code);
}
