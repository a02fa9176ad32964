//! Thin entrypoint delegating to [`easyredir_cli::run`].

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = easyredir_cli::run().await;
    process::exit(exit_code);
}
