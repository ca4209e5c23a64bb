use std::process::ExitCode;

use clap::Parser;
use rust_mcp_media::{cli, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let arguments = cli::CommandArguments::parse();
    if let Err(err) = arguments.validate() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    };

    if let Err(error) = server::start_server(arguments).await {
        tracing::error!(%error, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
