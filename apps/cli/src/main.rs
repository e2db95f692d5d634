use std::process::ExitCode;

use clap::Parser;

use quizmerge_cli::args::Args;
use quizmerge_cli::pipeline;

fn main() -> ExitCode {
    // diagnostics go to stderr: stdout carries the exported quiz
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match pipeline::run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}
