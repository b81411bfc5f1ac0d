mod cli;
mod error;
mod run;

use clap::Parser;

fn main() {
    // stdout carries the converted records, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    if let Err(e) = run::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
