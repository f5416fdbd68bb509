use clap::Parser;
use prereq::cli::{Cli, Commands};
use prereq::cli_handlers;
use std::process;

fn main() {
    // Logs go to stderr so stdout stays a clean order listing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort {
            file,
            strict,
            json,
            format,
        } => cli_handlers::handle_sort(&file, format, strict, json),
        Commands::Cycles { file, format } => cli_handlers::handle_cycles(&file, format),
        Commands::Check {
            file,
            order,
            json,
            format,
        } => cli_handlers::handle_check(&file, &order, format, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
