mod cli;
mod pipeline;

use clap::Parser;
use cli::Cli;
use pipeline::{Outcome, run};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HALC_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(Outcome::Written(path)) => println!("{}", path.display()),
        Ok(Outcome::Ast(dump)) => println!("{}", dump),
        Err(error) => {
            eprintln!("{}", error.render(!cli.no_color));
            process::exit(1);
        }
    }
}
