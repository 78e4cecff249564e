use std::process::ExitCode;

use clap::Parser;
use fracpie::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli::log_filter(args.verbose)),
    )
    .init();
    cli::run(args)
}
