use clap::Parser;
use stockscli::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
