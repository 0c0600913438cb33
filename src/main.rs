use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run(cli::Cli::parse())
}
