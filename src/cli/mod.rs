//! Command-line interface wiring for the `godelmap` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod encode;
pub mod primes;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `godelmap` binary.
#[derive(Parser, Debug)]
#[command(
    name = "godelmap",
    version,
    about = "Gödel-number alphanumeric text and draw its binary expansion"
)]
pub struct Cli {
    /// JSON file overriding length limits and canvas constants.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the Gödel number and its breakdown.
    Encode(encode::EncodeArgs),
    #[command(subcommand)]
    Render(render::RenderCommand),
    /// List the primes used for positions.
    Primes(primes::PrimesArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let engine = utils::load_engine(cli.config.as_deref())?;
    match cli.command {
        Command::Encode(args) => encode::handle(&engine, args),
        Command::Render(cmd) => render::handle(&engine, cmd),
        Command::Primes(args) => primes::handle(&engine, args),
    }
}
