//! Prime listing (`godelmap primes`).

use anyhow::{Result, anyhow};
use clap::Args;
use godelmap::Engine;

/// Arguments for `godelmap primes`.
#[derive(Args, Debug)]
pub struct PrimesArgs {
    /// How many primes to list.
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

/// Print the first primes of the engine's table, one per line with its position.
pub fn handle(engine: &Engine, args: PrimesArgs) -> Result<()> {
    let table = engine.primes();
    if args.count > table.len() {
        return Err(anyhow!(
            "only {} primes are generated; raise prime_count in the config",
            table.len()
        ));
    }
    for (idx, prime) in table.iter().take(args.count).enumerate() {
        println!("{:>5}  {}", idx + 1, prime);
    }
    Ok(())
}
