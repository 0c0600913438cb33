//! Encoding command (`godelmap encode ...`).

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use godelmap::{EncodeResponse, Engine};

use crate::cli::utils::{read_text_arg, write_output};

/// Arguments for `godelmap encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Cyclic shift applied to every character value.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub shift: i64,
    /// Emit the full response as JSON.
    #[arg(long)]
    pub json: bool,
    /// Print the whole bit string instead of a truncated preview.
    #[arg(long)]
    pub full: bool,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute an encode command.
pub fn handle(engine: &Engine, args: EncodeArgs) -> Result<()> {
    let text = read_text_arg(args.text, args.from)?;
    let response = engine.encode_request(&text, args.shift)?;
    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&response)?;
        json.push('\n');
        json
    } else {
        let limit = if args.full {
            usize::MAX
        } else {
            engine.config().display_limit
        };
        format_listing(&response, limit)
    };
    match args.output {
        Some(path) => {
            write_output(&path, &output)?;
            if path.as_os_str() != "-" {
                println!(
                    "Wrote encoding of {} characters to {}",
                    response.breakdown.len(),
                    path.display()
                );
            }
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Human-readable summary followed by the per-character breakdown.
pub fn format_listing(response: &EncodeResponse, bit_limit: usize) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "Gödel number ({} digits):",
        response.decimal_digits
    )
    .ok();
    writeln!(&mut out, "{}", response.godel_number).ok();
    writeln!(&mut out).ok();
    writeln!(&mut out, "Binary ({} bits):", response.bit_length).ok();
    writeln!(&mut out, "{}", response.display_bits(bit_limit)).ok();
    writeln!(&mut out).ok();
    writeln!(&mut out, "{:>4}  {:<4} {:>6}  {:>3}  term", "pos", "char", "prime", "exp").ok();
    for row in &response.breakdown {
        writeln!(
            &mut out,
            "{:>4}  {:<4} {:>6}  {:>3}  {}",
            row.position, row.symbol, row.prime, row.exponent, row.term
        )
        .ok();
    }
    out
}
