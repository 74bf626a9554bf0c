use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use mptdump::io_utils::{mpt_cli_error, simple_cli_error};
use mptdump::MptReader;

/// Dump digits from an MPT fixed-point dump file.
///
/// Example: display 50 digits of pi starting from position 1:
/// `mptdump pi_base10 10 1`
#[derive(Parser)]
struct Args {
    /// Input MPT file
    input: PathBuf,
    /// Target base: 10, 2, 4 or 16
    base: u32,
    /// First digit to display, counted from 1 at the most significant digit
    position: u64,
    /// Number of digits to display
    #[arg(default_value_t = 50)]
    count: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.position == 0 {
        return Err(simple_cli_error("position is 1-based and must be at least 1").into());
    }
    let mut reader = MptReader::open(&args.input, args.base, args.position - 1)
        .map_err(|e| mpt_cli_error(&args.input, e))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for i in 0..args.count {
        let c = match reader
            .next_char()
            .map_err(|e| mpt_cli_error(&args.input, e))?
        {
            Some(c) => c,
            // Ran out of stored digits; truncate the output silently.
            None => break,
        };
        write!(out, "{c}")?;
        if i % 10 == 9 && i != args.count - 1 {
            write!(out, " ")?;
        }
    }
    writeln!(out)?;
    reader.close();
    Ok(())
}
