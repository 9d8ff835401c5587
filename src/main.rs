use std::path::PathBuf;

use clap::Parser;

mod run;

/// Runs a Chip-8 ROM headless and prints the final frame
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    #[arg(short, long, default_value_t = 2000, help = "Number of CPU cycles to run")]
    cycles: u64,

    #[arg(short, long, help = "Seed for the random number generator")]
    seed: Option<u64>,

    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = parse_key,
        help = "Hex keys to press, one per key wait (e.g. 1,A,F)"
    )]
    keys: Vec<u8>,

    #[arg(short, long, help = "Ignore the default clock speed")]
    fast_forward: bool,
}

fn parse_key(s: &str) -> Result<u8, String> {
    match u8::from_str_radix(s.trim(), 16) {
        Ok(key) if key <= 0xF => Ok(key),
        _ => Err(format!("{:?} is not a key between 0 and F", s)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(run::Settings {
        rom: args.rom,
        cycles: args.cycles,
        seed: args.seed,
        keys: args.keys,
        fast_forward: args.fast_forward,
    })
}
