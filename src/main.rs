//! VM Manager - Main Entry Point
//!
//! Usage: vm-manager [OPTIONS] <ADDRESS_FILE>
//!
//! Translates each logical address in ADDRESS_FILE through a 16-entry TLB
//! and a 256-entry page table, paging in from the backing store on a fault.
//! One line per address goes to stdout, then the fault and TLB hit rates.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vm_manager::{Config, DEFAULT_BACKING_STORE, NUM_FRAMES};

#[derive(Parser)]
#[command(name = "vm-manager")]
#[command(about = "Translates logical addresses to physical addresses with a TLB and demand paging")]
#[command(version)]
struct Cli {
    /// File of decimal logical addresses, one per line
    address_file: PathBuf,

    /// Backing store the pages are read from
    #[arg(long, default_value = DEFAULT_BACKING_STORE)]
    backing_store: PathBuf,

    /// Number of physical frames
    #[arg(
        long,
        default_value_t = NUM_FRAMES as u16,
        value_parser = clap::value_parser!(u16).range(1..=NUM_FRAMES as i64)
    )]
    frames: u16,

    /// Log faults and allocations to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config {
        address_file: cli.address_file,
        backing_store: cli.backing_store,
        frames: cli.frames as usize,
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    vm_manager::io::run(config, &mut out)
        .with_context(|| format!("translating {}", config.address_file.display()))?;
    Ok(())
}
