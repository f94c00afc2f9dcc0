//! # Till Simulator
//!
//! Drives a cash till through the reference session and prints the
//! balances, each outcome and finally the till's journal.
//!
//! ## Usage
//! ```bash
//! # Standard notes, journal as text
//! cargo run -p till-sim
//!
//! # Journal as JSON
//! cargo run -p till-sim -- --json
//!
//! # Custom denominations and more verbose diagnostics
//! TILL_DENOMINATIONS=200,100,50,10 RUST_LOG=debug cargo run -p till-sim
//! ```

mod config;
mod session;

use std::env;
use std::io::{self, Write};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use till_core::Till;

use crate::config::SimConfig;

fn main() -> anyhow::Result<()> {
    let mut json = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" | "-j" => json = true,
            "--help" | "-h" => {
                println!("Till Simulator");
                println!();
                println!("Usage: till-sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -j, --json    Print the journal as JSON");
                println!("  -h, --help    Show this help message");
                println!();
                println!("Environment:");
                println!("  TILL_DENOMINATIONS     Comma-separated face values (default: 200,100,50,20,10,5,2)");
                println!("  TILL_CURRENCY_SYMBOL   Symbol for printed amounts (default: R$)");
                println!("  TILL_TIMESTAMP_FORMAT  chrono format for journal timestamps");
                return Ok(());
            }
            other => anyhow::bail!("unknown option '{}' (see --help)", other),
        }
    }

    init_tracing();

    let config = SimConfig::load().context("loading configuration")?;
    info!(
        denominations = ?config.denominations,
        symbol = %config.currency_symbol,
        "Configuration loaded"
    );

    let mut till = Till::new(config.denomination_set()?);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    session::run(&mut till, &config, &mut out)?;

    writeln!(out)?;
    if json {
        serde_json::to_writer_pretty(&mut out, till.journal().entries())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", till.journal().render(&config.timestamp_format))?;
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show planning details
/// - `RUST_LOG=till_core=trace` - Trace the core only
/// - Default: INFO, DEBUG for the core
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
