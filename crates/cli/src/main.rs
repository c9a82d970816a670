// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ebus - Event bus demo
//!
//! Wires a security counter, an API call auditor and a terminal logger onto
//! one bus, then drives a simulated API client against it.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod api;
mod demo;
mod handlers;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use ebus_core::{BusConfig, EventBus, DEFAULT_MAX_DEPTH};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::ApiClient;

#[derive(Parser)]
#[command(
    name = "ebus",
    version,
    about = "Event bus demo - simulated API calls fanned out to audit handlers"
)]
struct Cli {
    /// Number of simulated API calls
    #[arg(long, default_value_t = 100)]
    calls: usize,

    /// Seed for the call picker (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum nesting of emissions from within handlers
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let bus = EventBus::with_config(BusConfig::new().with_max_depth(cli.max_depth));
    let tally = demo::wire(&bus, std::io::stdout());
    let client = ApiClient::new(bus.clone());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(calls = cli.calls, seed = ?cli.seed, "starting demo");
    demo::run(&client, &mut rng, cli.calls)?;
    demo::report(&bus, &tally)?;

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // stdout belongs to the terminal logger
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
