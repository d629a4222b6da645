//! Line-oriented lobby: one JSON request per stdin line, one JSON envelope per
//! stdout line.
//!
//! Usage: cargo run -p holdem-lobby -- --seed 42 < requests.jsonl

use clap::Parser;
use holdem_lobby::{handle, init_logging, Lobby, LobbySettings};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "holdem-lobby", version, about = "Heads-up hold'em tables over JSON lines")]
struct Args {
    /// TOML settings file (overrides HOLDEM_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter, e.g. "info,holdem_engine=debug"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let resolved =
        LobbySettings::load(args.config.as_deref())?.with_overrides(args.seed, args.log)?;
    init_logging(&resolved.settings.log_filter)?;

    tracing::info!(
        starting_stack = resolved.settings.table.starting_stack,
        min_bet = resolved.settings.table.min_bet,
        seeded = resolved.settings.table.seed.is_some(),
        seed_source = ?resolved.sources.seed,
        "lobby ready"
    );

    let lobby = Lobby::new(resolved.settings.table);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        for envelope in handle(&lobby, &line) {
            serde_json::to_writer(&mut out, &envelope)?;
            writeln!(out)?;
        }
        out.flush()?;
    }

    tracing::info!(games = lobby.active_games().len(), "input closed, shutting down");
    Ok(())
}
