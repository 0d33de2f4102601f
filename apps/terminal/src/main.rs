//! # Brew POS Terminal Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Terminal                                │
//! │                                                                         │
//! │  main.rs ────► parses flags                                             │
//! │                                                                         │
//! │  lib.rs ─────► config, tracing, storage, PosState, command loop         │
//! │                                                                         │
//! │  commands/ ──► products, add, discount, checkout, report, ...           │
//! │                                                                         │
//! │  state/ ─────► PosState (catalog, codes, ledger, cart, config)          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  SQLite brew.db (kv_store, WAL)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! brew-pos                       # platform data dir, brew.toml if present
//! brew-pos --db ./shop.db        # explicit database file
//! brew-pos --memory              # throwaway session
//! RUST_LOG=debug brew-pos        # verbose logs on stderr
//! ```

use clap::Parser;

use brew_terminal_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    brew_terminal_lib::run(Cli::parse()).await
}
