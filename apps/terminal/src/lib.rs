//! # Brew Terminal Library
//!
//! Core library for the Brew POS operator terminal. `main.rs` only parses
//! flags; everything else lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! brew_terminal_lib/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── PosState controller
//! │   ├── config.rs   ◄─── Configuration state
//! │   ├── catalog.rs  ◄─── Product operations
//! │   ├── discounts.rs◄─── Discount code operations
//! │   ├── checkout.rs ◄─── Cart, payment, checkout
//! │   └── reports.rs  ◄─── Dashboard figures
//! ├── commands/       ◄─── Line parsing and rendering
//! └── error.rs        ◄─── API error type
//! ```

pub mod commands;
pub mod error;
pub mod state;

use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brew_store::{Storage, StoreConfig};

use commands::Outcome;
use state::{ConfigState, PosState};

/// Startup flags.
#[derive(Debug, Default, Parser)]
#[command(name = "brew-pos", version, about = "Brew POS coffee bar terminal")]
pub struct Cli {
    /// Config file (default: brew.toml in the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file; overrides the config file and BREW_DB_PATH
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved
    #[arg(long, conflicts_with = "db")]
    pub memory: bool,
}

/// Runs the terminal on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → brew.toml → BREW_* → --db                              │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else config log_filter; written to stderr               │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • SQLite (WAL, migrations) or --memory                              │
/// │                                                                         │
/// │  4. Initialize PosState ──────────────────────────────────────────────► │
/// │     • load or seed products, codes, sales                               │
/// │                                                                         │
/// │  5. Command Loop ─────────────────────────────────────────────────────► │
/// │     • one line, one command, until quit or end of input                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ConfigState::load(cli.config).context("loading configuration")?;
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    init_tracing(&config.log_filter);
    info!(store = %config.store_name, policy = %config.stock_policy, "Starting Brew POS");

    let storage = open_storage(&config, cli.memory).await?;
    let mut state = PosState::initialize(storage, config)
        .await
        .context("loading stored data")?;

    let stdin = std::io::stdin();
    run_loop(&mut state, stdin.lock(), std::io::stdout()).await
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so they do not
/// mix with command output.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_storage(config: &ConfigState, memory: bool) -> anyhow::Result<Storage> {
    if memory {
        warn!("Using in-memory storage; nothing will be saved");
        return Ok(Storage::memory());
    }

    let path = config.resolve_database_path();
    info!(?path, "Opening database");

    Storage::open_sqlite(StoreConfig::new(&path))
        .await
        .with_context(|| format!("opening database {}", path.display()))
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command errors are printed and the loop carries on; only I/O failures on
/// the terminal itself end it with an error.
pub async fn run_loop<R: BufRead, W: Write>(
    state: &mut PosState,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    writeln!(
        output,
        "☕ {} - type 'help' for commands",
        state.config().store_name
    )?;

    let mut lines = input.lines();
    loop {
        write!(output, "brew> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };

        match commands::execute(state, &line?).await {
            Ok(Outcome::Continue(text)) if text.is_empty() => {}
            Ok(Outcome::Continue(text)) => writeln!(output, "{}", text.trim_end())?,
            Ok(Outcome::Quit) => break,
            Err(e) => writeln!(output, "✗ {}", e)?,
        }
    }

    info!("Terminal closed");
    Ok(())
}
