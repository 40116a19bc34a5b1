use anyhow::{Context, Result};
use app::{Mode, Session, SessionOptions};
use checkers_core::engine::config::{EngineConfig, HistoryKeying, MoveOrdering, MAX_DEPTH};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderingArg {
    /// Generation order, alternating max/min frames
    None,
    /// History-heuristic ordering
    History,
}

impl From<OrderingArg> for MoveOrdering {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::None => Self::None,
            OrderingArg::History => Self::History,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HistoryKeyArg {
    /// Key history entries on the searched position instance
    Node,
    /// Key history entries on the move's source and destination
    Move,
}

impl From<HistoryKeyArg> for HistoryKeying {
    fn from(arg: HistoryKeyArg) -> Self {
        match arg {
            HistoryKeyArg::Node => Self::Node,
            HistoryKeyArg::Move => Self::Move,
        }
    }
}

/// Play checkers in the terminal against an alpha-beta search engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Search depth in plies (overrides the config file)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_DEPTH)))]
    depth: Option<u8>,

    /// Move ordering used by the search (overrides the config file)
    #[arg(long, value_enum)]
    ordering: Option<OrderingArg>,

    /// What history scores are keyed on (overrides the config file)
    #[arg(long, value_enum)]
    history_key: Option<HistoryKeyArg>,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Human against computer, or computer against itself
    #[arg(long, value_enum, default_value_t = Mode::Human)]
    mode: Mode,

    /// Stop a computer-only game after this many moves
    #[arg(long, default_value_t = 200)]
    max_moves: usize,

    /// Disable ANSI colours
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = args.config.as_deref().map_or_else(
        || Ok(EngineConfig::default()),
        |path| {
            EngineConfig::load_from_path(path)
                .with_context(|| format!("failed to load engine config from {}", path.display()))
        },
    )?;

    if let Some(depth) = args.depth {
        config.search_depth = depth;
    }
    if let Some(ordering) = args.ordering {
        config.move_ordering = ordering.into();
    }
    if let Some(key) = args.history_key {
        config.history_key = key.into();
    }
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(&args)?;
    tracing::debug!(?config, "engine configuration");

    let options = SessionOptions {
        mode: args.mode,
        max_moves: args.max_moves,
        color: !args.no_color,
    };
    let session = Session::new(config, options);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stats = session.run(&mut stdin.lock(), &mut stdout.lock())?;
    tracing::info!(?stats, "session finished");
    Ok(())
}
