//! Debug CLI: follow the MTGA log and print extracted draft events.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mtga_log_watcher::config::{default_log_path, StartMode, WatcherConfig};
use mtga_log_watcher::watcher::{DraftEvent, LogWatcher};

#[derive(Parser)]
#[command(
    name = "mtga-log-watcher",
    about = "Follow the MTGA Player.log and print draft events",
    version
)]
struct Cli {
    /// Path to Player.log (defaults to the platform location).
    #[arg(short = 'p', long)]
    log_path: Option<PathBuf>,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Replay the whole log instead of starting at the current end.
    #[arg(long)]
    from_start: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn print_event(event: &DraftEvent) {
    match event {
        DraftEvent::Pack(pack) => {
            println!(
                "{} {} cards: {}",
                "[PACK]".blue().bold(),
                pack.card_ids.len().cyan(),
                pack.card_ids.join(", ").dimmed()
            );
        }
        DraftEvent::Pick(pick) => {
            println!(
                "{} P{}P{} card={} draft={}",
                "[PICK]".green().bold(),
                pick.pack_number,
                pick.pick_number,
                pick.card_id.cyan(),
                pick.draft_id.dimmed()
            );
        }
        DraftEvent::Deck(deck) => {
            println!(
                "{} {} main={} side={}",
                "[DECK]".magenta().bold(),
                deck.event_id,
                deck.main.len().cyan(),
                deck.side.len().cyan()
            );
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = WatcherConfig {
        log_path: cli.log_path.unwrap_or_else(default_log_path),
        poll_interval: Duration::from_millis(cli.interval_ms),
        start_mode: if cli.from_start {
            StartMode::ReplayHistory
        } else {
            StartMode::SkipHistory
        },
    };

    let mut watcher = LogWatcher::new(config);
    let mut events = match watcher.start() {
        Ok(rx) => rx,
        Err(err) => {
            tracing::error!(error = %err, "Could not start watcher");
            std::process::exit(1);
        }
    };

    tracing::info!("Watching for draft events, Ctrl-C to stop");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    watcher.stop().await;
}
