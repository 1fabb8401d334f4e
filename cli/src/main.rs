//! Interactive REPL for the giveaway engine.
//!
//! Each input line is shlex-split and parsed as a clap subcommand, so
//! quoting works the way a shell user expects (`start -d 1m -w 1 -p "a
//! mechanical keyboard"`). Entry signals are injected with `join`,
//! standing in for the platform's reaction events.

mod console;

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use tombola_core::config::GiveawayConfig;
use tombola_core::entry::{EntrySignal, EntryTracker};
use tombola_core::manager::GiveawayManager;
use tombola_core::store::GiveawayStore;
use tombola_types::formatting::{format_duration_compact, seconds_until};
use tombola_types::{ChannelId, GiveawayId, UserId};

use console::{ConsolePublisher, ConsoleSender};

/// The REPL announces into a single pretend channel.
const CONSOLE_CHANNEL: ChannelId = ChannelId(1);
/// Identity running the console session; host of every giveaway here.
const CONSOLE_HOST: UserId = UserId(1);

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GiveawayConfig::load();
    tracing::info!(dm_on_entry = config.dm_on_entry, "config loaded");

    let store = Arc::new(GiveawayStore::new());
    let manager = GiveawayManager::new(
        Arc::clone(&store),
        Arc::new(ConsolePublisher::new()),
        Arc::new(ConsoleSender),
        config.clone(),
    );

    let (entry_tx, entry_rx) = mpsc::channel::<EntrySignal>(64);
    let tracker = EntryTracker::new(store, Arc::new(ConsoleSender), config.dm_on_entry);
    let tracker_task = tracker.spawn(entry_rx);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &manager, &entry_tx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                println!("{err}");
            }
        }
    }

    drop(entry_tx);
    tracker_task.await.map_err(|e| e.to_string())?;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "giveaway console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a giveaway
    Start {
        /// Duration like 1h2m10s
        #[arg(short, long)]
        duration: String,
        #[arg(short, long)]
        winners: u32,
        #[arg(short, long)]
        prize: String,
    },
    /// End a giveaway early
    End {
        #[arg(short, long)]
        id: u64,
    },
    /// Redraw winners for an ended giveaway
    Reroll {
        #[arg(short, long)]
        id: u64,
    },
    /// Pause or resume entries for an active giveaway
    Pause {
        #[arg(short, long)]
        id: u64,
    },
    /// Show active and ended giveaways
    List,
    /// Inject an entry signal, as if a user reacted
    Join {
        #[arg(short, long)]
        id: u64,
        #[arg(short, long)]
        user: u64,
    },
    /// Show the loaded configuration
    Config,
    Exit,
}

async fn respond(
    line: &str,
    manager: &GiveawayManager,
    entry_tx: &mpsc::Sender<EntrySignal>,
) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tombola".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Start {
            duration,
            winners,
            prize,
        }) => {
            let giveaway = manager
                .start(prize, *winners, CONSOLE_HOST, CONSOLE_CHANNEL, duration)
                .map_err(|e| e.to_string())?;
            println!("giveaway {} started for {}", giveaway.id, giveaway.prize);
        }
        Some(Commands::End { id }) => {
            let outcome = manager
                .end(GiveawayId(*id), true)
                .map_err(|e| e.to_string())?;
            if outcome.participant_count_was_zero {
                println!("ended {}: no one joined", outcome.id);
            } else {
                println!(
                    "ended {}: {} winner(s) drawn",
                    outcome.id,
                    outcome.winners.len()
                );
            }
        }
        Some(Commands::Reroll { id }) => {
            let winners = manager.reroll(GiveawayId(*id)).map_err(|e| e.to_string())?;
            println!("rerolled: {} winner(s) drawn", winners.len());
        }
        Some(Commands::Pause { id }) => {
            let paused = manager
                .toggle_pause(GiveawayId(*id))
                .map_err(|e| e.to_string())?;
            println!("{}", if paused { "entries paused" } else { "entries resumed" });
        }
        Some(Commands::List) => {
            let listing = manager.list();
            println!("active ({}):", listing.active.len());
            for g in &listing.active {
                let remaining = format_duration_compact(seconds_until(g.expires_at));
                let gate = if g.paused { " [paused]" } else { "" };
                println!(
                    "  {} | {} | {} winner(s) | ends in {}{}",
                    g.id, g.prize, g.winner_count, remaining, gate
                );
            }
            println!("ended ({}):", listing.ended.len());
            for g in &listing.ended {
                let winners = g
                    .winners
                    .iter()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let winners = if winners.is_empty() { "none".to_string() } else { winners };
                println!("  {} | {} | winners: {}", g.id, g.prize, winners);
            }
        }
        Some(Commands::Join { id, user }) => {
            entry_tx
                .send(EntrySignal {
                    giveaway_id: GiveawayId(*id),
                    user: UserId(*user),
                    is_bot: false,
                })
                .await
                .map_err(|e| e.to_string())?;
        }
        Some(Commands::Config) => {
            let config = manager.config();
            println!(
                "max duration: {} | entry emoji: {} | dm on entry: {}",
                format_duration_compact(config.max_duration_secs),
                config.entry_emoji,
                config.dm_on_entry
            );
        }
        Some(Commands::Exit) => {
            println!("quitting...");
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer)
}
