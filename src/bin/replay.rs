//! CLI entry point: inspect and replay a hand-history file, or print a
//! freshly shuffled deck for a given seed.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use holdem_table::events::{HandEventKind, HandHistory};
use holdem_table::money::Chips;
use holdem_table::rng::SeededRng;
use holdem_table::{history, init, Table};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "replay", about = "Inspect and audit hand-history files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Write a debug log alongside terminal output.
    #[arg(long, global = true, default_value = "replay.log")]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Load a hand-history JSON file, print its event log, verify the
    /// recorded payout conserves every chip that moved into the pots, then
    /// replay the hand through a fresh table and confirm it reaches the
    /// same state.
    Replay {
        file: PathBuf,
    },
    /// Shuffle a full deck with the given seed and print it in dealt order.
    Deal {
        #[arg(long)]
        seed: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init(&cli.log_file).context("failed to install logger")?;

    match cli.command {
        Command::Replay { file } => replay(&file),
        Command::Deal { seed } => deal(seed),
    }
}

fn replay(file: &PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading hand history from {}", file.display()))?;
    let parsed = history::from_json(&raw).context("parsing hand history")?;

    println!(
        "hand {} ({} events, started at logical tick {})",
        parsed.hand_id,
        parsed.events.len(),
        parsed.start_time
    );

    let mut contributed = Chips::ZERO;
    let mut distributed = Chips::ZERO;
    let mut rake = Chips::ZERO;

    for event in &parsed.events {
        match &event.kind {
            HandEventKind::HandStarted { hand_id, dealer_seat, seats } => {
                println!(
                    "[{}] hand {hand_id} started, dealer seat {dealer_seat:?}, {} seated",
                    event.timestamp,
                    seats.len()
                );
            }
            HandEventKind::BlindsPosted { contributions } => {
                for (player, amount) in contributions {
                    contributed = contributed.add(*amount);
                    println!("[{}] {player} posts {amount}", event.timestamp);
                }
            }
            HandEventKind::CardsDealt { hole_cards } => {
                println!("[{}] {} hole card pairs dealt", event.timestamp, hole_cards.len());
            }
            HandEventKind::ActionTaken { player, action, moved } => {
                contributed = contributed.add(*moved);
                println!("[{}] {player} {action:?} (moved {moved})", event.timestamp);
            }
            HandEventKind::StreetEnded { phase, community_cards } => {
                println!("[{}] street ended, now {phase:?}, board {community_cards:?}", event.timestamp);
            }
            HandEventKind::Showdown { ranked } => {
                println!("[{}] showdown: {ranked:?}", event.timestamp);
            }
            HandEventKind::PotDistributed { payouts, rake: hand_rake } => {
                rake = rake.add(*hand_rake);
                for (player, amount) in payouts {
                    distributed = distributed.add(*amount);
                    println!("[{}] {player} wins {amount}", event.timestamp);
                }
            }
            HandEventKind::HandEnded { hand_id } => {
                println!("[{}] hand {hand_id} ended", event.timestamp);
            }
        }
    }

    if distributed.add(rake) != contributed {
        bail!(
            "chip conservation violated: contributed {contributed}, distributed {distributed} + rake {rake}"
        );
    }
    println!("conservation holds: {contributed} chips in, {distributed} out + {rake} rake");

    reconstruct_and_verify(&parsed)
}

/// Replays the recorded events through a freshly built `Table` — seating
/// the same players at the same starting stacks, starting a hand with the
/// same seeded RNG, and feeding back every recorded action in order — then
/// asserts the resulting hand history is identical to the one on disk.
///
/// This only reproduces a table's very first hand: a fresh `Table` always
/// assigns the dealer button to the first seated player, so a history whose
/// dealer position depends on earlier hands (not captured by a single
/// `HandHistory`) will legitimately fail this check.
fn reconstruct_and_verify(recorded: &HandHistory) -> Result<()> {
    let seed = recorded
        .table_config
        .rng_seed
        .context("hand was recorded with an unseeded (cryptographic) RNG; replay cannot be deterministic")?;

    let seats = recorded
        .events
        .iter()
        .find_map(|event| match &event.kind {
            HandEventKind::HandStarted { seats, .. } => Some(seats.clone()),
            _ => None,
        })
        .context("history has no HandStarted event to reseat from")?;

    let mut table = Table::new(recorded.table_config.clone(), Box::new(SeededRng::new(seed)));
    for (id, _seat, stack) in &seats {
        table
            .seat_player(id.clone(), *stack)
            .with_context(|| format!("reseating {id} at {stack}"))?;
    }
    table.start_hand().context("replayed start_hand failed")?;

    for event in &recorded.events {
        if let HandEventKind::ActionTaken { player, action, .. } = &event.kind {
            table
                .apply_action(player, action.clone())
                .with_context(|| format!("replayed action by {player} failed"))?;
        }
    }

    let replayed = table
        .get_last_hand_history()
        .context("replayed table produced no hand history")?;

    if &replayed != recorded {
        bail!("replayed hand history diverges from the recorded log");
    }
    println!("replay reconstructs an identical table-state sequence");
    Ok(())
}

fn deal(seed: u32) -> Result<()> {
    use holdem_table::cards::Deck;

    let mut deck = Deck::new();
    let mut rng = SeededRng::new(seed);
    deck.shuffle(&mut rng)?;
    let cards = deck.deal(52)?;
    let rendered: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    println!("{}", rendered.join(" "));
    Ok(())
}
