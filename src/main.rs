//! Guess Rank entry point
//!
//! Parses the command line, loads settings and leaderboards, then either
//! runs the interactive game or prints a leaderboard.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use guess_rank::consts::SETTINGS_FILE;
use guess_rank::game::GameSession;
use guess_rank::{Leaderboard, Leaderboards, Settings, Tier};

#[derive(Parser)]
#[command(
    name = "guess-rank",
    about = "Guess the hidden number and climb the per-difficulty leaderboards"
)]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Directory holding the leaderboard files (overrides the settings)
    #[arg(long, env = "GUESS_RANK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Seed for the hidden numbers (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the hidden number at the start of each round
    #[arg(long)]
    reveal: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play the game (default)
    Play,
    /// Print one tier's leaderboard
    Scores {
        /// easy, medium or hard
        #[arg(value_parser = parse_tier)]
        tier: Tier,
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the effective settings to the config file
    InitConfig,
}

fn parse_tier(s: &str) -> Result<Tier, String> {
    Tier::from_str(s).ok_or_else(|| format!("unknown tier '{s}', expected easy, medium or hard"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load_from(&args.config)?;
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    if args.reveal {
        settings.reveal_target = true;
    }

    match args.command.unwrap_or(Command::Play) {
        Command::Play => play(settings, args.seed),
        Command::Scores { tier, json } => print_scores(&settings, tier, json),
        Command::InitConfig => settings.save_to(&args.config),
    }
}

fn play(settings: Settings, seed: Option<u64>) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("Guess Rank starting (seed {seed})");

    let boards = Leaderboards::open_in(&settings.data_dir);
    let mut session = GameSession::new(
        io::stdin().lock(),
        io::stdout().lock(),
        boards,
        Pcg32::seed_from_u64(seed),
        settings,
    );
    session.run()?;
    Ok(())
}

fn print_scores(settings: &Settings, tier: Tier, json: bool) -> anyhow::Result<()> {
    let board = Leaderboard::open(settings.data_dir.join(tier.file_name()));
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, board.list_descending())?;
        writeln!(out)?;
    } else {
        board.write_table(&mut out)?;
    }
    Ok(())
}
