use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use jass_bot::BotKind;
use jass_cli::config::TableConfig;
use jass_cli::logging::init_logging;
use jass_cli::table::{play_table, replay_file};
use jass_core::game::replay::ReplayMode;
use jass_core::model::player::PlayerPosition;
use jass_core::model::suit::Suit;
use jass_env::{ActionPolicy, EnvConfig, LowestAction, RandomAction, SingleAgentEnv, evaluate};

/// Swiss Jass table runner.
#[derive(Debug, Parser)]
#[command(name = "jass", author, version, about = "Deterministic Swiss Jass table runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one deal with bots and print the team points.
    Play(PlayArgs),
    /// Re-apply a saved replay through the engine.
    Replay {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Apply plays in log order without checking whose turn it is.
        #[arg(long)]
        relaxed: bool,
    },
    /// Load and validate a table configuration, then exit.
    Validate {
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
    /// Score one seat's action policy against scripted opponents.
    Eval(EvalArgs),
}

#[derive(Debug, Args)]
struct PlayArgs {
    /// Path to the YAML table configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fix the contract (trump, obeabe, uneufe) instead of bidding.
    #[arg(long)]
    mode: Option<String>,

    #[arg(long, value_name = "SUIT")]
    trump_suit: Option<Suit>,

    /// Override the deal seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Seat index (0..4) that bids first and leads.
    #[arg(long)]
    leader: Option<usize>,

    /// Comma list of four seats: lowest, random, heuristic.
    #[arg(long, value_delimiter = ',')]
    players: Option<Vec<String>>,

    /// Write the deal's replay file here.
    #[arg(long, value_name = "FILE")]
    replay_out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EvalArgs {
    #[arg(long, default_value_t = 100)]
    episodes: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Policy for seat 0: lowest or random.
    #[arg(long, default_value = "random")]
    agent: BotKind,

    /// Policy for the other three seats: lowest or random.
    #[arg(long, default_value = "lowest")]
    opponent: BotKind,

    /// Let the table bid instead of drawing a random contract.
    #[arg(long)]
    bidding: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Play(args) => run_play(args),
        Command::Replay { path, relaxed } => {
            let mode = if relaxed {
                ReplayMode::Relaxed
            } else {
                ReplayMode::Strict
            };
            let points = replay_file(&path, mode)?;
            println!("Replay finished.");
            println!("Team points: {points:?}");
            Ok(())
        }
        Command::Validate { config } => {
            let config = TableConfig::from_path(&config)?;
            println!(
                "Configuration valid: players {:?}, leader {}",
                config.players, config.leader
            );
            Ok(())
        }
        Command::Eval(args) => run_eval(args),
    }
}

fn run_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = match args.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default(),
    };

    if args.mode.is_some() {
        config.mode = args.mode;
    }
    if args.trump_suit.is_some() {
        config.trump_suit = args.trump_suit;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(leader) = args.leader {
        config.leader = leader;
    }
    if let Some(players) = args.players {
        config.players = players;
    }

    config.validate().context("invalid table settings")?;
    let _logging_guard = init_logging(&config.logging)?;

    let summary = play_table(&config, args.replay_out.as_deref())?;
    println!("Round finished (seed {}).", summary.seed);
    match summary.chooser {
        Some(chooser) => println!("Contract: {} chosen by {chooser}", summary.mode),
        None => println!("Contract: {}", summary.mode),
    }
    println!("Team points: {:?}", summary.team_points);
    if let Some(path) = summary.replay_path {
        println!("Replay saved to {}", path.display());
    }
    Ok(())
}

fn action_policy(kind: BotKind, seed: u64) -> anyhow::Result<Box<dyn ActionPolicy>> {
    match kind {
        BotKind::Lowest => Ok(Box::new(LowestAction)),
        BotKind::Random => Ok(Box::new(RandomAction::with_seed(seed))),
        BotKind::Heuristic => anyhow::bail!("heuristic play is not available as an action policy"),
    }
}

fn run_eval(args: EvalArgs) -> anyhow::Result<()> {
    let config = EnvConfig {
        seed: args.seed,
        enable_bidding: args.bidding,
        ..EnvConfig::default()
    };
    let opponent = action_policy(args.opponent, args.seed.wrapping_add(1))?;
    let mut agent = action_policy(args.agent, args.seed)?;
    let mut single = SingleAgentEnv::new(config, PlayerPosition::North, opponent);

    let summary = evaluate(&mut single, agent.as_mut(), args.episodes, args.seed)?;
    println!(
        "Evaluated {} episodes: {} wins, {} ties, win rate {:.3}, mean points {:.1}",
        summary.episodes,
        summary.wins,
        summary.ties,
        summary.win_rate(),
        summary.mean_points
    );
    Ok(())
}
