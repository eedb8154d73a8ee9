//! Conquest self-play CLI.
//!
//! Plays seeded all-AI games and writes one JSON summary per game.
//!
//! Usage:
//!   conquest [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --players N     AI players per game, 3-6 (default: 4)
//!   --turns N       Turns before a game is stopped (default: 60)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --map FILE      Map document to play on (default: built-in demo map)
//!   --config FILE   Engine settings as JSON (default: built-in defaults)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Only log warnings

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use conquest::board::{demo_map, load_map};
use conquest::config::load_config;
use conquest::selfplay::{self, SelfPlayConfig};

struct Args {
    config: SelfPlayConfig,
    map: Option<PathBuf>,
    engine: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args
        .get(i)
        .ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: {}", flag, raw))
}

/// Parses the command line. `Ok(None)` means help was printed.
fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut config = SelfPlayConfig::default();
    let mut map = None;
    let mut engine = None;
    let mut output = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" => {
                i += 1;
                config.num_games = value(args, i, flag)?;
            }
            "--players" => {
                i += 1;
                config.players = value(args, i, flag)?;
            }
            "--turns" => {
                i += 1;
                config.max_turns = value(args, i, flag)?;
            }
            "--threads" => {
                i += 1;
                config.threads = value(args, i, flag)?;
            }
            "--seed" => {
                i += 1;
                config.seed = value(args, i, flag)?;
            }
            "--map" => {
                i += 1;
                map = Some(value(args, i, flag)?);
            }
            "--config" => {
                i += 1;
                engine = Some(value(args, i, flag)?);
            }
            "--output" => {
                i += 1;
                output = Some(value(args, i, flag)?);
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(Args {
        config,
        map,
        engine,
        output,
    }))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(Some(a)) => a,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let level = if args.config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let map = match &args.map {
        Some(path) => load_map(path)?,
        None => demo_map()?,
    };
    let mut config = args.config.clone();
    if let Some(path) = &args.engine {
        config.game = load_config(path)?;
        info!(path = %path.display(), "loaded engine config");
    }
    info!(
        games = config.num_games,
        players = config.players,
        turns = config.max_turns,
        threads = config.threads,
        countries = map.country_count(),
        "self-play starting"
    );

    let start = Instant::now();
    let games = selfplay::run_self_play(&map, &config)?;
    let elapsed = start.elapsed().as_secs_f64();
    let decided = games.iter().filter(|g| g.winner.is_some()).count();
    info!(games = games.len(), decided, secs = elapsed, "self-play finished");

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            selfplay::write_jsonl(&games, &mut writer)?;
            info!(path = %path.display(), "wrote game records");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: conquest [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --players N      AI players per game, 3-6 (default: 4)");
    eprintln!("  --turns N        Turns before a game is stopped (default: 60)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --map FILE       Map document to play on (default: built-in demo map)");
    eprintln!("  --config FILE    Engine settings as JSON (default: built-in defaults)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Only log warnings");
    eprintln!("  --help           Show this help");
}
