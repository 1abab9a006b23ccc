//! Self-play CLI
//!
//! Pit two random selectors against each other and report the results.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use draughts_core::MoveSelector;
use random_selector::RandomSelector;
use selfplay::{MatchConfig, MatchReport, MatchRunner};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Draughts Self-Play Runner");
    println!();
    println!("Usage:");
    println!("  selfplay [--games N] [--max-turns N] [--seed S] [--config FILE] [--out FILE] [--quiet]");
    println!();
    println!("Options:");
    println!("  --games, -g      number of games (default 10)");
    println!("  --max-turns, -t  turns per game before it is scored a draw (default 200)");
    println!("  --seed, -s       seed for both random selectors");
    println!("  --config, -c     TOML file with any of the above; flags override it");
    println!("  --out, -o        write the match report as JSON");
    println!();
    println!("Examples:");
    println!("  selfplay --games 100 --seed 7");
    println!("  selfplay --config selfplay.toml --out report.json");
}

struct Args {
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
    games: Option<u32>,
    max_turns: Option<u32>,
    seed: Option<u64>,
    quiet: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut parsed = Args {
        config_path: None,
        out: None,
        games: None,
        max_turns: None,
        seed: None,
        quiet: false,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" | "-g" => {
                parsed.games = Some(take_value(args, &mut i, flag)?.parse().context("--games")?)
            }
            "--max-turns" | "-t" => {
                parsed.max_turns =
                    Some(take_value(args, &mut i, flag)?.parse().context("--max-turns")?)
            }
            "--seed" | "-s" => {
                parsed.seed = Some(take_value(args, &mut i, flag)?.parse().context("--seed")?)
            }
            "--config" | "-c" => {
                parsed.config_path = Some(PathBuf::from(take_value(args, &mut i, flag)?))
            }
            "--out" | "-o" => parsed.out = Some(PathBuf::from(take_value(args, &mut i, flag)?)),
            "--quiet" | "-q" => parsed.quiet = true,
            "help" | "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn build_config(args: &Args) -> Result<MatchConfig> {
    let mut config = match &args.config_path {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(games) = args.games {
        config.num_games = games;
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.quiet {
        config.verbose = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };
    let config = build_config(&args)?;

    let mut first = RandomSelector::with_seed(config.seed);
    let mut second = RandomSelector::with_seed(config.seed.wrapping_add(1));
    let first_name = format!("{} (seed {})", first.name(), config.seed);
    let second_name = format!("{} (seed {})", second.name(), config.seed.wrapping_add(1));

    println!("=== Match: {} vs {} ===", first_name, second_name);
    println!("Games: {}, Turn cap: {}", config.num_games, config.max_turns);
    println!();

    let runner = MatchRunner::new(config.clone());
    let (result, games) = runner
        .run_match(&mut first, &mut second)
        .context("self-play match failed")?;

    let report = MatchReport::new(&first_name, &second_name, config, result, games);
    println!();
    report.print_report();

    if let Some(path) = &args.out {
        report
            .save(path)
            .with_context(|| format!("saving report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
