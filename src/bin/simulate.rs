// Batch simulator for comparing strategies
//
// Usage:
//   cargo run --release --bin simulate -- [options]
//
// Options:
//   --rounds <n>           Number of games (default: [simulation].rounds)
//   --seats <s1,s2,...>    One strategy per player (default: [game].seats)
//   --seed <n>             Base seed; round i uses seed + i
//   --turns <t1,t2,...>    Sweep several turn limits (default: [game].max_turns)
//   --table                Print a plain-text table instead of JSON
//   --config <path>        Path to Checkers.toml (default: Checkers.toml)

use std::env;
use std::process;

use corner_jump::config::Config;
use corner_jump::simulate::{format_table, run_sweep};
use corner_jump::strategy::StrategyKind;

fn print_usage() {
    eprintln!("Corner-jump batch simulator");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  simulate [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --rounds <N>            Number of games per turn limit");
    eprintln!("  --seats <S1,S2,...>     One strategy per player, in player order");
    eprintln!("  --seed <N>              Base seed; round i uses seed + i");
    eprintln!("  --turns <T1,T2,...>     Turn limits to sweep (comma-separated)");
    eprintln!("  --table                 Print a table per turn limit instead of JSON");
    eprintln!("  --config <path>         Path to Checkers.toml (default: Checkers.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Four strategies, 50 rounds");
    eprintln!("  simulate --rounds 50 --seats greedy,bfs,astar,mcts");
    eprintln!();
    eprintln!("  # Compare game lengths");
    eprintln!("  simulate --turns 60,120,180,240,300 --table");
}

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T
where
    T::Err: std::fmt::Display,
{
    let Some(raw) = args.get(i + 1) else {
        eprintln!("Error: {} requires a value", flag);
        process::exit(1);
    };
    raw.parse::<T>().unwrap_or_else(|e| {
        eprintln!("Error: invalid value '{}' for {}: {}", raw, flag, e);
        process::exit(1);
    })
}

fn parse_list<T: std::str::FromStr>(raw: &str, flag: &str) -> Vec<T>
where
    T::Err: std::fmt::Display,
{
    raw.split(',')
        .map(|item| {
            item.trim().parse::<T>().unwrap_or_else(|e| {
                eprintln!("Error: invalid entry '{}' for {}: {}", item, flag, e);
                process::exit(1);
            })
        })
        .collect()
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut rounds: Option<usize> = None;
    let mut seats: Option<Vec<StrategyKind>> = None;
    let mut seed: Option<u64> = None;
    let mut turns: Option<Vec<usize>> = None;
    let mut table = false;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--table" => {
                table = true;
                i += 1;
                continue;
            }
            "--rounds" => rounds = Some(parse_arg(&args, i, "--rounds")),
            "--seed" => seed = Some(parse_arg(&args, i, "--seed")),
            "--config" => config_path = Some(parse_arg(&args, i, "--config")),
            "--seats" => {
                let raw: String = parse_arg(&args, i, "--seats");
                seats = Some(parse_list(&raw, "--seats"));
            }
            "--turns" => {
                let raw: String = parse_arg(&args, i, "--turns");
                turns = Some(parse_list(&raw, "--turns"));
            }
            other => {
                eprintln!("Error: unknown argument '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 2;
    }

    let mut config = match config_path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Warning: {} ({}), using hardcoded defaults", e, path);
            Config::default_hardcoded()
        }),
        None => Config::load_or_default(),
    };
    if let Some(seed) = seed {
        config.game.seed = seed;
    }
    let rounds = rounds.unwrap_or(config.simulation.rounds);
    let seats = seats.unwrap_or_else(|| config.game.seats.clone());
    let turns = turns.unwrap_or_else(|| vec![config.game.max_turns]);

    let reports = run_sweep(&config, &seats, rounds, &turns).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if table {
        for report in &reports {
            println!("{}", format_table(report));
        }
        return;
    }

    // A single turn limit keeps the one-report JSON shape
    let json = if reports.len() == 1 {
        serde_json::to_string_pretty(&reports[0])
    } else {
        serde_json::to_string_pretty(&reports)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize report: {}", e);
            process::exit(1);
        }
    }
}
