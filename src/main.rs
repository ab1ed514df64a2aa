// Plays one game and prints the final board plus a JSON outcome
//
// Usage:
//   cargo run -- [options]
//
// Options:
//   --seats <s1,s2,...>    One strategy per player (greedy, bfs, astar, minimax, mcts)
//   --seed <n>             Seed for the game's random generator
//   --config <path>        Path to Checkers.toml (default: Checkers.toml)

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;

use corner_jump::config::Config;
use corner_jump::game::Game;
use corner_jump::strategy::StrategyKind;

fn print_usage() {
    eprintln!("Corner-jump game runner");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  corner-jump [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --seats <S1,S2,...>     One strategy per player, in player order");
    eprintln!("  --seed <N>              Seed for the random generator");
    eprintln!("  --config <path>         Path to Checkers.toml (default: Checkers.toml)");
    eprintln!("  --help                  Show this help message");
}

fn parse_seats(s: &str) -> Result<Vec<StrategyKind>, String> {
    s.split(',').map(|seat| seat.parse::<StrategyKind>()).collect()
}

fn next_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut seats: Option<Vec<StrategyKind>> = None;
    let mut seed: Option<u64> = None;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--seats" => {
                let value = next_value(&args, i, "--seats");
                seats = Some(parse_seats(&value).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }));
                i += 2;
            }
            "--seed" => {
                let value = next_value(&args, i, "--seed");
                seed = Some(value.parse::<u64>().unwrap_or_else(|e| {
                    eprintln!("Error: invalid seed '{}': {}", value, e);
                    process::exit(1);
                }));
                i += 2;
            }
            "--config" => {
                config_path = Some(next_value(&args, i, "--config"));
                i += 2;
            }
            other => {
                eprintln!("Error: unknown argument '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
    }

    let config = match config_path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Warning: {} ({}), using hardcoded defaults", e, path);
            Config::default_hardcoded()
        }),
        None => Config::load_or_default(),
    };

    let seats = seats.unwrap_or_else(|| config.game.seats.clone());
    let seed = seed.unwrap_or(config.game.seed);
    info!("Starting corner-jump game with seats {:?} (seed {})", seats, seed);

    let mut game = Game::new(config, &seats).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = game.play(&mut rng);

    println!("{}", game.grid());
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize outcome: {}", e);
            process::exit(1);
        }
    }
}
