// Batch simulation
//
// Runs many independent games on rayon's thread pool and folds their outcomes
// into a single report. Round `i` is seeded with `seed + i`, so a batch is
// reproducible regardless of how rounds are scheduled across threads.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write;

use crate::config::Config;
use crate::game::{Game, GameOutcome};
use crate::strategy::StrategyKind;
use crate::types::PlayerId;

/// Aggregated results for one seat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatReport {
    pub player: PlayerId,
    pub strategy: StrategyKind,
    pub wins: usize,
    /// Percentage of rounds won
    pub win_rate: f64,
    pub avg_decision_micros: f64,
}

/// Aggregated results for a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub generated_at: String,
    /// Turn limit every round was played with
    pub max_turns: usize,
    pub rounds: usize,
    pub draws: usize,
    pub avg_turns: f64,
    pub seats: Vec<SeatReport>,
}

/// Plays a single round with its own seeded generator
pub fn run_round(config: &Config, seats: &[StrategyKind], seed: u64) -> Result<GameOutcome, String> {
    let mut game = Game::new(config.clone(), seats)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(game.play(&mut rng))
}

/// Plays `rounds` games in parallel and summarizes them
///
/// # Arguments
/// * `config` - Shared configuration; `game.seed` is the base seed
/// * `seats` - One strategy per player, in player id order
/// * `rounds` - Number of games to play
///
/// # Returns
/// * `Result<BatchReport, String>` - The report, or the first setup error
pub fn run_batch(config: &Config, seats: &[StrategyKind], rounds: usize) -> Result<BatchReport, String> {
    let base = config.game.seed;
    info!("Simulating {} rounds with seats {:?}", rounds, seats);

    let outcomes = (0..rounds)
        .into_par_iter()
        .map(|round| run_round(config, seats, base.wrapping_add(round as u64)))
        .collect::<Result<Vec<_>, String>>()?;

    Ok(summarize(config.game.max_turns, seats, &outcomes))
}

/// Runs one batch per turn limit in `turn_limits`
///
/// Every batch reuses the same base seed, so the sweep isolates the effect of
/// the game length.
pub fn run_sweep(
    config: &Config,
    seats: &[StrategyKind],
    rounds: usize,
    turn_limits: &[usize],
) -> Result<Vec<BatchReport>, String> {
    turn_limits
        .iter()
        .map(|&max_turns| {
            let mut limited = config.clone();
            limited.game.max_turns = max_turns;
            run_batch(&limited, seats, rounds)
        })
        .collect()
}

/// Folds finished games into a report
pub fn summarize(max_turns: usize, seats: &[StrategyKind], outcomes: &[GameOutcome]) -> BatchReport {
    let rounds = outcomes.len();
    let draws = outcomes.iter().filter(|o| o.winner.is_none()).count();
    let avg_turns = if rounds == 0 {
        0.0
    } else {
        outcomes.iter().map(|o| o.turns).sum::<usize>() as f64 / rounds as f64
    };

    let seats = seats
        .iter()
        .enumerate()
        .map(|(idx, &strategy)| {
            let stats: Vec<_> = outcomes.iter().filter_map(|o| o.seats.get(idx)).collect();
            let player = stats.first().map(|s| s.player).unwrap_or(idx as PlayerId + 1);
            let wins = outcomes.iter().filter(|o| o.winner == Some(player)).count();
            let decisions: u64 = stats.iter().map(|s| s.decisions as u64).sum();
            let micros: u64 = stats.iter().map(|s| s.total_decision_micros).sum();

            SeatReport {
                player,
                strategy,
                wins,
                win_rate: if rounds == 0 {
                    0.0
                } else {
                    wins as f64 * 100.0 / rounds as f64
                },
                avg_decision_micros: if decisions == 0 {
                    0.0
                } else {
                    micros as f64 / decisions as f64
                },
            }
        })
        .collect();

    BatchReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        max_turns,
        rounds,
        draws,
        avg_turns,
        seats,
    }
}

/// Plain-text table of a report, one line per seat
pub fn format_table(report: &BatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "max_turns={} rounds={} draws={} avg_turns={:.1}",
        report.max_turns, report.rounds, report.draws, report.avg_turns
    );
    let _ = writeln!(
        out,
        "{:<8} {:<10} {:>6} {:>9} {:>14}",
        "player", "strategy", "wins", "win_rate", "avg_step_us"
    );
    for seat in &report.seats {
        let _ = writeln!(
            out,
            "{:<8} {:<10} {:>6} {:>8.1}% {:>14.1}",
            seat.player,
            seat.strategy.as_str(),
            seat.wins,
            seat.win_rate,
            seat.avg_decision_micros
        );
    }
    out
}
