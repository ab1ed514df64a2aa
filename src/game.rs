// Game runner
//
// Seats one strategy per player on a freshly filled board and lets them take
// turns until the board is terminal or the turn limit is hit. Moves coming out
// of a strategy are treated as untrusted and validated before they land.

use log::{info, warn};
use rand::RngCore;
use serde::Serialize;

use crate::board::Grid;
use crate::bot::Bot;
use crate::config::Config;
use crate::strategy::{Strategy, StrategyKind};
use crate::types::PlayerId;

/// Per-seat statistics collected over one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatStats {
    pub player: PlayerId,
    pub strategy: StrategyKind,
    pub target_count: usize,
    pub decisions: u32,
    pub passes: u32,
    /// Moves that failed validation and were turned into passes
    pub rejected: u32,
    pub total_decision_micros: u64,
}

impl SeatStats {
    pub fn avg_decision_micros(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_decision_micros as f64 / self.decisions as f64
        }
    }
}

/// Result of one complete game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Most pieces in target, first seat on ties, None if nobody arrived
    pub winner: Option<PlayerId>,
    /// Full rounds played
    pub turns: usize,
    /// True when some player filled its target region
    pub finished: bool,
    pub seats: Vec<SeatStats>,
}

struct Seat {
    strategy: Box<dyn Strategy>,
    stats: SeatStats,
}

/// A game in progress
pub struct Game {
    bot: Bot,
    grid: Grid,
    seats: Vec<Seat>,
    turn: usize,
    max_turns: usize,
    chain_depth: usize,
}

impl Game {
    /// Sets up the starting position with one strategy per seated player
    ///
    /// # Arguments
    /// * `config` - Board geometry and strategy parameters
    /// * `seats` - One strategy per player, in player id order
    ///
    /// # Returns
    /// * `Result<Game, String>` - The game, or why the configuration is unusable
    pub fn new(config: Config, seats: &[StrategyKind]) -> Result<Self, String> {
        let layout = config.layout()?;
        if seats.len() != layout.players().len() {
            return Err(format!(
                "Expected {} seats for a {} player board, got {}",
                layout.players().len(),
                layout.players().len(),
                seats.len()
            ));
        }

        let bot = Bot::new(config);
        let seats = layout
            .players()
            .iter()
            .zip(seats)
            .map(|(&player, &kind)| Seat {
                strategy: bot.strategy(kind),
                stats: SeatStats {
                    player,
                    strategy: kind,
                    target_count: 0,
                    decisions: 0,
                    passes: 0,
                    rejected: 0,
                    total_decision_micros: 0,
                },
            })
            .collect();

        Ok(Game {
            max_turns: bot.config().game.max_turns,
            chain_depth: bot.config().movegen.chain_jump_depth,
            bot,
            grid: Grid::with_starting_pieces(layout),
            seats,
            turn: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Lets every seat move once, stopping early if the board becomes terminal
    ///
    /// Returns the number of moves that were applied.
    pub fn play_turn(&mut self, rng: &mut dyn RngCore) -> usize {
        let mut applied = 0;

        for seat in self.seats.iter_mut() {
            if self.grid.is_terminal() {
                break;
            }
            let player = seat.stats.player;
            let decision = self
                .bot
                .decide(&self.grid, player, seat.strategy.as_ref(), rng);

            seat.stats.decisions += 1;
            seat.stats.total_decision_micros += decision.elapsed.as_micros() as u64;

            match decision.mv {
                Some(mv) => match self.grid.try_apply(player, mv, self.chain_depth) {
                    Ok(()) => applied += 1,
                    Err(e) => {
                        warn!("Player {} ({}) rejected: {}", player, seat.stats.strategy, e);
                        seat.stats.rejected += 1;
                        seat.stats.passes += 1;
                    }
                },
                None => seat.stats.passes += 1,
            }
        }

        self.turn += 1;
        info!(
            "Turn {}: {} moves applied, targets {:?}",
            self.turn,
            applied,
            self.seats
                .iter()
                .map(|s| self.grid.target_count(s.stats.player))
                .collect::<Vec<_>>()
        );
        applied
    }

    /// Plays until a target fills, the turn limit is reached, or a full round
    /// goes by without any move
    pub fn play(&mut self, rng: &mut dyn RngCore) -> GameOutcome {
        while !self.grid.is_terminal() && self.turn < self.max_turns {
            if self.play_turn(rng) == 0 {
                info!("Turn {}: every player passed, stopping", self.turn);
                break;
            }
        }
        self.outcome()
    }

    /// Snapshot of the current standings
    pub fn outcome(&self) -> GameOutcome {
        let seats: Vec<SeatStats> = self
            .seats
            .iter()
            .map(|seat| SeatStats {
                target_count: self.grid.target_count(seat.stats.player),
                ..seat.stats.clone()
            })
            .collect();

        let winner = seats
            .iter()
            .filter(|s| s.target_count > 0)
            .fold(None, |best: Option<&SeatStats>, s| match best {
                Some(b) if b.target_count >= s.target_count => Some(b),
                _ => Some(s),
            })
            .map(|s| s.player);

        GameOutcome {
            winner,
            turns: self.turn,
            finished: self.grid.is_terminal(),
            seats,
        }
    }
}
