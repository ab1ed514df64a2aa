// Corner-jump decision bot
//
// Holds the static configuration and turns a `StrategyKind` into a configured
// strategy. Every decision goes through `Bot::choose_move`, which logs the
// move and how long it took.

use log::{debug, trace};
use rand::RngCore;
use std::time::{Duration, Instant};

use crate::board::Grid;
use crate::config::Config;
use crate::strategy::{AStar, Bfs, Greedy, Mcts, Minimax, Strategy, StrategyKind};
use crate::types::{Move, PlayerId};

/// A decision together with the time spent computing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Option<Move>,
    pub elapsed: Duration,
}

/// Decision bot with OOP-style API
/// Takes static configuration dependencies and builds strategies from it
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the strategy selected by `kind` from the configuration
    pub fn strategy(&self, kind: StrategyKind) -> Box<dyn Strategy> {
        match kind {
            StrategyKind::Greedy => Box::new(Greedy::from_config(&self.config)),
            StrategyKind::Bfs => Box::new(Bfs::from_config(&self.config)),
            StrategyKind::AStar => Box::new(AStar::from_config(&self.config)),
            StrategyKind::Minimax => Box::new(Minimax::from_config(&self.config)),
            StrategyKind::Mcts => Box::new(Mcts::from_config(&self.config)),
        }
    }

    /// Computes the next move for `player` with the strategy `kind`
    ///
    /// # Arguments
    /// * `grid` - Current board state
    /// * `player` - Player to move
    /// * `kind` - Strategy to decide with
    /// * `rng` - Random source; a seeded generator reproduces the decision
    ///
    /// # Returns
    /// * `Option<Move>` - The chosen move, or None to pass
    pub fn choose_move(
        &self,
        grid: &Grid,
        player: PlayerId,
        kind: StrategyKind,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        self.decide(grid, player, self.strategy(kind).as_ref(), rng).mv
    }

    /// Runs an already built strategy and times it
    pub fn decide(
        &self,
        grid: &Grid,
        player: PlayerId,
        strategy: &dyn Strategy,
        rng: &mut dyn RngCore,
    ) -> Decision {
        let start = Instant::now();
        let mv = strategy.choose_move(grid, player, rng);
        let elapsed = start.elapsed();

        match mv {
            Some(mv) => debug!(
                "Player {} ({}) moves {} in {:?}",
                player,
                strategy.name(),
                mv,
                elapsed
            ),
            None => debug!(
                "Player {} ({}) passes after {:?}",
                player,
                strategy.name(),
                elapsed
            ),
        }
        trace!("Board at decision:\n{}", grid);

        Decision { mv, elapsed }
    }
}
