// Decision strategies
//
// Every strategy answers the same question: given a board and the player to
// move, which piece goes where? Randomness is always injected so that a seeded
// generator reproduces a decision exactly.

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::Grid;
use crate::types::{Move, PlayerId, Position};

pub mod astar;
pub mod bfs;
pub mod greedy;
pub mod mcts;
pub mod minimax;

pub use astar::AStar;
pub use bfs::Bfs;
pub use greedy::Greedy;
pub use mcts::{Mcts, SearchTree};
pub use minimax::Minimax;

/// A move-selection algorithm
pub trait Strategy {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Picks a move for `player`, or None to pass
    fn choose_move(&self, grid: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> Option<Move>;
}

/// Selector for the five built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Greedy,
    Bfs,
    AStar,
    Minimax,
    Mcts,
}

impl StrategyKind {
    pub fn all() -> [StrategyKind; 5] {
        [
            StrategyKind::Greedy,
            StrategyKind::Bfs,
            StrategyKind::AStar,
            StrategyKind::Minimax,
            StrategyKind::Mcts,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Greedy => "greedy",
            StrategyKind::Bfs => "bfs",
            StrategyKind::AStar => "astar",
            StrategyKind::Minimax => "minimax",
            StrategyKind::Mcts => "mcts",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(StrategyKind::Greedy),
            "bfs" => Ok(StrategyKind::Bfs),
            "astar" | "a*" => Ok(StrategyKind::AStar),
            "minimax" => Ok(StrategyKind::Minimax),
            "mcts" => Ok(StrategyKind::Mcts),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// The player's pieces in random order
pub(crate) fn shuffled_pieces(grid: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> Vec<Position> {
    let mut pieces = grid.pieces(player);
    pieces.shuffle(rng);
    pieces
}
