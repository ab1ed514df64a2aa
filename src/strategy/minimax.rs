// Depth-limited minimax with alpha-beta pruning
//
// The search is two-sided even on a four player board: every other player is
// collapsed into one fixed opponent (player 1, or player 2 when we are
// player 1). True n-player search is out of scope.

use log::{debug, trace};
use rand::RngCore;
use std::cell::Cell;

use super::Strategy;
use crate::board::Grid;
use crate::config::Config;
use crate::entry::clear_entry;
use crate::eval::relative_score;
use crate::movegen::all_moves;
use crate::types::{Move, PlayerId};

/// The single adversary minimax plays against
pub fn opponent_of(player: PlayerId) -> PlayerId {
    if player != 1 {
        1
    } else {
        2
    }
}

#[derive(Debug, Clone)]
pub struct Minimax {
    /// Plies searched, counting our root move. 0 and 1 both mean one-ply lookahead.
    pub depth: u8,
    cutoffs: Cell<u64>,
}

impl Minimax {
    pub fn new(depth: u8) -> Self {
        Minimax {
            depth,
            cutoffs: Cell::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Minimax::new(config.minimax.depth)
    }

    /// Leaf evaluation from `player`'s point of view
    pub fn evaluate(&self, grid: &Grid, player: PlayerId) -> i32 {
        relative_score(grid, player, opponent_of(player))
    }

    /// Minimax value of the best root move, without the entry-clearing pre-pass
    pub fn search(&self, grid: &Grid, player: PlayerId) -> Option<(Move, i32)> {
        let moves = all_moves(grid, player);
        let mut alpha = i32::MIN;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let mut child = grid.clone();
            child.apply_move(mv.from, mv.to);
            let value = if self.depth <= 1 {
                self.evaluate(&child, player)
            } else {
                self.alpha_beta(&child, player, self.depth - 1, alpha, i32::MAX, false)
            };
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((mv, value));
            }
            alpha = alpha.max(value);
        }
        best
    }

    fn alpha_beta(
        &self,
        grid: &Grid,
        player: PlayerId,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        if depth == 0 || grid.is_terminal() {
            return self.evaluate(grid, player);
        }
        let mover = if maximizing { player } else { opponent_of(player) };
        let moves = all_moves(grid, mover);
        if moves.is_empty() {
            return self.evaluate(grid, player);
        }

        if maximizing {
            let mut value = i32::MIN;
            for mv in moves {
                let mut child = grid.clone();
                child.apply_move(mv.from, mv.to);
                value = value.max(self.alpha_beta(&child, player, depth - 1, alpha, beta, false));
                if value >= beta {
                    self.cutoffs.set(self.cutoffs.get() + 1);
                    return value;
                }
                alpha = alpha.max(value);
            }
            value
        } else {
            let mut value = i32::MAX;
            for mv in moves {
                let mut child = grid.clone();
                child.apply_move(mv.from, mv.to);
                value = value.min(self.alpha_beta(&child, player, depth - 1, alpha, beta, true));
                if value <= alpha {
                    self.cutoffs.set(self.cutoffs.get() + 1);
                    return value;
                }
                beta = beta.min(value);
            }
            value
        }
    }

    /// Branches pruned since this searcher was created
    pub fn cutoffs(&self) -> u64 {
        self.cutoffs.get()
    }
}

impl Strategy for Minimax {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn choose_move(&self, grid: &Grid, player: PlayerId, _rng: &mut dyn RngCore) -> Option<Move> {
        if let Some(mv) = clear_entry(grid, player) {
            return Some(mv);
        }
        let before = self.cutoffs();
        let result = self.search(grid, player);
        trace!("Minimax: {} cutoffs", self.cutoffs() - before);
        if let Some((mv, value)) = result {
            debug!("Minimax: player {} chose {} (value {})", player, mv, value);
        }
        result.map(|(mv, _)| mv)
    }
}
