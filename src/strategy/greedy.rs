// Greedy strategy: one-ply improvement of distance to target

use log::debug;
use rand::RngCore;

use super::{shuffled_pieces, Strategy};
use crate::board::Grid;
use crate::config::Config;
use crate::entry::clear_entry;
use crate::eval::{distance_to_target, in_stable_region, in_target_region, pieces_outside_target};
use crate::movegen::{chain_destinations, step_and_jump_moves};
use crate::types::{Move, PlayerId, Position};

/// Picks the single move that brings a piece closest to home
///
/// Also serves as the fallback scorer for the path-planning strategies.
#[derive(Debug, Clone)]
pub struct Greedy {
    pub entry_bonus: i32,
    pub last_piece_bonus: i32,
    /// Hops to explore for chained jumps; 0 scores steps and single jumps only
    pub chain_depth: usize,
}

impl Greedy {
    pub fn new(entry_bonus: i32, last_piece_bonus: i32, chain_depth: usize) -> Self {
        Greedy {
            entry_bonus,
            last_piece_bonus,
            chain_depth,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let chain_depth = if config.greedy.chain_jumps {
            config.movegen.chain_jump_depth
        } else {
            0
        };
        Greedy::new(
            config.greedy.entry_bonus,
            config.greedy.last_piece_bonus,
            chain_depth,
        )
    }

    /// Destinations considered for the piece at `from`
    pub fn candidates(&self, grid: &Grid, from: Position) -> Vec<Position> {
        let mut dests = step_and_jump_moves(grid, from);
        if self.chain_depth > 0 {
            for dest in chain_destinations(grid, from, self.chain_depth) {
                if !dests.contains(&dest) {
                    dests.push(dest);
                }
            }
        }
        dests
    }

    /// Improvement of `mv`: distance gained plus the arrival bonus
    pub fn score(&self, grid: &Grid, player: PlayerId, mv: Move) -> i32 {
        self.score_with(grid, player, mv, pieces_outside_target(grid, player))
    }

    fn score_with(&self, grid: &Grid, player: PlayerId, mv: Move, outside: usize) -> i32 {
        let layout = grid.layout();
        let mut score = distance_to_target(layout, mv.from, player)
            - distance_to_target(layout, mv.to, player);
        if in_target_region(layout, mv.to, player) && !in_target_region(layout, mv.from, player) {
            score += if outside == 1 {
                self.last_piece_bonus
            } else {
                self.entry_bonus
            };
        }
        score
    }

    /// Scores every eligible candidate of `pieces` (in the given order)
    ///
    /// Stable-region pieces are skipped and target-region pieces never leave
    /// the region. Returns the strictly best positive score, otherwise the
    /// candidate with the strictly lowest resulting distance.
    pub fn best_candidate(&self, grid: &Grid, player: PlayerId, pieces: &[Position]) -> Option<Move> {
        let layout = grid.layout();
        let outside = pieces_outside_target(grid, player);

        let mut best: Option<(i32, Move)> = None;
        let mut fallback: Option<(i32, Move)> = None;

        for &from in pieces {
            if in_stable_region(layout, from, player) {
                continue;
            }
            let from_in_target = in_target_region(layout, from, player);

            for to in self.candidates(grid, from) {
                if from_in_target && !in_target_region(layout, to, player) {
                    continue;
                }
                let mv = Move::new(from, to);
                let score = self.score_with(grid, player, mv, outside);
                if score > best.map_or(0, |(s, _)| s) {
                    best = Some((score, mv));
                }
                let dist = distance_to_target(layout, to, player);
                if fallback.map_or(true, |(d, _)| dist < d) {
                    fallback = Some((dist, mv));
                }
            }
        }

        best.or(fallback).map(|(_, mv)| mv)
    }
}

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_move(&self, grid: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> Option<Move> {
        if let Some(mv) = clear_entry(grid, player) {
            return Some(mv);
        }
        let pieces = shuffled_pieces(grid, player, rng);
        let chosen = self.best_candidate(grid, player, &pieces);
        debug!("Greedy: player {} chose {:?}", player, chosen);
        chosen
    }
}
