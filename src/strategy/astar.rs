// A* path planning toward an empty target cell

use log::{debug, trace};
use rand::RngCore;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::bfs::reconstruct;
use super::{shuffled_pieces, Greedy, Strategy};
use crate::board::Grid;
use crate::config::Config;
use crate::eval::{distance_to_target, in_target_region};
use crate::movegen::step_and_jump_moves;
use crate::types::{Move, PlayerId, Position};

/// A* over steps and jumps on the static board
///
/// Cost is the number of moves, the heuristic is the Manhattan distance to the
/// player's deep anchor. Falls back to greedy scoring when no piece can plan a
/// route into the target.
#[derive(Debug, Clone)]
pub struct AStar {
    fallback: Greedy,
}

impl AStar {
    pub fn new(fallback: Greedy) -> Self {
        AStar { fallback }
    }

    pub fn from_config(config: &Config) -> Self {
        AStar::new(Greedy::from_config(config))
    }

    /// Shortest planned route from `start` to an empty target cell
    pub fn search(&self, grid: &Grid, start: Position, player: PlayerId) -> Option<Vec<Position>> {
        let layout = grid.layout();
        let heuristic = |pos: Position| distance_to_target(layout, pos, player);

        let mut open = BinaryHeap::new();
        let mut g_score: HashMap<Position, i32> = HashMap::new();
        let mut came_from: HashMap<Position, Position> = HashMap::new();

        g_score.insert(start, 0);
        open.push(Reverse((heuristic(start), 0, start)));

        while let Some(Reverse((_, g, current))) = open.pop() {
            if g > g_score.get(&current).copied().unwrap_or(i32::MAX) {
                continue; // stale entry
            }
            if in_target_region(layout, current, player) && grid.is_empty(current) {
                trace!("A*: {} -> {} in {} moves", start, current, g);
                return Some(reconstruct(&came_from, current));
            }
            for next in step_and_jump_moves(grid, current) {
                let tentative = g + 1;
                if tentative < g_score.get(&next).copied().unwrap_or(i32::MAX) {
                    came_from.insert(next, current);
                    g_score.insert(next, tentative);
                    open.push(Reverse((tentative + heuristic(next), tentative, next)));
                }
            }
        }
        None
    }
}

impl Strategy for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn choose_move(&self, grid: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> Option<Move> {
        let layout = grid.layout();
        let pieces = shuffled_pieces(grid, player, rng);

        for &pos in &pieces {
            if in_target_region(layout, pos, player) {
                continue;
            }
            if let Some(path) = self.search(grid, pos, player) {
                if path.len() >= 2 {
                    debug!("A*: player {} plans {} moves from {}", player, path.len() - 1, pos);
                    return Some(Move::new(path[0], path[1]));
                }
            }
        }

        debug!("A*: player {} has no route, using greedy fallback", player);
        self.fallback.best_candidate(grid, player, &pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;

    #[test]
    fn test_uses_jump_to_shorten_route() {
        let mut grid = Grid::new(BoardLayout::standard());
        grid.set(Position::new(7, 7), 1);
        grid.set(Position::new(8, 8), 2);
        let path = AStar::new(Greedy::new(20, 100, 0))
            .search(&grid, Position::new(7, 7), 1)
            .unwrap();
        assert_eq!(path, vec![Position::new(7, 7), Position::new(9, 9)]);
    }

    #[test]
    fn test_unreachable_target_returns_none() {
        let layout = BoardLayout::new(12, 3, 2, 2);
        let mut grid = Grid::new(layout);
        // Player 1 target completely filled by player 2
        for pos in layout.regions(1).unwrap().target.cells() {
            grid.set(pos, 2);
        }
        grid.set(Position::new(5, 5), 1);
        let astar = AStar::new(Greedy::new(20, 100, 0));
        assert_eq!(astar.search(&grid, Position::new(5, 5), 1), None);
    }
}
