// Bounded breadth-first search toward an empty target cell

use log::{debug, trace};
use rand::RngCore;
use std::collections::{HashMap, VecDeque};

use super::{shuffled_pieces, Greedy, Strategy};
use crate::board::Grid;
use crate::config::Config;
use crate::eval::{distance_to_target, in_target_region};
use crate::movegen::step_and_jump_moves;
use crate::types::{Move, PlayerId, Position};

/// Level-bounded BFS over steps and jumps on the static board
#[derive(Debug, Clone)]
pub struct Bfs {
    pub max_depth: usize,
    fallback: Greedy,
}

impl Bfs {
    pub fn new(max_depth: usize, fallback: Greedy) -> Self {
        Bfs { max_depth, fallback }
    }

    pub fn from_config(config: &Config) -> Self {
        Bfs::new(config.bfs.max_depth, Greedy::from_config(config))
    }

    /// Path from `start` to the first empty target cell within `max_depth` moves
    ///
    /// When none is reachable, returns the path to the visited cell closest to
    /// the anchor, provided it is strictly closer than `start`; otherwise None.
    pub fn search(&self, grid: &Grid, start: Position, player: PlayerId) -> Option<Vec<Position>> {
        let layout = grid.layout();
        let mut parent: HashMap<Position, Position> = HashMap::new();
        let mut depth: HashMap<Position, usize> = HashMap::new();
        let mut queue = VecDeque::new();

        depth.insert(start, 0);
        queue.push_back(start);

        let mut best = start;
        let mut best_dist = distance_to_target(layout, start, player);

        while let Some(current) = queue.pop_front() {
            if in_target_region(layout, current, player) && grid.is_empty(current) {
                trace!("BFS: reached {} from {}", current, start);
                return Some(reconstruct(&parent, current));
            }
            let level = depth[&current];
            if level >= self.max_depth {
                continue;
            }
            for next in step_and_jump_moves(grid, current) {
                if depth.contains_key(&next) {
                    continue;
                }
                depth.insert(next, level + 1);
                parent.insert(next, current);
                queue.push_back(next);

                let dist = distance_to_target(layout, next, player);
                if dist < best_dist {
                    best_dist = dist;
                    best = next;
                }
            }
        }

        if best == start {
            None
        } else {
            Some(reconstruct(&parent, best))
        }
    }
}

/// Walks parent links back to the start, returning start..=end
pub(crate) fn reconstruct(parent: &HashMap<Position, Position>, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = parent.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

impl Strategy for Bfs {
    fn name(&self) -> &'static str {
        "bfs"
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
                    debug!("BFS: player {} follows {}-step path from {}", player, path.len() - 1, pos);
                    return Some(Move::new(path[0], path[1]));
                }
            }
        }

        debug!("BFS: player {} found no path, using greedy fallback", player);
        self.fallback.best_candidate(grid, player, &pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;

    #[test]
    fn test_finds_target_within_depth() {
        let mut grid = Grid::new(BoardLayout::standard());
        grid.set(Position::new(8, 8), 1);
        let bfs = Bfs::new(8, Greedy::new(20, 100, 0));
        let path = bfs.search(&grid, Position::new(8, 8), 1).unwrap();
        assert_eq!(path.first(), Some(&Position::new(8, 8)));
        assert_eq!(path.len(), 3);
        assert!(in_target_region(grid.layout(), *path.last().unwrap(), 1));
    }

    #[test]
    fn test_shallow_search_returns_closest_fallback() {
        let mut grid = Grid::new(BoardLayout::standard());
        grid.set(Position::new(0, 0), 1);
        let bfs = Bfs::new(2, Greedy::new(20, 100, 0));
        let path = bfs.search(&grid, Position::new(0, 0), 1).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(distance_to_target(grid.layout(), path[2], 1), 20);
    }

    #[test]
    fn test_zero_depth_yields_nothing() {
        let mut grid = Grid::new(BoardLayout::standard());
        grid.set(Position::new(0, 0), 1);
        let bfs = Bfs::new(0, Greedy::new(20, 100, 0));
        assert_eq!(bfs.search(&grid, Position::new(0, 0), 1), None);
    }
}
