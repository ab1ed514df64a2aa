// Move generation on a static board
//
// Basic steps go to one of the four orthogonal neighbours. Jumps hop over any
// occupied neighbour (eight directions) into the empty cell beyond. Chained
// jumps string hops together, and additionally allow long orthogonal hops of
// even length L where only the cell L/2 away is occupied.

use std::collections::HashSet;

use crate::board::Grid;
use crate::types::{Direction, Move, PlayerId, Position, EMPTY};

/// Orthogonal in-bounds empty neighbours of `pos`
pub fn basic_moves(grid: &Grid, pos: Position) -> Vec<Position> {
    Direction::orthogonal()
        .iter()
        .map(|&dir| pos.offset(dir, 1))
        .filter(|&next| grid.is_empty(next))
        .collect()
}

/// Landing cells of single jumps from `pos` in all eight directions
pub fn jump_moves(grid: &Grid, pos: Position) -> Vec<Position> {
    Direction::all()
        .iter()
        .filter(|&&dir| grid.occupant(pos.offset(dir, 1)).is_some())
        .map(|&dir| pos.offset(dir, 2))
        .filter(|&landing| grid.is_empty(landing))
        .collect()
}

/// Basic steps followed by single jumps
pub fn step_and_jump_moves(grid: &Grid, pos: Position) -> Vec<Position> {
    let mut moves = basic_moves(grid, pos);
    moves.extend(jump_moves(grid, pos));
    moves
}

/// Landings reachable by one hop of a jump chain
fn chain_hops(grid: &Grid, pos: Position) -> Vec<Position> {
    let mut hops = jump_moves(grid, pos);
    for dir in Direction::orthogonal() {
        let mut len = 4;
        loop {
            let landing = pos.offset(dir, len);
            if !grid.in_bounds(landing) {
                break;
            }
            if grid.occupant(pos.offset(dir, len / 2)).is_some() && grid.is_empty(landing) {
                hops.push(landing);
            }
            len += 2;
        }
    }
    hops
}

/// True when `from -> to` is a single hop of a jump chain on this board
pub fn is_jump(grid: &Grid, from: Position, to: Position) -> bool {
    if !grid.is_empty(to) {
        return false;
    }
    let dr = to.row - from.row;
    let dc = to.col - from.col;
    let (adr, adc) = (dr.abs(), dc.abs());

    let single = (adr == 2 || adr == 0) && (adc == 2 || adc == 0) && (adr + adc) > 0;
    let long_orthogonal = (adr == 0) != (adc == 0) && (adr + adc) >= 4 && (adr + adc) % 2 == 0;
    if !single && !long_orthogonal {
        return false;
    }

    let mid = Position::new(from.row + dr / 2, from.col + dc / 2);
    grid.occupant(mid).is_some()
}

/// Depth-bounded search for jump chains starting at `pos`
///
/// Every discovered chain is returned as a position sequence beginning with
/// `pos`; a chain of `k` hops has `k + 1` entries. No position repeats within a
/// chain. `max_depth` caps the number of hops. The moving piece is lifted off
/// the board for the search, so it never serves as a midpoint of its own chain.
pub fn chained_jump_paths(grid: &Grid, pos: Position, max_depth: usize) -> Vec<Vec<Position>> {
    let mut paths = Vec::new();
    if max_depth == 0 {
        return paths;
    }
    let mut lifted = grid.clone();
    lifted.set(pos, EMPTY);
    let mut path = vec![pos];
    let mut visited = HashSet::new();
    visited.insert(pos);
    extend_chain(&lifted, &mut path, &mut visited, max_depth, &mut paths);
    paths
}

fn extend_chain(
    grid: &Grid,
    path: &mut Vec<Position>,
    visited: &mut HashSet<Position>,
    depth_left: usize,
    out: &mut Vec<Vec<Position>>,
) {
    let Some(&current) = path.last() else {
        return;
    };
    for landing in chain_hops(grid, current) {
        if !visited.insert(landing) {
            continue;
        }
        path.push(landing);
        out.push(path.clone());
        if depth_left > 1 {
            extend_chain(grid, path, visited, depth_left - 1, out);
        }
        path.pop();
        visited.remove(&landing);
    }
}

/// Distinct final landings of all chains from `pos`
pub fn chain_destinations(grid: &Grid, pos: Position, max_depth: usize) -> Vec<Position> {
    let mut seen = HashSet::new();
    chained_jump_paths(grid, pos, max_depth)
        .into_iter()
        .filter_map(|path| path.last().copied())
        .filter(|dest| seen.insert(*dest))
        .collect()
}

/// Every basic and single-jump move of `player`, pieces in row-major order
pub fn all_moves(grid: &Grid, player: PlayerId) -> Vec<Move> {
    grid.pieces(player)
        .into_iter()
        .flat_map(|from| {
            step_and_jump_moves(grid, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// True when `to` can be reached from `from` by a step, a single jump, or a
/// chain of at most `chain_depth` hops
///
/// Long orthogonal hops only exist inside chains, so with `chain_depth == 0`
/// this accepts exactly what `step_and_jump_moves` generates.
pub fn is_reachable(grid: &Grid, from: Position, to: Position, chain_depth: usize) -> bool {
    if !grid.is_empty(to) {
        return false;
    }
    if step_and_jump_moves(grid, from).contains(&to) {
        return true;
    }
    chained_jump_paths(grid, from, chain_depth)
        .iter()
        .any(|path| path.last() == Some(&to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;

    fn empty() -> Grid {
        Grid::new(BoardLayout::standard())
    }

    #[test]
    fn test_basic_moves_at_corner() {
        let mut grid = empty();
        grid.set(Position::new(0, 0), 1);
        let mut moves = basic_moves(&grid, Position::new(0, 0));
        moves.sort();
        assert_eq!(moves, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn test_jump_over_diagonal_neighbour() {
        let mut grid = empty();
        grid.set(Position::new(5, 5), 1);
        grid.set(Position::new(6, 6), 3);
        assert_eq!(jump_moves(&grid, Position::new(5, 5)), vec![Position::new(7, 7)]);
    }

    #[test]
    fn test_long_orthogonal_hop() {
        let mut grid = empty();
        grid.set(Position::new(5, 1), 1);
        grid.set(Position::new(5, 3), 2);
        // Only the midpoint matters for a long hop
        assert!(is_jump(&grid, Position::new(5, 1), Position::new(5, 5)));
        assert!(!is_jump(&grid, Position::new(5, 1), Position::new(5, 7)));
        let dests = chain_destinations(&grid, Position::new(5, 1), 1);
        assert_eq!(dests, vec![Position::new(5, 5)]);
    }

    #[test]
    fn test_long_hop_needs_chain_depth() {
        let mut grid = empty();
        grid.set(Position::new(5, 1), 1);
        grid.set(Position::new(5, 3), 2);
        let (from, to) = (Position::new(5, 1), Position::new(5, 5));
        assert!(!is_reachable(&grid, from, to, 0));
        assert!(is_reachable(&grid, from, to, 1));
        // Plain steps and jumps need no chain budget
        assert!(is_reachable(&grid, from, Position::new(4, 1), 0));
    }

    #[test]
    fn test_is_jump_rejects_knight_shapes() {
        let mut grid = empty();
        grid.set(Position::new(5, 5), 1);
        grid.set(Position::new(6, 5), 2);
        assert!(!is_jump(&grid, Position::new(5, 5), Position::new(7, 6)));
        assert!(is_jump(&grid, Position::new(5, 5), Position::new(7, 5)));
    }

    #[test]
    fn test_zero_depth_chain_is_empty() {
        let mut grid = empty();
        grid.set(Position::new(5, 5), 1);
        grid.set(Position::new(5, 6), 2);
        assert!(chained_jump_paths(&grid, Position::new(5, 5), 0).is_empty());
    }
}
