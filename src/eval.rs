// Position evaluation: distance to target and region membership
//
// All lookups go through the `BoardLayout` table. Lower distance is always
// better for the player being evaluated.

use crate::board::{BoardLayout, Grid};
use crate::types::{PlayerId, Position};

/// Manhattan distance from `pos` to the player's deep anchor
///
/// Unseated players get distance 0 everywhere.
pub fn distance_to_target(layout: &BoardLayout, pos: Position, player: PlayerId) -> i32 {
    layout
        .regions(player)
        .map(|r| pos.manhattan(r.anchor))
        .unwrap_or(0)
}

pub fn in_target_region(layout: &BoardLayout, pos: Position, player: PlayerId) -> bool {
    layout
        .regions(player)
        .map(|r| r.target.contains(pos))
        .unwrap_or(false)
}

pub fn in_stable_region(layout: &BoardLayout, pos: Position, player: PlayerId) -> bool {
    layout
        .regions(player)
        .map(|r| r.stable.contains(pos))
        .unwrap_or(false)
}

/// Sum of distances over all of a player's pieces
pub fn total_distance(grid: &Grid, player: PlayerId) -> i32 {
    let layout = grid.layout();
    grid.pieces(player)
        .into_iter()
        .map(|pos| distance_to_target(layout, pos, player))
        .sum()
}

/// Number of a player's pieces still outside its target region
pub fn pieces_outside_target(grid: &Grid, player: PlayerId) -> usize {
    let layout = grid.layout();
    grid.pieces(player)
        .into_iter()
        .filter(|&pos| !in_target_region(layout, pos, player))
        .count()
}

/// Adversarial score: opponent's total distance minus our own
///
/// Higher is better for `player`.
pub fn relative_score(grid: &Grid, player: PlayerId, opponent: PlayerId) -> i32 {
    total_distance(grid, opponent) - total_distance(grid, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_only_at_anchor() {
        let layout = BoardLayout::standard();
        for player in 1..=4u8 {
            let anchor = layout.regions(player).unwrap().anchor;
            for row in 0..12 {
                for col in 0..12 {
                    let pos = Position::new(row, col);
                    let d = distance_to_target(&layout, pos, player);
                    assert!(d >= 0);
                    assert_eq!(d == 0, pos == anchor, "player {} at {}", player, pos);
                }
            }
        }
    }

    #[test]
    fn test_region_predicates() {
        let layout = BoardLayout::standard();
        assert!(in_target_region(&layout, Position::new(9, 0), 2));
        assert!(!in_target_region(&layout, Position::new(9, 3), 2));
        assert!(in_stable_region(&layout, Position::new(11, 1), 2));
        assert!(!in_stable_region(&layout, Position::new(9, 1), 2));
        assert!(!in_target_region(&layout, Position::new(0, 0), 9));
    }

    #[test]
    fn test_relative_score_sign() {
        let mut grid = Grid::new(BoardLayout::standard());
        grid.set(Position::new(11, 11), 1); // player 1 at its anchor
        grid.set(Position::new(11, 6), 2); // six columns from (11, 0)
        let d2 = total_distance(&grid, 2);
        assert_eq!(d2, 6);
        assert_eq!(relative_score(&grid, 1, 2), 6);
        assert_eq!(relative_score(&grid, 2, 1), -6);
    }
}
