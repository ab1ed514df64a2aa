// Entry-clearing heuristic
//
// A piece that has just arrived in the target region tends to stop on the
// entrance band (target cells outside the stable block) and sit in the way of
// the pieces still travelling. Once a travelling piece finds such a piece on
// one of its inward neighbours, this pre-pass pushes an entrance piece deeper.

use log::debug;

use crate::board::{BoardLayout, Grid};
use crate::eval::{distance_to_target, in_stable_region, in_target_region};
use crate::movegen::step_and_jump_moves;
use crate::types::{Direction, Move, PlayerId, Position};

fn in_entrance_band(layout: &BoardLayout, pos: Position, player: PlayerId) -> bool {
    in_target_region(layout, pos, player) && !in_stable_region(layout, pos, player)
}

/// True when some piece outside the target has one of `player`'s own
/// entrance-band pieces on a neighbouring cell closer to the anchor
pub fn entrance_blocked(grid: &Grid, player: PlayerId) -> bool {
    let layout = grid.layout();
    grid.pieces(player)
        .into_iter()
        .filter(|&pos| !in_target_region(layout, pos, player))
        .any(|from| {
            let dist = distance_to_target(layout, from, player);
            Direction::all().iter().any(|&dir| {
                let next = from.offset(dir, 1);
                distance_to_target(layout, next, player) < dist
                    && in_entrance_band(layout, next, player)
                    && grid.occupant(next) == Some(player)
            })
        })
}

/// Proposes a move that clears the target entrance for `player`
///
/// Returns None unless the entrance is blocked (see [`entrance_blocked`]), or
/// when no entrance piece can move strictly deeper while staying inside the
/// target. Among candidates the deepest destination wins; ties go to the first
/// in row-major order.
pub fn clear_entry(grid: &Grid, player: PlayerId) -> Option<Move> {
    if !entrance_blocked(grid, player) {
        return None;
    }
    let layout = grid.layout();

    let mut best: Option<(i32, Move)> = None;
    for from in grid.pieces(player) {
        if !in_entrance_band(layout, from, player) {
            continue;
        }
        let from_dist = distance_to_target(layout, from, player);
        for to in step_and_jump_moves(grid, from) {
            if !in_target_region(layout, to, player) {
                continue;
            }
            let to_dist = distance_to_target(layout, to, player);
            if to_dist >= from_dist {
                continue;
            }
            if best.map_or(true, |(d, _)| to_dist < d) {
                best = Some((to_dist, Move::new(from, to)));
            }
        }
    }

    if let Some((_, mv)) = best {
        debug!("Player {}: clearing target entrance with {}", player, mv);
    }
    best.map(|(_, mv)| mv)
}
