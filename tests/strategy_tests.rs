//! Decision Strategy Tests
//!
//! Cross-checks of the five strategies: greedy optimality, the one-ply
//! minimax equivalence, MCTS tree bookkeeping and seeded reproducibility.

use corner_jump::board::{BoardLayout, Grid};
use corner_jump::bot::Bot;
use corner_jump::config::Config;
use corner_jump::eval::{distance_to_target, in_stable_region, in_target_region};
use corner_jump::movegen::all_moves;
use corner_jump::strategy::minimax::opponent_of;
use corner_jump::strategy::{AStar, Bfs, Greedy, Mcts, Minimax, Strategy, StrategyKind};
use corner_jump::types::{Move, PlayerId, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn random_board(seed: u64, pieces: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(BoardLayout::standard());
    for _ in 0..pieces {
        let pos = Position::new(rng.random_range(0..12), rng.random_range(0..12));
        grid.set(pos, rng.random_range(1..=4));
    }
    grid
}

#[test]
fn test_greedy_choice_is_never_beaten() {
    let greedy = Greedy::new(20, 100, 0);
    for seed in 0..30 {
        let grid = random_board(seed, 40);
        let layout = grid.layout();
        let pieces = grid.pieces(1);
        let Some(chosen) = greedy.best_candidate(&grid, 1, &pieces) else {
            continue;
        };

        let mut best_score = i32::MIN;
        let mut best_dist = i32::MAX;
        for &from in &pieces {
            if in_stable_region(layout, from, 1) {
                continue;
            }
            for to in greedy.candidates(&grid, from) {
                if in_target_region(layout, from, 1) && !in_target_region(layout, to, 1) {
                    continue;
                }
                best_score = best_score.max(greedy.score(&grid, 1, Move::new(from, to)));
                best_dist = best_dist.min(distance_to_target(layout, to, 1));
            }
        }

        let score = greedy.score(&grid, 1, chosen);
        if best_score > 0 {
            assert_eq!(score, best_score, "seed {}: {} is not the best improvement", seed, chosen);
        } else {
            assert_eq!(
                distance_to_target(layout, chosen.to, 1),
                best_dist,
                "seed {}: {} is not the closest fallback",
                seed,
                chosen
            );
        }
    }
}

#[test]
fn test_minimax_depth_zero_is_one_ply_greedy() {
    for seed in 0..30 {
        let grid = random_board(seed, 40);
        let layout = grid.layout();

        let mut expected: Option<(i32, Move)> = None;
        for mv in all_moves(&grid, 1) {
            let gain = distance_to_target(layout, mv.from, 1) - distance_to_target(layout, mv.to, 1);
            if expected.map_or(true, |(g, _)| gain > g) {
                expected = Some((gain, mv));
            }
        }

        let actual = Minimax::new(0).search(&grid, 1).map(|(mv, _)| mv);
        assert_eq!(actual, expected.map(|(_, mv)| mv), "seed {}", seed);
    }
}

/// Two player board with a few scattered pieces of each side
fn random_duel(seed: u64, pieces: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(BoardLayout::new(12, 3, 2, 2));
    for i in 0..pieces {
        let pos = Position::new(rng.random_range(0..12), rng.random_range(0..12));
        grid.set(pos, (i % 2) as u8 + 1);
    }
    grid
}

/// Exhaustive minimax without pruning, same leaf rules as `Minimax`
fn full_minimax(searcher: &Minimax, grid: &Grid, player: PlayerId, depth: u8, maximizing: bool) -> i32 {
    if depth == 0 || grid.is_terminal() {
        return searcher.evaluate(grid, player);
    }
    let mover = if maximizing { player } else { opponent_of(player) };
    let moves = all_moves(grid, mover);
    if moves.is_empty() {
        return searcher.evaluate(grid, player);
    }
    let values = moves.into_iter().map(|mv| {
        let mut child = grid.clone();
        child.apply_move(mv.from, mv.to);
        full_minimax(searcher, &child, player, depth - 1, !maximizing)
    });
    if maximizing {
        values.max().unwrap_or(i32::MIN)
    } else {
        values.min().unwrap_or(i32::MAX)
    }
}

#[test]
fn test_alpha_beta_matches_full_minimax() {
    let depth = 3;
    let searcher = Minimax::new(depth);
    let mut pruned_somewhere = false;

    for seed in 0..12 {
        let grid = random_duel(seed, 10);
        for player in [1, 2] {
            let before = searcher.cutoffs();
            let Some((_, value)) = searcher.search(&grid, player) else {
                assert!(all_moves(&grid, player).is_empty());
                continue;
            };
            pruned_somewhere |= searcher.cutoffs() > before;

            let expected = all_moves(&grid, player)
                .into_iter()
                .map(|mv| {
                    let mut child = grid.clone();
                    child.apply_move(mv.from, mv.to);
                    full_minimax(&searcher, &child, player, depth - 1, false)
                })
                .max()
                .unwrap();
            assert_eq!(value, expected, "seed {} player {}: pruning changed the value", seed, player);
        }
    }
    assert!(pruned_somewhere, "Expected at least one alpha-beta cutoff");
}

#[test]
fn test_terminal_position_is_evaluated_statically() {
    let layout = BoardLayout::new(12, 3, 2, 2);
    let mut grid = Grid::new(layout);
    // Player 2 has filled its target, with a spare piece still travelling
    for pos in layout.regions(2).unwrap().target.cells() {
        grid.set(pos, 2);
    }
    grid.set(Position::new(6, 6), 2);
    grid.set(Position::new(5, 9), 1);
    assert!(grid.is_terminal());

    // Player 1 cannot disturb that target, so every child stays terminal and
    // deeper searches must not let the opponent reply
    let shallow = Minimax::new(1).search(&grid, 1).unwrap();
    for depth in 2..=5 {
        let searcher = Minimax::new(depth);
        assert_eq!(searcher.search(&grid, 1), Some(shallow), "depth {}", depth);
        assert_eq!(searcher.cutoffs(), 0);
    }

    let mut child = grid.clone();
    child.apply_move(shallow.0.from, shallow.0.to);
    assert_eq!(shallow.1, Minimax::new(4).evaluate(&child, 1));
}

#[test]
fn test_mcts_root_visits_add_up() {
    let grid = Grid::with_starting_pieces(BoardLayout::standard());
    let mut rng = StdRng::seed_from_u64(11);
    let tree = Mcts::new(60).search(&grid, 1, &mut rng).unwrap();

    assert_eq!(tree.iterations(), 60);
    assert_eq!(tree.root().visits, 60);
    let child_visits: u32 = tree.root_children().map(|c| c.visits).sum();
    assert_eq!(child_visits, tree.root().visits);

    let best = tree.best_move().unwrap();
    let max_visits = tree.root_children().map(|c| c.visits).max().unwrap();
    let best_visits = tree
        .root_children()
        .find(|c| c.mv == Some(best))
        .map(|c| c.visits)
        .unwrap();
    assert_eq!(best_visits, max_visits);
}

#[test]
fn test_mcts_children_link_back_to_parent() {
    let grid = Grid::with_starting_pieces(BoardLayout::standard());
    let mut rng = StdRng::seed_from_u64(5);
    let tree = Mcts::new(40).search(&grid, 2, &mut rng).unwrap();

    for idx in 0..tree.len() {
        for &child in &tree.node(idx).children {
            assert_eq!(tree.node(child).parent, Some(idx));
            assert!(tree.node(child).visits <= tree.node(idx).visits);
        }
    }
}

#[test]
fn test_mcts_time_budget_runs_iterations() {
    let grid = Grid::with_starting_pieces(BoardLayout::standard());
    let mut mcts = Mcts::new(0);
    mcts.time_budget = Some(Duration::from_millis(30));
    let mut rng = StdRng::seed_from_u64(2);
    let tree = mcts.search(&grid, 1, &mut rng).unwrap();
    assert!(tree.iterations() > 0);
    assert_eq!(tree.root().visits, tree.iterations());
}

#[test]
fn test_path_planners_step_closer() {
    let mut grid = Grid::new(BoardLayout::standard());
    grid.set(Position::new(6, 6), 1);
    let layout = *grid.layout();
    let strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(Bfs::new(8, Greedy::new(20, 100, 0))),
        Box::new(AStar::new(Greedy::new(20, 100, 0))),
    ];
    for strategy in strategies {
        let mut rng = StdRng::seed_from_u64(0);
        let mv = strategy.choose_move(&grid, 1, &mut rng).unwrap();
        assert!(
            distance_to_target(&layout, mv.to, 1) < distance_to_target(&layout, mv.from, 1),
            "{} moved away with {}",
            strategy.name(),
            mv
        );
    }
}

#[test]
fn test_no_pieces_means_pass() {
    let bot = Bot::new(Config::default_hardcoded());
    let grid = Grid::new(BoardLayout::standard());
    for kind in StrategyKind::all() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(bot.choose_move(&grid, 1, kind, &mut rng), None, "{}", kind);
    }
}

#[test]
fn test_same_seed_same_decision() {
    let bot = Bot::new(Config::default_hardcoded());
    let grid = Grid::with_starting_pieces(BoardLayout::standard());
    for kind in StrategyKind::all() {
        let first = bot.choose_move(&grid, 3, kind, &mut StdRng::seed_from_u64(21));
        let second = bot.choose_move(&grid, 3, kind, &mut StdRng::seed_from_u64(21));
        assert_eq!(first, second, "{} is not reproducible", kind);
    }
}
