// Monte Carlo Tree Search
//
// The tree lives in an arena (`Vec<Node>`) addressed by index; nodes refer to
// their parent and children by index, and the whole arena is dropped when the
// decision returns. Tree levels only expand the acting player's moves; the
// other players appear in rollouts.

use log::{debug, trace};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::RngCore;
use std::time::{Duration, Instant};

use super::Strategy;
use crate::board::Grid;
use crate::config::Config;
use crate::eval::{distance_to_target, total_distance};
use crate::movegen::all_moves;
use crate::types::{Move, PlayerId};

/// One node of the search tree
#[derive(Debug, Clone)]
pub struct Node {
    pub board: Grid,
    /// Move that produced this node; None at the root
    pub mv: Option<Move>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub visits: u32,
    pub wins: u32,
    pub untried: Vec<Move>,
}

/// Search tree produced by one decision
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
    iterations: u32,
}

impl SearchTree {
    pub const ROOT: usize = 0;

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterations actually executed before the budget ran out
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Direct children of the root
    pub fn root_children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.root().children.iter().map(move |&c| &self.nodes[c])
    }

    /// Most visited root move
    pub fn best_move(&self) -> Option<Move> {
        self.root_children()
            .max_by_key(|child| child.visits)
            .and_then(|child| child.mv)
    }
}

/// UCT-guided Monte Carlo tree search
#[derive(Debug, Clone)]
pub struct Mcts {
    pub iterations: u32,
    pub exploration: f64,
    pub rollout_depth: usize,
    /// Acting player plays one-ply greedy in rollouts instead of random
    pub greedy_rollout: bool,
    /// Replaces the iteration count with a wall-clock deadline when set
    pub time_budget: Option<Duration>,
}

impl Mcts {
    pub fn new(iterations: u32) -> Self {
        Mcts {
            iterations,
            exploration: 1.4,
            rollout_depth: 10,
            greedy_rollout: true,
            time_budget: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mcts = &config.mcts;
        Mcts {
            iterations: mcts.iterations,
            exploration: mcts.exploration,
            rollout_depth: mcts.rollout_depth,
            greedy_rollout: mcts.greedy_rollout,
            time_budget: if mcts.time_budget_ms > 0 {
                Some(Duration::from_millis(mcts.time_budget_ms))
            } else {
                None
            },
        }
    }

    /// Runs the search and returns the tree; None if `player` has no legal move
    pub fn search(&self, grid: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> Option<SearchTree> {
        let mut root_moves = all_moves(grid, player);
        if root_moves.is_empty() {
            return None;
        }
        root_moves.shuffle(rng);

        let mut tree = SearchTree {
            nodes: vec![Node {
                board: grid.clone(),
                mv: None,
                parent: None,
                children: Vec::new(),
                visits: 0,
                wins: 0,
                untried: root_moves,
            }],
            iterations: 0,
        };

        let baseline = -total_distance(grid, player);
        let deadline = self.time_budget.map(|budget| Instant::now() + budget);

        loop {
            let exhausted = match deadline {
                Some(deadline) => Instant::now() >= deadline,
                None => tree.iterations >= self.iterations,
            };
            if exhausted {
                break;
            }

            let mut leaf = self.select(&tree);
            if !tree.nodes[leaf].untried.is_empty() {
                leaf = self.expand(&mut tree, leaf, player, rng);
            }
            let result = self.rollout(&tree.nodes[leaf].board, player, rng);
            Self::backpropagate(&mut tree, leaf, result > baseline);
            tree.iterations += 1;
        }

        trace!(
            "MCTS: {} iterations, {} nodes",
            tree.iterations,
            tree.nodes.len()
        );
        Some(tree)
    }

    /// UCT score of a child given its parent's visit count
    pub fn uct(&self, child: &Node, parent_visits: u32) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }
        let visits = child.visits as f64;
        child.wins as f64 / visits
            + self.exploration * ((parent_visits as f64).ln() / visits).sqrt()
    }

    /// Descends while the node is fully expanded and has children
    fn select(&self, tree: &SearchTree) -> usize {
        let mut idx = SearchTree::ROOT;
        loop {
            let node = &tree.nodes[idx];
            if !node.untried.is_empty() || node.children.is_empty() {
                return idx;
            }
            idx = node
                .children
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    self.uct(&tree.nodes[a], node.visits)
                        .partial_cmp(&self.uct(&tree.nodes[b], node.visits))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(idx);
        }
    }

    /// Pops one untried move of `idx` and attaches the resulting child
    fn expand(&self, tree: &mut SearchTree, idx: usize, player: PlayerId, rng: &mut dyn RngCore) -> usize {
        let Some(mv) = tree.nodes[idx].untried.pop() else {
            return idx;
        };
        let mut board = tree.nodes[idx].board.clone();
        board.apply_move(mv.from, mv.to);

        let mut untried = if board.is_terminal() {
            Vec::new()
        } else {
            all_moves(&board, player)
        };
        untried.shuffle(rng);

        let child = tree.nodes.len();
        tree.nodes.push(Node {
            board,
            mv: Some(mv),
            parent: Some(idx),
            children: Vec::new(),
            visits: 0,
            wins: 0,
            untried,
        });
        tree.nodes[idx].children.push(child);
        child
    }

    /// Plays `rollout_depth` plies from `board`, starting with the seat after
    /// `player`, and returns the negated total distance of `player`
    fn rollout(&self, board: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> i32 {
        let mut board = board.clone();
        let layout = *board.layout();
        let mut mover = layout.next_player(player);

        for _ in 0..self.rollout_depth {
            if board.is_terminal() {
                break;
            }
            let moves = all_moves(&board, mover);
            let chosen = if mover == player && self.greedy_rollout {
                moves.iter().copied().fold(None, |best: Option<(i32, Move)>, mv| {
                    let gain = distance_to_target(&layout, mv.from, player)
                        - distance_to_target(&layout, mv.to, player);
                    match best {
                        Some((g, _)) if g >= gain => best,
                        _ => Some((gain, mv)),
                    }
                })
                .map(|(_, mv)| mv)
            } else {
                moves.choose(rng).copied()
            };
            if let Some(mv) = chosen {
                board.apply_move(mv.from, mv.to);
            }
            mover = layout.next_player(mover);
        }

        -total_distance(&board, player)
    }

    fn backpropagate(tree: &mut SearchTree, leaf: usize, win: bool) {
        let mut current = Some(leaf);
        while let Some(idx) = current {
            let node = &mut tree.nodes[idx];
            node.visits += 1;
            if win {
                node.wins += 1;
            }
            current = node.parent;
        }
    }
}

impl Strategy for Mcts {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn choose_move(&self, grid: &Grid, player: PlayerId, rng: &mut dyn RngCore) -> Option<Move> {
        let tree = self.search(grid, player, rng)?;
        if let Some(mv) = tree.best_move() {
            debug!(
                "MCTS: player {} chose {} after {} iterations",
                player,
                mv,
                tree.iterations()
            );
            return Some(mv);
        }
        tree.root().untried.choose(rng).copied()
    }
}
