// Configuration module for reading Checkers.toml
// Every tunable constant of the board, the strategies and the game runner lives here

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::board::BoardLayout;
use crate::strategy::StrategyKind;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub movegen: MoveGenConfig,
    pub greedy: GreedyConfig,
    pub bfs: BfsConfig,
    pub minimax: MinimaxConfig,
    pub mcts: MctsConfig,
    pub game: GameConfig,
    pub simulation: SimulationConfig,
}

/// Board geometry and player count
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub size: usize,
    pub corner: usize,
    pub players: usize,
    pub stable_depth: usize,
}

impl BoardConfig {
    /// Validates the geometry and builds the per-player region table
    pub fn layout(&self) -> Result<BoardLayout, String> {
        if self.players != 2 && self.players != 4 {
            return Err(format!(
                "Unsupported player count {} (expected 2 or 4)",
                self.players
            ));
        }
        if self.corner == 0 || self.corner * 2 > self.size {
            return Err(format!(
                "Corner size {} does not fit a {}x{} board",
                self.corner, self.size, self.size
            ));
        }
        if self.stable_depth == 0 || self.stable_depth > self.corner {
            return Err(format!(
                "Stable depth {} must be between 1 and the corner size {}",
                self.stable_depth, self.corner
            ));
        }
        Ok(BoardLayout::new(
            self.size,
            self.corner,
            self.players,
            self.stable_depth,
        ))
    }
}

/// Move generation constants
#[derive(Debug, Deserialize, Clone)]
pub struct MoveGenConfig {
    /// Maximum hops in a chained jump path (also bounds move validation)
    pub chain_jump_depth: usize,
}

/// Greedy scoring constants
#[derive(Debug, Deserialize, Clone)]
pub struct GreedyConfig {
    pub entry_bonus: i32,
    pub last_piece_bonus: i32,
    /// Also score chained-jump endpoints as candidates
    pub chain_jumps: bool,
}

/// Bounded breadth-first search constants
#[derive(Debug, Deserialize, Clone)]
pub struct BfsConfig {
    pub max_depth: usize,
}

/// Minimax search constants
#[derive(Debug, Deserialize, Clone)]
pub struct MinimaxConfig {
    pub depth: u8,
}

/// Monte Carlo tree search constants
#[derive(Debug, Deserialize, Clone)]
pub struct MctsConfig {
    pub iterations: u32,
    pub exploration: f64,
    pub rollout_depth: usize,
    pub greedy_rollout: bool,
    /// Wall-clock budget per decision; 0 means use `iterations`
    pub time_budget_ms: u64,
}

/// Game runner constants
#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub max_turns: usize,
    pub seed: u64,
    /// One strategy per seat, in player id order
    pub seats: Vec<StrategyKind>,
}

/// Batch simulation constants
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub rounds: usize,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Checkers.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Checkers.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Checkers.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Checkers.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                size: 12,
                corner: 3,
                players: 4,
                stable_depth: 2,
            },
            movegen: MoveGenConfig {
                chain_jump_depth: 3,
            },
            greedy: GreedyConfig {
                entry_bonus: 20,
                last_piece_bonus: 100,
                chain_jumps: false,
            },
            bfs: BfsConfig { max_depth: 8 },
            minimax: MinimaxConfig { depth: 2 },
            mcts: MctsConfig {
                iterations: 100,
                exploration: 1.4,
                rollout_depth: 10,
                greedy_rollout: true,
                time_budget_ms: 0,
            },
            game: GameConfig {
                max_turns: 240,
                seed: 42,
                seats: vec![
                    StrategyKind::Greedy,
                    StrategyKind::AStar,
                    StrategyKind::Mcts,
                    StrategyKind::Minimax,
                ],
            },
            simulation: SimulationConfig { rounds: 10 },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Checkers.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }

    /// Builds the board layout described by `[board]`
    pub fn layout(&self) -> Result<BoardLayout, String> {
        self.board.layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.board.size, 12);
        assert_eq!(config.minimax.depth, 2);
        assert_eq!(config.game.seats.len(), config.board.players);
    }

    #[test]
    fn test_checkers_toml_can_be_parsed() {
        // This test ensures Checkers.toml is valid and can be parsed
        let result = Config::from_file("Checkers.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Checkers.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config =
            Config::from_file("Checkers.toml").expect("Checkers.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        // Board
        assert_eq!(file_config.board.size, hardcoded_config.board.size);
        assert_eq!(file_config.board.corner, hardcoded_config.board.corner);
        assert_eq!(file_config.board.players, hardcoded_config.board.players);
        assert_eq!(
            file_config.board.stable_depth,
            hardcoded_config.board.stable_depth
        );

        // Strategies
        assert_eq!(
            file_config.movegen.chain_jump_depth,
            hardcoded_config.movegen.chain_jump_depth
        );
        assert_eq!(
            file_config.greedy.entry_bonus,
            hardcoded_config.greedy.entry_bonus
        );
        assert_eq!(
            file_config.greedy.last_piece_bonus,
            hardcoded_config.greedy.last_piece_bonus
        );
        assert_eq!(
            file_config.greedy.chain_jumps,
            hardcoded_config.greedy.chain_jumps
        );
        assert_eq!(file_config.bfs.max_depth, hardcoded_config.bfs.max_depth);
        assert_eq!(file_config.minimax.depth, hardcoded_config.minimax.depth);
        assert_eq!(
            file_config.mcts.iterations,
            hardcoded_config.mcts.iterations
        );
        assert_eq!(
            file_config.mcts.exploration,
            hardcoded_config.mcts.exploration
        );
        assert_eq!(
            file_config.mcts.rollout_depth,
            hardcoded_config.mcts.rollout_depth
        );
        assert_eq!(
            file_config.mcts.time_budget_ms,
            hardcoded_config.mcts.time_budget_ms
        );

        // Game
        assert_eq!(file_config.game.max_turns, hardcoded_config.game.max_turns);
        assert_eq!(file_config.game.seed, hardcoded_config.game.seed);
        assert_eq!(file_config.game.seats, hardcoded_config.game.seats);
        assert_eq!(
            file_config.simulation.rounds,
            hardcoded_config.simulation.rounds
        );
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        // Test with a non-existent file
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());

        let result = Config::from_toml_str("[board]\nsize = \"twelve\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_layout_rejects_bad_geometry() {
        let mut config = Config::default_hardcoded();
        config.board.players = 3;
        assert!(config.layout().is_err());

        let mut config = Config::default_hardcoded();
        config.board.corner = 7;
        assert!(config.layout().is_err());

        let mut config = Config::default_hardcoded();
        config.board.stable_depth = 4;
        assert!(config.layout().is_err());

        assert!(Config::default_hardcoded().layout().is_ok());
    }

    #[test]
    fn test_alternate_two_player_layout_is_valid() {
        let mut config = Config::default_hardcoded();
        config.board.size = 17;
        config.board.corner = 4;
        config.board.players = 2;
        config.board.stable_depth = 2;
        let layout = config.layout().expect("17x17 corner-4 is a valid layout");
        assert_eq!(layout.players().len(), 2);
    }
}
