// Board state, per-player region table and the mutation contract
//
// The grid is a row-major N x N array of owners (0 = empty). Every player's
// home, target and stable regions are looked up from a `BoardLayout` built once
// from the configuration, so no caller ever branches on a player id.

use std::fmt;

use crate::movegen;
use crate::types::{Corner, Move, PlayerId, Position, EMPTY};

/// Axis-aligned rectangle of cells, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row_start: i32,
    pub row_end: i32,
    pub col_start: i32,
    pub col_end: i32,
}

impl Rect {
    /// The `depth x depth` block in `corner` of an `size x size` board
    pub fn corner_block(corner: Corner, size: usize, depth: usize) -> Rect {
        let n = size as i32;
        let k = depth as i32;
        let (row_start, col_start) = match corner {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (0, n - k),
            Corner::BottomLeft => (n - k, 0),
            Corner::BottomRight => (n - k, n - k),
        };
        Rect {
            row_start,
            row_end: row_start + k,
            col_start,
            col_end: col_start + k,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= self.row_start
            && pos.row < self.row_end
            && pos.col >= self.col_start
            && pos.col < self.col_end
    }

    /// Number of cells in the rectangle
    pub fn area(&self) -> usize {
        ((self.row_end - self.row_start) * (self.col_end - self.col_start)) as usize
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.row_start..self.row_end)
            .flat_map(move |r| (self.col_start..self.col_end).map(move |c| Position::new(r, c)))
    }
}

/// Everything the engine needs to know about one player's geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRegions {
    pub home: Rect,
    pub target: Rect,
    /// Innermost block of the target region; pieces here are settled
    pub stable: Rect,
    /// Outermost corner cell of the target region
    pub anchor: Position,
}

impl PlayerRegions {
    fn for_home(home: Corner, size: usize, corner: usize, stable_depth: usize) -> Self {
        let target = home.opposite();
        let last = size as i32 - 1;
        let anchor = match target {
            Corner::TopLeft => Position::new(0, 0),
            Corner::TopRight => Position::new(0, last),
            Corner::BottomLeft => Position::new(last, 0),
            Corner::BottomRight => Position::new(last, last),
        };
        PlayerRegions {
            home: Rect::corner_block(home, size, corner),
            target: Rect::corner_block(target, size, corner),
            stable: Rect::corner_block(target, size, stable_depth),
            anchor,
        }
    }
}

/// Board geometry plus the player id -> regions table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    size: usize,
    corner: usize,
    stable_depth: usize,
    player_count: usize,
    player_ids: [PlayerId; 4],
    regions: [Option<PlayerRegions>; 4],
}

impl BoardLayout {
    /// Builds the table. Callers validate the geometry (see `BoardConfig::layout`).
    ///
    /// Four players start in the top-left, top-right, bottom-left and
    /// bottom-right corners (ids 1..=4); two players use ids 1 and 2 in the
    /// top-left and bottom-right. Each target is the opposite corner.
    pub fn new(size: usize, corner: usize, players: usize, stable_depth: usize) -> Self {
        let homes: &[Corner] = if players == 2 {
            &[Corner::TopLeft, Corner::BottomRight]
        } else {
            &[
                Corner::TopLeft,
                Corner::TopRight,
                Corner::BottomLeft,
                Corner::BottomRight,
            ]
        };

        let mut player_ids = [0; 4];
        let mut regions = [None; 4];
        for (i, home) in homes.iter().enumerate() {
            player_ids[i] = (i + 1) as PlayerId;
            regions[i] = Some(PlayerRegions::for_home(*home, size, corner, stable_depth));
        }

        BoardLayout {
            size,
            corner,
            stable_depth,
            player_count: homes.len(),
            player_ids,
            regions,
        }
    }

    /// Canonical 12x12, corner 3, four player layout
    pub fn standard() -> Self {
        Self::new(12, 3, 4, 2)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn corner(&self) -> usize {
        self.corner
    }

    pub fn stable_depth(&self) -> usize {
        self.stable_depth
    }

    /// Active player ids in seating order
    pub fn players(&self) -> &[PlayerId] {
        &self.player_ids[..self.player_count]
    }

    /// Region table entry for a player, None if the id is not seated
    pub fn regions(&self, player: PlayerId) -> Option<&PlayerRegions> {
        if player == 0 || player as usize > self.player_count {
            return None;
        }
        self.regions[player as usize - 1].as_ref()
    }

    /// The seat after `player`, wrapping around
    pub fn next_player(&self, player: PlayerId) -> PlayerId {
        let players = self.players();
        let idx = players.iter().position(|&p| p == player).unwrap_or(0);
        players[(idx + 1) % players.len()]
    }
}

/// Reasons a move fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// A cell of the move is off the board
    OutOfBounds(Position),
    /// The origin does not hold one of the mover's pieces
    NotOwned(Position),
    /// The destination already holds a piece
    Occupied(Position),
    /// No step, jump or jump chain connects origin and destination
    Unreachable(Move),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds(p) => write!(f, "Illegal move: {} is off the board", p),
            MoveError::NotOwned(p) => write!(f, "Illegal move: no own piece at {}", p),
            MoveError::Occupied(p) => write!(f, "Illegal move: {} is not empty", p),
            MoveError::Unreachable(m) => write!(f, "Illegal move: {} is not a step or jump", m),
        }
    }
}

impl std::error::Error for MoveError {}

/// Game board: N x N owners in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    layout: BoardLayout,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an empty board
    pub fn new(layout: BoardLayout) -> Self {
        let n = layout.size();
        Grid {
            layout,
            cells: vec![EMPTY; n * n],
        }
    }

    /// Creates a board with every seated player's home region filled
    pub fn with_starting_pieces(layout: BoardLayout) -> Self {
        let mut grid = Grid::new(layout);
        for &player in layout.players() {
            if let Some(regions) = layout.regions(player) {
                for pos in regions.home.cells() {
                    grid.set(pos, player);
                }
            }
        }
        grid
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Raw row-major cell owners (0 = empty)
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn idx(&self, pos: Position) -> usize {
        pos.row as usize * self.size() + pos.col as usize
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        let n = self.size() as i32;
        pos.row >= 0 && pos.row < n && pos.col >= 0 && pos.col < n
    }

    /// Owner of a cell; None for empty or off-board cells
    pub fn occupant(&self, pos: Position) -> Option<PlayerId> {
        if !self.in_bounds(pos) {
            return None;
        }
        match self.cells[self.idx(pos)] {
            EMPTY => None,
            owner => Some(owner),
        }
    }

    /// True for on-board cells with no piece
    pub fn is_empty(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.cells[self.idx(pos)] == EMPTY
    }

    /// Places (or clears, with 0) a cell. Returns false for off-board cells.
    pub fn set(&mut self, pos: Position, owner: u8) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let i = self.idx(pos);
        self.cells[i] = owner;
        true
    }

    /// Relocates the piece at `from` to `to`
    ///
    /// Fails, leaving the board unchanged, if either cell is off the board,
    /// `from` is empty or `to` is occupied. No rule check beyond that; use
    /// [`Grid::try_apply`] for moves that did not come from the generator.
    pub fn apply_move(&mut self, from: Position, to: Position) -> bool {
        if !self.in_bounds(from) || !self.is_empty(to) {
            return false;
        }
        let owner = self.cells[self.idx(from)];
        if owner == EMPTY {
            return false;
        }
        let (fi, ti) = (self.idx(from), self.idx(to));
        self.cells[ti] = owner;
        self.cells[fi] = EMPTY;
        true
    }

    /// Validates an externally supplied move for `player` and applies it
    ///
    /// `chain_depth` bounds how many hops a chained jump may take.
    pub fn try_apply(
        &mut self,
        player: PlayerId,
        mv: Move,
        chain_depth: usize,
    ) -> Result<(), MoveError> {
        for pos in [mv.from, mv.to] {
            if !self.in_bounds(pos) {
                return Err(MoveError::OutOfBounds(pos));
            }
        }
        if self.occupant(mv.from) != Some(player) {
            return Err(MoveError::NotOwned(mv.from));
        }
        if !self.is_empty(mv.to) {
            return Err(MoveError::Occupied(mv.to));
        }
        if !movegen::is_reachable(self, mv.from, mv.to, chain_depth) {
            return Err(MoveError::Unreachable(mv));
        }
        self.apply_move(mv.from, mv.to);
        Ok(())
    }

    /// Cells owned by `player`, row-major
    pub fn pieces(&self, player: PlayerId) -> Vec<Position> {
        let n = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &owner)| owner == player)
            .map(|(i, _)| Position::new((i / n) as i32, (i % n) as i32))
            .collect()
    }

    pub fn piece_count(&self, player: PlayerId) -> usize {
        self.cells.iter().filter(|&&owner| owner == player).count()
    }

    /// How many of `player`'s pieces sit in its target region
    pub fn target_count(&self, player: PlayerId) -> usize {
        match self.layout.regions(player) {
            Some(regions) => regions
                .target
                .cells()
                .filter(|&pos| self.occupant(pos) == Some(player))
                .count(),
            None => 0,
        }
    }

    /// True when `player`'s target region is completely filled with its own pieces
    pub fn is_target_full(&self, player: PlayerId) -> bool {
        match self.layout.regions(player) {
            Some(regions) => self.target_count(player) == regions.target.area(),
            None => false,
        }
    }

    /// True when any seated player has filled its target region
    pub fn is_terminal(&self) -> bool {
        self.layout.players().iter().any(|&p| self.is_target_full(p))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for row in 0..n {
            for col in 0..n {
                let ch = match self.cells[row * n + col] {
                    EMPTY => '.',
                    owner => (b'0' + owner) as char,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
