//! Per-cell mutable state.
//!
//! A `BoardTile` tracks what sits on one cell: a stack of occupants (pieces
//! can stack during jump chains) and an optional lotus tile. The `TileMap`
//! holds one tile for every cell of a `HexBoard`.
//!
//! Tiles don't judge legality. Occupant counts are not limited here; whether
//! a tile may exist off the board is chosen with `BoundsPolicy`.

use crate::board::{BoardError, BoardLocation, HexBoard};
use crate::hex::CubeCoord;
use crate::pieces::PieceId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How tile construction treats coordinates outside the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// Off-board coordinates are rejected
    #[default]
    Strict,
    /// Off-board coordinates are accepted and flagged with `in_bounds = false`
    Permissive,
}

/// State of a single board cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTile {
    /// Position on the hex grid
    coord: CubeCoord,
    /// Pieces on this cell, bottom of the stack first
    occupants: Vec<PieceId>,
    /// Lotus tile lying on this cell, if any
    lotus: Option<PieceId>,
    /// False for corner-zone cells
    safe: bool,
    /// False only for permissively-built off-board tiles
    in_bounds: bool,
}

impl BoardTile {
    /// Create a tile for a cell of `board`, rejecting off-board coordinates
    pub fn new(coord: CubeCoord, board: &HexBoard) -> Result<Self, BoardError> {
        Self::with_policy(coord, board, BoundsPolicy::Strict)
    }

    /// Create a tile under an explicit bounds policy
    pub fn with_policy(
        coord: CubeCoord,
        board: &HexBoard,
        policy: BoundsPolicy,
    ) -> Result<Self, BoardError> {
        match (board.is_safe(&coord), policy) {
            (Ok(safe), _) => Ok(Self::on_board(coord, safe)),
            (Err(_), BoundsPolicy::Permissive) => Ok(Self {
                coord,
                occupants: Vec::new(),
                lotus: None,
                safe: true,
                in_bounds: false,
            }),
            (Err(err), BoundsPolicy::Strict) => Err(err),
        }
    }

    fn on_board(coord: CubeCoord, safe: bool) -> Self {
        Self {
            coord,
            occupants: Vec::new(),
            lotus: None,
            safe,
            in_bounds: true,
        }
    }

    pub fn coord(&self) -> CubeCoord {
        self.coord
    }

    /// Occupant ids, bottom of the stack first
    pub fn occupants(&self) -> &[PieceId] {
        &self.occupants
    }

    /// The piece on top of the stack
    pub fn top_occupant(&self) -> Option<&PieceId> {
        self.occupants.last()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub fn in_bounds(&self) -> bool {
        self.in_bounds
    }

    /// Push a piece onto the stack
    pub fn add_occupant(&mut self, piece: PieceId) {
        self.occupants.push(piece);
    }

    /// Remove a piece from the stack, returning whether it was present
    pub fn remove_occupant(&mut self, piece: &str) -> bool {
        match self.occupants.iter().rposition(|id| id == piece) {
            Some(idx) => {
                self.occupants.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empty the stack, returning what was on it
    pub fn clear_occupants(&mut self) -> Vec<PieceId> {
        std::mem::take(&mut self.occupants)
    }

    pub fn lotus(&self) -> Option<&PieceId> {
        self.lotus.as_ref()
    }

    /// Lay a lotus tile here, returning any lotus it replaces
    pub fn place_lotus(&mut self, lotus: PieceId) -> Option<PieceId> {
        self.lotus.replace(lotus)
    }

    /// Pick up the lotus tile
    pub fn take_lotus(&mut self) -> Option<PieceId> {
        self.lotus.take()
    }

    /// Adjacent coordinates, clockwise from Up (may be off the board)
    pub fn neighbors(&self) -> [CubeCoord; 6] {
        self.coord.neighbors()
    }
}

/// One tile per board cell
#[derive(Debug, Clone)]
pub struct TileMap {
    tiles: HashMap<CubeCoord, BoardTile>,
}

impl TileMap {
    /// Create an empty tile for every cell of `board`
    pub fn new(board: &HexBoard) -> Self {
        let corner_zones: HashSet<CubeCoord> = board.unsafe_tiles().copied().collect();
        let tiles = board
            .tiles()
            .iter()
            .map(|coord| (*coord, BoardTile::on_board(*coord, !corner_zones.contains(coord))))
            .collect();
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, coord: &CubeCoord) -> Option<&BoardTile> {
        self.tiles.get(coord)
    }

    pub fn get_mut(&mut self, coord: &CubeCoord) -> Option<&mut BoardTile> {
        self.tiles.get_mut(coord)
    }

    /// Tile at a coordinate or address of `board`
    pub fn at<L: BoardLocation + ?Sized>(
        &self,
        board: &HexBoard,
        at: &L,
    ) -> Result<&BoardTile, BoardError> {
        let coord = board.locate(at)?;
        self.tiles.get(&coord).ok_or(BoardError::OutOfBounds(coord))
    }

    /// Mutable tile at a coordinate or address of `board`
    pub fn at_mut<L: BoardLocation + ?Sized>(
        &mut self,
        board: &HexBoard,
        at: &L,
    ) -> Result<&mut BoardTile, BoardError> {
        let coord = board.locate(at)?;
        self.tiles.get_mut(&coord).ok_or(BoardError::OutOfBounds(coord))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardTile> + '_ {
        self.tiles.values()
    }

    /// Tiles with at least one occupant
    pub fn occupied(&self) -> impl Iterator<Item = &BoardTile> + '_ {
        self.tiles.values().filter(|tile| !tile.is_empty())
    }

    /// Remove every occupant and lotus from the board
    pub fn clear(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.clear_occupants();
            tile.take_lotus();
        }
    }
}
