//! Board geometry and cell addressing.
//!
//! This module contains:
//! - `Address`: the letter + number label of a cell ("H7")
//! - `HexBoard`: the radius-bounded set of cells, the address index in both
//!   directions, and the classification of the six narrow corner zones
//! - `BoardLocation`: lookups that accept either a coordinate or an address
//!
//! A `HexBoard` is built once per radius and never changes afterwards, so it
//! can be shared by reference with everything that needs it.

use crate::hex::{CubeCoord, BOARD_RADIUS};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Largest radius whose columns still fit in A..Z
pub const MAX_RADIUS: u8 = 12;

/// Errors raised by board lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Unknown address: {0:?}")]
    UnknownAddress(String),

    #[error("Coordinate {0} is outside the board")]
    OutOfBounds(CubeCoord),

    #[error("Radius {0} is too large: columns run out past radius 12")]
    InvalidRadius(u8),
}

/// Number of cells on a board of the given radius: `3R^2 + 3R + 1`
pub const fn tile_count(radius: u8) -> usize {
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Canonical label of a board cell: one uppercase column letter followed by
/// a 1-based row number, e.g. `H7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    column: u8,
    row: u16,
}

impl Address {
    /// Create an address from a 0-based column index and a 1-based row
    pub fn new(column: u8, row: u16) -> Option<Self> {
        (column < 26 && row > 0).then_some(Self { column, row })
    }

    /// Column letter ('A'..='Z')
    pub fn column_letter(&self) -> char {
        char::from(b'A' + self.column)
    }

    /// 0-based column index
    pub fn column(&self) -> u8 {
        self.column
    }

    /// 1-based row number
    pub fn row(&self) -> u16 {
        self.row
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row)
    }
}

impl FromStr for Address {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || BoardError::UnknownAddress(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().filter(char::is_ascii_uppercase).ok_or_else(unknown)?;
        let digits = chars.as_str();

        // Leading zeros would give two spellings of the same cell
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(unknown());
        }
        let row: u16 = digits.parse().map_err(|_| unknown())?;

        Address::new(letter as u8 - b'A', row).ok_or_else(unknown)
    }
}

impl TryFrom<String> for Address {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// Something that names a cell: a coordinate or an address
pub trait BoardLocation {
    /// Resolve to a coordinate inside `board`
    fn locate(&self, board: &HexBoard) -> Result<CubeCoord, BoardError>;
}

impl BoardLocation for CubeCoord {
    fn locate(&self, board: &HexBoard) -> Result<CubeCoord, BoardError> {
        if board.contains(self) {
            Ok(*self)
        } else {
            Err(BoardError::OutOfBounds(*self))
        }
    }
}

impl BoardLocation for Address {
    fn locate(&self, board: &HexBoard) -> Result<CubeCoord, BoardError> {
        board
            .notation
            .get(self)
            .copied()
            .ok_or_else(|| BoardError::UnknownAddress(self.to_string()))
    }
}

impl BoardLocation for str {
    fn locate(&self, board: &HexBoard) -> Result<CubeCoord, BoardError> {
        self.parse::<Address>()?.locate(board)
    }
}

impl BoardLocation for String {
    fn locate(&self, board: &HexBoard) -> Result<CubeCoord, BoardError> {
        self.as_str().locate(board)
    }
}

/// The complete set of cells for one radius, with its address index.
#[derive(Debug, Clone)]
pub struct HexBoard {
    radius: u8,
    /// Every cell, in address order (column by column, rows ascending)
    tiles: Vec<CubeCoord>,
    /// Address -> coordinate
    notation: HashMap<Address, CubeCoord>,
    /// Coordinate -> address
    inverse: HashMap<CubeCoord, Address>,
    /// Corner-zone cells
    unsafe_tiles: HashSet<CubeCoord>,
}

impl HexBoard {
    /// Build a board of the given radius
    pub fn new(radius: u8) -> Result<Self, BoardError> {
        if radius > MAX_RADIUS {
            return Err(BoardError::InvalidRadius(radius));
        }
        Ok(Self::build(radius))
    }

    /// The standard Enso Koi board
    pub fn standard() -> Self {
        Self::build(BOARD_RADIUS)
    }

    fn build(radius: u8) -> Self {
        let r = i32::from(radius);
        let mut tiles = Vec::with_capacity(tile_count(radius));
        let mut notation = HashMap::with_capacity(tile_count(radius));
        let mut inverse = HashMap::with_capacity(tile_count(radius));

        // Column letter comes from q; rows count up the column by ascending s.
        for (column, q) in (-r..=r).enumerate() {
            let mut row = 0u16;
            for s in -r..=r {
                let Ok(coord) = CubeCoord::from_sq(s, q) else {
                    continue;
                };
                if coord.r().abs() > r {
                    continue;
                }
                row += 1;
                let address = Address {
                    column: column as u8,
                    row,
                };
                tiles.push(coord);
                notation.insert(address, coord);
                inverse.insert(coord, address);
            }
        }

        let unsafe_tiles: HashSet<CubeCoord> = tiles
            .iter()
            .copied()
            .filter(|coord| is_corner_zone(coord, radius))
            .collect();

        debug!(
            radius,
            tiles = tiles.len(),
            unsafe_tiles = unsafe_tiles.len(),
            "Built hex board"
        );

        Self {
            radius,
            tiles,
            notation,
            inverse,
            unsafe_tiles,
        }
    }

    pub fn radius(&self) -> u8 {
        self.radius
    }

    /// Number of cells on the board
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All cells in address order
    pub fn tiles(&self) -> &[CubeCoord] {
        &self.tiles
    }

    /// All addresses in order (A1, A2, ..., B1, ...)
    pub fn addresses(&self) -> impl Iterator<Item = &Address> + '_ {
        self.tiles.iter().filter_map(|coord| self.inverse.get(coord))
    }

    /// Whether a coordinate is one of this board's cells
    pub fn contains(&self, coord: &CubeCoord) -> bool {
        self.inverse.contains_key(coord)
    }

    /// The address of a cell, or `None` if it is off the board
    pub fn address(&self, coord: &CubeCoord) -> Option<Address> {
        self.inverse.get(coord).copied()
    }

    /// The cell behind an address
    pub fn position(&self, address: &str) -> Result<CubeCoord, BoardError> {
        address.locate(self)
    }

    /// Resolve any location to a coordinate on this board
    pub fn locate<L: BoardLocation + ?Sized>(&self, at: &L) -> Result<CubeCoord, BoardError> {
        at.locate(self)
    }

    /// Whether a cell is outside the corner zones.
    ///
    /// Unknown addresses and off-board coordinates are errors, never a
    /// default answer.
    pub fn is_safe<L: BoardLocation + ?Sized>(&self, at: &L) -> Result<bool, BoardError> {
        let coord = at.locate(self)?;
        Ok(!self.unsafe_tiles.contains(&coord))
    }

    /// Corner-zone cells in address order
    pub fn unsafe_tiles(&self) -> impl Iterator<Item = &CubeCoord> + '_ {
        self.tiles
            .iter()
            .filter(|coord| self.unsafe_tiles.contains(coord))
    }

    /// Addresses of the six neighbors of a cell, clockwise from Up.
    ///
    /// Neighbors that fall off the board are `None`.
    pub fn neighbor_addresses(&self, coord: &CubeCoord) -> [Option<Address>; 6] {
        coord.neighbors().map(|neighbor| self.address(&neighbor))
    }
}

impl Default for HexBoard {
    fn default() -> Self {
        Self::standard()
    }
}

/// A cell is in a corner zone when exactly two of its axes reach within one
/// step of the radius.
fn is_corner_zone(coord: &CubeCoord, radius: u8) -> bool {
    let threshold = i32::from(radius) - 1;
    coord
        .components()
        .iter()
        .filter(|axis| axis.abs() >= threshold)
        .count()
        == 2
}
