//! Enso Koi - a two-player hex board game engine
//!
//! This crate provides the board and setup logic for Enso Koi, including:
//! - Cube-coordinate geometry for the hex grid
//! - Board generation, cell addresses ("H7") and corner-zone classification
//! - Per-cell tile state with stackable occupants
//! - The koi, stone and lotus piece catalog and per-player rosters
//! - Turn-order assignment and starting placement from a layout table
//!
//! # Modules
//!
//! - [`hex`]: Cube coordinates and directions
//! - [`board`]: Board generation and address lookup
//! - [`tile`]: Tile state and the tile map
//! - [`pieces`]: Piece definitions and stats
//! - [`player`]: Players, rosters and turn slots
//! - [`turn`]: Turn-order assignment
//! - [`layout`]: Starting-layout tables
//! - [`placement`]: Placing rosters from a layout
//! - [`game`]: Session setup
//!
//! Move legality, capture and scoring rules are not modelled here.

pub mod board;
pub mod game;
pub mod hex;
pub mod layout;
pub mod pieces;
pub mod placement;
pub mod player;
pub mod tile;
pub mod turn;

// Re-export commonly used types
pub use board::{Address, BoardError, BoardLocation, HexBoard};
pub use game::{GameError, GameSession, SessionConfig};
pub use hex::{CoordError, CubeCoord, Direction, BOARD_RADIUS};
pub use layout::{LayoutError, PlacementTable};
pub use pieces::{KoiBreed, KoiTraits, Piece, PieceId, PieceKind};
pub use placement::{PlacementEngine, PlacementError, PlacementReport};
pub use player::{Player, Roster, TurnSlot};
pub use tile::{BoardTile, BoundsPolicy, TileMap};
