//! Game session setup.
//!
//! This module contains the `GameSession` composition root: it owns the
//! board, the tile map and the players, and drives initialization
//! (turn order, then starting placement).

use crate::board::{BoardError, BoardLocation, HexBoard};
use crate::hex::BOARD_RADIUS;
use crate::layout::{LayoutError, PlacementTable};
use crate::pieces::Piece;
use crate::placement::{PlacementEngine, PlacementError, PlacementReport};
use crate::player::{Player, TurnSlot};
use crate::tile::{BoardTile, TileMap};
use crate::turn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Smallest supported number of players
pub const MIN_PLAYERS: usize = 2;

/// Largest number of players a layout table can describe
pub const MAX_PLAYERS: usize = 6;

/// Environment variable naming an external layout document
pub const LAYOUT_ENV: &str = "ENSOKOI_LAYOUT";

/// Environment variable turning placement failures into errors
pub const STRICT_ENV: &str = "ENSOKOI_STRICT";

/// Errors that can occur while setting up a session
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Sessions need 2-6 players, got {0}")]
    PlayerCount(usize),

    #[error("Player names must not be empty")]
    EmptyPlayerName,

    #[error("Duplicate player name: {0}")]
    DuplicatePlayer(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("{} layout entries could not be placed", .0.len())]
    PlacementFailed(Vec<PlacementError>),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board radius
    pub radius: u8,
    /// Players in join order
    pub player_names: Vec<String>,
    /// External layout document; the shipped table is used when absent
    pub layout_path: Option<PathBuf>,
    /// Abort setup if any layout entry fails to place
    pub strict_placement: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            radius: BOARD_RADIUS,
            player_names: vec!["Black".to_string(), "Red".to_string()],
            layout_path: None,
            strict_placement: false,
        }
    }
}

impl SessionConfig {
    /// Default settings for two named players
    pub fn two_player(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            player_names: vec![first.into(), second.into()],
            ..Self::default()
        }
    }

    /// Defaults, overridden by `ENSOKOI_LAYOUT` and `ENSOKOI_STRICT`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(LAYOUT_ENV) {
            config.layout_path = Some(PathBuf::from(path));
        }
        if let Ok(strict) = std::env::var(STRICT_ENV) {
            config.strict_placement = matches!(strict.as_str(), "1" | "true");
        }
        config
    }

    /// Load the configured layout table
    pub fn layout_table(&self) -> Result<PlacementTable, LayoutError> {
        match &self.layout_path {
            Some(path) => PlacementTable::load(path),
            None => PlacementTable::standard(),
        }
    }
}

/// A game in progress: one board, its tiles and the players
#[derive(Debug, Clone)]
pub struct GameSession {
    board: HexBoard,
    tiles: TileMap,
    players: Vec<Player>,
    layouts: PlacementTable,
    strict_placement: bool,
    /// Round number (starts at 1)
    round: u32,
    /// Entries that failed in the latest placement
    placement_failures: Vec<PlacementError>,
}

impl GameSession {
    /// Set up a session, drawing the turn order with the thread RNG
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        let mut rng = rand::thread_rng();
        Self::with_rng(config, &mut rng)
    }

    /// Set up a two-player session on the standard board and layout
    pub fn two_player(first: &str, second: &str) -> Result<Self, GameError> {
        Self::new(SessionConfig::two_player(first, second))
    }

    /// Set up a session with a provided RNG.
    /// This allows deterministic turn order when needed.
    pub fn with_rng<R: Rng>(config: SessionConfig, rng: &mut R) -> Result<Self, GameError> {
        let layouts = config.layout_table()?;
        Self::with_table(config, layouts, rng)
    }

    /// Set up a session against an already-loaded layout table
    pub fn with_table<R: Rng>(
        config: SessionConfig,
        layouts: PlacementTable,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        validate_names(&config.player_names)?;
        let player_count = config.player_names.len() as u8;

        // Unsupported player counts fail before anything is built
        layouts.layout_for(player_count)?;

        let board = HexBoard::new(config.radius)?;
        let mut tiles = TileMap::new(&board);
        let mut players: Vec<Player> = config.player_names.into_iter().map(Player::new).collect();
        turn::assign_with_rng(&mut players, rng);

        let report = place_rosters(
            &board,
            &layouts,
            config.strict_placement,
            &mut tiles,
            &mut players,
        )?;

        let session = Self {
            board,
            tiles,
            players,
            layouts,
            strict_placement: config.strict_placement,
            round: 1,
            placement_failures: report.failures,
        };

        info!(
            players = session.players.len(),
            first = ?session.player_in_slot(TurnSlot::FIRST).map(|p| p.name.as_str()),
            radius = session.board.radius(),
            "Game session started"
        );
        Ok(session)
    }

    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Layout entries that failed to place in the current round
    pub fn placement_failures(&self) -> &[PlacementError] {
        &self.placement_failures
    }

    pub fn player(&self, name: &str) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    /// The player holding a turn slot
    pub fn player_in_slot(&self, slot: TurnSlot) -> Option<&Player> {
        turn::player_in_slot(&self.players, slot)
    }

    /// Find any player's piece by its fully-qualified id
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.players.iter().find_map(|p| p.piece(id))
    }

    /// Tile at a coordinate or address
    pub fn tile<L: BoardLocation + ?Sized>(&self, at: &L) -> Result<&BoardTile, GameError> {
        Ok(self.tiles.at(&self.board, at)?)
    }

    /// Pieces stacked on a tile, bottom first
    pub fn occupants<L: BoardLocation + ?Sized>(&self, at: &L) -> Result<Vec<&Piece>, GameError> {
        let tile = self.tile(at)?;
        Ok(tile
            .occupants()
            .iter()
            .filter_map(|id| self.piece(id))
            .collect())
    }

    /// Whether later placements abort on a bad layout entry
    pub fn set_strict_placement(&mut self, strict: bool) {
        self.strict_placement = strict;
    }

    /// Mirror the turn order without touching the board
    pub fn swap_turn_order(&mut self) {
        turn::swap(&mut self.players);
    }

    /// Start the next round: clear the board, swap the turn order and lay
    /// out every roster again from the new slots.
    ///
    /// The new layout is built on copies and only committed once placement
    /// succeeds, so an error leaves the session in its previous round.
    pub fn next_round(&mut self) -> Result<PlacementReport, GameError> {
        let mut tiles = self.tiles.clone();
        tiles.clear();
        let mut players = self.players.clone();
        for player in players.iter_mut() {
            player.roster.iter_mut().for_each(Piece::lift);
        }
        turn::swap(&mut players);

        let report = place_rosters(
            &self.board,
            &self.layouts,
            self.strict_placement,
            &mut tiles,
            &mut players,
        )?;

        self.tiles = tiles;
        self.players = players;
        self.round += 1;
        self.placement_failures = report.failures.clone();
        info!(round = self.round, "Started new round");
        Ok(report)
    }
}

/// Lay out every player's roster from its slot in the layout table
fn place_rosters(
    board: &HexBoard,
    layouts: &PlacementTable,
    strict: bool,
    tiles: &mut TileMap,
    players: &mut [Player],
) -> Result<PlacementReport, GameError> {
    let layout = layouts.layout_for(players.len() as u8)?;
    let engine = PlacementEngine::new(board, layout);

    let mut report = PlacementReport::default();
    for player in players.iter_mut() {
        report.merge(engine.place(tiles, player));
    }

    if !report.is_clean() {
        if strict {
            return Err(GameError::PlacementFailed(report.failures));
        }
        warn!(
            failures = report.failures.len(),
            "Continuing with incomplete starting layout"
        );
    }
    Ok(report)
}

fn validate_names(names: &[String]) -> Result<(), GameError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
        return Err(GameError::PlayerCount(names.len()));
    }

    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if !seen.insert(name.as_str()) {
            return Err(GameError::DuplicatePlayer(name.clone()));
        }
    }
    Ok(())
}
