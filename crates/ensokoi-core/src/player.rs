//! Player state and rosters.
//!
//! This module contains:
//! - `TurnSlot`: a player's position in the move order ("P1", "P2", ...)
//! - `Roster`: the standard set of pieces generated for one player
//! - `Player`: name, slot, score, captures and roster

use crate::pieces::{
    lettered, piece_id, KoiBreed, Piece, PieceId, LOTUS_PER_ROSTER, STONES_PER_ROSTER,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid turn slot: {0:?}")]
pub struct InvalidSlot(pub String);

/// Turn-order slot, 1-based. Written as "P1", "P2", ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TurnSlot(u8);

impl TurnSlot {
    pub const FIRST: TurnSlot = TurnSlot(1);

    /// Slot for a 1-based position in the order
    pub fn new(position: u8) -> Option<Self> {
        (position > 0).then_some(Self(position))
    }

    /// 1-based position
    pub fn position(&self) -> u8 {
        self.0
    }

    /// The slot at the same distance from the other end of a
    /// `player_count`-player order (P1 <-> Pn)
    pub fn mirrored(&self, player_count: u8) -> TurnSlot {
        TurnSlot(player_count.saturating_add(1).saturating_sub(self.0).max(1))
    }
}

impl fmt::Display for TurnSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl FromStr for TurnSlot {
    type Err = InvalidSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('P')
            .filter(|digits| !digits.starts_with('0'))
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(TurnSlot::new)
            .ok_or_else(|| InvalidSlot(s.to_string()))
    }
}

impl TryFrom<String> for TurnSlot {
    type Error = InvalidSlot;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TurnSlot> for String {
    fn from(slot: TurnSlot) -> Self {
        slot.to_string()
    }
}

/// The pieces one player brings to the game, keyed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub koi: HashMap<PieceId, Piece>,
    pub stones: HashMap<PieceId, Piece>,
    pub lotus_tiles: HashMap<PieceId, Piece>,
}

impl Roster {
    /// Standard roster for `owner`: 13 koi, 5 stones and 9 lotus tiles, every
    /// id prefixed with the owner's name.
    pub fn standard(owner: &str) -> Self {
        let koi = KoiBreed::ALL
            .iter()
            .flat_map(|&breed| {
                breed
                    .templates()
                    .into_iter()
                    .map(move |template| Piece::koi(breed, piece_id(owner, &template)))
            })
            .map(|piece| (piece.id().to_string(), piece))
            .collect();

        let stones = lettered("Stone", STONES_PER_ROSTER)
            .iter()
            .map(|template| Piece::stone(piece_id(owner, template)))
            .map(|piece| (piece.id().to_string(), piece))
            .collect();

        let lotus_tiles = lettered("Lotus", LOTUS_PER_ROSTER)
            .iter()
            .map(|template| Piece::lotus_tile(piece_id(owner, template)))
            .map(|piece| (piece.id().to_string(), piece))
            .collect();

        Self {
            koi,
            stones,
            lotus_tiles,
        }
    }

    /// Total number of pieces
    pub fn len(&self) -> usize {
        self.koi.len() + self.stones.len() + self.lotus_tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&Piece> {
        self.koi
            .get(id)
            .or_else(|| self.stones.get(id))
            .or_else(|| self.lotus_tiles.get(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Piece> {
        if let Some(piece) = self.koi.get_mut(id) {
            return Some(piece);
        }
        if let Some(piece) = self.stones.get_mut(id) {
            return Some(piece);
        }
        self.lotus_tiles.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.koi
            .values()
            .chain(self.stones.values())
            .chain(self.lotus_tiles.values())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> + '_ {
        self.koi
            .values_mut()
            .chain(self.stones.values_mut())
            .chain(self.lotus_tiles.values_mut())
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Display name, also the prefix of every piece id
    pub name: String,
    /// Position in the move order, assigned at game start
    pub slot: Option<TurnSlot>,
    pub score: f32,
    /// Opponent pieces this player has captured, keyed by id
    pub captured: HashMap<PieceId, Piece>,
    pub roster: Roster,
}

impl Player {
    /// Create a player with a fresh standard roster
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let roster = Roster::standard(&name);
        Self {
            name,
            slot: None,
            score: 0.0,
            captured: HashMap::new(),
            roster,
        }
    }

    /// Look up one of this player's pieces
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.roster.get(id)
    }

    pub fn piece_mut(&mut self, id: &str) -> Option<&mut Piece> {
        self.roster.get_mut(id)
    }

    /// Fully-qualified id for one of this player's roster templates
    pub fn piece_id(&self, template: &str) -> PieceId {
        piece_id(&self.name, template)
    }
}
