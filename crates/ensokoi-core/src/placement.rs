//! Starting placement.
//!
//! The `PlacementEngine` walks one player's slot layout, turns each template
//! into that player's piece id, and stacks the piece on the addressed tile.
//! Bad entries are collected instead of aborting, so the rest of the roster
//! still goes down and the caller decides what to do with the failures.

use crate::board::{Address, BoardError, HexBoard};
use crate::layout::CountLayout;
use crate::pieces::PieceId;
use crate::player::{Player, TurnSlot};
use crate::tile::TileMap;
use thiserror::Error;
use tracing::{debug, warn};

/// A layout entry that could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("{player} has no turn slot")]
    NoSlot { player: String },

    #[error("Layout has no entry for {player} in slot {slot}")]
    MissingSlot { player: String, slot: TurnSlot },

    #[error("{player} has no piece {piece_id:?} (template {template:?})")]
    UnknownPiece {
        player: String,
        template: String,
        piece_id: PieceId,
    },

    #[error("{piece_id} is assigned to unknown address {address:?}")]
    UnknownAddress { piece_id: PieceId, address: String },
}

/// Outcome of placing one player's roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Pieces put on the board, per player in template-name order
    pub placed: Vec<(PieceId, Address)>,
    /// Entries with an empty address
    pub unplaced: Vec<PieceId>,
    pub failures: Vec<PlacementError>,
}

impl PlacementReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: PlacementReport) {
        self.placed.extend(other.placed);
        self.unplaced.extend(other.unplaced);
        self.failures.extend(other.failures);
    }
}

/// Places rosters according to the layout for one player count
pub struct PlacementEngine<'a> {
    board: &'a HexBoard,
    layout: &'a CountLayout,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(board: &'a HexBoard, layout: &'a CountLayout) -> Self {
        Self { board, layout }
    }

    /// Place every entry of `player`'s slot layout onto `tiles`
    pub fn place(&self, tiles: &mut TileMap, player: &mut Player) -> PlacementReport {
        let mut report = PlacementReport::default();

        let Some(slot) = player.slot else {
            report.failures.push(PlacementError::NoSlot {
                player: player.name.clone(),
            });
            return report;
        };
        let Some(entries) = self.layout.get(&slot) else {
            report.failures.push(PlacementError::MissingSlot {
                player: player.name.clone(),
                slot,
            });
            return report;
        };

        for (template, address) in entries {
            let piece_id = player.piece_id(template);

            if address.is_empty() {
                report.unplaced.push(piece_id);
                continue;
            }

            match self.place_one(tiles, player, template, piece_id, address) {
                Ok(placed) => report.placed.push(placed),
                Err(err) => {
                    warn!(error = %err, "Skipping layout entry");
                    report.failures.push(err);
                }
            }
        }

        debug!(
            player = %player.name,
            %slot,
            placed = report.placed.len(),
            failed = report.failures.len(),
            "Placed roster"
        );
        report
    }

    fn place_one(
        &self,
        tiles: &mut TileMap,
        player: &mut Player,
        template: &str,
        piece_id: PieceId,
        address: &str,
    ) -> Result<(PieceId, Address), PlacementError> {
        let unknown_address = |_: BoardError| PlacementError::UnknownAddress {
            piece_id: piece_id.clone(),
            address: address.to_string(),
        };
        let target: Address = address.parse().map_err(unknown_address)?;
        let tile = tiles.at_mut(self.board, &target).map_err(unknown_address)?;

        let piece = player
            .roster
            .get_mut(&piece_id)
            .ok_or_else(|| PlacementError::UnknownPiece {
                player: player.name.clone(),
                template: template.to_string(),
                piece_id: piece_id.clone(),
            })?;

        tile.add_occupant(piece_id.clone());
        piece.place(target);
        debug!(piece = %piece_id, address = %target, "Placed piece");

        Ok((piece_id, target))
    }
}
