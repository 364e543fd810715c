//! Starting-layout tables.
//!
//! A layout document maps player count -> turn slot -> roster template ->
//! address. An empty address means the piece starts off the board.
//!
//! ```json
//! { "2": { "P1": { "Sumi": "H1", "TanchoA": "F4" }, "P2": { "Sumi": "H15" } } }
//! ```
//!
//! Only the two-player table ships populated; the 3-6 player tables are stubs
//! and are reported as incomplete.

use crate::player::TurnSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STANDARD_LAYOUT: &str = include_str!("../layouts/initial_positions.json");

/// Template name -> address string ("" for unplaced)
pub type SlotLayout = BTreeMap<String, String>;

/// Every slot's layout for one player count
pub type CountLayout = BTreeMap<TurnSlot, SlotLayout>;

/// Errors in the layout configuration
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to read layout file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed layout document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No layout for {0} players")]
    UnsupportedPlayerCount(u8),

    #[error("Layout for {player_count} players has no entry for {slot}")]
    MissingSlot { player_count: u8, slot: TurnSlot },

    #[error("Layout for {player_count} players places no pieces for {slot}")]
    Incomplete { player_count: u8, slot: TurnSlot },
}

/// Starting positions for every supported player count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementTable {
    layouts: BTreeMap<u8, CountLayout>,
}

impl PlacementTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The layout table shipped with the game
    pub fn standard() -> Result<Self, LayoutError> {
        Self::from_json(STANDARD_LAYOUT)
    }

    /// Parse a layout document
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a layout document from disk
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Player counts with any table at all (populated or not)
    pub fn player_counts(&self) -> impl Iterator<Item = u8> + '_ {
        self.layouts.keys().copied()
    }

    /// Set one template's address, creating tables as needed
    pub fn insert(
        &mut self,
        player_count: u8,
        slot: TurnSlot,
        template: impl Into<String>,
        address: impl Into<String>,
    ) {
        self.layouts
            .entry(player_count)
            .or_default()
            .entry(slot)
            .or_default()
            .insert(template.into(), address.into());
    }

    /// The complete layout for a player count.
    ///
    /// Fails unless every slot P1..Pn is present and places at least one
    /// piece.
    pub fn layout_for(&self, player_count: u8) -> Result<&CountLayout, LayoutError> {
        let layout = self
            .layouts
            .get(&player_count)
            .ok_or(LayoutError::UnsupportedPlayerCount(player_count))?;

        for slot in (1..=player_count).filter_map(TurnSlot::new) {
            let entries = layout.get(&slot).ok_or(LayoutError::MissingSlot {
                player_count,
                slot,
            })?;
            if entries.values().all(|address| address.is_empty()) {
                return Err(LayoutError::Incomplete { player_count, slot });
            }
        }

        Ok(layout)
    }

    /// One slot's layout for a player count
    pub fn slot(&self, player_count: u8, slot: TurnSlot) -> Result<&SlotLayout, LayoutError> {
        self.layout_for(player_count)?
            .get(&slot)
            .ok_or(LayoutError::MissingSlot { player_count, slot })
    }

    /// Whether a session with this many players can be set up
    pub fn supports(&self, player_count: u8) -> bool {
        self.layout_for(player_count).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slot(n: u8) -> TurnSlot {
        TurnSlot::new(n).unwrap()
    }

    #[test]
    fn test_standard_table_parses() {
        let table = PlacementTable::standard().unwrap();
        assert_eq!(table.player_counts().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_standard_two_player_layout() {
        let table = PlacementTable::standard().unwrap();
        assert!(table.supports(2));

        let p1 = table.slot(2, slot(1)).unwrap();
        assert_eq!(p1.len(), 13);
        assert_eq!(p1.get("Sumi").map(String::as_str), Some("H1"));

        let p2 = table.slot(2, slot(2)).unwrap();
        assert_eq!(p2.get("Sumi").map(String::as_str), Some("H15"));
        assert_eq!(p2.get("UtsuriB").map(String::as_str), Some("D10"));
    }

    #[test]
    fn test_stub_tables_are_incomplete() {
        let table = PlacementTable::standard().unwrap();
        for count in 3..=6 {
            assert!(!table.supports(count));
            assert!(matches!(
                table.layout_for(count),
                Err(LayoutError::Incomplete { player_count, .. }) if player_count == count
            ));
        }
    }

    #[test]
    fn test_missing_player_count() {
        let table = PlacementTable::standard().unwrap();
        assert!(matches!(
            table.layout_for(7),
            Err(LayoutError::UnsupportedPlayerCount(7))
        ));
        assert!(matches!(
            PlacementTable::new().layout_for(2),
            Err(LayoutError::UnsupportedPlayerCount(2))
        ));
    }

    #[test]
    fn test_missing_slot() {
        let mut table = PlacementTable::new();
        table.insert(2, slot(1), "Sumi", "H1");
        assert!(matches!(
            table.layout_for(2),
            Err(LayoutError::MissingSlot { player_count: 2, slot: missing }) if missing == slot(2)
        ));

        table.insert(2, slot(2), "Sumi", "H15");
        assert!(table.supports(2));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            PlacementTable::from_json("{ not json"),
            Err(LayoutError::Parse(_))
        ));
        assert!(matches!(
            PlacementTable::from_json(r#"{"2": {"First": {"Sumi": "H1"}}}"#),
            Err(LayoutError::Parse(_))
        ));
        assert!(matches!(
            PlacementTable::from_json(r#"{"two": {}}"#),
            Err(LayoutError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlacementTable::load(Path::new("/nonexistent/initial_positions.json"))
            .unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }

    #[test]
    fn test_round_trips_through_json() {
        let table = PlacementTable::standard().unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(PlacementTable::from_json(&json).unwrap(), table);
    }
}
