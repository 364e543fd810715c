//! Piece definitions.
//!
//! Every piece is a `Piece` record. Koi carry extra movement traits in
//! `KoiTraits`; stones and lotus tiles don't. Stats per koi breed come from
//! the `KOI_STATS` table.

use crate::board::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique piece identifier, `"<owner>_<template>"`
pub type PieceId = String;

/// Compose a piece id from its owner's name and a roster template name
pub fn piece_id(owner: &str, template: &str) -> PieceId {
    format!("{}_{}", owner, template)
}

/// Category of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Koi,
    Stone,
    Lotus,
    WhiteLotus,
}

/// The six koi breeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KoiBreed {
    Tancho,
    Asagi,
    Kumonryu,
    Utsuri,
    Ogon,
    Sumi,
}

/// Fixed stats of a koi breed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KoiStats {
    pub breed: KoiBreed,
    /// Maximum move distance
    pub range: u8,
    /// Points awarded to whoever captures it
    pub value: f32,
    /// Moves in any direction rather than a fixed one
    pub multi: bool,
    /// Longest chain of consecutive jumps (1 or 2)
    pub jumps: u8,
    /// May jump over stones
    pub can_stone: bool,
    /// May capture the White Lotus
    pub can_lotus: bool,
    /// How many of this breed each player starts with
    pub per_roster: u8,
}

#[rustfmt::skip]
pub static KOI_STATS: [KoiStats; 6] = [
    KoiStats { breed: KoiBreed::Tancho, range: 2, value: 1.0, multi: false, jumps: 2, can_stone: false, can_lotus: false, per_roster: 4 },
    KoiStats { breed: KoiBreed::Asagi, range: 3, value: 1.0, multi: false, jumps: 1, can_stone: true, can_lotus: false, per_roster: 2 },
    KoiStats { breed: KoiBreed::Kumonryu, range: 4, value: 1.0, multi: false, jumps: 1, can_stone: false, can_lotus: true, per_roster: 2 },
    KoiStats { breed: KoiBreed::Utsuri, range: 2, value: 2.0, multi: true, jumps: 2, can_stone: false, can_lotus: false, per_roster: 2 },
    KoiStats { breed: KoiBreed::Ogon, range: 3, value: 2.0, multi: true, jumps: 1, can_stone: true, can_lotus: false, per_roster: 2 },
    KoiStats { breed: KoiBreed::Sumi, range: 4, value: 2.0, multi: true, jumps: 1, can_stone: false, can_lotus: true, per_roster: 1 },
];

pub const STONE_VALUE: f32 = 0.5;
pub const LOTUS_VALUE: f32 = 0.0;
pub const WHITE_LOTUS_VALUE: f32 = 5.0;

/// Stones per roster
pub const STONES_PER_ROSTER: u8 = 5;

/// Lotus tiles per roster
pub const LOTUS_PER_ROSTER: u8 = 9;

impl KoiBreed {
    pub const ALL: [KoiBreed; 6] = [
        KoiBreed::Tancho,
        KoiBreed::Asagi,
        KoiBreed::Kumonryu,
        KoiBreed::Utsuri,
        KoiBreed::Ogon,
        KoiBreed::Sumi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KoiBreed::Tancho => "Tancho",
            KoiBreed::Asagi => "Asagi",
            KoiBreed::Kumonryu => "Kumonryu",
            KoiBreed::Utsuri => "Utsuri",
            KoiBreed::Ogon => "Ogon",
            KoiBreed::Sumi => "Sumi",
        }
    }

    pub fn stats(self) -> &'static KoiStats {
        &KOI_STATS[self as usize]
    }

    /// Template names for this breed in a roster: "TanchoA".."TanchoD", or
    /// the bare breed name when a roster holds only one.
    pub fn templates(self) -> Vec<String> {
        lettered(self.name(), self.stats().per_roster)
    }
}

impl fmt::Display for KoiBreed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// "StoneA".."StoneE" style names, or just `base` for a count of one
pub(crate) fn lettered(base: &str, count: u8) -> Vec<String> {
    if count == 1 {
        return vec![base.to_string()];
    }
    (0..count)
        .map(|i| format!("{}{}", base, char::from(b'A' + i)))
        .collect()
}

/// Koi-only attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KoiTraits {
    pub breed: KoiBreed,
    pub multi: bool,
    pub jumps: u8,
    pub can_stone: bool,
    pub can_lotus: bool,
    /// Orientation / promotion state
    pub flipped: bool,
}

/// A game piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    range: u8,
    value: f32,
    kind: PieceKind,
    position: Option<Address>,
    active: bool,
    koi: Option<KoiTraits>,
}

impl Piece {
    fn inert(id: PieceId, kind: PieceKind, value: f32) -> Self {
        Self {
            id,
            range: 0,
            value,
            kind,
            position: None,
            active: false,
            koi: None,
        }
    }

    /// A koi of the given breed
    pub fn koi(breed: KoiBreed, id: impl Into<PieceId>) -> Self {
        let stats = breed.stats();
        Self {
            id: id.into(),
            range: stats.range,
            value: stats.value,
            kind: PieceKind::Koi,
            position: None,
            active: false,
            koi: Some(KoiTraits {
                breed,
                multi: stats.multi,
                jumps: stats.jumps,
                can_stone: stats.can_stone,
                can_lotus: stats.can_lotus,
                flipped: false,
            }),
        }
    }

    pub fn stone(id: impl Into<PieceId>) -> Self {
        Self::inert(id.into(), PieceKind::Stone, STONE_VALUE)
    }

    pub fn lotus_tile(id: impl Into<PieceId>) -> Self {
        Self::inert(id.into(), PieceKind::Lotus, LOTUS_VALUE)
    }

    pub fn white_lotus(id: impl Into<PieceId>) -> Self {
        Self::inert(id.into(), PieceKind::WhiteLotus, WHITE_LOTUS_VALUE)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn range(&self) -> u8 {
        self.range
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> Option<Address> {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_koi(&self) -> bool {
        self.koi.is_some()
    }

    /// Koi attributes, `None` for stones and lotus tiles
    pub fn koi_traits(&self) -> Option<&KoiTraits> {
        self.koi.as_ref()
    }

    /// Put the piece in play at `address`
    pub fn place(&mut self, address: Address) {
        self.position = Some(address);
        self.active = true;
    }

    /// Take the piece out of play
    pub fn lift(&mut self) {
        self.position = None;
        self.active = false;
    }

    /// Set a koi's flipped state. Returns false for non-koi pieces.
    pub fn set_flipped(&mut self, flipped: bool) -> bool {
        match self.koi.as_mut() {
            Some(koi) => {
                koi.flipped = flipped;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats_table_is_indexed_by_breed() {
        for breed in KoiBreed::ALL {
            assert_eq!(breed.stats().breed, breed);
        }
    }

    #[test]
    fn test_koi_factory() {
        let sumi = Piece::koi(KoiBreed::Sumi, "Black_Sumi");
        assert_eq!(sumi.id(), "Black_Sumi");
        assert_eq!(sumi.kind(), PieceKind::Koi);
        assert_eq!(sumi.range(), 4);
        assert_eq!(sumi.value(), 2.0);
        assert_eq!(sumi.position(), None);
        assert!(!sumi.is_active());

        let traits = sumi.koi_traits().unwrap();
        assert!(traits.multi);
        assert_eq!(traits.jumps, 1);
        assert!(!traits.can_stone);
        assert!(traits.can_lotus);
        assert!(!traits.flipped);
    }

    #[test]
    fn test_breed_table_values() {
        let rows: Vec<(u8, f32, bool, u8, bool, bool)> = KoiBreed::ALL
            .iter()
            .map(|b| {
                let s = b.stats();
                (s.range, s.value, s.multi, s.jumps, s.can_stone, s.can_lotus)
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                (2, 1.0, false, 2, false, false),
                (3, 1.0, false, 1, true, false),
                (4, 1.0, false, 1, false, true),
                (2, 2.0, true, 2, false, false),
                (3, 2.0, true, 1, true, false),
                (4, 2.0, true, 1, false, true),
            ]
        );
    }

    #[test]
    fn test_board_pieces() {
        let stone = Piece::stone("Red_StoneA");
        assert_eq!(stone.kind(), PieceKind::Stone);
        assert_eq!(stone.value(), 0.5);
        assert_eq!(stone.range(), 0);
        assert!(stone.koi_traits().is_none());

        assert_eq!(Piece::lotus_tile("Red_LotusA").value(), 0.0);
        assert_eq!(Piece::white_lotus("WhiteLotus").value(), 5.0);
        assert_eq!(Piece::white_lotus("WhiteLotus").kind(), PieceKind::WhiteLotus);
    }

    #[test]
    fn test_templates() {
        assert_eq!(
            KoiBreed::Tancho.templates(),
            vec!["TanchoA", "TanchoB", "TanchoC", "TanchoD"]
        );
        assert_eq!(KoiBreed::Sumi.templates(), vec!["Sumi"]);
        assert_eq!(lettered("Stone", 5).last().map(String::as_str), Some("StoneE"));
        assert_eq!(piece_id("Red", "OgonB"), "Red_OgonB");
    }

    #[test]
    fn test_place_lift_and_flip() {
        let mut koi = Piece::koi(KoiBreed::Ogon, "Red_OgonA");
        let address: Address = "J12".parse().unwrap();

        koi.place(address);
        assert_eq!(koi.position(), Some(address));
        assert!(koi.is_active());

        assert!(koi.set_flipped(true));
        assert!(koi.koi_traits().unwrap().flipped);

        koi.lift();
        assert_eq!(koi.position(), None);
        assert!(!koi.is_active());

        assert!(!Piece::stone("Red_StoneA").set_flipped(true));
    }
}
