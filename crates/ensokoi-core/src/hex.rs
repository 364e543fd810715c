//! Hex coordinate system using cube coordinates (s, q, r).
//!
//! This module provides the foundational geometry for the Enso Koi board:
//! - `CubeCoord`: an immutable position on the hex grid
//! - `Direction`: the six named unit vectors between neighboring cells
//! - `BOARD_RADIUS`: the radius of the standard board
//!
//! Cube coordinates keep all three axes explicit. Every valid coordinate
//! satisfies `s + q + r == 0`, and that is checked on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Radius of the standard board (distance from the center to an edge cell)
pub const BOARD_RADIUS: u8 = 7;

/// Errors raised when building coordinates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("Invalid cube coordinate ({s}, {q}, {r}): components must sum to zero")]
    InvalidCoordinate { s: i32, q: i32, r: i32 },

    #[error("Cube coordinate from ({s}, {q}) has no representable third axis")]
    Overflow { s: i32, q: i32 },
}

/// One of the six neighbor directions, 60 degrees apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 0 degrees
    Up,
    /// 60 degrees
    UpRight,
    /// 120 degrees
    DownRight,
    /// 180 degrees
    Down,
    /// 240 degrees
    DownLeft,
    /// 300 degrees
    UpLeft,
}

impl Direction {
    /// All directions in clockwise order starting from Up
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::UpRight,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// Unit vector for this direction
    pub const fn offset(self) -> CubeCoord {
        match self {
            Direction::Up => CubeCoord::raw(1, 0, -1),
            Direction::UpRight => CubeCoord::raw(0, 1, -1),
            Direction::DownRight => CubeCoord::raw(-1, 1, 0),
            Direction::Down => CubeCoord::raw(-1, 0, 1),
            Direction::DownLeft => CubeCoord::raw(0, -1, 1),
            Direction::UpLeft => CubeCoord::raw(1, -1, 0),
        }
    }

    /// The direction pointing the other way
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
        }
    }
}

/// Cube coordinate for the hex grid.
///
/// Fields are private so the `s + q + r == 0` invariant cannot be broken
/// after construction. Arithmetic returns new values and never mutates
/// either operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCube", into = "RawCube")]
pub struct CubeCoord {
    s: i32,
    q: i32,
    r: i32,
}

/// Unchecked wire form, validated on the way in
#[derive(Serialize, Deserialize)]
struct RawCube {
    s: i32,
    q: i32,
    r: i32,
}

impl TryFrom<RawCube> for CubeCoord {
    type Error = CoordError;

    fn try_from(raw: RawCube) -> Result<Self, Self::Error> {
        CubeCoord::new(raw.s, raw.q, raw.r)
    }
}

impl From<CubeCoord> for RawCube {
    fn from(coord: CubeCoord) -> Self {
        RawCube {
            s: coord.s,
            q: coord.q,
            r: coord.r,
        }
    }
}

impl CubeCoord {
    /// The center of the board
    pub const ORIGIN: CubeCoord = CubeCoord::raw(0, 0, 0);

    /// Create a new cube coordinate, rejecting components that don't sum to zero
    pub fn new(s: i32, q: i32, r: i32) -> Result<Self, CoordError> {
        // Summed wide so extreme components are rejected, not overflowed.
        if i64::from(s) + i64::from(q) + i64::from(r) != 0 {
            return Err(CoordError::InvalidCoordinate { s, q, r });
        }
        Ok(Self::raw(s, q, r))
    }

    /// Build a coordinate from two axes, deriving `r`
    pub fn from_sq(s: i32, q: i32) -> Result<Self, CoordError> {
        s.checked_add(q)
            .and_then(i32::checked_neg)
            .map(|r| Self::raw(s, q, r))
            .ok_or(CoordError::Overflow { s, q })
    }

    // Callers guarantee the invariant.
    const fn raw(s: i32, q: i32, r: i32) -> Self {
        Self { s, q, r }
    }

    pub const fn s(&self) -> i32 {
        self.s
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Components as an `(s, q, r)` triple
    pub const fn components(&self) -> [i32; 3] {
        [self.s, self.q, self.r]
    }

    /// Distance to another coordinate in hex steps
    pub fn distance_to(&self, other: &CubeCoord) -> u32 {
        self.components()
            .iter()
            .zip(other.components())
            .map(|(a, b)| (i64::from(*a) - i64::from(b)).unsigned_abs())
            .max()
            .and_then(|steps| u32::try_from(steps).ok())
            .unwrap_or(u32::MAX)
    }

    /// Componentwise sum, or `None` if an axis leaves the `i32` range
    pub fn checked_add(self, rhs: CubeCoord) -> Option<CubeCoord> {
        Some(CubeCoord::raw(
            self.s.checked_add(rhs.s)?,
            self.q.checked_add(rhs.q)?,
            self.r.checked_add(rhs.r)?,
        ))
    }

    /// Componentwise difference, or `None` if an axis leaves the `i32` range
    pub fn checked_sub(self, rhs: CubeCoord) -> Option<CubeCoord> {
        Some(CubeCoord::raw(
            self.s.checked_sub(rhs.s)?,
            self.q.checked_sub(rhs.q)?,
            self.r.checked_sub(rhs.r)?,
        ))
    }

    /// The adjacent coordinate in a given direction
    pub fn neighbor(&self, direction: Direction) -> CubeCoord {
        *self + direction.offset()
    }

    /// The six adjacent coordinates in clockwise order starting from Up.
    ///
    /// No bounds are applied; neighbors of edge cells may lie off the board.
    pub fn neighbors(&self) -> [CubeCoord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }
}

impl Add for CubeCoord {
    type Output = CubeCoord;

    /// # Panics
    ///
    /// Panics if an axis overflows. Use [`CubeCoord::checked_add`] when the
    /// operands are untrusted.
    fn add(self, rhs: CubeCoord) -> CubeCoord {
        self.checked_add(rhs).expect("overflow when adding cube coordinates")
    }
}

impl Sub for CubeCoord {
    type Output = CubeCoord;

    /// # Panics
    ///
    /// Panics if an axis overflows. Use [`CubeCoord::checked_sub`] when the
    /// operands are untrusted.
    fn sub(self, rhs: CubeCoord) -> CubeCoord {
        self.checked_sub(rhs).expect("overflow when subtracting cube coordinates")
    }
}

impl TryFrom<(i32, i32, i32)> for CubeCoord {
    type Error = CoordError;

    fn try_from((s, q, r): (i32, i32, i32)) -> Result<Self, Self::Error> {
        CubeCoord::new(s, q, r)
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.s, self.q, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cube(s: i32, q: i32, r: i32) -> CubeCoord {
        CubeCoord::new(s, q, r).unwrap()
    }

    #[test]
    fn test_rejects_non_zero_sum() {
        let err = CubeCoord::new(1, 1, 1).unwrap_err();
        assert_eq!(err, CoordError::InvalidCoordinate { s: 1, q: 1, r: 1 });
        assert!(CubeCoord::try_from((0, 0, 1)).is_err());
    }

    #[test]
    fn test_add_and_subtract() {
        let a = cube(2, -2, 0);
        let b = cube(1, 3, -4);

        assert_eq!(a + b, cube(3, 1, -4));
        assert_eq!(a - b, cube(1, -5, 4));
        // Operands are untouched
        assert_eq!(a, cube(2, -2, 0));
        assert_eq!((a - b) + b, a);
    }

    #[test]
    fn test_distance() {
        let origin = CubeCoord::ORIGIN;
        assert_eq!(origin.distance_to(&origin), 0);
        assert_eq!(origin.distance_to(&cube(7, -7, 0)), 7);
        assert_eq!(cube(2, -2, 0).distance_to(&cube(-1, 0, 1)), 3);
        assert_eq!(cube(3, -1, -2).distance_to(&cube(-3, 1, 2)), 6);
    }

    #[test]
    fn test_neighbors_are_one_step_away() {
        for center in [CubeCoord::ORIGIN, cube(7, -7, 0), cube(-3, 5, -2)] {
            let neighbors = center.neighbors();
            let unique: HashSet<_> = neighbors.iter().collect();
            assert_eq!(unique.len(), 6);
            for neighbor in &neighbors {
                assert_eq!(center.distance_to(neighbor), 1);
                assert_eq!(neighbor.components().iter().sum::<i32>(), 0);
            }
        }
    }

    #[test]
    fn test_neighbor_order_starts_up_and_runs_clockwise() {
        let neighbors = CubeCoord::ORIGIN.neighbors();
        assert_eq!(neighbors[0], cube(1, 0, -1));
        assert_eq!(neighbors[1], cube(0, 1, -1));
        assert_eq!(neighbors[2], cube(-1, 1, 0));
        assert_eq!(neighbors[3], cube(-1, 0, 1));
        assert_eq!(neighbors[4], cube(0, -1, 1));
        assert_eq!(neighbors[5], cube(1, -1, 0));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        for dir in Direction::ALL {
            assert_eq!(dir.offset() + dir.opposite().offset(), CubeCoord::ORIGIN);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(cube(-7, 0, 7).to_string(), "(-7, 0, 7)");
    }

    #[test]
    fn test_deserialize_validates_invariant() {
        let ok: CubeCoord = serde_json::from_str(r#"{"s":1,"q":-1,"r":0}"#).unwrap();
        assert_eq!(ok, cube(1, -1, 0));

        let bad = serde_json::from_str::<CubeCoord>(r#"{"s":1,"q":1,"r":0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_extreme_components() {
        // Sums to zero only when added without wrapping
        let wide = CubeCoord::new(i32::MAX, 1, i32::MIN).unwrap();
        assert_eq!(wide.components(), [i32::MAX, 1, i32::MIN]);

        // Wraps to zero in 32 bits but is not a valid coordinate
        assert_eq!(
            CubeCoord::new(i32::MAX, i32::MAX, 2),
            Err(CoordError::InvalidCoordinate {
                s: i32::MAX,
                q: i32::MAX,
                r: 2
            })
        );

        let parsed: CubeCoord =
            serde_json::from_str(r#"{"s":2147483647,"q":1,"r":-2147483648}"#).unwrap();
        assert_eq!(parsed, wide);
        let wrapped = r#"{"s":2147483647,"q":2147483647,"r":2}"#;
        assert!(serde_json::from_str::<CubeCoord>(wrapped).is_err());
    }

    #[test]
    fn test_from_sq() {
        assert_eq!(CubeCoord::from_sq(-7, 0), Ok(cube(-7, 0, 7)));
        assert_eq!(
            CubeCoord::from_sq(i32::MIN, 0),
            Err(CoordError::Overflow { s: i32::MIN, q: 0 })
        );
        assert!(CubeCoord::from_sq(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_checked_arithmetic_at_the_edges() {
        let far = CubeCoord::new(i32::MAX, i32::MIN + 1, 0).unwrap();
        assert_eq!(far.checked_add(Direction::Up.offset()), None);
        assert_eq!(
            far.checked_sub(Direction::Up.offset()),
            Some(cube(i32::MAX - 1, i32::MIN + 1, 1))
        );
        assert_eq!(far.distance_to(&CubeCoord::ORIGIN), i32::MAX as u32);

        let opposite = CubeCoord::new(i32::MIN + 1, i32::MAX, 0).unwrap();
        assert_eq!(far.checked_sub(opposite), None);
        assert_eq!(far.distance_to(&opposite), u32::MAX - 1);
    }

    #[test]
    #[should_panic(expected = "overflow when adding cube coordinates")]
    fn test_add_panics_on_overflow() {
        let far = CubeCoord::new(i32::MAX, i32::MIN + 1, 0).unwrap();
        let _ = far + Direction::Up.offset();
    }
}
