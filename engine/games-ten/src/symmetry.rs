//! D4 symmetry of the Ten board
//!
//! The board's 8 symmetries act on the macro-cell index and on the tile
//! index at the same time, since both are positions on a 3×3 square.

use crate::TenMove;

/// One representative per D4 orbit of the 81 opening moves.
///
/// Macro-cell 0 keeps the diagonal reflection, macro-cell 1 the vertical
/// mirror and macro-cell 4 the whole group, so the tiles listed are the
/// orbit representatives under those stabilizers.
pub const CANONICAL_OPENINGS: [TenMove; 15] = [
    TenMove::new(0, 0),
    TenMove::new(0, 1),
    TenMove::new(0, 2),
    TenMove::new(0, 4),
    TenMove::new(0, 5),
    TenMove::new(0, 8),
    TenMove::new(1, 0),
    TenMove::new(1, 1),
    TenMove::new(1, 3),
    TenMove::new(1, 4),
    TenMove::new(1, 6),
    TenMove::new(1, 7),
    TenMove::new(4, 0),
    TenMove::new(4, 1),
    TenMove::new(4, 4),
];

pub fn canonical_openings() -> &'static [TenMove] {
    &CANONICAL_OPENINGS
}

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to mirror across the vertical axis before rotating
    pub reflection: bool,
}

impl D4Transform {
    pub const IDENTITY: D4Transform = D4Transform {
        rotation: 0,
        reflection: false,
    };

    /// All 8 transforms, identity first
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [Self::IDENTITY; 8];
        for (i, rotation) in [0, 90, 180, 270].into_iter().enumerate() {
            transforms[2 * i] = D4Transform {
                rotation,
                reflection: false,
            };
            transforms[2 * i + 1] = D4Transform {
                rotation,
                reflection: true,
            };
        }
        transforms
    }

    /// Map a 3×3 position (0-8).
    pub fn transform_index(&self, index: u8) -> u8 {
        let (mut row, mut col) = (index / 3, index % 3);

        if self.reflection {
            col = 2 - col;
        }

        // Clockwise quarter turns
        for _ in 0..(self.rotation / 90) {
            (row, col) = (col, 2 - row);
        }

        row * 3 + col
    }

    /// Map a move: macro-cell and tile are transformed together.
    pub fn transform_move(&self, mv: TenMove) -> TenMove {
        TenMove::new(
            self.transform_index(mv.macro_cell),
            self.transform_index(mv.tile),
        )
    }

    /// Inverse transform. Mirror-then-rotate compositions are involutions.
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            *self
        } else {
            D4Transform {
                rotation: (360 - self.rotation) % 360,
                reflection: false,
            }
        }
    }
}

/// Canonical opening equivalent to `mv`. `None` if `mv` is off the board.
pub fn canonical_opening(mv: TenMove) -> Option<TenMove> {
    if mv.macro_cell >= 9 || mv.tile >= 9 {
        return None;
    }
    D4Transform::all()
        .iter()
        .map(|t| t.transform_move(mv))
        .find(|image| CANONICAL_OPENINGS.contains(image))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_all_transforms_are_distinct_permutations() {
        let mut images = HashSet::new();
        for t in D4Transform::all() {
            let image: Vec<u8> = (0..9).map(|i| t.transform_index(i)).collect();
            let unique: HashSet<u8> = image.iter().copied().collect();
            assert_eq!(unique.len(), 9, "{t:?} is not a permutation");
            assert_eq!(t.transform_index(4), 4, "center is fixed");
            images.insert(image);
        }
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        let quarter = D4Transform {
            rotation: 90,
            reflection: false,
        };
        // top-left corner goes to top-right, top edge to right edge
        assert_eq!(quarter.transform_index(0), 2);
        assert_eq!(quarter.transform_index(1), 5);
        assert_eq!(quarter.transform_index(2), 8);
    }

    #[test]
    fn test_inverse_roundtrip() {
        for t in D4Transform::all() {
            for i in 0..9 {
                assert_eq!(t.inverse().transform_index(t.transform_index(i)), i);
            }
        }
    }

    #[test]
    fn test_openings_cover_every_first_move() {
        let mut covered = HashSet::new();
        for &opening in &CANONICAL_OPENINGS {
            for t in D4Transform::all() {
                covered.insert(t.transform_move(opening));
            }
        }
        assert_eq!(covered.len(), 81);
    }

    #[test]
    fn test_openings_are_in_distinct_orbits() {
        for (i, &a) in CANONICAL_OPENINGS.iter().enumerate() {
            for &b in &CANONICAL_OPENINGS[i + 1..] {
                assert!(
                    D4Transform::all().iter().all(|t| t.transform_move(a) != b),
                    "{a} and {b} share an orbit"
                );
            }
        }
    }

    #[test]
    fn test_canonical_opening_lookup() {
        assert_eq!(canonical_opening(TenMove::new(8, 8)), Some(TenMove::new(0, 0)));
        assert_eq!(canonical_opening(TenMove::new(4, 7)), Some(TenMove::new(4, 1)));
        for &opening in &CANONICAL_OPENINGS {
            assert_eq!(canonical_opening(opening), Some(opening));
        }
        assert_eq!(canonical_opening(TenMove::new(9, 0)), None);
    }
}
