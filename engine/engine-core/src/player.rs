//! Player identities for two-player games.

/// One of the two sides of a game.
///
/// `A` always moves first. On the wire the sides are encoded as `+1` (A)
/// and `-1` (B), so that negating an identity yields the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Wire identity: `+1` for A, `-1` for B.
    #[inline]
    pub fn identity(self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// Parse a wire identity. Anything other than `+1`/`-1` is rejected.
    pub fn from_identity(identity: i8) -> Option<Self> {
        match identity {
            1 => Some(Player::A),
            -1 => Some(Player::B),
            _ => None,
        }
    }

    /// The other side.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Single-character symbol used when rendering boards.
    pub fn symbol(self) -> char {
        match self {
            Player::A => 'A',
            Player::B => 'B',
        }
    }
}
