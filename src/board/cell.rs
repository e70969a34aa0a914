use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// Starts in the high corner, races toward (0, 0).
    One,
    /// Starts at (0, 0), races toward (9, 9).
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Player {
        match self { Player::One => Player::Two, Player::Two => Player::One }
    }

    pub fn id(self) -> i32 {
        match self { Player::One => 1, Player::Two => 2 }
    }

    pub fn from_id(id: i32) -> Result<Player> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(Error::InvalidPlayer(other)),
        }
    }

    pub(crate) fn slot(self) -> usize { (self.id() - 1) as usize }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.id()) }
}

/// Piece kind. Only the positional score table depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Primary,
    Secondary,
}

/// Cell codes as exchanged at the integer boundary: 0 empty, 1/3 player one,
/// 2/4 player two, where 3 and 4 are the secondary kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    OnePrimary = 1,
    TwoPrimary = 2,
    OneSecondary = 3,
    TwoSecondary = 4,
}

impl Cell {
    pub fn piece(player: Player, kind: Kind) -> Cell {
        match (player, kind) {
            (Player::One, Kind::Primary) => Cell::OnePrimary,
            (Player::One, Kind::Secondary) => Cell::OneSecondary,
            (Player::Two, Kind::Primary) => Cell::TwoPrimary,
            (Player::Two, Kind::Secondary) => Cell::TwoSecondary,
        }
    }

    pub fn from_code(code: i32) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::OnePrimary),
            2 => Some(Cell::TwoPrimary),
            3 => Some(Cell::OneSecondary),
            4 => Some(Cell::TwoSecondary),
            _ => None,
        }
    }

    pub fn code(self) -> i32 { self as i32 }

    #[inline]
    pub fn is_empty(self) -> bool { self == Cell::Empty }

    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::OnePrimary | Cell::OneSecondary => Some(Player::One),
            Cell::TwoPrimary | Cell::TwoSecondary => Some(Player::Two),
        }
    }

    pub fn kind(self) -> Option<Kind> {
        match self {
            Cell::Empty => None,
            Cell::OnePrimary | Cell::TwoPrimary => Some(Kind::Primary),
            Cell::OneSecondary | Cell::TwoSecondary => Some(Kind::Secondary),
        }
    }

    /// Same kind, other owner.
    pub fn swapped(self) -> Cell {
        match (self.owner(), self.kind()) {
            (Some(p), Some(k)) => Cell::piece(p.opponent(), k),
            _ => Cell::Empty,
        }
    }
}
