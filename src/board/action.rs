use std::fmt;

use serde::{Deserialize, Serialize};

use super::BOARD_SIZE;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self { Self { x, y } }

    pub fn try_new(x: i32, y: i32) -> Result<Self> {
        let n = BOARD_SIZE as i32;
        if x < 0 || x >= n || y < 0 || y >= n { return Err(Error::OutOfRange { x, y }); }
        Ok(Self::new(x as u8, y as u8))
    }

    /// Neighbour in direction `(dx, dy)`, or `None` off the board.
    #[inline]
    pub fn offset(self, (dx, dy): (i8, i8)) -> Option<Pos> {
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        let n = BOARD_SIZE as i8;
        if x < 0 || x >= n || y < 0 || y >= n { None } else { Some(Pos::new(x as u8, y as u8)) }
    }

    /// Coordinate along the anti-diagonal both players race along.
    #[inline]
    pub fn diag(self) -> i32 { self.x as i32 + self.y as i32 }

    #[inline]
    pub(crate) fn bit(self) -> u128 { 1u128 << (self.x as u32 * BOARD_SIZE as u32 + self.y as u32) }

    /// Point reflection through the board centre.
    pub fn mirrored(self) -> Pos {
        let last = BOARD_SIZE as u8 - 1;
        Pos::new(last - self.x, last - self.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "[{}, {}]", self.x, self.y) }
}

/// Net displacement of one turn: a single step or a fully resolved jump chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub from: Pos,
    pub to: Pos,
}

impl Action {
    #[inline]
    pub const fn new(from: Pos, to: Pos) -> Self { Self { from, to } }

    pub fn inverse(self) -> Action { Action::new(self.to, self.from) }

    /// Signed progress along the diagonal; negative moves toward (0, 0).
    #[inline]
    pub fn advance(self) -> i32 { self.to.diag() - self.from.diag() }

    pub fn mirrored(self) -> Action { Action::new(self.from.mirrored(), self.to.mirrored()) }

    pub fn from_codes(codes: [[i32; 2]; 2]) -> Result<Action> {
        let from = Pos::try_new(codes[0][0], codes[0][1])?;
        let to = Pos::try_new(codes[1][0], codes[1][1])?;
        Ok(Action::new(from, to))
    }

    pub fn to_codes(self) -> [[i32; 2]; 2] {
        [
            [self.from.x as i32, self.from.y as i32],
            [self.to.x as i32, self.to.y as i32],
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-->{}", self.from, self.to) }
}
