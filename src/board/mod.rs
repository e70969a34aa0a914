mod action;
mod cell;

pub use action::{Action, Pos};
pub use cell::{Cell, Kind, Player};

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rules;

pub const BOARD_SIZE: usize = 10;
pub const PIECES_PER_PLAYER: usize = 10;

/// Ten-by-ten grid of cell codes, indexed `[x][y]`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self { Self::default() }

    /// Each player starts on the formation the opponent has to reach.
    pub fn start() -> Self {
        let mut b = Self::empty();
        for player in Player::BOTH {
            for &(pos, kind) in rules::target_formation(player.opponent()) {
                b.set(pos, Cell::piece(player, kind));
            }
        }
        b
    }

    pub fn from_codes(codes: &[[i32; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut b = Self::empty();
        for (x, row) in codes.iter().enumerate() {
            for (y, &code) in row.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or(Error::InvalidCell { x, y, code })?;
                b.cells[x][y] = cell;
            }
        }
        Ok(b)
    }

    pub fn to_codes(&self) -> [[i32; BOARD_SIZE]; BOARD_SIZE] {
        let mut out = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (x, row) in self.cells.iter().enumerate() {
            for (y, cell) in row.iter().enumerate() { out[x][y] = cell.code(); }
        }
        out
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Cell { self.cells[pos.x as usize][pos.y as usize] }

    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) { self.cells[pos.x as usize][pos.y as usize] = cell; }

    #[inline]
    pub fn is_empty_at(&self, pos: Pos) -> bool { self.get(pos).is_empty() }

    /// Occupied cells of `player` in row-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().flat_map(move |(x, row)| {
            row.iter().enumerate().filter_map(move |(y, cell)| {
                (cell.owner() == Some(player)).then(|| Pos::new(x as u8, y as u8))
            })
        })
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, row)| {
            row.iter().enumerate().filter(|(_, c)| !c.is_empty()).map(move |(y, &c)| (Pos::new(x as u8, y as u8), c))
        })
    }

    pub fn piece_count(&self, player: Player) -> usize { self.pieces(player).count() }

    /// Fails unless both sides have exactly ten pieces.
    pub fn validate(&self) -> Result<()> {
        for player in Player::BOTH {
            let found = self.piece_count(player);
            if found != PIECES_PER_PLAYER {
                return Err(Error::PieceCount { player, found, expected: PIECES_PER_PLAYER });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn apply(&mut self, action: Action) {
        debug_assert!(self.is_empty_at(action.to), "destination {} occupied", action.to);
        let moving = self.get(action.from);
        self.set(action.to, moving);
        self.set(action.from, Cell::Empty);
    }

    #[inline]
    pub fn undo(&mut self, action: Action) {
        let moving = self.get(action.to);
        self.set(action.from, moving);
        self.set(action.to, Cell::Empty);
    }

    /// Applies `action` until the returned guard is dropped.
    #[inline]
    pub fn scoped(&mut self, action: Action) -> Applied<'_> {
        self.apply(action);
        Applied { board: self, action }
    }

    /// The same position seen from the other side: rotated 180 degrees with
    /// owners swapped.
    pub fn flipped(&self) -> Board {
        let mut out = Board::empty();
        for (pos, cell) in self.occupied() { out.set(pos.mirrored(), cell.swapped()); }
        out
    }
}

/// Guard returned by [`Board::scoped`]; undoes its action on drop.
pub struct Applied<'a> {
    board: &'a mut Board,
    action: Action,
}

impl Deref for Applied<'_> {
    type Target = Board;
    fn deref(&self) -> &Board { self.board }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Board { self.board }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) { self.board.undo(self.action); }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = if cell.is_empty() { '.' } else { char::from(b'0' + cell.code() as u8) };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Board(\n{self})") }
}

/// Ten non-blank rows of ten cells each; `.` or `0` is empty, `1`-`4` are
/// piece codes. Whitespace inside a row is ignored.
impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(Error::Parse(format!("expected {BOARD_SIZE} rows, found {}", rows.len())));
        }
        let mut b = Board::empty();
        for (x, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(Error::Parse(format!("row {x} has {} cells", row.len())));
            }
            for (y, &ch) in row.iter().enumerate() {
                let code = match ch {
                    '.' => 0,
                    '0'..='9' => ch as i32 - '0' as i32,
                    other => return Err(Error::Parse(format!("unexpected '{other}' at ({x}, {y})"))),
                };
                b.cells[x][y] = Cell::from_code(code).ok_or(Error::InvalidCell { x, y, code })?;
            }
        }
        Ok(b)
    }
}
