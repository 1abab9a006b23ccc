use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

pub const BOARD_SIZE: i8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    Red,
    White,
}

impl Colour {
    pub fn other(self) -> Colour {
        match self {
            Colour::Red => Colour::White,
            Colour::White => Colour::Red,
        }
    }

    /// Sign of the y-offset a man of this colour moves along.
    pub fn forward(self) -> i8 {
        match self {
            Colour::Red => -1,
            Colour::White => 1,
        }
    }

    /// Row on which a man of this colour is crowned.
    pub fn king_row(self) -> i8 {
        match self {
            Colour::Red => 0,
            Colour::White => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Red => f.write_str("Red"),
            Colour::White => f.write_str("White"),
        }
    }
}

/// A square on the 8x8 board. Only constructible in-bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    x: i8,
    y: i8,
}

impl Square {
    pub fn new(x: i8, y: i8) -> Option<Square> {
        if (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y) {
            Some(Square { x, y })
        } else {
            None
        }
    }

    pub fn x(self) -> i8 {
        self.x
    }

    pub fn y(self) -> i8 {
        self.y
    }

    pub fn index(self) -> usize {
        (self.y as usize) * (BOARD_SIZE as usize) + self.x as usize
    }

    /// Playing squares are the ones where x + y is odd.
    pub fn is_dark(self) -> bool {
        (self.x + self.y) % 2 == 1
    }

    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        Square::new(self.x + dx, self.y + dy)
    }

    /// Square halfway between two squares two diagonals apart.
    pub fn midpoint(self, other: Square) -> Option<Square> {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx.abs() != 2 || dy.abs() != 2 {
            return None;
        }
        self.offset(dx / 2, dy / 2)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    /// Accepts "x,y", "x y" or "(x, y)".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .map(|c| if c == ',' || c == '(' || c == ')' { ' ' } else { c })
            .collect();
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(BoardError::BadSquare(s.to_string()));
        }
        let x: i8 = parts[0]
            .parse()
            .map_err(|_| BoardError::BadSquare(s.to_string()))?;
        let y: i8 = parts[1]
            .parse()
            .map_err(|_| BoardError::BadSquare(s.to_string()))?;
        Square::new(x, y).ok_or_else(|| BoardError::BadSquare(s.to_string()))
    }
}

/// Stable identity of a piece for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub colour: Colour,
    pub square: Square,
    pub king: bool,
}

impl Piece {
    pub fn new(id: PieceId, colour: Colour, square: Square) -> Self {
        Self {
            id,
            colour,
            square,
            king: false,
        }
    }

    pub fn crowned(mut self) -> Self {
        self.king = true;
        self
    }

    pub fn x(&self) -> i8 {
        self.square.x()
    }

    pub fn y(&self) -> i8 {
        self.square.y()
    }

    pub fn is_king(&self) -> bool {
        self.king
    }

    /// True when the piece stands on the row where its colour is crowned.
    pub fn on_king_row(&self) -> bool {
        self.y() == self.colour.king_row()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.colour, self.x(), self.y(), self.king)
    }
}

/// A piece and the square it moves to.
///
/// `from` is recorded at generation time so a move offered to a selector
/// can be matched without looking the piece up again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(piece: PieceId, from: Square, to: Square) -> Self {
        Self { piece, from, to }
    }

    pub fn is_step(&self) -> bool {
        (self.to.x() - self.from.x()).abs() == 1
    }

    pub fn is_jump(&self) -> bool {
        (self.to.x() - self.from.x()).abs() == 2 && (self.to.y() - self.from.y()).abs() == 2
    }

    /// Square of the piece removed by this move, if it is a jump.
    pub fn captured_square(&self) -> Option<Square> {
        if self.is_jump() {
            self.from.midpoint(self.to)
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
