//! Plain-text board diagrams.
//!
//! Eight rows, top row is y = 7, left column is x = 0. `r`/`w` are men,
//! `R`/`W` are kings, `.` or `-` is an empty square. Whitespace inside a
//! row is ignored so rows may be written spaced out.

use crate::board::Board;
use crate::error::BoardError;
use crate::types::*;

/// The opening position in diagram form.
pub const START_DIAGRAM: &str = "\
r.r.r.r.
.r.r.r.r
r.r.r.r.
........
........
.w.w.w.w
w.w.w.w.
.w.w.w.w";

impl Board {
    /// Parses a diagram into a board with `to_move` as the current player.
    ///
    /// Ids are assigned bottom row first, left to right, which matches the
    /// numbering `new_game` uses for the opening layout.
    pub fn from_diagram(name: &str, diagram: &str, to_move: Colour) -> Result<Self, BoardError> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(BoardError::BadDiagram(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Board::empty(name, to_move);
        let mut next_id = 0u8;
        for (row_idx, row) in rows.iter().enumerate().rev() {
            if row.len() != BOARD_SIZE as usize {
                return Err(BoardError::BadDiagram(format!(
                    "row {} has {} squares",
                    row_idx + 1,
                    row.len()
                )));
            }
            let y = BOARD_SIZE - 1 - row_idx as i8;
            for (x, &ch) in row.iter().enumerate() {
                let (colour, king) = match ch {
                    '.' | '-' => continue,
                    'r' => (Colour::Red, false),
                    'R' => (Colour::Red, true),
                    'w' => (Colour::White, false),
                    'W' => (Colour::White, true),
                    other => {
                        return Err(BoardError::BadDiagram(format!(
                            "unexpected character {other:?}"
                        )));
                    }
                };
                let square = Square::new(x as i8, y)
                    .ok_or_else(|| BoardError::BadDiagram(format!("square ({x}, {y}) off board")))?;
                let mut piece = Piece::new(PieceId(next_id), colour, square);
                piece.king = king;
                board.insert(piece);
                next_id += 1;
            }
        }
        Ok(board)
    }

    /// Renders the board in the format `from_diagram` reads.
    pub fn to_diagram(&self) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE as usize);
        for y in (0..BOARD_SIZE).rev() {
            let mut row = String::with_capacity(BOARD_SIZE as usize);
            for x in 0..BOARD_SIZE {
                let ch = Square::new(x, y)
                    .and_then(|sq| self.piece_at(sq))
                    .map(symbol)
                    .unwrap_or('.');
                row.push(ch);
            }
            rows.push(row);
        }
        rows.join("\n")
    }
}

pub fn symbol(piece: &Piece) -> char {
    match (piece.colour, piece.king) {
        (Colour::Red, false) => 'r',
        (Colour::Red, true) => 'R',
        (Colour::White, false) => 'w',
        (Colour::White, true) => 'W',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_diagram_matches_new_game() {
        let parsed = Board::from_diagram("start", START_DIAGRAM, Colour::Red).unwrap();
        let fresh = Board::new_game("start");
        assert_eq!(parsed, fresh);
        assert_eq!(fresh.to_diagram(), START_DIAGRAM);
    }

    #[test]
    fn kings_survive_a_diagram_round() {
        let text = "\
........
..R.....
........
........
.....W..
........
........
........";
        let board = Board::from_diagram("kings", text, Colour::White).unwrap();
        let red = board.piece_at(Square::new(2, 6).unwrap()).unwrap();
        assert!(red.is_king());
        assert_eq!(board.current_player(), Colour::White);
        assert_eq!(board.to_diagram(), text);
    }

    #[test]
    fn rejects_short_diagrams_and_unknown_symbols() {
        assert!(matches!(
            Board::from_diagram("bad", "........\n........", Colour::Red),
            Err(BoardError::BadDiagram(_))
        ));
        let bad_symbol = START_DIAGRAM.replacen('r', "x", 1);
        assert!(matches!(
            Board::from_diagram("bad", &bad_symbol, Colour::Red),
            Err(BoardError::BadDiagram(_))
        ));
    }
}
