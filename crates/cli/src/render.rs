use draughts_core::{symbol, Board, Move, Square, BOARD_SIZE};

/// Draws the board with y = 7 at the top, matching the diagram format.
/// A selected square is bracketed.
pub fn render_board(board: &Board, selected: Option<Square>) -> String {
    let mut out = String::new();
    out.push_str(&column_header());
    for y in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{y} "));
        for x in 0..BOARD_SIZE {
            let Some(square) = Square::new(x, y) else {
                continue;
            };
            let ch = match board.piece_at(square) {
                Some(piece) => symbol(piece),
                None if square.is_dark() => '.',
                None => ' ',
            };
            if selected == Some(square) {
                out.push_str(&format!("[{ch}]"));
            } else {
                out.push_str(&format!(" {ch} "));
            }
        }
        out.push_str(&format!(" {y}\n"));
    }
    out.push_str(&column_header());
    out
}

fn column_header() -> String {
    let mut line = String::from("  ");
    for x in 0..BOARD_SIZE {
        line.push_str(&format!(" {x} "));
    }
    line.push('\n');
    line
}

pub fn render_moves(moves: &[Move]) -> String {
    let mut sorted: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    sorted.sort();
    sorted.join(", ")
}
