//! Terminal move input.
//!
//! A move is entered as two squares, the way a board UI takes two clicks:
//! the first picks up one of the mover's pieces, the second names where it
//! goes. Squares may arrive one per line or several on a line.

use std::io::{BufRead, Write};

use draughts_core::{Board, Colour, Move, MoveSelector, Square};
use tracing::debug;

use crate::render::{render_board, render_moves};

/// What one entered square did to the pending selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A piece of the mover was picked up.
    Selected(Square),
    /// The picked-up piece was put back.
    Cleared,
    /// Two squares form a candidate move.
    Complete { from: Square, to: Square },
    /// The square can't start a move for this player.
    NotYourPiece(Square),
}

/// Two-square selection state. Reset between decisions.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    selected: Option<Square>,
}

impl InputState {
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn feed(&mut self, board: &Board, player: Colour, square: Square) -> InputEvent {
        let own_piece = board.piece_at(square).is_some_and(|p| p.colour == player);
        match self.selected {
            None if own_piece => {
                self.selected = Some(square);
                InputEvent::Selected(square)
            }
            None => InputEvent::NotYourPiece(square),
            Some(from) if from == square => {
                self.selected = None;
                InputEvent::Cleared
            }
            Some(_) if own_piece => {
                self.selected = Some(square);
                InputEvent::Selected(square)
            }
            Some(from) => {
                self.selected = None;
                InputEvent::Complete { from, to: square }
            }
        }
    }
}

/// Human player at a terminal. Keeps asking until the input names one of
/// the offered moves; end of input or `quit` gives up the game.
pub struct ConsoleSelector<R, W> {
    input: R,
    output: W,
    state: InputState,
}

impl<R: BufRead, W: Write> ConsoleSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: InputState::default(),
        }
    }

    fn prompt(&mut self, board: &Board, moves: &[Move]) {
        let player = board.current_player();
        let _ = write!(self.output, "\n{}", render_board(board, self.state.selected()));
        let _ = writeln!(self.output, "{player} Players turn.");
        let _ = writeln!(self.output, "Moves: {}", render_moves(moves));
        let _ = write!(self.output, "> ");
        let _ = self.output.flush();
    }

    fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}

impl<R, W> MoveSelector for ConsoleSelector<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        let player = board.current_player();
        self.state.reset();
        // A forced chain has only one piece to move, so it starts picked up.
        if let [first, rest @ ..] = moves {
            if rest.iter().all(|m| m.from == first.from) && moves.iter().all(Move::is_jump) {
                self.state.feed(board, player, first.from);
            }
        }

        loop {
            self.prompt(board, moves);
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
                return None;
            }

            for token in line.split_whitespace() {
                let square: Square = match token.parse() {
                    Ok(sq) => sq,
                    Err(e) => {
                        self.say(&format!("{e}; enter squares as x,y"));
                        break;
                    }
                };
                match self.state.feed(board, player, square) {
                    InputEvent::Complete { from, to } => {
                        if let Some(mv) = moves.iter().find(|m| m.from == from && m.to == to) {
                            debug!(%player, mv = %mv, "console move");
                            return Some(*mv);
                        }
                        self.say(&format!("{from} -> {to} is not a legal move."));
                    }
                    InputEvent::NotYourPiece(sq) => {
                        self.say(&format!("{sq} does not hold a {player} piece."));
                    }
                    InputEvent::Selected(_) | InputEvent::Cleared => {}
                }
            }
        }
    }

    fn name(&self) -> &str {
        "console"
    }

    fn new_game(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod console_tests;
