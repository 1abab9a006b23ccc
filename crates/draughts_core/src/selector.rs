//! The Move Selector boundary and the selectors the engine ships with.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::board::Board;
use crate::error::BoardError;
use crate::types::*;

/// Decision-maker the turn loop blocks on: a human input pipeline or an
/// automated player.
///
/// `moves` is never empty. The returned move should be one of `moves`;
/// the engine rejects anything else rather than guessing. Returning `None`
/// means no decision will ever arrive (input closed) and ends the game loop.
pub trait MoveSelector: Send {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move>;

    fn name(&self) -> &str;

    /// Reset any per-game state.
    fn new_game(&mut self) {}
}

impl<S: MoveSelector + ?Sized> MoveSelector for &mut S {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        (**self).choose_move(board, moves)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_game(&mut self) {
        (**self).new_game()
    }
}

/// One selector per colour. Forced continuations stay with the mover since
/// the current player only changes once the chain is finished.
pub struct Seats<'a> {
    pub red: Box<dyn MoveSelector + 'a>,
    pub white: Box<dyn MoveSelector + 'a>,
}

impl<'a> Seats<'a> {
    pub fn new(red: Box<dyn MoveSelector + 'a>, white: Box<dyn MoveSelector + 'a>) -> Self {
        Self { red, white }
    }

    pub fn seat(&mut self, colour: Colour) -> &mut (dyn MoveSelector + 'a) {
        match colour {
            Colour::Red => self.red.as_mut(),
            Colour::White => self.white.as_mut(),
        }
    }
}

impl MoveSelector for Seats<'_> {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        self.seat(board.current_player()).choose_move(board, moves)
    }

    fn name(&self) -> &str {
        "seats"
    }

    fn new_game(&mut self) {
        self.red.new_game();
        self.white.new_game();
    }
}

/// Replays a fixed list of (from, to) squares.
///
/// A pair that matches no offered move is still returned as a move of the
/// piece on `from`, so the engine's rejection path can be exercised.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    script: VecDeque<(Square, Square)>,
}

impl ScriptedSelector {
    pub fn new(script: impl IntoIterator<Item = (Square, Square)>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Builds a script from coordinate pairs. An off-board coordinate
    /// rejects the whole script so later entries keep their turns.
    pub fn from_coords(coords: &[((i8, i8), (i8, i8))]) -> Result<Self, BoardError> {
        let square = |x: i8, y: i8| {
            Square::new(x, y).ok_or_else(|| BoardError::BadSquare(format!("({x}, {y})")))
        };
        let script = coords
            .iter()
            .map(|&((x1, y1), (x2, y2))| Ok((square(x1, y1)?, square(x2, y2)?)))
            .collect::<Result<Vec<_>, BoardError>>()?;
        Ok(Self::new(script))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MoveSelector for ScriptedSelector {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        let (from, to) = self.script.pop_front()?;
        moves
            .iter()
            .find(|m| m.from == from && m.to == to)
            .copied()
            .or_else(|| board.piece_at(from).map(|p| Move::new(p.id, from, to)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A pending decision sent from the engine thread.
#[derive(Debug)]
pub struct SelectionRequest {
    /// Snapshot of the board at the time of the request.
    pub board: Board,
    pub moves: Vec<Move>,
    reply: Sender<Move>,
}

impl SelectionRequest {
    /// Sends the decision back. Returns false when the engine side is gone.
    pub fn respond(self, mv: Move) -> bool {
        self.reply.send(mv).is_ok()
    }
}

/// Selector that forwards every decision over a channel and blocks on the reply.
///
/// The engine never times out; dropping the request receiver (or a request
/// without responding) is how the other side stops the game.
pub struct ChannelSelector {
    name: String,
    requests: Sender<SelectionRequest>,
}

impl ChannelSelector {
    pub fn new(name: &str) -> (Self, Receiver<SelectionRequest>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                name: name.to_string(),
                requests: tx,
            },
            rx,
        )
    }
}

impl MoveSelector for ChannelSelector {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        let (reply_tx, reply_rx) = mpsc::channel();
        let request = SelectionRequest {
            board: board.clone(),
            moves: moves.to_vec(),
            reply: reply_tx,
        };
        self.requests.send(request).ok()?;
        reply_rx.recv().ok()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
