//! The turn loop: offer legal moves, apply the choice, follow forced
//! capture chains, hand the move to the other side.

use tracing::{info, warn};

use crate::board::Board;
use crate::error::GameError;
use crate::selector::MoveSelector;
use crate::types::*;

/// Everything that happened during one player's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: Colour,
    /// The opening move followed by any chained jumps.
    pub moves: Vec<Move>,
    pub captured: Vec<Piece>,
    pub promoted: bool,
}

impl TurnRecord {
    fn new(player: Colour) -> Self {
        Self {
            player,
            moves: Vec::new(),
            captured: Vec::new(),
            promoted: false,
        }
    }
}

/// A board paired with the selector that decides its moves.
pub struct Game<'a> {
    board: Board,
    selector: Box<dyn MoveSelector + 'a>,
}

impl<'a> Game<'a> {
    /// Starts a game from `board`. The selector is told a new game began.
    pub fn new(board: Board, mut selector: Box<dyn MoveSelector + 'a>) -> Self {
        selector.new_game();
        Self { board, selector }
    }

    /// Opening layout, Red to move.
    pub fn new_game(name: &str, selector: Box<dyn MoveSelector + 'a>) -> Self {
        Self::new(Board::new_game(name), selector)
    }

    /// Resumes a saved game verbatim.
    pub fn load(
        name: &str,
        starting_player: Colour,
        pieces: impl IntoIterator<Item = Piece>,
        selector: Box<dyn MoveSelector + 'a>,
    ) -> Result<Self, GameError> {
        let board = Board::load_game(name, starting_player, pieces)?;
        Ok(Self::new(board, selector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn selector_name(&self) -> &str {
        self.selector.name()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Plays one full turn for the current player, including every jump of
    /// a forced chain, then passes the move.
    ///
    /// A turn is all or nothing: if any selection in the chain fails, the
    /// board is put back as it was before the turn started.
    pub fn turn(&mut self) -> Result<TurnRecord, GameError> {
        let player = self.board.current_player();
        let offered = self.board.legal_moves(player);
        if offered.is_empty() {
            return Err(GameError::NoLegalMoves(player));
        }

        let before = self.board.clone();
        match self.play_chain(player, offered) {
            Ok(record) => {
                self.board.switch_player();
                Ok(record)
            }
            Err(e) => {
                self.board = before;
                Err(e)
            }
        }
    }

    fn play_chain(
        &mut self,
        player: Colour,
        mut offered: Vec<Move>,
    ) -> Result<TurnRecord, GameError> {
        let mut record = TurnRecord::new(player);
        loop {
            let mv = self.select(&offered)?;
            let outcome = self.board.apply_move(mv)?;
            record.moves.push(mv);
            record.captured.extend(outcome.captured);
            record.promoted |= outcome.promoted;

            if outcome.continuation.is_empty() {
                return Ok(record);
            }
            offered = outcome.continuation;
        }
    }

    /// Runs turns until one side cannot move and returns the winner.
    pub fn play(&mut self) -> Result<Colour, GameError> {
        loop {
            if let Some(winner) = self.board.winner() {
                info!(
                    game = self.board.name(),
                    winner = %winner,
                    "game over"
                );
                return Ok(winner);
            }
            self.turn()?;
        }
    }

    fn select(&mut self, offered: &[Move]) -> Result<Move, GameError> {
        let mv = self
            .selector
            .choose_move(&self.board, offered)
            .ok_or(GameError::SelectionAborted)?;
        if !offered.contains(&mv) {
            warn!(
                selector = self.selector.name(),
                mv = %mv,
                "selector returned a move outside the offered set"
            );
            return Err(GameError::IllegalMoveSelection(mv));
        }
        Ok(mv)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
