//! Error types for board setup and the turn loop.

use thiserror::Error;

use crate::types::{Colour, Move, PieceId, Square};

/// Problems with a supplied board state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
    #[error("piece id {0} is used more than once")]
    DuplicatePiece(PieceId),
    #[error("invalid square: {0:?}")]
    BadSquare(String),
    #[error("invalid board diagram: {0}")]
    BadDiagram(String),
}

/// Failures raised while playing a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The selector returned a move that was not in the offered set.
    #[error("selected move {0} is not one of the offered legal moves")]
    IllegalMoveSelection(Move),
    /// The move names a piece that is not on the board where the move says it is.
    #[error("no piece {piece} on {square}")]
    UnknownPiece { piece: PieceId, square: Square },
    /// A turn was requested for a side with nothing to play.
    #[error("{0} has no legal moves")]
    NoLegalMoves(Colour),
    /// The selector had no move to give (closed input, dropped channel).
    #[error("move selector gave no move")]
    SelectionAborted,
    #[error(transparent)]
    Board(#[from] BoardError),
}
