use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{BoardError, GameError};
use crate::types::*;

const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// The rules engine's state: live pieces, whose turn it is, and the game name.
///
/// Pieces are keyed by identity; `squares` indexes them by coordinate so
/// occupancy lookups don't scan the piece set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    name: String,
    pieces: BTreeMap<PieceId, Piece>,
    squares: [Option<PieceId>; SQUARE_COUNT],
    current_player: Colour,
}

/// What a single `apply_move` did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub captured: Option<Piece>,
    /// The moving piece was crowned by this move.
    pub promoted: bool,
    /// Jumps the same piece is now forced to continue with. Empty when the turn is over.
    pub continuation: Vec<Move>,
}

impl Board {
    /// Standard opening layout: twelve men per side on the dark squares of
    /// their three home rows, Red to move.
    pub fn new_game(name: &str) -> Self {
        let mut board = Board::empty(name, Colour::Red);
        let mut next_id = 0u8;
        for (colour, rows) in [(Colour::White, 0..3), (Colour::Red, 5..8)] {
            for y in rows {
                for x in 0..BOARD_SIZE {
                    let Some(square) = Square::new(x, y) else {
                        continue;
                    };
                    if !square.is_dark() {
                        continue;
                    }
                    board.insert(Piece::new(PieceId(next_id), colour, square));
                    next_id += 1;
                }
            }
        }
        board
    }

    /// Rebuilds a game in progress from its saved pieces.
    ///
    /// No rules legality is checked; only the structural invariants the
    /// board relies on (one piece per square, unique ids) are enforced.
    pub fn load_game(
        name: &str,
        starting_player: Colour,
        pieces: impl IntoIterator<Item = Piece>,
    ) -> Result<Self, BoardError> {
        let mut board = Board::empty(name, starting_player);
        for piece in pieces {
            if board.pieces.contains_key(&piece.id) {
                return Err(BoardError::DuplicatePiece(piece.id));
            }
            if board.squares[piece.square.index()].is_some() {
                return Err(BoardError::SquareOccupied(piece.square));
            }
            board.insert(piece);
        }
        Ok(board)
    }

    pub(crate) fn empty(name: &str, current_player: Colour) -> Self {
        Board {
            name: name.to_string(),
            pieces: BTreeMap::new(),
            squares: [None; SQUARE_COUNT],
            current_player,
        }
    }

    pub(crate) fn insert(&mut self, piece: Piece) {
        self.squares[piece.square.index()] = Some(piece.id);
        self.pieces.insert(piece.id, piece);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_player(&self) -> Colour {
        self.current_player
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Live pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Owned copy of the live pieces for presentation layers.
    pub fn snapshot(&self) -> Vec<Piece> {
        self.pieces.values().copied().collect()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index()].and_then(|id| self.pieces.get(&id))
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    pub fn count(&self, colour: Colour) -> usize {
        self.pieces.values().filter(|p| p.colour == colour).count()
    }

    /// Applies one move: relocate, capture, crown, and report any forced
    /// continuation for the moved piece.
    ///
    /// The move is trusted to come from the most recent legal set; only the
    /// piece's identity, its origin square and an empty destination are checked.
    /// A rejected move leaves the board untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, GameError> {
        let mut piece = match self.pieces.get(&mv.piece) {
            Some(p) if p.square == mv.from => *p,
            _ => {
                return Err(GameError::UnknownPiece {
                    piece: mv.piece,
                    square: mv.from,
                });
            }
        };
        if !self.is_empty(mv.to) {
            return Err(BoardError::SquareOccupied(mv.to).into());
        }
        let was_king = piece.king;

        self.squares[mv.from.index()] = None;
        piece.square = mv.to;
        self.insert(piece);

        let mut captured = None;
        if let Some(mid) = mv.captured_square() {
            if let Some(id) = self.squares[mid.index()].take() {
                captured = self.pieces.remove(&id);
            }
        }

        self.crown_pieces();
        let promoted = !was_king && self.pieces.get(&mv.piece).is_some_and(|p| p.king);

        debug!(
            player = %piece.colour,
            mv = %mv,
            captured = ?captured.map(|p| p.square),
            "applied move"
        );
        if promoted {
            info!(player = %piece.colour, square = %mv.to, "piece crowned");
        }

        // A man crowned by a jump ends the turn even if it could jump again.
        let continuation = if mv.is_jump() && !promoted {
            self.jump_moves(mv.piece)
        } else {
            Vec::new()
        };

        Ok(MoveOutcome {
            mv,
            captured,
            promoted,
            continuation,
        })
    }

    // Every piece sitting on its crowning row is a king, whichever piece moved.
    fn crown_pieces(&mut self) {
        for piece in self.pieces.values_mut() {
            if piece.on_king_row() {
                piece.king = true;
            }
        }
    }

    /// True when either side has no legal move.
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(Colour::Red) || !self.has_legal_move(Colour::White)
    }

    /// The side that still has a move once the other has none.
    /// `None` while both sides can move.
    pub fn winner(&self) -> Option<Colour> {
        if !self.has_legal_move(Colour::Red) {
            Some(Colour::White)
        } else if !self.has_legal_move(Colour::White) {
            Some(Colour::Red)
        } else {
            None
        }
    }

    pub fn result_message(&self) -> Option<String> {
        self.winner().map(|c| format!("{c} Player wins!"))
    }
}
