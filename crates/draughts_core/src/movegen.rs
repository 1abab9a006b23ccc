use tracing::trace;

use crate::{board::Board, types::*};

impl Board {
    /// All moves available to `player`: forward moves for men, both
    /// directions for kings. Captures are not mandatory at the start of a
    /// turn, so steps and jumps are offered together.
    pub fn legal_moves(&self, player: Colour) -> Vec<Move> {
        let mut out = Vec::with_capacity(32);
        for piece in self.pieces().filter(|p| p.colour == player) {
            gen_piece(self, player, piece, 1, false, &mut out);
            if piece.king {
                gen_piece(self, player, piece, -1, false, &mut out);
            }
        }
        trace!(player = %player, count = out.len(), "generated moves");
        out
    }

    /// Moves for a single piece along one direction.
    ///
    /// `y_offset` is +1 for the player's forward direction and -1 for
    /// backwards; it is mirrored for Red. With `jump_only` the simple steps
    /// are skipped.
    pub fn piece_moves(&self, player: Colour, id: PieceId, y_offset: i8, jump_only: bool) -> Vec<Move> {
        let mut out = Vec::new();
        if let Some(piece) = self.piece(id) {
            gen_piece(self, player, piece, y_offset, jump_only, &mut out);
        }
        out
    }

    /// Jumps open to one piece in every direction it may move.
    pub fn jump_moves(&self, id: PieceId) -> Vec<Move> {
        let mut out = Vec::new();
        if let Some(piece) = self.piece(id) {
            gen_piece(self, piece.colour, piece, 1, true, &mut out);
            if piece.king {
                gen_piece(self, piece.colour, piece, -1, true, &mut out);
            }
        }
        out
    }

    pub fn has_legal_move(&self, player: Colour) -> bool {
        self.pieces().filter(|p| p.colour == player).any(|piece| {
            let mut out = Vec::new();
            gen_piece(self, player, piece, 1, false, &mut out);
            if out.is_empty() && piece.king {
                gen_piece(self, player, piece, -1, false, &mut out);
            }
            !out.is_empty()
        })
    }
}

fn gen_piece(
    board: &Board,
    player: Colour,
    piece: &Piece,
    y_offset: i8,
    jump_only: bool,
    out: &mut Vec<Move>,
) {
    let dy = y_offset * player.forward();
    let from = piece.square;

    for dx in [-1, 1] {
        if !jump_only {
            if let Some(to) = from.offset(dx, dy) {
                if board.is_empty(to) {
                    out.push(Move::new(piece.id, from, to));
                }
            }
        }

        let Some(to) = from.offset(2 * dx, 2 * dy) else {
            continue;
        };
        if !board.is_empty(to) {
            continue;
        }
        let jumped = from.offset(dx, dy).and_then(|mid| board.piece_at(mid));
        if jumped.is_some_and(|p| p.colour != player) {
            out.push(Move::new(piece.id, from, to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
