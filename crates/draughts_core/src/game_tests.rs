use std::sync::{Arc, Mutex};

use super::*;
use crate::error::BoardError;
use crate::selector::{ScriptedSelector, Seats};

fn sq(x: i8, y: i8) -> Square {
    Square::new(x, y).unwrap()
}

fn board(diagram: &str, to_move: Colour) -> Board {
    Board::from_diagram("test", diagram, to_move).unwrap()
}

/// Scripted selector that also remembers every set it was offered.
struct Recording {
    inner: ScriptedSelector,
    offered: Arc<Mutex<Vec<Vec<Move>>>>,
}

impl MoveSelector for Recording {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        self.offered.lock().unwrap().push(moves.to_vec());
        self.inner.choose_move(board, moves)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

// Red man on (4,4) with White men on (3,3) and (1,1). The extra White men on
// (5,3) and (6,2) block the other step and jump, so the capture is Red's only move.
const CHAIN: &str = "\
........
........
........
....r...
...w.w..
......w.
.w......
........";

#[test]
fn capture_chain_asks_for_the_continuation() {
    let offered = Arc::new(Mutex::new(Vec::new()));
    let selector = Recording {
        inner: ScriptedSelector::from_coords(&[((4, 4), (2, 2)), ((2, 2), (0, 0))]).unwrap(),
        offered: Arc::clone(&offered),
    };
    let mut game = Game::new(board(CHAIN, Colour::Red), Box::new(selector));

    let record = game.turn().unwrap();

    let offered = offered.lock().unwrap();
    assert_eq!(offered.len(), 2, "the chain needs a second selection");
    assert_eq!(offered[0].len(), 1);
    assert_eq!((offered[0][0].from, offered[0][0].to), (sq(4, 4), sq(2, 2)));
    assert_eq!(offered[1].len(), 1);
    assert_eq!((offered[1][0].from, offered[1][0].to), (sq(2, 2), sq(0, 0)));

    assert_eq!(record.player, Colour::Red);
    assert_eq!(record.moves.len(), 2);
    assert_eq!(record.captured.len(), 2);
    assert!(record.promoted);

    let b = game.board();
    assert!(b.piece_at(sq(3, 3)).is_none());
    assert!(b.piece_at(sq(1, 1)).is_none());
    assert_eq!(b.count(Colour::White), 2);
    assert_eq!(b.current_player(), Colour::White);
}

#[test]
fn piece_crowned_mid_chain_is_a_king_on_the_next_check() {
    let selector = ScriptedSelector::from_coords(&[((4, 4), (2, 2)), ((2, 2), (0, 0))]).unwrap();
    let mut game = Game::new(board(CHAIN, Colour::Red), Box::new(selector));
    game.turn().unwrap();

    let b = game.board();
    let crowned = b.piece_at(sq(0, 0)).unwrap();
    assert!(crowned.is_king());
    // a Red man on row 0 has nowhere to go; a king can step back to (1,1)
    let red = b.legal_moves(Colour::Red);
    assert!(red.iter().any(|m| m.from == sq(0, 0) && m.to == sq(1, 1)));
}

#[test]
fn man_crowned_by_a_jump_stops_there() {
    // After landing on (2,0) the new king could jump (1,1) backwards,
    // but crowning ends the turn.
    let text = "\
........
........
........
........
........
....r...
.w.w....
........";
    let offered = Arc::new(Mutex::new(Vec::new()));
    let selector = Recording {
        inner: ScriptedSelector::from_coords(&[((4, 2), (2, 0))]).unwrap(),
        offered: Arc::clone(&offered),
    };
    let mut game = Game::new(board(text, Colour::Red), Box::new(selector));

    let record = game.turn().unwrap();

    assert_eq!(record.moves.len(), 1);
    assert!(record.promoted);
    assert_eq!(offered.lock().unwrap().len(), 1);
    let b = game.board();
    assert!(b.piece_at(sq(2, 0)).unwrap().is_king());
    assert!(b.piece_at(sq(1, 1)).is_some(), "second man must survive");
    assert_eq!(b.current_player(), Colour::White);
    // the jump really was available to the king, had the turn continued
    let king = b.piece_at(sq(2, 0)).unwrap().id;
    assert_eq!(b.jump_moves(king).len(), 1);
}

#[test]
fn existing_king_keeps_jumping() {
    let text = "\
........
........
........
........
........
....R...
.w.w....
........";
    let selector = ScriptedSelector::from_coords(&[((4, 2), (2, 0)), ((2, 0), (0, 2))]).unwrap();
    let mut game = Game::new(board(text, Colour::Red), Box::new(selector));

    let record = game.turn().unwrap();

    assert_eq!(record.moves.len(), 2);
    assert!(!record.promoted);
    assert_eq!(game.board().count(Colour::White), 0);
    assert!(game.board().piece_at(sq(0, 2)).unwrap().is_king());
}

#[test]
fn illegal_selection_fails_without_touching_the_board() {
    let start = Board::new_game("strict");
    // (1,6) is walled in by its own men
    let selector = ScriptedSelector::from_coords(&[((1, 6), (0, 5))]).unwrap();
    let mut game = Game::new(start.clone(), Box::new(selector));

    let err = game.turn().unwrap_err();

    assert!(matches!(err, GameError::IllegalMoveSelection(m) if m.from == sq(1, 6)));
    assert_eq!(game.board(), &start);
}

#[test]
fn exhausted_selector_aborts_the_turn() {
    let mut game = Game::new_game("empty", Box::new(ScriptedSelector::default()));
    assert_eq!(game.turn().unwrap_err(), GameError::SelectionAborted);
    assert_eq!(game.board().current_player(), Colour::Red);
}

#[test]
fn unknown_piece_is_rejected() {
    let mut b = Board::new_game("unknown");
    let bogus = Move::new(PieceId(99), sq(0, 5), sq(1, 4));
    assert!(matches!(
        b.apply_move(bogus),
        Err(GameError::UnknownPiece { piece: PieceId(99), .. })
    ));

    // a real piece named with the wrong origin is just as unknown
    let id = b.piece_at(sq(0, 5)).unwrap().id;
    let stale = Move::new(id, sq(2, 5), sq(1, 4));
    assert!(matches!(b.apply_move(stale), Err(GameError::UnknownPiece { .. })));
}

#[test]
fn turn_for_a_stuck_side_is_an_error() {
    let text = "\
........
........
........
........
........
r.......
.w......
..w.....";
    let mut game = Game::new(board(text, Colour::Red), Box::new(ScriptedSelector::default()));
    assert!(game.is_game_over());
    assert_eq!(game.turn().unwrap_err(), GameError::NoLegalMoves(Colour::Red));
}

#[test]
fn play_runs_until_a_side_cannot_move() {
    let text = "\
........
........
........
........
........
..r.....
.w......
........";
    let selector = ScriptedSelector::from_coords(&[((2, 2), (0, 0))]).unwrap();
    let mut game = Game::new(board(text, Colour::Red), Box::new(selector));

    assert_eq!(game.play().unwrap(), Colour::Red);
    assert_eq!(game.board().count(Colour::White), 0);
    assert_eq!(
        game.board().result_message().as_deref(),
        Some("Red Player wins!")
    );
}

#[test]
fn blocked_side_loses() {
    let text = "\
........
........
........
........
........
r.......
.w......
..w.....";
    let b = board(text, Colour::Red);
    assert!(b.is_game_over());
    assert_eq!(b.winner(), Some(Colour::White));
    assert_eq!(b.result_message().as_deref(), Some("White Player wins!"));
    assert!(b.count(Colour::Red) > 0);
}

#[test]
fn seats_hand_each_turn_to_the_right_player() {
    let red = ScriptedSelector::from_coords(&[((2, 5), (3, 4))]).unwrap();
    let white = ScriptedSelector::from_coords(&[((1, 2), (2, 3))]).unwrap();
    let seats = Seats::new(Box::new(red), Box::new(white));
    let mut game = Game::new_game("seats", Box::new(seats));

    let first = game.turn().unwrap();
    let second = game.turn().unwrap();

    assert_eq!(first.player, Colour::Red);
    assert_eq!(second.player, Colour::White);
    let b = game.board();
    assert_eq!(b.piece_at(sq(3, 4)).unwrap().colour, Colour::Red);
    assert_eq!(b.piece_at(sq(2, 3)).unwrap().colour, Colour::White);
    assert_eq!(b.current_player(), Colour::Red);
}

#[test]
fn loaded_game_resumes_verbatim() {
    let pieces = vec![
        Piece::new(PieceId(7), Colour::White, sq(3, 3)).crowned(),
        Piece::new(PieceId(2), Colour::Red, sq(4, 6)),
    ];
    let game = Game::load(
        "saved",
        Colour::White,
        pieces.clone(),
        Box::new(ScriptedSelector::default()),
    )
    .unwrap();
    let b = game.board();
    assert_eq!(b.name(), "saved");
    assert_eq!(b.current_player(), Colour::White);
    assert_eq!(b.piece(PieceId(7)), Some(&pieces[0]));
    assert_eq!(b.piece_at(sq(4, 6)), Some(&pieces[1]));
}

#[test]
fn load_rejects_two_pieces_on_one_square() {
    let pieces = vec![
        Piece::new(PieceId(0), Colour::White, sq(3, 3)),
        Piece::new(PieceId(1), Colour::Red, sq(3, 3)),
    ];
    assert_eq!(
        Board::load_game("clash", Colour::Red, pieces).unwrap_err(),
        BoardError::SquareOccupied(sq(3, 3))
    );
    let twins = vec![
        Piece::new(PieceId(0), Colour::White, sq(3, 3)),
        Piece::new(PieceId(0), Colour::Red, sq(4, 4)),
    ];
    assert_eq!(
        Board::load_game("twins", Colour::Red, twins).unwrap_err(),
        BoardError::DuplicatePiece(PieceId(0))
    );
}

// CHAIN plus a spare Red man on (7,7) that can always step.
const CHAIN_WITH_SPARE: &str = "\
.......r
........
........
....r...
...w.w..
......w.
.w......
........";

#[test]
fn rejected_continuation_rolls_back_the_whole_turn() {
    let offered = Arc::new(Mutex::new(Vec::new()));
    let selector = Recording {
        inner: ScriptedSelector::from_coords(&[
            ((4, 4), (2, 2)),
            ((2, 2), (3, 1)), // not a jump
            ((4, 4), (2, 2)),
            ((2, 2), (0, 0)),
        ])
        .unwrap(),
        offered: Arc::clone(&offered),
    };
    let start = board(CHAIN_WITH_SPARE, Colour::Red);
    let mut game = Game::new(start.clone(), Box::new(selector));

    let err = game.turn().unwrap_err();
    assert!(matches!(err, GameError::IllegalMoveSelection(m) if m.to == sq(3, 1)));
    assert_eq!(game.board(), &start, "the first jump must be undone");

    // The retry starts from the full offer, not from a half-played chain.
    let record = game.turn().unwrap();
    let offered = offered.lock().unwrap();
    assert_eq!(offered.len(), 4);
    assert_eq!(offered[2], start.legal_moves(Colour::Red));
    assert!(offered[2].iter().any(|m| m.from == sq(7, 7)));
    assert_eq!(record.moves.len(), 2);
    assert_eq!(record.captured.len(), 2);
    assert!(game.board().piece_at(sq(1, 1)).is_none());
    assert_eq!(game.board().current_player(), Colour::White);
}

#[test]
fn aborted_continuation_rolls_back_the_whole_turn() {
    let selector = ScriptedSelector::from_coords(&[((4, 4), (2, 2))]).unwrap();
    let start = board(CHAIN_WITH_SPARE, Colour::Red);
    let mut game = Game::new(start.clone(), Box::new(selector));

    assert_eq!(game.turn().unwrap_err(), GameError::SelectionAborted);
    assert_eq!(game.board(), &start);
    assert_eq!(game.board().count(Colour::White), 4);
}

#[test]
fn move_onto_an_occupied_square_is_rejected() {
    let mut b = Board::new_game("occupied");
    let before = b.clone();
    let id = b.piece_at(sq(0, 5)).unwrap().id;
    // (1,6) holds one of Red's own men
    let mv = Move::new(id, sq(0, 5), sq(1, 6));

    assert_eq!(
        b.apply_move(mv).unwrap_err(),
        GameError::Board(BoardError::SquareOccupied(sq(1, 6)))
    );
    assert_eq!(b, before);
}

/// Counts how often it is told a new game started.
struct Resets(Arc<Mutex<u32>>);

impl MoveSelector for Resets {
    fn choose_move(&mut self, _board: &Board, _moves: &[Move]) -> Option<Move> {
        None
    }

    fn name(&self) -> &str {
        "resets"
    }

    fn new_game(&mut self) {
        *self.0.lock().unwrap() += 1;
    }
}

#[test]
fn every_constructor_starts_the_selector_afresh() {
    let count = Arc::new(Mutex::new(0));

    Game::new_game("fresh", Box::new(Resets(Arc::clone(&count))));
    assert_eq!(*count.lock().unwrap(), 1);

    let pieces = vec![Piece::new(PieceId(0), Colour::Red, sq(4, 6))];
    Game::load("saved", Colour::Red, pieces, Box::new(Resets(Arc::clone(&count)))).unwrap();
    assert_eq!(*count.lock().unwrap(), 2);

    Game::new(Board::new_game("direct"), Box::new(Resets(Arc::clone(&count))));
    assert_eq!(*count.lock().unwrap(), 3);
}
