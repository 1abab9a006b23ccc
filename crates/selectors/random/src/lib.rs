//! Random Move Selector
//!
//! Picks uniformly at random from whatever moves the engine offers.
//! Useful for:
//! - Filling an empty seat in interactive play
//! - Baseline self-play runs
//! - Stress testing move generation and capture chains

use draughts_core::{Board, Move, MoveSelector};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::trace;


/// A selector that plays random legal moves.
///
/// A seeded selector makes the same sequence of choices every run, which
/// keeps self-play matches reproducible. The stream is not rewound between
/// games, so consecutive games of a match still differ.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
    choices: u64,
}

impl RandomSelector {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            choices: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            choices: 0,
        }
    }

    /// Number of decisions made since the last `new_game`.
    pub fn choices(&self) -> u64 {
        self.choices
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomSelector {
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move> {
        let mv = moves.choose(&mut self.rng).copied()?;
        self.choices += 1;
        trace!(player = %board.current_player(), offered = moves.len(), mv = %mv, "random pick");
        Some(mv)
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.choices = 0;
    }
}
