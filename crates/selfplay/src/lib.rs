//! Self-play runner for draughts
//!
//! This crate provides infrastructure for:
//! - Playing whole games between two move selectors
//! - Scoring matches with alternating colours
//! - Saving match reports for later comparison
//!
//! # Usage
//!
//! ```bash
//! # 100 random-vs-random games, reproducible from the seed
//! cargo run -p selfplay -- --games 100 --seed 42 --out report.json
//!
//! # Settings from a file, flags still win
//! cargo run -p selfplay -- --config selfplay.toml --max-turns 150
//! ```

mod error;
mod match_runner;
mod results;

pub use error::*;
pub use match_runner::*;
pub use results::*;
