pub mod board;
pub mod diagram;
pub mod error;
pub mod game;
pub mod movegen;
pub mod selector;
pub mod types;

// Re-export the rules engine surface
pub use board::*;
pub use diagram::{START_DIAGRAM, symbol};
pub use error::*;
pub use game::*;
pub use selector::*;
pub use types::*;
