//! Match results storage and reporting

use std::fmt;
use std::path::Path;

use draughts_core::Colour;
use serde::{Deserialize, Serialize};

use crate::error::SelfPlayError;
use crate::match_runner::MatchConfig;

/// How a single game ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    RedWins,
    WhiteWins,
    /// The runner's turn cap was reached with both sides still able to move
    TurnLimit,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Colour> {
        match self {
            GameOutcome::RedWins => Some(Colour::Red),
            GameOutcome::WhiteWins => Some(Colour::White),
            GameOutcome::TurnLimit => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::RedWins => f.write_str("1-0"),
            GameOutcome::WhiteWins => f.write_str("0-1"),
            GameOutcome::TurnLimit => f.write_str("1/2"),
        }
    }
}

/// Summary of one finished game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub turns: u32,
    pub captures: u32,
    pub promotions: u32,
    pub red_pieces: u32,
    pub white_pieces: u32,
    /// Board diagram at the end of the game
    pub final_position: String,
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from the first selector's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// Complete match report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    /// First selector, then second
    pub participants: Vec<String>,
    pub config: MatchConfig,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchReport {
    pub fn new(
        first: &str,
        second: &str,
        config: MatchConfig,
        result: MatchResult,
        games: Vec<GameRecord>,
    ) -> Self {
        Self {
            participants: vec![first.to_string(), second.to_string()],
            config,
            result,
            games,
        }
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> Result<(), SelfPlayError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SelfPlayError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load report from JSON file
    pub fn load(path: &Path) -> Result<Self, SelfPlayError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SelfPlayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn average_turns(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.games.iter().map(|g| g.turns as f64).sum::<f64>() / self.games.len() as f64
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Match: {} ===\n\n",
            self.participants.join(" vs ")
        ));
        report.push_str(&format!(
            "Config: {} games, {} turn cap, seed {}\n\n",
            self.config.num_games, self.config.max_turns, self.config.seed
        ));

        report.push_str(&format!(
            "{:<6} {:>7} {:>6} {:>9} {:>6} {:>6}\n",
            "Game", "Result", "Turns", "Captures", "Red", "White"
        ));
        report.push_str(&"-".repeat(45));
        report.push('\n');
        for (idx, game) in self.games.iter().enumerate() {
            report.push_str(&format!(
                "{:<6} {:>7} {:>6} {:>9} {:>6} {:>6}\n",
                idx + 1,
                game.outcome.to_string(),
                game.turns,
                game.captures,
                game.red_pieces,
                game.white_pieces
            ));
        }

        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws (score {:.1}%, {:.1} turns/game)\n",
            self.participants.first().map(String::as_str).unwrap_or("?"),
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0,
            self.average_turns()
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
