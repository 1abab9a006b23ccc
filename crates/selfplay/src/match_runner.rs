//! Match runner for playing games between move selectors

use std::path::Path;

use draughts_core::{Colour, Game, MoveSelector, Seats};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SelfPlayError;
use crate::results::{GameOutcome, GameRecord, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Turns per game before the runner calls it a draw
    pub max_turns: u32,
    /// Whether to alternate colours each game
    pub alternate_colors: bool,
    /// Seed for the random selectors the CLI builds
    pub seed: u64,
    /// Print progress during match
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_turns: 200,
            alternate_colors: true,
            seed: 0,
            verbose: true,
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SelfPlayError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file; missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self, SelfPlayError> {
        let text = std::fs::read_to_string(path).map_err(|source| SelfPlayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Runs matches between two selectors
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two selectors
    ///
    /// Returns the result from `first`'s perspective along with every game played
    pub fn run_match(
        &self,
        first: &mut dyn MoveSelector,
        second: &mut dyn MoveSelector,
    ) -> Result<(MatchResult, Vec<GameRecord>), SelfPlayError> {
        let mut result = MatchResult::new();
        let mut games = Vec::with_capacity(self.config.num_games as usize);

        for game_num in 0..self.config.num_games {
            let first_red = !self.config.alternate_colors || game_num % 2 == 0;
            let first_colour = if first_red { Colour::Red } else { Colour::White };

            let record = if first_red {
                self.play_game(game_num, &mut *first, &mut *second)?
            } else {
                self.play_game(game_num, &mut *second, &mut *first)?
            };

            match record.outcome.winner() {
                Some(colour) if colour == first_colour => result.wins += 1,
                Some(_) => result.losses += 1,
                None => result.draws += 1,
            }

            if self.config.verbose {
                let colour = if first_red { "R" } else { "W" };
                println!(
                    "Game {}/{}: {} ({}) in {} turns - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    record.outcome,
                    colour,
                    record.turns,
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
            games.push(record);
        }

        Ok((result, games))
    }

    /// Play a single game from the opening layout
    pub fn play_game(
        &self,
        game_num: u32,
        red: &mut dyn MoveSelector,
        white: &mut dyn MoveSelector,
    ) -> Result<GameRecord, SelfPlayError> {
        let seats = Seats::new(Box::new(red), Box::new(white));
        let name = format!("selfplay-{}", game_num + 1);
        let mut game = Game::new_game(&name, Box::new(seats));

        let mut turns = 0;
        let mut captures = 0;
        let mut promotions = 0;
        while turns < self.config.max_turns && !game.is_game_over() {
            let turn = game
                .turn()
                .map_err(|source| SelfPlayError::Game { game: game_num + 1, source })?;
            turns += 1;
            captures += turn.captured.len() as u32;
            if turn.promoted {
                promotions += 1;
            }
        }

        let board = game.into_board();
        let outcome = match board.winner() {
            Some(Colour::Red) => GameOutcome::RedWins,
            Some(Colour::White) => GameOutcome::WhiteWins,
            None => GameOutcome::TurnLimit,
        };
        debug!(game = %name, %outcome, turns, captures, "game finished");

        Ok(GameRecord {
            outcome,
            turns,
            captures,
            promotions,
            red_pieces: board.count(Colour::Red) as u32,
            white_pieces: board.count(Colour::White) as u32,
            final_position: board.to_diagram(),
        })
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    first: &mut dyn MoveSelector,
    second: &mut dyn MoveSelector,
    num_games: u32,
    max_turns: u32,
) -> Result<MatchResult, SelfPlayError> {
    let config = MatchConfig {
        num_games,
        max_turns,
        verbose: false,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(first, second).map(|(result, _)| result)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
