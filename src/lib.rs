// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod gallows;
pub mod game_state;
pub mod leaderboard;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{
    GameInterface, GameSession, GameView, GuessResult, Outcome, UserAction, game_loop,
    game_loop_with, settle,
};
pub use leaderboard::ScoreStore;
pub use wordbank::{Difficulty, WordEntry, pick_word, pick_word_with};
