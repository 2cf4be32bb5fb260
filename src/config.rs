//! Configuration constants and file locations.

use std::path::PathBuf;

// Scoring
pub const CORRECT_GUESS_POINTS: u32 = 10; // Flat per unique correct letter
pub const LEADERBOARD_SIZE: usize = 5;

// Files
pub const APP_DIR_NAME: &str = "hangman";
pub const SCORES_FILE_NAME: &str = "leaderboard.json";
pub const LOG_FILE_NAME: &str = "hangman.log";

/// Directory holding the score file and log, if the platform has one.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Score file used when no `--scores` override is given. Falls back to the
/// working directory.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    data_dir().map_or_else(
        || PathBuf::from(SCORES_FILE_NAME),
        |dir| dir.join(SCORES_FILE_NAME),
    )
}

#[must_use]
pub fn default_log_path() -> PathBuf {
    data_dir().map_or_else(|| PathBuf::from(LOG_FILE_NAME), |dir| dir.join(LOG_FILE_NAME))
}
