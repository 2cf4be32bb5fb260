//! Hangman stage drawings, one per cumulative wrong guess.

pub const STAGES: [&str; 9] = [
    "\n    \n    \n    \n    ",
    "\n    \n    |\n    |\n    |",
    "\n    ----\n    |\n    |\n    |",
    "\n    ----\n    |  O\n    |\n    |",
    "\n    ----\n    |  O\n    |  |\n    |",
    "\n    ----\n    |  O\n    | /|\n    |",
    "\n    ----\n    |  O\n    | /|\\\n    |",
    "\n    ----\n    |  O\n    | /|\\\n    | /",
    "\n    ----\n    |  O\n    | /|\\\n    | / \\",
];

pub const MAX_WRONG_ATTEMPTS: u32 = STAGES.len() as u32;

/// Wrong-guess count at which the game is lost. One below the stage count, so
/// the loss is reported on the eighth miss while the final drawing is shown.
pub const LOSS_THRESHOLD: u32 = MAX_WRONG_ATTEMPTS - 1;

#[must_use]
pub fn stage_for(wrong_count: u32) -> usize {
    (wrong_count.min(LOSS_THRESHOLD)) as usize
}

#[must_use]
pub fn drawing(wrong_count: u32) -> &'static str {
    STAGES[stage_for(wrong_count)]
}
