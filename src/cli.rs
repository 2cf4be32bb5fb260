use crate::game_state::{
    GameInterface, GameView, GuessResult, KeyState, Outcome, UserAction, normalize_letter,
};
use crate::wordbank::Difficulty;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman: guess the word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Difficulty tier for the first game
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,

    /// Path to the JSON score file
    #[arg(short, long = "scores")]
    pub scores_path: Option<PathBuf>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Debug, PartialEq, Eq)]
pub enum ActionInput {
    Valid(UserAction),
    Invalid(String),
}

/// Interpret one line of player input.
#[must_use]
pub fn parse_action(line: &str) -> ActionInput {
    let input = line.trim().to_uppercase();
    let mut words = input.split_whitespace();

    match (words.next(), words.next(), words.next()) {
        (Some("EXIT" | "QUIT"), None, None) => ActionInput::Valid(UserAction::Exit),
        (Some("NEW"), None, None) => ActionInput::Valid(UserAction::NewGame(None)),
        (Some("NEW"), Some(tier), None) => match tier.parse::<Difficulty>() {
            Ok(difficulty) => ActionInput::Valid(UserAction::NewGame(Some(difficulty))),
            Err(e) => ActionInput::Invalid(e.to_string()),
        },
        (Some(word), None, None) if word.chars().count() == 1 => {
            match word.chars().next().and_then(normalize_letter) {
                Some(letter) => ActionInput::Valid(UserAction::Guess(letter)),
                None => ActionInput::Invalid(format!("'{word}' is not a letter.")),
            }
        }
        _ => ActionInput::Invalid(
            "Enter a single letter, 'new [easy|medium|hard]' or 'exit'.".to_string(),
        ),
    }
}

/// Board, scoreboard and leaderboard as printed before each prompt.
#[must_use]
pub fn format_session(view: &GameView) -> String {
    let mut lines = vec![
        view.drawing().to_string(),
        String::new(),
        format!("  {}", view.display_word()),
        String::new(),
        format!("Hint: {}", view.hint),
        format!(
            "Difficulty: {} | Time: {} sec | Score: {} | Wrong attempts: {}",
            view.difficulty,
            view.elapsed_secs(),
            view.score,
            view.wrong_count
        ),
    ];
    let guessed: String = view
        .keyboard
        .iter()
        .filter(|(_, state)| *state != KeyState::Unused)
        .map(|(c, _)| *c)
        .collect();
    if !guessed.is_empty() {
        lines.push(format!("Guessed: {guessed}"));
    }
    lines.push(format_leaderboard(&view.leaderboard));
    lines.join("\n")
}

#[must_use]
pub fn format_leaderboard(scores: &[i64]) -> String {
    let mut lines = vec!["Leaderboard:".to_string()];
    if scores.is_empty() {
        lines.push("No scores yet.".to_string());
    }
    for (i, score) in scores.iter().enumerate() {
        lines.push(format!("{}. {score}", i + 1));
    }
    lines.join("\n")
}

pub fn display_session(view: &GameView) {
    println!("{}", format_session(view));
}

pub fn display_guess_result(letter: char, result: GuessResult) {
    match result {
        GuessResult::Correct => println!("{letter} is in the word."),
        GuessResult::Wrong => println!("{letter} is not in the word."),
        GuessResult::Repeated => println!("You already guessed {letter}."),
        GuessResult::GameOver => println!("This game is over. Type 'new' to play again."),
    }
}

pub fn display_outcome(view: &GameView, outcome: Outcome) {
    match outcome {
        Outcome::Won => println!("YOU WON! Final score: {}", view.score),
        Outcome::Lost => println!(
            "You lost! Word was: {}",
            view.revealed_word.as_deref().unwrap_or_default()
        ),
        Outcome::InProgress => {}
    }
}

/// Line-based implementation of [`GameInterface`] over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn show_session(&mut self, view: &GameView) {
        display_session(view);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        println!("\nGuess a letter ('new' for a new game, 'exit' to quit):");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            // End of input ends the session like 'exit'.
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                log::error!("failed to read input: {e}");
                return Some(UserAction::Exit);
            }
        }
        match parse_action(&input) {
            ActionInput::Valid(action) => Some(action),
            ActionInput::Invalid(message) => {
                println!("{message}");
                None
            }
        }
    }

    fn show_guess_result(&mut self, letter: char, result: GuessResult) {
        display_guess_result(letter, result);
    }

    fn show_outcome(&mut self, view: &GameView, outcome: Outcome) {
        display_outcome(view, outcome);
    }

    fn show_new_game(&mut self, difficulty: Difficulty) {
        println!("New {difficulty} game started.");
    }

    fn show_exit(&mut self) {
        println!("Exiting.");
    }
}
