use crate::config::{CORRECT_GUESS_POINTS, LEADERBOARD_SIZE};
use crate::gallows::{self, LOSS_THRESHOLD};
use crate::leaderboard::{ScoreStore, ScoreStoreError};
use crate::wordbank::{Difficulty, WordEntry, pick_word_with};
use crate::{debug_log, info_log};
use chrono::{DateTime, Local};
use rand::Rng;
use std::collections::BTreeSet;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Filter raw input down to a guessable letter.
#[must_use]
pub fn normalize_letter(c: char) -> Option<char> {
    c.is_ascii_alphabetic().then(|| c.to_ascii_uppercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    Correct,
    Wrong,
    /// Letter was already guessed; nothing changed.
    Repeated,
    /// Session already finished; nothing changed.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Unused,
    Hit,
    Miss,
}

/// State of one round: the secret word plus everything the player has done.
///
/// Counters only grow. `game_over` flips once, in [`GameSession::evaluate`],
/// and a new round always means a new `GameSession`.
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    word: String,
    hint: String,
    guessed: BTreeSet<char>,
    wrong_count: u32,
    score: u32,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
    game_over: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::new_with(difficulty, &mut rand::rng())
    }

    #[must_use]
    pub fn new_with<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self::with_entry(difficulty, pick_word_with(difficulty, rng))
    }

    #[must_use]
    pub fn with_entry(difficulty: Difficulty, entry: WordEntry) -> Self {
        info_log!("new {} session ({} letters)", difficulty, entry.word.len());
        Self {
            difficulty,
            word: entry.word.to_ascii_uppercase(),
            hint: entry.hint.to_string(),
            guessed: BTreeSet::new(),
            wrong_count: 0,
            score: 0,
            started_at: Local::now(),
            finished_at: None,
            game_over: false,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Apply one guessed letter. Score is flat per distinct correct letter,
    /// however often it appears in the word.
    pub fn submit_guess(&mut self, letter: char) -> GuessResult {
        debug_assert!(letter.is_ascii_uppercase(), "unnormalized guess {letter:?}");
        if self.game_over {
            debug_log!("ignoring guess {} after game over", letter);
            return GuessResult::GameOver;
        }
        if !self.guessed.insert(letter) {
            return GuessResult::Repeated;
        }
        if self.word.contains(letter) {
            self.score += CORRECT_GUESS_POINTS;
            GuessResult::Correct
        } else {
            self.wrong_count += 1;
            GuessResult::Wrong
        }
    }

    /// Outcome derived from the current state, without touching it.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.word.chars().all(|c| self.guessed.contains(&c)) {
            Outcome::Won
        } else if self.wrong_count >= LOSS_THRESHOLD {
            Outcome::Lost
        } else {
            Outcome::InProgress
        }
    }

    /// Compute the outcome and mark the session finished on a terminal one.
    pub fn evaluate(&mut self) -> Outcome {
        let outcome = self.outcome();
        if outcome.is_terminal() && !self.game_over {
            self.game_over = true;
            self.finished_at = Some(Local::now());
            info_log!("session finished: {:?}, score {}", outcome, self.score);
        }
        outcome
    }

    /// One entry per letter of the word, `None` while still hidden.
    #[must_use]
    pub fn masked_word(&self) -> Vec<Option<char>> {
        self.word
            .chars()
            .map(|c| self.guessed.contains(&c).then_some(c))
            .collect()
    }

    /// Masked word as shown to the player, e.g. `T _ G _ R`.
    #[must_use]
    pub fn display_word(&self) -> String {
        render_mask(&self.masked_word())
    }

    #[must_use]
    pub fn stage(&self) -> usize {
        gallows::stage_for(self.wrong_count)
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Local::now())
    }

    /// Seconds from start to `now`, or to the finishing guess once over.
    #[must_use]
    pub fn elapsed_secs_at(&self, now: DateTime<Local>) -> u64 {
        elapsed_between(self.started_at, self.finished_at.unwrap_or(now))
    }

    #[must_use]
    pub fn key_state(&self, letter: char) -> KeyState {
        if !self.guessed.contains(&letter) {
            KeyState::Unused
        } else if self.word.contains(letter) {
            KeyState::Hit
        } else {
            KeyState::Miss
        }
    }
}

fn elapsed_between(start: DateTime<Local>, end: DateTime<Local>) -> u64 {
    u64::try_from((end - start).num_seconds()).unwrap_or(0)
}

fn render_mask(mask: &[Option<char>]) -> String {
    mask.iter()
        .map(|slot| slot.unwrap_or('_').to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluate after a guess and record the final score on the transition into
/// game over. Later calls on a finished session never write again.
pub fn settle(session: &mut GameSession, store: &ScoreStore) -> Result<Outcome, ScoreStoreError> {
    let was_over = session.is_game_over();
    let outcome = session.evaluate();
    if !was_over && session.is_game_over() {
        store.append_score(session.score())?;
    }
    Ok(outcome)
}

/// Read-only snapshot of a session handed to front ends.
#[derive(Debug, Clone)]
pub struct GameView {
    pub difficulty: Difficulty,
    pub mask: Vec<Option<char>>,
    pub hint: String,
    pub stage: usize,
    pub wrong_count: u32,
    pub score: u32,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub keyboard: Vec<(char, KeyState)>,
    pub leaderboard: Vec<i64>,
    pub outcome: Outcome,
    /// The secret word, filled in only once the game is lost.
    pub revealed_word: Option<String>,
}

impl GameView {
    #[must_use]
    pub fn capture(session: &GameSession, leaderboard: Vec<i64>) -> Self {
        let outcome = session.outcome();
        Self {
            difficulty: session.difficulty,
            mask: session.masked_word(),
            hint: session.hint.clone(),
            stage: session.stage(),
            wrong_count: session.wrong_count,
            score: session.score,
            started_at: session.started_at,
            finished_at: session.finished_at,
            keyboard: ALPHABET
                .chars()
                .map(|c| (c, session.key_state(c)))
                .collect(),
            leaderboard,
            outcome,
            revealed_word: (outcome == Outcome::Lost).then(|| session.word.clone()),
        }
    }

    #[must_use]
    pub fn display_word(&self) -> String {
        render_mask(&self.mask)
    }

    #[must_use]
    pub fn drawing(&self) -> &'static str {
        gallows::drawing(self.wrong_count)
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        elapsed_between(self.started_at, self.finished_at.unwrap_or_else(Local::now))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    /// Discard the current session. A tier switches difficulty for the new one.
    NewGame(Option<Difficulty>),
    Exit,
}

/// Front end seam: the game loop drives any implementation of this.
pub trait GameInterface {
    fn show_session(&mut self, view: &GameView);
    /// `None` means the input was rejected and should be read again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn show_guess_result(&mut self, letter: char, result: GuessResult);
    fn show_outcome(&mut self, view: &GameView, outcome: Outcome);
    fn show_new_game(&mut self, difficulty: Difficulty);
    fn show_exit(&mut self);
}

pub fn game_loop<I: GameInterface>(
    interface: &mut I,
    store: &ScoreStore,
    difficulty: Difficulty,
) -> Result<(), ScoreStoreError> {
    game_loop_with(interface, store, difficulty, &mut rand::rng())
}

/// Run rounds until the player exits, drawing words from `rng`.
pub fn game_loop_with<I: GameInterface, R: Rng + ?Sized>(
    interface: &mut I,
    store: &ScoreStore,
    mut difficulty: Difficulty,
    rng: &mut R,
) -> Result<(), ScoreStoreError> {
    let mut session = GameSession::new_with(difficulty, rng);

    loop {
        let view = GameView::capture(&session, store.top_scores(LEADERBOARD_SIZE));
        interface.show_session(&view);

        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Exit => {
                interface.show_exit();
                break;
            }
            UserAction::NewGame(tier) => {
                if let Some(tier) = tier {
                    difficulty = tier;
                }
                session = GameSession::new_with(difficulty, rng);
                interface.show_new_game(difficulty);
            }
            UserAction::Guess(letter) => {
                let result = session.submit_guess(letter);
                interface.show_guess_result(letter, result);
                if result == GuessResult::GameOver {
                    continue;
                }
                let outcome = settle(&mut session, store)?;
                if outcome.is_terminal() {
                    let view = GameView::capture(&session, store.top_scores(LEADERBOARD_SIZE));
                    interface.show_outcome(&view, outcome);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiger() -> GameSession {
        GameSession::with_entry(
            Difficulty::Easy,
            WordEntry {
                word: "TIGER",
                hint: "animal",
            },
        )
    }

    fn apple() -> GameSession {
        GameSession::with_entry(
            Difficulty::Easy,
            WordEntry {
                word: "APPLE",
                hint: "fruit",
            },
        )
    }

    #[test]
    fn test_new_session_starts_empty() {
        let session = tiger();
        assert_eq!(session.word(), "TIGER");
        assert_eq!(session.hint(), "animal");
        assert!(session.guessed_letters().is_empty());
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_game_over());
        assert_eq!(session.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_tiger_scenario() {
        let mut session = tiger();
        let mut results = Vec::new();
        for letter in ['T', 'I', 'X'] {
            results.push(session.submit_guess(letter));
        }
        assert_eq!(session.wrong_count(), 1);
        assert_eq!(session.score(), 20);
        for letter in ['G', 'E', 'R'] {
            results.push(session.submit_guess(letter));
        }
        assert_eq!(
            results,
            vec![
                GuessResult::Correct,
                GuessResult::Correct,
                GuessResult::Wrong,
                GuessResult::Correct,
                GuessResult::Correct,
                GuessResult::Correct,
            ]
        );
        assert_eq!(session.score(), 50);
        assert_eq!(session.wrong_count(), 1);
        assert_eq!(session.evaluate(), Outcome::Won);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_repeated_guess_is_noop() {
        let mut session = tiger();
        session.submit_guess('T');
        session.submit_guess('Q');
        assert_eq!(session.submit_guess('T'), GuessResult::Repeated);
        assert_eq!(session.submit_guess('Q'), GuessResult::Repeated);
        assert_eq!(session.score(), 10);
        assert_eq!(session.wrong_count(), 1);
        assert_eq!(session.guessed_letters().len(), 2);
    }

    #[test]
    fn test_repeated_letter_in_word_scores_once() {
        let mut session = apple();
        assert_eq!(session.submit_guess('P'), GuessResult::Correct);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_won_regardless_of_occurrences() {
        let mut session = apple();
        for letter in ['A', 'P', 'L', 'E'] {
            session.submit_guess(letter);
        }
        assert_eq!(session.evaluate(), Outcome::Won);
    }

    #[test]
    fn test_lost_on_eighth_wrong_guess() {
        let mut session = tiger();
        for (i, letter) in "ABCDFHJK".chars().enumerate() {
            assert_eq!(session.evaluate(), Outcome::InProgress, "after {i} misses");
            assert_eq!(session.submit_guess(letter), GuessResult::Wrong);
        }
        assert_eq!(session.wrong_count(), 8);
        assert_eq!(session.evaluate(), Outcome::Lost);
        assert!(session.is_game_over());
        assert_eq!(session.stage(), 8);
    }

    #[test]
    fn test_guesses_ignored_after_game_over() {
        let mut session = tiger();
        for letter in "ABCDFHJK".chars() {
            session.submit_guess(letter);
        }
        session.evaluate();
        assert_eq!(session.submit_guess('T'), GuessResult::GameOver);
        assert_eq!(session.score(), 0);
        assert_eq!(session.wrong_count(), 8);
    }

    #[test]
    fn test_wrong_count_monotonic_and_bounded() {
        let mut session = tiger();
        let mut previous = 0;
        for letter in ALPHABET.chars() {
            session.submit_guess(letter);
            session.evaluate();
            assert!(session.wrong_count() >= previous);
            assert!(session.wrong_count() <= LOSS_THRESHOLD);
            previous = session.wrong_count();
        }
    }

    #[test]
    fn test_masked_word_and_display() {
        let mut session = tiger();
        session.submit_guess('T');
        session.submit_guess('G');
        session.submit_guess('R');
        assert_eq!(
            session.masked_word(),
            vec![Some('T'), None, Some('G'), None, Some('R')]
        );
        assert_eq!(session.display_word(), "T _ G _ R");
    }

    #[test]
    fn test_key_states() {
        let mut session = tiger();
        session.submit_guess('T');
        session.submit_guess('Z');
        assert_eq!(session.key_state('T'), KeyState::Hit);
        assert_eq!(session.key_state('Z'), KeyState::Miss);
        assert_eq!(session.key_state('A'), KeyState::Unused);
    }

    #[test]
    fn test_elapsed_secs_at() {
        let session = tiger();
        let later = session.started_at() + chrono::Duration::seconds(42);
        assert_eq!(session.elapsed_secs_at(later), 42);
        let earlier = session.started_at() - chrono::Duration::seconds(5);
        assert_eq!(session.elapsed_secs_at(earlier), 0);
    }

    #[test]
    fn test_normalize_letter() {
        assert_eq!(normalize_letter('a'), Some('A'));
        assert_eq!(normalize_letter('Z'), Some('Z'));
        assert_eq!(normalize_letter('3'), None);
        assert_eq!(normalize_letter('é'), None);
    }

    #[test]
    fn test_settle_appends_once() {
        let path = std::env::temp_dir().join("hangman_unit_settle.json");
        let _ = std::fs::remove_file(&path);
        let store = ScoreStore::new(&path);

        let mut session = tiger();
        for letter in "TIGER".chars() {
            session.submit_guess(letter);
            settle(&mut session, &store).unwrap();
        }
        assert_eq!(settle(&mut session, &store).unwrap(), Outcome::Won);
        assert_eq!(settle(&mut session, &store).unwrap(), Outcome::Won);
        assert_eq!(store.load(), vec![50]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_view_reveals_word_only_on_loss() {
        let mut session = tiger();
        session.submit_guess('Q');
        session.submit_guess('Z');
        let view = GameView::capture(&session, vec![10]);
        assert_eq!(view.drawing(), gallows::drawing(2));
        assert_eq!(view.revealed_word, None);
        assert_eq!(view.display_word(), "_ _ _ _ _");
        assert_eq!(view.keyboard.len(), 26);
        assert_eq!(view.leaderboard, vec![10]);

        for letter in "ABCDFHJK".chars() {
            session.submit_guess(letter);
        }
        session.evaluate();
        let view = GameView::capture(&session, Vec::new());
        assert_eq!(view.outcome, Outcome::Lost);
        assert_eq!(view.revealed_word.as_deref(), Some("TIGER"));
        assert_eq!(view.drawing(), gallows::STAGES[8]);
    }
}
