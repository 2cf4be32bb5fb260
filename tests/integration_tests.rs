// Integration tests for the hangman application
// These drive the game loop end to end through the line-based interface

use hangman::cli::CliInterface;
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

fn temp_scores(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hangman_it_{name}.json"));
    let _ = fs::remove_file(&path);
    path
}

/// The word the game loop will draw first for `seed`.
fn first_word(difficulty: Difficulty, seed: u64) -> &'static str {
    pick_word_with(difficulty, &mut StdRng::seed_from_u64(seed)).word
}

fn distinct_letters(word: &str) -> Vec<char> {
    let mut letters: Vec<char> = word.chars().collect();
    letters.sort_unstable();
    letters.dedup();
    letters
}

fn run(input: &str, store: &ScoreStore, difficulty: Difficulty, seed: u64) {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()));
    let mut rng = StdRng::seed_from_u64(seed);
    game_loop_with(&mut interface, store, difficulty, &mut rng).unwrap();
}

#[test]
fn test_winning_game_records_score_once() {
    let path = temp_scores("win");
    let store = ScoreStore::new(&path);
    let word = first_word(Difficulty::Easy, 1);
    let letters = distinct_letters(word);

    // Winning letters, then a repeat and a late guess after game over
    let mut input: String = letters.iter().map(|c| format!("{c}\n")).collect();
    input.push_str(&format!("{}\nq\nexit\n", letters[0]));
    run(&input, &store, Difficulty::Easy, 1);

    let expected = i64::try_from(letters.len()).unwrap() * 10;
    assert_eq!(store.load(), vec![expected]);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_losing_game_records_zero_when_nothing_found() {
    let path = temp_scores("lose");
    let store = ScoreStore::new(&path);
    let word = first_word(Difficulty::Hard, 3);

    let misses: String = ('A'..='Z')
        .filter(|c| !word.contains(*c))
        .take(8)
        .map(|c| format!("{c}\n"))
        .collect();
    run(&format!("{misses}exit\n"), &store, Difficulty::Hard, 3);

    assert_eq!(store.load(), vec![0]);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_exit_before_finishing_records_nothing() {
    let path = temp_scores("quit");
    let store = ScoreStore::new(&path);
    run("a\nexit\n", &store, Difficulty::Medium, 9);
    assert!(store.load().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let path = temp_scores("eof");
    let store = ScoreStore::new(&path);
    run("x\n7\n", &store, Difficulty::Easy, 4);
    assert!(store.load().is_empty());
}

#[test]
fn test_new_game_discards_unfinished_session() {
    let path = temp_scores("reset");
    let store = ScoreStore::new(&path);
    run("a\ne\nnew hard\nnew\nexit\n", &store, Difficulty::Easy, 5);
    assert!(store.load().is_empty());
}

#[test]
fn test_two_games_build_leaderboard() {
    let path = temp_scores("two_games");
    let store = ScoreStore::new(&path);

    let mut rng = StdRng::seed_from_u64(11);
    let first = pick_word_with(Difficulty::Easy, &mut rng).word;
    let second = pick_word_with(Difficulty::Easy, &mut rng).word;

    let mut input: String = distinct_letters(first)
        .iter()
        .map(|c| format!("{c}\n"))
        .collect();
    input.push_str("new\n");
    input.extend(distinct_letters(second).iter().map(|c| format!("{c}\n")));
    input.push_str("exit\n");
    run(&input, &store, Difficulty::Easy, 11);

    let mut expected = vec![
        i64::try_from(distinct_letters(first).len()).unwrap() * 10,
        i64::try_from(distinct_letters(second).len()).unwrap() * 10,
    ];
    assert_eq!(store.load(), expected);
    expected.sort_by(|a, b| b.cmp(a));
    assert_eq!(store.top_scores(5), expected);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_store_round_trip_and_top_five() {
    let path = temp_scores("round_trip");
    let store = ScoreStore::new(&path);
    store.append_score(50).unwrap();
    store.append_score(30).unwrap();
    assert_eq!(store.top_scores(5), vec![50, 30]);

    for score in [10, 90, 70, 20] {
        store.append_score(score).unwrap();
    }
    assert_eq!(store.top_scores(5), vec![90, 70, 50, 30, 20]);
    assert_eq!(store.load().len(), 6);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_malformed_store_degrades_to_empty() {
    let path = temp_scores("malformed");
    fs::write(&path, "<html>oops</html>").unwrap();
    let store = ScoreStore::new(&path);
    assert!(store.top_scores(5).is_empty());
    let _ = fs::remove_file(&path);
}

#[test]
fn test_tiger_session_through_settle() {
    let path = temp_scores("tiger");
    let store = ScoreStore::new(&path);
    let mut session = GameSession::with_entry(
        Difficulty::Easy,
        WordEntry {
            word: "TIGER",
            hint: "animal",
        },
    );

    for letter in ['T', 'I', 'X', 'G', 'E', 'R'] {
        session.submit_guess(letter);
        let outcome = settle(&mut session, &store).unwrap();
        if letter == 'X' {
            assert_eq!(session.wrong_count(), 1);
            assert_eq!(session.score(), 20);
        }
        if letter != 'R' {
            assert_eq!(outcome, Outcome::InProgress);
        }
    }

    assert_eq!(session.score(), 50);
    assert_eq!(session.wrong_count(), 1);
    assert_eq!(settle(&mut session, &store).unwrap(), Outcome::Won);
    assert_eq!(store.load(), vec![50]);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_pick_word_from_every_tier() {
    for difficulty in Difficulty::ALL {
        for _ in 0..20 {
            let picked = pick_word(difficulty);
            assert!(wordbank::entries(difficulty).contains(&picked));
        }
    }
}
