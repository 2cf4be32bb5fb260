use clap::ValueEnum;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordBankError {
    #[error("unknown difficulty '{0}' (expected Easy, Medium or Hard)")]
    UnknownDifficulty(String),
}

/// Difficulty tier. Each tier owns a fixed list of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = WordBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(WordBankError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// A secret word and the hint shown alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    pub word: &'static str,
    pub hint: &'static str,
}

const fn entry(word: &'static str, hint: &'static str) -> WordEntry {
    WordEntry { word, hint }
}

const EASY: [WordEntry; 5] = [
    entry("APPLE", "fruit"),
    entry("CHAIR", "furniture"),
    entry("PIZZA", "food"),
    entry("TIGER", "animal"),
    entry("WATER", "drink"),
];

const MEDIUM: [WordEntry; 5] = [
    entry("PYTHON", "programming language"),
    entry("GALAXY", "space object"),
    entry("BATTERY", "energy source"),
    entry("LIBRARY", "place with books"),
    entry("DIAMOND", "precious stone"),
];

const HARD: [WordEntry; 5] = [
    entry("ENTREPRENEUR", "business founder"),
    entry("CRYPTOCURRENCY", "digital money"),
    entry("METAMORPHOSIS", "biological change"),
    entry("PHOTOSYNTHESIS", "plant process"),
    entry("ARCHITECTURE", "building design"),
];

#[must_use]
pub fn entries(difficulty: Difficulty) -> &'static [WordEntry] {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// Pick a word uniformly at random from the tier's list.
#[must_use]
pub fn pick_word(difficulty: Difficulty) -> WordEntry {
    pick_word_with(difficulty, &mut rand::rng())
}

#[must_use]
pub fn pick_word_with<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> WordEntry {
    // Tier tables are non-empty constants.
    *entries(difficulty)
        .choose(rng)
        .unwrap_or(&entries(difficulty)[0])
}
