//! Read-only views of a population taken between generations.
//!
//! A snapshot carries raw numbers only; rounding and layout are left to whoever
//! renders it.

use serde::Serialize;

use crate::{
    phrase::Phrase,
    word::{ScoreBreakdown, ScoredWord},
};

/// Every phrase of a population with full score breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSnapshot {
    /// Number of completed breeding rounds when the snapshot was taken.
    pub generation: usize,
    pub phrases: Vec<PhraseSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseSnapshot {
    pub words: Vec<WordSnapshot>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSnapshot {
    pub text: String,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

impl PopulationSnapshot {
    pub(crate) fn new(generation: usize, phrases: &[Phrase]) -> Self {
        Self {
            generation,
            phrases: phrases.iter().map(PhraseSnapshot::from).collect(),
        }
    }

    /// The words of each phrase, without scores.
    #[must_use]
    pub fn compact(&self) -> Vec<Vec<&str>> {
        self.phrases.iter().map(PhraseSnapshot::texts).collect()
    }
}

impl PhraseSnapshot {
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

impl From<&Phrase> for PhraseSnapshot {
    fn from(phrase: &Phrase) -> Self {
        Self {
            words: phrase.words().iter().map(WordSnapshot::from).collect(),
            score: phrase.score(),
        }
    }
}

impl From<&ScoredWord> for WordSnapshot {
    fn from(word: &ScoredWord) -> Self {
        Self {
            text: word.text().to_owned(),
            breakdown: *word.breakdown(),
        }
    }
}
