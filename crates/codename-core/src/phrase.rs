use rand::Rng;

use crate::{environment::Environment, word::ScoredWord};

/// An ordered group of scored words.
///
/// The phrase score is the sum of its words' scores and is computed whenever a
/// phrase is assembled; words cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    words: Vec<ScoredWord>,
    score: f64,
}

impl Phrase {
    #[must_use]
    pub fn new(words: Vec<ScoredWord>) -> Self {
        let score = words.iter().map(ScoredWord::score).sum();
        Self { words, score }
    }

    /// Scores every token and assembles them into a phrase.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I, env: &Environment) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            tokens
                .into_iter()
                .map(|t| ScoredWord::new(t.as_ref(), env))
                .collect(),
        )
    }

    #[must_use]
    pub fn words(&self) -> &[ScoredWord] {
        &self.words
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces.
    ///
    /// Two phrases with the same text always have the same score, so the text
    /// identifies a phrase within a population.
    #[must_use]
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(ScoredWord::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Crosses the words of both phrases position by position.
    ///
    /// The offspring has as many words as the shorter parent: phrases may shrink
    /// across generations but never grow.
    pub fn breed<R>(&self, other: &Phrase, env: &Environment, rng: &mut R) -> Phrase
    where
        R: Rng + ?Sized,
    {
        let words = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(w1, w2)| ScoredWord::new(&w1.breed(w2, env, rng), env))
            .collect();
        Phrase::new(words)
    }
}
