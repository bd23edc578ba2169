//! Words and their fitness score.
//!
//! A [`ScoredWord`] is scored once when it is created. The total is a weighted sum
//! of several factors taken from [`EnvironmentConfig`](crate::environment::EnvironmentConfig):
//!
//! | Factor    | Value                                               | Weight           |
//! |-----------|-----------------------------------------------------|------------------|
//! | letter    | sum of per-letter rarity values (Scrabble tiles)     | `letter_weight`  |
//! | gene      | sum of gene table counts of the word's genes         | `gene_weight`    |
//! | variety   | number of distinct characters                        | `variety_weight` |
//! | shortfall | letters missing to reach `word_min`                  | `short_weight`   |
//! | excess    | letters beyond `word_max`                            | `long_weight`    |
//!
//! A character without a letter value adds `-letter_weight` to the letter score, and
//! a gene missing from the gene table adds `-gene_weight` to the gene score.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::{environment::Environment, gene};

/// Rarity value of a lowercase ASCII letter.
#[must_use]
pub const fn letter_value(c: char) -> Option<u32> {
    let value = match c {
        'a' | 'e' | 'i' | 'l' | 'n' | 'o' | 'r' | 's' | 't' | 'u' => 1,
        'd' | 'g' => 2,
        'b' | 'c' | 'm' | 'p' => 3,
        'f' | 'h' | 'v' | 'w' | 'y' => 4,
        'k' => 5,
        'j' | 'x' => 8,
        'q' | 'z' => 10,
        _ => return None,
    };
    Some(value)
}

/// Per-factor breakdown of a word's fitness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Unweighted letter rarity score.
    pub letter: f64,
    /// Unweighted gene frequency score.
    pub gene: f64,
    /// Number of distinct characters.
    pub variety: usize,
    /// Letters missing to reach the minimum word length.
    pub shortfall: usize,
    /// Letters beyond the maximum word length.
    pub excess: usize,
    /// Weighted total.
    pub total: f64,
}

impl ScoreBreakdown {
    #[expect(clippy::cast_precision_loss)]
    fn compute(text: &str, env: &Environment) -> Self {
        let config = env.config();

        let letter = text
            .chars()
            .map(|c| letter_value(c).map_or(-config.letter_weight, f64::from))
            .sum::<f64>();
        let gene = gene::genes(text, config.gene_len)
            .into_iter()
            .map(|g| {
                env.gene_table()
                    .get(g)
                    .map_or(-config.gene_weight, f64::from)
            })
            .sum::<f64>();
        let variety = text.chars().collect::<HashSet<_>>().len();

        let len = text.chars().count();
        let shortfall = config.word_min.saturating_sub(len);
        let excess = len.saturating_sub(config.word_max);

        let total = letter * config.letter_weight
            + gene * config.gene_weight
            + variety as f64 * config.variety_weight
            + shortfall as f64 * config.short_weight
            + excess as f64 * config.long_weight;

        Self {
            letter,
            gene,
            variety,
            shortfall,
            excess,
            total,
        }
    }

    /// Weighted contribution of the length bounds (usually non-positive).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn length_penalty(&self, env: &Environment) -> f64 {
        let config = env.config();
        self.shortfall as f64 * config.short_weight + self.excess as f64 * config.long_weight
    }
}

/// A lower-cased word with its fitness computed at creation.
///
/// # Example
///
/// ```
/// use codename_core::{
///     environment::{Environment, EnvironmentConfig, GeneTable},
///     word::ScoredWord,
/// };
///
/// let config = EnvironmentConfig { gene_len: 2, ..EnvironmentConfig::default() };
/// let table: GeneTable = [("ap", 5), ("pl", 6)].into_iter().collect();
/// let env = Environment::new(config).unwrap().with_gene_table(table);
///
/// let word = ScoredWord::new("Apple", &env);
/// assert_eq!(word.text(), "apple");
/// assert_eq!(word.breakdown().gene, 11.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    text: String,
    breakdown: ScoreBreakdown,
}

impl ScoredWord {
    #[must_use]
    pub fn new(text: &str, env: &Environment) -> Self {
        let text = text.to_lowercase();
        let breakdown = ScoreBreakdown::compute(&text, env);
        Self { text, breakdown }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.breakdown.total
    }

    #[must_use]
    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    #[must_use]
    pub fn genes(&self, env: &Environment) -> Vec<&str> {
        gene::genes(&self.text, env.gene_len())
    }

    /// Crosses this word with `other` and returns the unscored offspring text.
    ///
    /// See [`gene::breed`].
    pub fn breed<R>(&self, other: &ScoredWord, env: &Environment, rng: &mut R) -> String
    where
        R: Rng + ?Sized,
    {
        gene::breed(&self.text, &other.text, env.gene_len(), rng)
    }
}
