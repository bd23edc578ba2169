//! Configuration and corpus statistics shared by every scoring and breeding step.
//!
//! An [`Environment`] bundles the tunable parameters ([`EnvironmentConfig`]) with
//! the corpus-wide [`GeneTable`]. It is built once by the caller, receives its gene
//! table when a [`Population`](crate::population::Population) is created from a
//! corpus, and is only read afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::gene;

/// Tunable parameters for word scoring and population size.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration.
///
/// Weights are plain multipliers. By convention `short_weight` and `long_weight`
/// are negative (penalties) and the others are non-negative, but nothing
/// enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Number of characters in a gene.
    pub gene_len: usize,
    /// Preferred minimum word length (inclusive). Also the corpus filter threshold.
    pub word_min: usize,
    /// Preferred maximum word length (inclusive).
    pub word_max: usize,
    /// Number of words in a phrase.
    pub phrase_len: usize,
    /// Maximum population size kept after each selection step.
    pub pop_size: usize,
    /// Multiplier for the letter rarity score.
    pub letter_weight: f64,
    /// Multiplier for the gene frequency score.
    pub gene_weight: f64,
    /// Multiplier for the number of distinct letters.
    pub variety_weight: f64,
    /// Multiplier for each letter a word falls short of `word_min`.
    pub short_weight: f64,
    /// Multiplier for each letter a word runs over `word_max`.
    pub long_weight: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gene_len: 4,
            word_min: 3,
            word_max: 12,
            phrase_len: 2,
            pop_size: 200,
            letter_weight: 0.5,
            gene_weight: 1.0,
            variety_weight: 5.0,
            short_weight: -10.0,
            long_weight: -10.0,
        }
    }
}

/// Rejected [`EnvironmentConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidConfigError {
    #[display("gene length must be positive")]
    ZeroGeneLength,
    #[display("phrase length must be positive")]
    ZeroPhraseLength,
}

/// Occurrence counts of every gene found in a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneTable {
    counts: HashMap<String, u32>,
}

impl GeneTable {
    /// Counts the non-overlapping genes of every token.
    ///
    /// Tokens are lower-cased before splitting, matching how words are
    /// normalized for scoring.
    ///
    /// # Panics
    ///
    /// Panics if `gene_len` is zero.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I, gene_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = HashMap::new();
        for token in tokens {
            let token = token.as_ref().to_lowercase();
            for g in gene::genes(&token, gene_len) {
                *counts.entry(g.to_owned()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Returns the count recorded for `gene`, if it was ever seen.
    #[must_use]
    pub fn get(&self, gene: &str) -> Option<u32> {
        self.counts.get(gene).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns all `(gene, count)` pairs, most frequent first.
    ///
    /// Ties are broken alphabetically so the order is stable across runs.
    #[must_use]
    pub fn sorted_by_count(&self) -> Vec<(&str, u32)> {
        let mut entries = self
            .counts
            .iter()
            .map(|(gene, count)| (gene.as_str(), *count))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl<S> FromIterator<(S, u32)> for GeneTable
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(gene, count)| (gene.into(), count))
                .collect(),
        }
    }
}

/// A validated configuration plus the gene table used for scoring.
///
/// # Example
///
/// ```
/// use codename_core::environment::{Environment, EnvironmentConfig};
///
/// let env = Environment::new(EnvironmentConfig::default()).unwrap();
/// assert!(env.gene_table().is_empty());
///
/// let bad = EnvironmentConfig { gene_len: 0, ..EnvironmentConfig::default() };
/// assert!(Environment::new(bad).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    config: EnvironmentConfig,
    gene_table: GeneTable,
}

impl Environment {
    /// Validates `config` and creates an environment with an empty gene table.
    pub fn new(config: EnvironmentConfig) -> Result<Self, InvalidConfigError> {
        if config.gene_len == 0 {
            return Err(InvalidConfigError::ZeroGeneLength);
        }
        if config.phrase_len == 0 {
            return Err(InvalidConfigError::ZeroPhraseLength);
        }
        Ok(Self {
            config,
            gene_table: GeneTable::default(),
        })
    }

    /// Attaches a gene table, replacing the current one.
    ///
    /// [`Population::with_seed`](crate::population::Population::with_seed) calls this
    /// with the table computed from its corpus. Use it directly only to score words
    /// against a precomputed table.
    #[must_use]
    pub fn with_gene_table(self, gene_table: GeneTable) -> Self {
        Self { gene_table, ..self }
    }

    #[must_use]
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    #[must_use]
    pub fn gene_len(&self) -> usize {
        self.config.gene_len
    }

    #[must_use]
    pub fn gene_table(&self) -> &GeneTable {
        &self.gene_table
    }
}
