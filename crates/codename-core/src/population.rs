//! Population of phrases evolved by crossover and truncation selection.
//!
//! # Algorithm Overview
//!
//! A [`Population`] is seeded from a corpus of tokens and then evolves one
//! generation at a time:
//!
//! 1. **Filter** - Keep tokens at least `word_min` characters long that start with a
//!    letter
//! 2. **Gene table** - Count every gene of the filtered corpus once; the table is
//!    fixed for the rest of the run
//! 3. **Initial population** - Shuffle the tokens and cut them into phrases of
//!    `phrase_len` words, dropping a partial last phrase
//! 4. **Breed** - Cross randomly chosen parents until there are enough distinct
//!    offspring, then add back every current phrase (elitism)
//! 5. **Reduce** - Keep the `pop_size` highest-scoring phrases (truncation selection)
//! 6. **Repeat** - Alternate breed and reduce for as many generations as wanted
//!
//! # Breeding Pool
//!
//! Offspring are collected in a map keyed by [`Phrase::text`], so phrases spelling
//! the same words collapse into one entry no matter how they were produced. Breeding
//! stops once the pool holds `ceil(1.5 * pop_size)` entries. Because the previous
//! generation is merged into the pool afterwards, a fit phrase can only disappear
//! when `pop_size` fitter phrases exist.
//!
//! The map is ordered by text, which keeps the population order (and therefore
//! the whole run) reproducible for a given [`EvolutionSeed`].
//!
//! # Example
//!
//! ```
//! use codename_core::{
//!     environment::{Environment, EnvironmentConfig},
//!     population::Population,
//!     seed::EvolutionSeed,
//! };
//!
//! let config = EnvironmentConfig { gene_len: 2, pop_size: 4, ..EnvironmentConfig::default() };
//! let env = Environment::new(config).unwrap();
//! let corpus = ["apple", "banana", "cherry", "cheese", "chalk", "melon"];
//! let mut population = Population::with_seed(env, corpus, EvolutionSeed::from(42));
//!
//! for _ in 0..10 {
//!     population.step().unwrap();
//!     assert!(population.len() <= 4);
//! }
//! ```

use std::{
    collections::{BTreeMap, btree_map::Entry},
    mem,
};

use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::{
    environment::{Environment, GeneTable},
    phrase::Phrase,
    seed::EvolutionSeed,
    snapshot::PopulationSnapshot,
    stats::DescriptiveStats,
};

/// Consecutive offspring that may collide with existing pool entries before
/// breeding gives up on reaching its target size.
///
/// Small or converged populations can be unable to produce enough distinct
/// phrases.
pub const BREED_STALL_LIMIT: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot breed an empty population")]
pub struct EmptyPopulationError;

/// Returns whether a corpus token may seed the population.
///
/// Accepted tokens are at least `word_min` characters long and start with an
/// alphabetic character.
#[must_use]
pub fn accepts_token(token: &str, word_min: usize) -> bool {
    token.chars().next().is_some_and(char::is_alphabetic) && token.chars().count() >= word_min
}

/// The working set of phrases under evolution, together with its environment and
/// random source.
#[derive(Debug, Clone)]
pub struct Population {
    env: Environment,
    rng: Pcg32,
    phrases: Vec<Phrase>,
    generation: usize,
}

impl Population {
    /// Builds a population from `corpus` with a random seed.
    ///
    /// For reproducible runs, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new<I, S>(env: Environment, corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_seed(env, corpus, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic evolution.
    ///
    /// Computes the gene table from the filtered corpus and attaches it to `env`,
    /// replacing any table already present. Duplicate tokens are kept.
    #[must_use]
    pub fn with_seed<I, S>(env: Environment, corpus: I, seed: EvolutionSeed) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let word_min = env.config().word_min;
        let mut tokens = corpus
            .into_iter()
            .filter(|t| accepts_token(t.as_ref(), word_min))
            .map(|t| t.as_ref().to_owned())
            .collect::<Vec<_>>();

        let gene_table = GeneTable::from_tokens(&tokens, env.gene_len());
        let env = env.with_gene_table(gene_table);

        let mut rng = Pcg32::from_seed(seed.to_bytes());
        tokens.shuffle(&mut rng);

        let phrases = tokens
            .chunks_exact(env.config().phrase_len)
            .map(|chunk| Phrase::from_tokens(chunk, &env))
            .collect::<Vec<_>>();

        log::info!(
            "initial population: {} phrases from {} tokens, {} distinct genes",
            phrases.len(),
            tokens.len(),
            env.gene_table().len()
        );

        Self {
            env,
            rng,
            phrases,
            generation: 0,
        }
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    #[must_use]
    pub fn gene_table(&self) -> &GeneTable {
        self.env.gene_table()
    }

    #[must_use]
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Number of breeding rounds performed so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Keeps the `pop_size` highest-scoring phrases.
    ///
    /// The sort is stable, so equally scored phrases keep their relative order. A
    /// population already within `pop_size` is left untouched.
    pub fn reduce_population(&mut self) {
        let pop_size = self.env.config().pop_size;
        if self.phrases.len() <= pop_size {
            return;
        }
        self.phrases.sort_by(|a, b| b.score().total_cmp(&a.score()));
        self.phrases.truncate(pop_size);
    }

    /// Replaces the population with offspring plus the current phrases.
    ///
    /// Parents are drawn uniformly with replacement. See the
    /// [module documentation](self) for how the breeding pool is built. The
    /// result usually exceeds `pop_size`; call [`Self::reduce_population`] next.
    pub fn breed(&mut self) -> Result<(), EmptyPopulationError> {
        if self.phrases.is_empty() {
            return Err(EmptyPopulationError);
        }

        let pop_size = self.env.config().pop_size;
        let target = pop_size + pop_size.div_ceil(2);
        let mut pool = BTreeMap::new();
        let mut stalled = 0;

        while pool.len() < target {
            let p1 = &self.phrases[self.rng.random_range(0..self.phrases.len())];
            let p2 = &self.phrases[self.rng.random_range(0..self.phrases.len())];
            let baby = p1.breed(p2, &self.env, &mut self.rng);
            match pool.entry(baby.text()) {
                Entry::Vacant(entry) => {
                    entry.insert(baby);
                    stalled = 0;
                }
                Entry::Occupied(_) => {
                    stalled += 1;
                    if stalled >= BREED_STALL_LIMIT {
                        log::debug!(
                            "generation {}: breeding stalled at {} of {target} offspring",
                            self.generation,
                            pool.len()
                        );
                        break;
                    }
                }
            }
        }

        let offspring = pool.len();
        for phrase in mem::take(&mut self.phrases) {
            pool.insert(phrase.text(), phrase);
        }
        self.phrases = pool.into_values().collect();
        self.generation += 1;

        log::debug!(
            "generation {}: {offspring} distinct offspring, {} candidates",
            self.generation,
            self.phrases.len()
        );
        Ok(())
    }

    /// Runs one generation: [`Self::breed`] followed by [`Self::reduce_population`].
    pub fn step(&mut self) -> Result<(), EmptyPopulationError> {
        self.breed()?;
        self.reduce_population();
        Ok(())
    }

    /// Returns the highest-scoring phrase, the first one on ties.
    #[must_use]
    pub fn best(&self) -> Option<&Phrase> {
        self.phrases
            .iter()
            .reduce(|best, p| if p.score() > best.score() { p } else { best })
    }

    #[must_use]
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot::new(self.generation, &self.phrases)
    }

    /// Statistics over phrase scores, or `None` for an empty population.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.phrases.iter().map(Phrase::score))
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::EnvironmentConfig;

    use super::*;

    const CORPUS: [&str; 5] = ["apple", "banana", "cherry", "cheese", "chalk"];

    fn env(pop_size: usize) -> Environment {
        Environment::new(EnvironmentConfig {
            gene_len: 2,
            word_min: 3,
            phrase_len: 2,
            pop_size,
            ..EnvironmentConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_accepts_token() {
        assert!(accepts_token("apple", 3));
        assert!(accepts_token("Zoo", 3));
        assert!(!accepts_token("ox", 3));
        assert!(!accepts_token("1st-place", 3));
        assert!(!accepts_token("", 0));
    }

    #[test]
    fn test_initial_population_drops_partial_phrase() {
        let population = Population::with_seed(env(10), CORPUS, EvolutionSeed::from(1));
        assert_eq!(population.len(), 2);
        assert_eq!(population.generation(), 0);
        for phrase in population.phrases() {
            assert_eq!(phrase.len(), 2);
        }

        let used = population
            .phrases()
            .iter()
            .flat_map(|p| p.words().iter().map(|w| w.text().to_owned()))
            .collect::<Vec<_>>();
        assert_eq!(used.len(), 4);
        assert!(used.iter().all(|w| CORPUS.contains(&w.as_str())));
    }

    #[test]
    fn test_gene_table_built_from_filtered_corpus() {
        let population = Population::with_seed(
            env(10),
            ["apple", "ox", "9lives", "Cherry"],
            EvolutionSeed::from(1),
        );
        let table = population.gene_table();
        assert_eq!(table.get("ap"), Some(1));
        assert_eq!(table.get("ch"), Some(1));
        assert_eq!(table.get("ox"), None);
        assert_eq!(table.get("9l"), None);
    }

    #[test]
    fn test_environment_keeps_config_and_table() {
        let config = env(7).config().clone();
        let population = Population::with_seed(env(7), CORPUS, EvolutionSeed::from(1));
        let environment = population.environment();
        assert_eq!(environment.config(), &config);
        assert_eq!(environment.gene_table(), population.gene_table());
        assert_eq!(environment.gene_table().get("ch"), Some(3));
    }

    #[test]
    fn test_empty_corpus_gives_empty_population() {
        let mut population =
            Population::with_seed(env(10), Vec::<String>::new(), EvolutionSeed::from(1));
        assert!(population.is_empty());
        assert!(population.best().is_none());
        assert!(population.fitness_stats().is_none());
        population.reduce_population();
        assert_eq!(population.breed(), Err(EmptyPopulationError));
        assert_eq!(population.step(), Err(EmptyPopulationError));
    }

    #[test]
    fn test_reduce_keeps_best() {
        let mut population = Population::with_seed(env(1), CORPUS, EvolutionSeed::from(3));
        let best = population.best().unwrap().clone();
        population.reduce_population();
        assert_eq!(population.phrases(), [best]);
    }

    #[test]
    fn test_reduce_keeps_tied_phrases_in_order() {
        // anagrams tie once gene and variety scores are switched off
        let env = Environment::new(EnvironmentConfig {
            phrase_len: 1,
            pop_size: 3,
            gene_weight: 0.0,
            variety_weight: 0.0,
            ..EnvironmentConfig::default()
        })
        .unwrap();
        let phrases = ["stop", "pots", "zzzz", "tops", "opts", "spot"]
            .map(|w| Phrase::from_tokens([w], &env))
            .to_vec();
        assert_eq!(phrases[0].score(), phrases[5].score());

        let mut population = Population {
            env,
            rng: Pcg32::seed_from_u64(0),
            phrases,
            generation: 0,
        };
        population.reduce_population();

        let kept = population.phrases().iter().map(Phrase::text).collect::<Vec<_>>();
        assert_eq!(kept, ["zzzz", "stop", "pots"]);
    }

    #[test]
    fn test_reduce_within_limit_is_noop() {
        let mut population = Population::with_seed(env(5), CORPUS, EvolutionSeed::from(3));
        let before = population.phrases().to_vec();
        population.reduce_population();
        assert_eq!(population.phrases(), before);
    }

    #[test]
    fn test_breed_keeps_previous_generation() {
        let mut population = Population::with_seed(env(4), CORPUS, EvolutionSeed::from(5));
        let before = population.phrases().to_vec();
        population.breed().unwrap();
        assert_eq!(population.generation(), 1);
        for phrase in &before {
            assert!(population.phrases().contains(phrase));
        }

        let mut texts = population.phrases().iter().map(Phrase::text).collect::<Vec<_>>();
        let total = texts.len();
        texts.dedup();
        assert_eq!(texts.len(), total, "pool entries must be distinct");
    }

    #[test]
    fn test_breed_terminates_on_single_phrase() {
        // a lone phrase bred with itself always reproduces itself
        let corpus = ["xxxx", "yyyy"];
        let mut population = Population::with_seed(env(50), corpus, EvolutionSeed::from(9));
        assert_eq!(population.len(), 1);
        population.step().unwrap();
        assert_eq!(population.len(), 1);
    }
}
