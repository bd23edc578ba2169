//! Evolutionary generator of multi-word codenames.
//!
//! This crate evolves a population of short phrases toward higher fitness. A corpus
//! of seed words supplies both the initial phrases and a gene frequency table that
//! rewards corpus-typical letter sequences.
//!
//! # How Evolution Works
//!
//! 1. **Corpus** - Tokens are filtered and counted into a [`GeneTable`](environment::GeneTable)
//! 2. **Population** - The tokens are shuffled and grouped into phrases
//! 3. **Crossover** - Each word of an offspring phrase takes one gene from the
//!    corresponding word of the other parent
//! 4. **Fitness** - Every new word is scored once against the [`Environment`](environment::Environment)
//! 5. **Selection** - Offspring and the previous generation compete; the best
//!    `pop_size` phrases survive
//! 6. **Repeat** - Continue for as many generations as the caller wants
//!
//! # Architecture
//!
//! ```text
//! EnvironmentConfig ──validated──▶ Environment ◀── GeneTable (from corpus)
//!                                       │ read by
//!        gene ──▶ word (ScoredWord) ──▶ phrase ──▶ population
//!                                                      │ exposes
//!                                      PopulationSnapshot / DescriptiveStats
//! ```
//!
//! # Modules
//!
//! - [`environment`]: configuration, validation and the gene table
//! - [`gene`]: gene extraction and word-level crossover
//! - [`word`]: fitness scoring of a single word
//! - [`phrase`]: phrases and positional crossover
//! - [`population`]: initialization, breeding and truncation selection
//! - [`seed`]: seeds for reproducible runs
//! - [`snapshot`]: per-generation views for output
//! - [`stats`]: descriptive statistics over phrase scores
//!
//! # Determinism
//!
//! All randomness comes from one PCG generator owned by the
//! [`Population`](population::Population). The same [`EvolutionSeed`](seed::EvolutionSeed),
//! corpus and configuration always produce the same sequence of generations.
//!
//! # Current Limitations
//!
//! - **No mutation**: New letter sequences only appear through crossover, so the
//!   population can converge quickly on small corpora
//! - **Shrink-only phrases**: Offspring take the length of the shorter parent;
//!   with a uniform initial phrase length, lengths never change
//! - **Fixed gene table**: Gene frequencies come from the initial corpus only and are
//!   not updated as the population evolves

pub mod environment;
pub mod gene;
pub mod phrase;
pub mod population;
pub mod seed;
pub mod snapshot;
pub mod stats;
pub mod word;
