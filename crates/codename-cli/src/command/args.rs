use std::{collections::HashSet, path::PathBuf};

use anyhow::Context as _;
use codename_core::environment::{Environment, EnvironmentConfig};

use crate::util::{self, Input};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CorpusArg {
    /// Corpus of whitespace-separated seed words (default: stdin)
    #[arg(long)]
    infile: Option<PathBuf>,
    /// Keep repeated words instead of using each distinct word once
    #[arg(long)]
    keep_duplicates: bool,
}

impl CorpusArg {
    pub(crate) fn read(&self) -> anyhow::Result<Vec<String>> {
        let tokens = Input::from_input_path(self.infile.clone())?.read_tokens()?;
        if self.keep_duplicates {
            return Ok(tokens);
        }
        Ok(dedup_tokens(tokens))
    }
}

/// Removes repeated tokens, keeping the first occurrence of each.
fn dedup_tokens(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Environment settings.
///
/// Values come from `--config` when given, otherwise from the built-in defaults;
/// each flag then overrides its field.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EnvironmentArg {
    /// JSON file with environment settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Letters per gene
    #[arg(long)]
    gene_len: Option<usize>,
    /// Preferred minimum word length; shorter corpus words are ignored
    #[arg(long)]
    word_min: Option<usize>,
    /// Preferred maximum word length
    #[arg(long)]
    word_max: Option<usize>,
    /// Words per phrase
    #[arg(long)]
    phrase_len: Option<usize>,
    /// Phrases kept after each generation
    #[arg(long)]
    pop_size: Option<usize>,
    /// Multiplier for letter rarity
    #[arg(long, allow_negative_numbers = true)]
    letter_weight: Option<f64>,
    /// Multiplier for gene frequency
    #[arg(long, allow_negative_numbers = true)]
    gene_weight: Option<f64>,
    /// Multiplier for the number of distinct letters
    #[arg(long, allow_negative_numbers = true)]
    variety_weight: Option<f64>,
    /// Multiplier per letter below the minimum length (usually negative)
    #[arg(long, allow_negative_numbers = true)]
    short_weight: Option<f64>,
    /// Multiplier per letter above the maximum length (usually negative)
    #[arg(long, allow_negative_numbers = true)]
    long_weight: Option<f64>,
}

impl EnvironmentArg {
    pub(crate) fn to_config(&self) -> anyhow::Result<EnvironmentConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("environment config", path)?,
            None => EnvironmentConfig::default(),
        };

        let Self {
            config: _,
            gene_len,
            word_min,
            word_max,
            phrase_len,
            pop_size,
            letter_weight,
            gene_weight,
            variety_weight,
            short_weight,
            long_weight,
        } = *self;
        override_with(&mut config.gene_len, gene_len);
        override_with(&mut config.word_min, word_min);
        override_with(&mut config.word_max, word_max);
        override_with(&mut config.phrase_len, phrase_len);
        override_with(&mut config.pop_size, pop_size);
        override_with(&mut config.letter_weight, letter_weight);
        override_with(&mut config.gene_weight, gene_weight);
        override_with(&mut config.variety_weight, variety_weight);
        override_with(&mut config.short_weight, short_weight);
        override_with(&mut config.long_weight, long_weight);

        Ok(config)
    }

    pub(crate) fn to_environment(&self) -> anyhow::Result<Environment> {
        let config = self.to_config()?;
        Environment::new(config).context("Invalid environment configuration")
    }
}

fn override_with<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
