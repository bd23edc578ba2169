use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use codename_core::{
    population::{EmptyPopulationError, Population},
    seed::EvolutionSeed,
};
use rand::Rng as _;

use crate::util::Output;

use super::{
    args::{CorpusArg, EnvironmentArg},
    render::{self, OutputFormat},
};

/// Number of top phrases reported when evolution finishes.
const SUMMARY_COUNT: usize = 5;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    #[clap(flatten)]
    corpus: CorpusArg,
    #[clap(flatten)]
    env: EnvironmentArg,
    /// Number of generations to evolve
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Output format: compact, verbose or json
    #[arg(long, default_value = "compact")]
    format: OutputFormat,
    /// Same as `--format verbose`
    #[arg(long)]
    raw_output: bool,
    /// Random seed as 32 hex characters (default: random)
    #[arg(long)]
    seed: Option<EvolutionSeed>,
    /// Output file path (default: stdout)
    #[arg(long)]
    outfile: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        corpus,
        env,
        generations,
        format,
        raw_output,
        seed,
        outfile,
    } = arg;
    let format = if *raw_output {
        OutputFormat::Verbose
    } else {
        *format
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let env = env.to_environment()?;
    let tokens = corpus.read()?;
    log::info!("read {} corpus words, seed {seed}", tokens.len());

    let mut population = Population::with_seed(env, &tokens, seed);
    let settings = serde_json::to_string(population.environment().config())?;
    let mut output = Output::from_output_path(outfile.clone())?;

    if format != OutputFormat::Json {
        writeln!(
            output,
            "# seed={seed} generations={generations} config={settings}"
        )
        .with_context(|| format!("Failed to write to {}", output.display_path()))?;
    }

    for generation in 0..=*generations {
        render::write_generation(&mut output, &population.snapshot(), format, seed)
            .with_context(|| format!("Failed to write to {}", output.display_path()))?;
        log_progress(&population);

        if generation == *generations {
            break;
        }
        if let Err(EmptyPopulationError) = population.step() {
            log::warn!("population is empty, nothing to breed");
            break;
        }
    }

    log::info!("Best phrases:");
    let mut best = population.phrases().to_vec();
    best.sort_by(|a, b| b.score().total_cmp(&a.score()));
    for (i, phrase) in best.iter().take(SUMMARY_COUNT).enumerate() {
        log::info!("  {i:2}: {} => {:.3}", phrase.text(), phrase.score());
    }

    output.finish()
}

fn log_progress(population: &Population) {
    let Some(stats) = population.fitness_stats() else {
        return;
    };
    log::info!(
        "Generation #{}: {} phrases, score min {:.3} / mean {:.3} / max {:.3} (stddev {:.3})",
        population.generation(),
        stats.count,
        stats.min,
        stats.mean,
        stats.max,
        stats.std_dev
    );
}
