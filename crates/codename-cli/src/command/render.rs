use std::io::{self, Write};

use chrono::{DateTime, Utc};
use codename_core::{
    seed::EvolutionSeed,
    snapshot::{PhraseSnapshot, PopulationSnapshot, WordSnapshot},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OutputFormat {
    /// Words only, one phrase per line
    #[default]
    Compact,
    /// Every word with its letter, gene and variety scores
    Verbose,
    /// One JSON object per generation
    Json,
}

#[derive(Debug, serde::Serialize)]
struct GenerationRecord<'a> {
    seed: EvolutionSeed,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    snapshot: &'a PopulationSnapshot,
}

/// Writes one generation of the population.
///
/// Text formats start with a `# Generation N` line; JSON output is one line per
/// generation.
pub(crate) fn write_generation<W>(
    writer: &mut W,
    snapshot: &PopulationSnapshot,
    format: OutputFormat,
    seed: EvolutionSeed,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    match format {
        OutputFormat::Compact => {
            writeln!(writer, "# Generation {}", snapshot.generation)?;
            for words in snapshot.compact() {
                writeln!(writer, "{}", words.join(" "))?;
            }
        }
        OutputFormat::Verbose => {
            writeln!(writer, "# Generation {}", snapshot.generation)?;
            for phrase in &snapshot.phrases {
                writeln!(writer, "{}", verbose_phrase(phrase))?;
            }
        }
        OutputFormat::Json => {
            let record = GenerationRecord {
                seed,
                generated_at: Utc::now(),
                snapshot,
            };
            serde_json::to_writer(&mut *writer, &record)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn verbose_word(word: &WordSnapshot) -> String {
    let b = &word.breakdown;
    format!(
        "{} {:.2}:{:.2}:{} => {:.2}",
        word.text, b.letter, b.gene, b.variety, b.total
    )
}

fn verbose_phrase(phrase: &PhraseSnapshot) -> String {
    let words = phrase
        .words
        .iter()
        .map(verbose_word)
        .collect::<Vec<_>>()
        .join("; ");
    format!("[{words}] ==> {:.2}", phrase.score)
}
