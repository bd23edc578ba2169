use std::path::PathBuf;

use codename_core::{environment::GeneTable, population};
use serde::Serialize;

use crate::util::Output;

use super::args::{CorpusArg, EnvironmentArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GeneTableArg {
    #[clap(flatten)]
    corpus: CorpusArg,
    #[clap(flatten)]
    env: EnvironmentArg,
    /// Only list the most frequent genes
    #[arg(long)]
    top: Option<usize>,
    /// Output file path (default: stdout)
    #[arg(long)]
    outfile: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GeneTableReport<'a> {
    gene_len: usize,
    word_count: usize,
    distinct_genes: usize,
    genes: Vec<GeneCount<'a>>,
}

#[derive(Debug, Serialize)]
struct GeneCount<'a> {
    gene: &'a str,
    count: u32,
}

pub(crate) fn run(arg: &GeneTableArg) -> anyhow::Result<()> {
    let GeneTableArg {
        corpus,
        env,
        top,
        outfile,
    } = arg;
    let env = env.to_environment()?;
    let config = env.config();

    let words = corpus
        .read()?
        .into_iter()
        .filter(|t| population::accepts_token(t, config.word_min))
        .collect::<Vec<_>>();
    let table = GeneTable::from_tokens(&words, config.gene_len);
    log::info!(
        "{} distinct genes in {} corpus words",
        table.len(),
        words.len()
    );

    let genes = table
        .sorted_by_count()
        .into_iter()
        .take(top.unwrap_or(usize::MAX))
        .map(|(gene, count)| GeneCount { gene, count })
        .collect();
    let report = GeneTableReport {
        gene_len: config.gene_len,
        word_count: words.len(),
        distinct_genes: table.len(),
        genes,
    };

    let mut output = Output::from_output_path(outfile.clone())?;
    output.write_json(&report)?;
    output.finish()
}
