use clap::{Parser, Subcommand};

use self::{gene_table::GeneTableArg, generate::GenerateArg};

mod args;
mod gene_table;
mod generate;
mod render;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve codenames from a corpus of seed words
    Generate(#[clap(flatten)] GenerateArg),
    /// Print the gene frequency table of a corpus as JSON
    GeneTable(#[clap(flatten)] GeneTableArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::GeneTable(arg) => gene_table::run(&arg)?,
    }
    Ok(())
}
