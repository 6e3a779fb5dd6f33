use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use indexer::build_reports;
use std::path::Path;
use textcore::{AnalysisOptions, IdfMode, TermSource};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Extract RAKE keywords and TF-IDF weights from crawled pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Terms {
    Keywords,
    Words,
    Stemmed,
}

#[derive(Subcommand)]
enum Commands {
    /// Build keyword reports from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output JSONL file
        #[arg(long)]
        output: String,
        /// Terms weighted by TF-IDF
        #[arg(long, value_enum, default_value_t = Terms::Keywords)]
        terms: Terms,
        /// Use smoothed IDF = log10(1 + N/df) instead of log10(N/df)
        #[arg(long, default_value_t = false)]
        smoothed_idf: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, terms, smoothed_idf } => {
            let options = AnalysisOptions {
                term_source: match terms {
                    Terms::Keywords => TermSource::Keywords,
                    Terms::Words => TermSource::Words,
                    Terms::Stemmed => TermSource::StemmedWords,
                },
                idf: if smoothed_idf { IdfMode::Smoothed } else { IdfMode::Standard },
            };
            build_reports(Path::new(&input), Path::new(&output), &options)?;
            Ok(())
        }
    }
}
