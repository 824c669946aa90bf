use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use corpus_tools::{Operation, Outcome, Request, run};

#[derive(Parser)]
#[command(name = "corpus-tools")]
#[command(about = "Batch text-corpus curation: merge, dedupe, shuffle, sort, and analyze")]
struct Cli {
    /// Emit reports as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine every .txt file under a path into a normalized all.txt
    Combine {
        /// File, or directory walked recursively for .txt files
        path: PathBuf,
    },
    /// Deduplicate lines, keeping first-occurrence order
    Unique { file: PathBuf },
    /// Sort lines in code-point order
    Sort { file: PathBuf },
    /// Shuffle lines uniformly
    Shuffle {
        file: PathBuf,
        /// Fixed RNG seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pronunciation coverage of a corpus against a .cin mapping table
    PhoneticCoverage {
        corpus: PathBuf,
        table: PathBuf,
        /// Comma-separated tone/suffix markers stripped from codes, e.g. 3,4,6,7
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<String>,
    },
    /// Character coverage of a corpus against a reference character list
    CharCoverage {
        corpus: PathBuf,
        reference: PathBuf,
    },
    /// Report sentences appearing in more than one file of a directory
    FindDuplicates { dir: PathBuf },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let request = build_request(cli);
    match run(&request)? {
        Outcome::Written(path) => println!("file saved as {}", path.display()),
        Outcome::Report(report) => println!("{report}"),
    }
    Ok(())
}

fn build_request(cli: Cli) -> Request {
    let json = cli.json;
    let (operation, primary, secondary, ignore_markers, seed) = match cli.command {
        Commands::Combine { path } => (Operation::Combine, path, None, Vec::new(), None),
        Commands::Unique { file } => (Operation::Unique, file, None, Vec::new(), None),
        Commands::Sort { file } => (Operation::Sort, file, None, Vec::new(), None),
        Commands::Shuffle { file, seed } => (Operation::Shuffle, file, None, Vec::new(), seed),
        Commands::PhoneticCoverage {
            corpus,
            table,
            ignore,
        } => (
            Operation::PhoneticCoverage,
            corpus,
            Some(table),
            ignore,
            None,
        ),
        Commands::CharCoverage { corpus, reference } => (
            Operation::CharCoverage,
            corpus,
            Some(reference),
            Vec::new(),
            None,
        ),
        Commands::FindDuplicates { dir } => {
            (Operation::FindDuplicates, dir, None, Vec::new(), None)
        }
    };
    Request {
        operation,
        primary,
        secondary,
        ignore_markers,
        json,
        seed,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(Level::INFO)
        .init();
}
