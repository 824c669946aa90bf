//! Operation dispatch.
//!
//! The CLI shell builds a [`Request`] and hands it in by value; nothing in
//! here reads process arguments or other ambient state. Every run resolves
//! its inputs fresh, performs exactly one operation, and produces either a
//! written file or a report string.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use cin_table::CinTable;
use corpus_text::{CharSet, SentenceSet, normalize};

use crate::analyze;
use crate::error::AppError;
use crate::resolve::{self, RawSource};

pub const COMBINED_FILENAME: &str = "all.txt";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Combine,
    Unique,
    Sort,
    Shuffle,
    PhoneticCoverage,
    CharCoverage,
    FindDuplicates,
}

/// Everything one invocation needs, assembled by the shell.
#[derive(Clone, Debug)]
pub struct Request {
    pub operation: Operation,
    pub primary: PathBuf,
    /// Mapping table for phonetic coverage, reference list for char coverage.
    pub secondary: Option<PathBuf>,
    pub ignore_markers: Vec<String>,
    /// Emit reports as JSON instead of text.
    pub json: bool,
    /// Fixed shuffle seed; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    Report(String),
}

pub fn run(request: &Request) -> Result<Outcome, AppError> {
    let sources = resolve::resolve_sources(&request.primary)?;

    match request.operation {
        Operation::Combine => {
            let sentences = normalized(&sources, &request.primary)?;
            let path = PathBuf::from(COMBINED_FILENAME);
            resolve::write_output(&path, &sentences.to_text())?;
            Ok(Outcome::Written(path))
        }
        Operation::Unique => {
            let sentences = normalized(&sources, &request.primary)?;
            write_derived(&request.primary, "unique", &sentences)
        }
        Operation::Sort => {
            let sentences = normalized(&sources, &request.primary)?;
            write_derived(&request.primary, "sort", &sentences.sorted())
        }
        Operation::Shuffle => {
            let sentences = normalized(&sources, &request.primary)?;
            let mut rng = match request.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            write_derived(&request.primary, "shuffle", &sentences.shuffled(&mut rng))
        }
        Operation::PhoneticCoverage => {
            let sentences = normalized(&sources, &request.primary)?;
            let table_path = secondary(request, "phonetic coverage needs a mapping-table file")?;
            let table = CinTable::load(table_path, &request.ignore_markers)?;
            info!(
                "loaded {} table entries, {} distinct codes",
                table.entry_count(),
                table.distinct_code_count()
            );
            let report = analyze::phonetic_coverage(&sentences, &table);
            render(&report, request.json)
        }
        Operation::CharCoverage => {
            let sentences = normalized(&sources, &request.primary)?;
            let ref_path = secondary(request, "char coverage needs a reference file")?;
            let ref_sources = resolve::resolve_sources(ref_path)?;
            let reference = normalized(&ref_sources, ref_path)?;
            let report = analyze::char_coverage(
                &CharSet::from_sentences(&sentences),
                &CharSet::from_sentences(&reference),
            );
            render(&report, request.json)
        }
        Operation::FindDuplicates => {
            let per_file: Vec<(String, SentenceSet)> = sources
                .iter()
                .map(|s| (s.id.clone(), normalize(&s.text)))
                .collect();
            if per_file.iter().all(|(_, set)| set.is_empty()) {
                return Err(AppError::EmptyContent {
                    path: request.primary.clone(),
                });
            }
            info!("scanning {} files for duplicate sentences", per_file.len());
            let report = analyze::find_duplicates(&per_file);
            render(&report, request.json)
        }
    }
}

/// Normalize the concatenation of all resolved sources, rejecting inputs
/// that boil down to nothing.
fn normalized(sources: &[RawSource], origin: &Path) -> Result<SentenceSet, AppError> {
    let sentences = normalize(&resolve::combined_text(sources));
    if sentences.is_empty() {
        return Err(AppError::EmptyContent {
            path: origin.to_path_buf(),
        });
    }
    info!("{} sentences after normalization", sentences.len());
    Ok(sentences)
}

fn write_derived(
    input: &Path,
    suffix: &str,
    sentences: &SentenceSet,
) -> Result<Outcome, AppError> {
    let path = resolve::derived_output_path(input, suffix);
    resolve::write_output(&path, &sentences.to_text())?;
    Ok(Outcome::Written(path))
}

fn secondary<'a>(request: &'a Request, guidance: &str) -> Result<&'a Path, AppError> {
    request
        .secondary
        .as_deref()
        .ok_or_else(|| AppError::Usage(guidance.to_string()))
}

fn render<T: Serialize + std::fmt::Display>(report: &T, json: bool) -> Result<Outcome, AppError> {
    let rendered = if json {
        serde_json::to_string_pretty(report).expect("report serializes")
    } else {
        report.to_string()
    };
    Ok(Outcome::Report(rendered))
}
