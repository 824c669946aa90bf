//! Corpus analysis: phonetic coverage, character coverage, and cross-file
//! duplicate detection.
//!
//! Everything here is a pure function over already-parsed inputs. Reports
//! carry the numbers plus whatever lists the operator needs to act on
//! (missing characters, duplicated sentences with provenance), derive
//! `Serialize` for `--json` output, and implement `Display` for the default
//! textual report.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fmt;

use cin_table::CinTable;
use corpus_text::{CharSet, SentenceSet};
use serde::Serialize;

/// Percentage of `num / den`, rounded half-away-from-zero to `decimals`
/// places. Zero denominators report 0.0 rather than poisoning the output.
fn rounded_percent(num: usize, den: usize, decimals: i32) -> f64 {
    if den == 0 {
        return 0.0;
    }
    let scale = 10f64.powi(decimals);
    (num as f64 / den as f64 * 100.0 * scale).round() / scale
}

/// How much of a mapping table's pronunciation inventory a corpus exercises.
#[derive(Clone, Debug, Serialize)]
pub struct PhoneticCoverageReport {
    /// Distinct codes defined by the whole table.
    pub total_table_codes: usize,
    /// Distinct characters appearing in the corpus.
    pub characters_scanned: usize,
    /// Distinct table codes reachable from those characters.
    pub reached_code_count: usize,
    /// Corpus characters with no table entry. These are reported instead of
    /// being counted as a phantom code, so `reached <= total` always holds.
    pub unmapped_char_count: usize,
    /// `reached / total`, two decimals.
    pub coverage_percent: f64,
}

pub fn phonetic_coverage(sentences: &SentenceSet, table: &CinTable) -> PhoneticCoverageReport {
    let chars = CharSet::from_sentences(sentences);
    let mut reached: HashSet<&str> = HashSet::new();
    let mut unmapped = 0usize;
    for ch in chars.iter() {
        match table.code_for(ch) {
            Some(code) => {
                reached.insert(code);
            }
            None => unmapped += 1,
        }
    }

    PhoneticCoverageReport {
        total_table_codes: table.distinct_code_count(),
        characters_scanned: chars.len(),
        reached_code_count: reached.len(),
        unmapped_char_count: unmapped,
        coverage_percent: rounded_percent(reached.len(), table.distinct_code_count(), 2),
    }
}

impl fmt::Display for PhoneticCoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "table defines {} distinct phonetic codes",
            self.total_table_codes
        )?;
        writeln!(
            f,
            "corpus uses {} distinct characters ({} without a table entry)",
            self.characters_scanned, self.unmapped_char_count
        )?;
        write!(
            f,
            "{} codes reached: {:.2}% of the pronunciations covered",
            self.reached_code_count, self.coverage_percent
        )
    }
}

/// Which characters of a reference list a corpus contains.
#[derive(Clone, Debug, Serialize)]
pub struct CharCoverageReport {
    pub reference_size: usize,
    pub present_count: usize,
    pub missing_count: usize,
    /// Reference characters found in the corpus, in the reference's
    /// first-seen order.
    pub present: Vec<char>,
    /// Reference characters absent from the corpus, same ordering.
    pub missing: Vec<char>,
    /// `present / reference`, one decimal.
    pub coverage_percent: f64,
    pub missing_percent: f64,
}

pub fn char_coverage(source: &CharSet, reference: &CharSet) -> CharCoverageReport {
    let mut present = Vec::new();
    let mut missing = Vec::new();
    for ch in reference.iter() {
        if source.contains(ch) {
            present.push(ch);
        } else {
            missing.push(ch);
        }
    }

    CharCoverageReport {
        reference_size: reference.len(),
        present_count: present.len(),
        missing_count: missing.len(),
        coverage_percent: rounded_percent(present.len(), reference.len(), 1),
        missing_percent: rounded_percent(missing.len(), reference.len(), 1),
        present,
        missing,
    }
}

impl fmt::Display for CharCoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "reference list has {} distinct characters",
            self.reference_size
        )?;
        writeln!(
            f,
            "present in corpus: {} ({:.1}%)",
            self.present_count, self.coverage_percent
        )?;
        writeln!(
            f,
            "missing from corpus: {} ({:.1}%)",
            self.missing_count, self.missing_percent
        )?;
        writeln!(f, "present: {}", self.present.iter().collect::<String>())?;
        write!(f, "missing: {}", self.missing.iter().collect::<String>())
    }
}

/// One sentence that appears in at least two source files.
#[derive(Clone, Debug, Serialize)]
pub struct DuplicateRecord {
    pub sentence: String,
    /// Source files listing the sentence, in encounter order.
    pub sources: Vec<String>,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct DuplicateReport {
    /// Sum of per-source sentence counts, so repeats across files count.
    pub total_sentences: usize,
    /// Distinct sentences found in exactly one file.
    pub unique_count: usize,
    /// Distinct sentences found in two or more files.
    pub duplicate_count: usize,
    /// `duplicates / distinct sentences`, one decimal.
    pub duplicate_rate_percent: f64,
    /// Sorted by descending occurrence count; ties keep first-seen order.
    pub records: Vec<DuplicateRecord>,
}

/// Index every sentence by the files that contain it and classify each as
/// unique or duplicated. Sources are visited in argument order, sentences in
/// their set's order, which pins down every ordering in the report.
pub fn find_duplicates(sources: &[(String, SentenceSet)]) -> DuplicateReport {
    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    let mut total_sentences = 0usize;

    for (source_id, sentences) in sources {
        total_sentences += sentences.len();
        for sentence in sentences.iter() {
            match index.get_mut(sentence) {
                Some(listed) => listed.push(source_id.clone()),
                None => {
                    order.push(sentence.to_string());
                    index.insert(sentence.to_string(), vec![source_id.clone()]);
                }
            }
        }
    }

    let mut unique_count = 0usize;
    let mut records = Vec::new();
    for sentence in order {
        let sources = index
            .remove(&sentence)
            .unwrap_or_default();
        if sources.len() >= 2 {
            records.push(DuplicateRecord {
                count: sources.len(),
                sentence,
                sources,
            });
        } else {
            unique_count += 1;
        }
    }
    // Vec::sort_by_key is stable, so equal counts stay in insertion order.
    records.sort_by_key(|r| Reverse(r.count));

    let duplicate_count = records.len();
    DuplicateReport {
        total_sentences,
        unique_count,
        duplicate_count,
        duplicate_rate_percent: rounded_percent(
            duplicate_count,
            unique_count + duplicate_count,
            1,
        ),
        records,
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} sentences across all files, {} distinct",
            self.total_sentences,
            self.unique_count + self.duplicate_count
        )?;
        write!(
            f,
            "{} unique, {} duplicated in more than one file ({:.1}%)",
            self.unique_count, self.duplicate_count, self.duplicate_rate_percent
        )?;
        for record in &self.records {
            write!(
                f,
                "\n{}x {} [{}]",
                record.count,
                record.sentence,
                record.sources.join(", ")
            )?;
        }
        Ok(())
    }
}
