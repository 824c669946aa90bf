//! Path resolution and flat-file IO for the operations layer.
//!
//! A primary path resolves to one source per file: the path itself when it is
//! a regular file, or every `.txt` file found by a depth-first walk when it is
//! a directory. The walk sorts entries by file name at each level, so source
//! order (and with it every downstream ordering) is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::error::AppError;

/// Raw text of one input file, tagged with its basename as source id.
#[derive(Clone, Debug)]
pub struct RawSource {
    pub id: String,
    pub text: String,
}

pub fn resolve_sources(path: &Path) -> Result<Vec<RawSource>, AppError> {
    if path.is_dir() {
        let mut sources = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walk failed"));
                AppError::io(path, io)
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "txt")
            {
                sources.push(read_source(entry.path())?);
            }
        }
        info!("resolved {} .txt files under {}", sources.len(), path.display());
        Ok(sources)
    } else {
        Ok(vec![read_source(path)?])
    }
}

fn read_source(path: &Path) -> Result<RawSource, AppError> {
    let text = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    Ok(RawSource {
        id: basename(path),
        text,
    })
}

/// Concatenate source texts, each followed by a newline, in source order.
pub fn combined_text(sources: &[RawSource]) -> String {
    let mut combined = String::new();
    for source in sources {
        combined.push_str(&source.text);
        combined.push('\n');
    }
    combined
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Derive `<stem>_<suffix>.<ext>` next to the input file, splitting at the
/// final extension so multi-dot names keep their full stem. Extensionless
/// inputs get a bare `<stem>_<suffix>`.
pub fn derived_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| basename(input));
    let name = match input.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    input.with_file_name(name)
}

/// Write UTF-8 content, overwriting any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<(), AppError> {
    fs::write(path, content).map_err(|e| AppError::io(path, e))?;
    info!("file saved as {}", path.display());
    Ok(())
}
