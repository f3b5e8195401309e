//! Path derivation and file discovery.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::config::{FILE_EXTENSION, INTERMEDIATE_SUFFIX};
use crate::types::PipelineMode;

/// Returns the packed output path for a source file: the input path with
/// the `.xaz` extension appended.
#[inline]
#[must_use]
pub fn packed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(FILE_EXTENSION);
    PathBuf::from(name)
}

/// Returns the unpacked output path for a packed file.
///
/// Strips the `.xaz` suffix, then inserts the current Unix timestamp between
/// the stem and the restored original extension, so repeated unpacking never
/// silently overwrites a prior result: `report.txt.xaz` becomes
/// `report-1693388000.txt`.
#[must_use]
pub fn unpacked_path(input: &Path) -> PathBuf {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    unpacked_path_at(input, now)
}

fn unpacked_path_at(input: &Path, timestamp: u64) -> PathBuf {
    let stripped = input
        .to_string_lossy()
        .strip_suffix(FILE_EXTENSION)
        .map_or_else(|| input.to_path_buf(), PathBuf::from);

    let stem = stripped.file_stem().map_or_else(|| String::from("unpacked"), |s| s.to_string_lossy().into_owned());

    let name = match stripped.extension() {
        Some(ext) => format!("{stem}-{timestamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{timestamp}"),
    };

    stripped.with_file_name(name)
}

/// Returns the intermediate artifact path for a run, derived from the final
/// output path. Concurrent runs have distinct final paths, so their
/// intermediates never collide.
#[inline]
#[must_use]
pub fn intermediate_path(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_os_string();
    name.push(INTERMEDIATE_SUFFIX);
    PathBuf::from(name)
}

/// Whether a path carries the packed-artifact extension.
#[inline]
#[must_use]
pub fn is_packed_file(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(FILE_EXTENSION)
}

/// Lists regular files in `dir` eligible for the given mode.
///
/// Non-recursive, matching the original workflow: pack mode lists everything
/// except packed artifacts and hidden files, unpack mode lists only `.xaz`
/// files. The result is sorted for stable menu display.
pub fn find_eligible_files(dir: &Path, mode: PipelineMode) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_eligible(path, mode))
        .collect();

    files.sort();
    Ok(files)
}

fn is_eligible(path: &Path, mode: PipelineMode) -> bool {
    if let Some(name) = path.file_name()
        && name.to_string_lossy().starts_with('.')
    {
        return false;
    }

    match mode {
        PipelineMode::Pack => !is_packed_file(path),
        PipelineMode::Unpack => is_packed_file(path),
    }
}
