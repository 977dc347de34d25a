use crate::libs::bedpe::{self, BedpeRow};
use crate::libs::bins::BinIndex;
use crate::libs::error::{Error, Result};
use crate::libs::tad;
use std::path::{Path, PathBuf};

/// `*.tad` files directly under `dir`, sorted by file name.
pub fn tad_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(e, dir))?;

    let mut files = vec![];
    for entry in entries {
        let path = entry.map_err(|e| Error::io(e, dir))?.path();
        if path.is_file() && path.extension() == Some(std::ffi::OsStr::new("tad")) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Expands directories into their `*.tad` files; plain files are kept in
/// the given order.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for input in inputs {
        let path = PathBuf::from(input);
        if path.is_dir() {
            files.extend(tad_files(&path)?);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}

/// Converts one call file: chromosome from the file name, then parse and
/// collapse.
pub fn convert_file(path: &Path, index: &BinIndex) -> Result<Vec<BedpeRow>> {
    let chrom = tad::chrom_from_path(path)?;
    convert_call_file(path, &chrom, index)
}

/// Converts one call file of a known chromosome.
pub fn convert_call_file(path: &Path, chrom: &str, index: &BinIndex) -> Result<Vec<BedpeRow>> {
    index.offset(chrom)?;

    let pairs = tad::parse(path, chrom, index)?;
    Ok(bedpe::assemble(pairs))
}

/// Converts and merges call files in order.
///
/// With `skip_malformed`, a malformed file is logged and left out instead of
/// failing the whole run.
pub fn convert_files(
    files: &[PathBuf],
    index: &BinIndex,
    skip_malformed: bool,
) -> Result<Vec<BedpeRow>> {
    merge_converted(
        files
            .iter()
            .map(|path| (path.as_path(), convert_file(path, index))),
        skip_malformed,
    )
}

/// Like `convert_files`, for `(chrom, path)` pairs whose chromosome is
/// already known. File names are not looked at.
pub fn convert_calls(
    calls: &[(String, PathBuf)],
    index: &BinIndex,
    skip_malformed: bool,
) -> Result<Vec<BedpeRow>> {
    merge_converted(
        calls
            .iter()
            .map(|(chrom, path)| (path.as_path(), convert_call_file(path, chrom, index))),
        skip_malformed,
    )
}

fn merge_converted<'a, I>(converted: I, skip_malformed: bool) -> Result<Vec<BedpeRow>>
where
    I: Iterator<Item = (&'a Path, Result<Vec<BedpeRow>>)>,
{
    let mut per_chrom = vec![];
    for (path, outcome) in converted {
        match outcome {
            Ok(rows) => {
                log::debug!("{}: {} TAD(s)", path.display(), rows.len());
                per_chrom.push(rows);
            }
            Err(err) if skip_malformed && err.is_malformed() => {
                log::warn!("Skipping {}: {}", path.display(), err);
            }
            Err(err) => return Err(err),
        }
    }

    bedpe::merge(per_chrom)
}
