//! OnTAD call files.
//!
//! OnTAD writes one file per chromosome, five tab-separated columns without a
//! header: `start end level mean score`. Both bins are 1-based and local to the
//! chromosome, and the first row is the level 0 domain spanning the whole
//! chromosome.

use crate::libs::bins::BinIndex;
use crate::libs::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

lazy_static! {
    static ref CHROM_RE: Regex = Regex::new(r"chr\d+|chr\w").unwrap();
}

/// Extracts the chromosome token from a file name: `chr` followed by digits,
/// or by a single word character.
///
/// Only the file name is searched, never the parent directories.
///
/// ```
/// use std::path::Path;
/// use tad2bedpe::libs::tad::chrom_from_path;
/// assert_eq!(chrom_from_path(Path::new("/tmp/x/sample.chr10.tad")).unwrap(), "chr10");
/// assert_eq!(chrom_from_path(Path::new("sample.chrX.tad")).unwrap(), "chrX");
/// assert!(chrom_from_path(Path::new("/tmp/chr1/sample.tad")).is_err());
/// ```
pub fn chrom_from_path(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| CHROM_RE.find(name))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::UnresolvableChromosome(path.to_path_buf()))
}

/// One raw row of OnTAD output.
#[derive(Debug, Clone, PartialEq)]
pub struct TadCallRow {
    /// 1-based, chromosome-local
    pub bin1: usize,
    /// 1-based, chromosome-local
    pub bin2: usize,
    pub level: u32,
    pub mean: f64,
    pub score: f64,
}

impl FromStr for TadCallRow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('\t').collect();
        if fields.len() != 5 {
            return Err(format!(
                "expected 5 tab-separated fields, got {}",
                fields.len()
            ));
        }

        let bin = |field: &str| -> std::result::Result<usize, String> {
            field
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a bin index", field))
        };
        let number = |field: &str| -> std::result::Result<f64, String> {
            field
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", field))
        };

        Ok(TadCallRow {
            bin1: bin(fields[0])?,
            bin2: bin(fields[1])?,
            level: fields[2]
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a TAD level", fields[2]))?,
            mean: number(fields[3])?,
            score: number(fields[4])?,
        })
    }
}

/// A domain resolved to genome coordinates, before midpoint collapsing.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomeIntervalPair {
    pub chrom1: String,
    pub start1: u64,
    pub end1: u64,
    pub chrom2: String,
    pub start2: u64,
    pub end2: u64,
    pub level: u32,
    pub mean: f64,
    pub score: f64,
}

impl TadCallRow {
    /// Shifts both bins to 0-based genome-wide ids, and resolves them.
    ///
    /// Errors carry no location; `parse_reader` adds the file and line.
    pub fn to_genome(
        &self,
        chrom: &str,
        index: &BinIndex,
    ) -> std::result::Result<GenomeIntervalPair, String> {
        if self.bin1 == 0 || self.bin2 == 0 {
            return Err("bin indices are 1-based, found 0".to_string());
        }
        if self.bin1 > self.bin2 {
            return Err(format!(
                "domain start bin {} is after its end bin {}",
                self.bin1, self.bin2
            ));
        }

        let offset = index.offset(chrom).map_err(|e| e.to_string())?;
        let genome_id = |bin: usize| {
            offset
                .checked_add(bin - 1)
                .ok_or_else(|| format!("bin {} is beyond the end of the bin table", bin))
        };
        let (chrom1, start1, end1) = resolve_on(index, genome_id(self.bin1)?, chrom)?;
        let (chrom2, start2, end2) = resolve_on(index, genome_id(self.bin2)?, chrom)?;

        Ok(GenomeIntervalPair {
            chrom1,
            start1,
            end1,
            chrom2,
            start2,
            end2,
            level: self.level,
            mean: self.mean,
            score: self.score,
        })
    }
}

fn resolve_on(
    index: &BinIndex,
    id: usize,
    chrom: &str,
) -> std::result::Result<(String, u64, u64), String> {
    let (found, start, end) = index.resolve(id).map_err(|_| {
        format!("bin {} is beyond the end of the bin table", id)
    })?;
    if found != chrom {
        return Err(format!(
            "bin {} lies on {}, past the end of {}",
            id, found, chrom
        ));
    }
    Ok((found.to_string(), start, end))
}

/// Parses one OnTAD file of `chrom` into genome coordinates.
///
/// A zero-byte file, or one holding only the level 0 row, means no domain was
/// called on this chromosome: a warning is logged and nothing is returned.
pub fn parse(path: &Path, chrom: &str, index: &BinIndex) -> Result<Vec<GenomeIntervalPair>> {
    if crate::libs::io::is_empty_file(path)? {
        log::warn!("{}: no TADs for {}", path.display(), chrom);
        return Ok(vec![]);
    }

    let reader = crate::reader(&path.to_string_lossy())?;
    parse_reader(reader, path, chrom, index)
}

pub fn parse_reader<R: BufRead>(
    reader: R,
    origin: &Path,
    chrom: &str,
    index: &BinIndex,
) -> Result<Vec<GenomeIntervalPair>> {
    // fail before reading anything
    index.offset(chrom)?;

    let mut pairs = vec![];
    let mut seen_level_zero = false;
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(e, origin))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        // whole chromosome, never a real call
        if !seen_level_zero {
            seen_level_zero = true;
            continue;
        }

        let pair = line
            .parse::<TadCallRow>()
            .and_then(|row| row.to_genome(chrom, index))
            .map_err(|message| Error::malformed(origin, Some(i + 1), message))?;
        pairs.push(pair);
    }

    if pairs.is_empty() {
        log::warn!("{}: no TADs for {}", origin.display(), chrom);
    }

    Ok(pairs)
}
