use crate::libs::bins::BinIndex;
use crate::libs::error::{Error, Result};
use crate::libs::format_float;
use crate::libs::tad::GenomeIntervalPair;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// A BEDPE record with the three OnTAD columns appended.
#[derive(Debug, Clone, PartialEq)]
pub struct BedpeRow {
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

impl fmt::Display for BedpeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom1,
            self.start1,
            self.end1,
            self.chrom2,
            self.start2,
            self.end2,
            self.level,
            format_float(self.mean),
            format_float(self.score),
        )
    }
}

/// Reads an emitted row back as is. No coordinate correction is applied.
impl FromStr for BedpeRow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end().split('\t').collect();
        if fields.len() != 9 {
            return Err(format!("expected 9 BEDPE fields, got {}", fields.len()));
        }

        let coord = |i: usize| -> std::result::Result<u64, String> {
            fields[i]
                .parse::<u64>()
                .map_err(|_| format!("field {}: '{}' is not a coordinate", i + 1, fields[i]))
        };
        let number = |i: usize| -> std::result::Result<f64, String> {
            fields[i]
                .parse::<f64>()
                .map_err(|_| format!("field {}: '{}' is not a number", i + 1, fields[i]))
        };

        Ok(BedpeRow {
            chrom1: fields[0].to_string(),
            start1: coord(1)?,
            end1: coord(2)?,
            chrom2: fields[3].to_string(),
            start2: coord(4)?,
            end2: coord(5)?,
            level: fields[6]
                .parse::<u32>()
                .map_err(|_| format!("field 7: '{}' is not a TAD level", fields[6]))?,
            mean: number(7)?,
            score: number(8)?,
        })
    }
}

/// Collapses a domain to its pair of bin midpoints.
///
/// With `mid1` and `mid2` the floored midpoints of the start and end bins,
/// both anchors become `mid1..mid2`: `start1 = start2 = mid1` and
/// `end1 = end2 = mid2`.
///
/// ```
/// use tad2bedpe::libs::bedpe::collapse;
/// use tad2bedpe::libs::tad::GenomeIntervalPair;
/// let pair = GenomeIntervalPair {
///     chrom1: "chr1".to_string(), start1: 100000, end1: 150000,
///     chrom2: "chr1".to_string(), start2: 200000, end2: 250000,
///     level: 1, mean: 0.5, score: 0.25,
/// };
/// let row = collapse(pair);
/// assert_eq!((row.start1, row.end1, row.start2, row.end2), (125000, 225000, 125000, 225000));
/// ```
pub fn collapse(pair: GenomeIntervalPair) -> BedpeRow {
    let mid1 = (pair.start1 + pair.end1) / 2;
    let mid2 = (pair.start2 + pair.end2) / 2;

    BedpeRow {
        chrom1: pair.chrom1,
        start1: mid1,
        end1: mid2,
        chrom2: pair.chrom2,
        start2: mid1,
        end2: mid2,
        level: pair.level,
        mean: pair.mean,
        score: pair.score,
    }
}

pub fn assemble(pairs: Vec<GenomeIntervalPair>) -> Vec<BedpeRow> {
    pairs.into_iter().map(collapse).collect()
}

/// Concatenates per-chromosome rows, keeping both orders.
pub fn merge(per_chrom: Vec<Vec<BedpeRow>>) -> Result<Vec<BedpeRow>> {
    let rows: Vec<BedpeRow> = per_chrom.into_iter().flatten().collect();
    if rows.is_empty() {
        return Err(Error::EmptyResult);
    }
    Ok(rows)
}

/// Stable sort by chromosome in genome order, then by anchor positions.
/// Chromosomes unknown to `index` go last, by name.
pub fn sort_rows(rows: &mut [BedpeRow], index: &BinIndex) {
    rows.sort_by(|a, b| {
        let rank_a = index.chrom_rank(&a.chrom1).unwrap_or(usize::MAX);
        let rank_b = index.chrom_rank(&b.chrom1).unwrap_or(usize::MAX);
        rank_a
            .cmp(&rank_b)
            .then_with(|| a.chrom1.cmp(&b.chrom1))
            .then(a.start1.cmp(&b.start1))
            .then(a.end1.cmp(&b.end1))
    });
}

pub fn write_bedpe(writer: &mut dyn Write, rows: &[BedpeRow]) -> std::io::Result<()> {
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    writer.flush()
}
