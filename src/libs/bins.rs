use crate::libs::error::{Error, Result};
use indexmap::IndexMap;
use std::io::BufRead;
use std::path::Path;

/// Chromosome lengths in reference order.
pub type ChromSizes = IndexMap<String, u64>;

/// One genomic bin, a half-open `[start, end)` interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl Bin {
    pub fn new(chrom: &str, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    offset: usize,
    n_bins: usize,
}

/// Bin table of one resolution, with the genome-wide id of every
/// chromosome's first bin.
///
/// Ids are 0-based and contiguous across the genome; every chromosome owns
/// one contiguous run of ids.
#[derive(Debug, Clone)]
pub struct BinIndex {
    resolution: u32,
    spans: IndexMap<String, Span>,
    chrom_of: Vec<usize>,
    starts: Vec<u64>,
    ends: Vec<u64>,
}

impl BinIndex {
    /// Builds the index and checks the bin table invariants.
    pub fn new(resolution: u32, bins: Vec<Bin>) -> Result<Self> {
        let origin = Path::new("bin table");
        let mut spans: IndexMap<String, Span> = IndexMap::new();
        let mut chrom_of = Vec::with_capacity(bins.len());
        let mut starts = Vec::with_capacity(bins.len());
        let mut ends = Vec::with_capacity(bins.len());

        for (id, bin) in bins.into_iter().enumerate() {
            if bin.start >= bin.end {
                return Err(Error::malformed(
                    origin,
                    None,
                    format!(
                        "bin {} ({}:{}-{}) is empty",
                        id, bin.chrom, bin.start, bin.end
                    ),
                ));
            }

            let is_current = spans
                .last()
                .map(|(name, _)| *name == bin.chrom)
                .unwrap_or(false);
            if is_current {
                if starts[id - 1] >= bin.start {
                    return Err(Error::malformed(
                        origin,
                        None,
                        format!("bin {} on {} is out of order", id, bin.chrom),
                    ));
                }
                if let Some((_, span)) = spans.last_mut() {
                    span.n_bins += 1;
                }
            } else {
                if spans.contains_key(&bin.chrom) {
                    return Err(Error::malformed(
                        origin,
                        None,
                        format!("bins of {} are not contiguous (bin {})", bin.chrom, id),
                    ));
                }
                spans.insert(bin.chrom, Span { offset: id, n_bins: 1 });
            }

            chrom_of.push(spans.len() - 1);
            starts.push(bin.start);
            ends.push(bin.end);
        }

        Ok(Self {
            resolution,
            spans,
            chrom_of,
            starts,
            ends,
        })
    }

    /// Bins every chromosome into `[i * res, min((i + 1) * res, len))`,
    /// in the order of `sizes`.
    ///
    /// ```
    /// use tad2bedpe::libs::bins::{BinIndex, ChromSizes};
    /// let mut sizes = ChromSizes::new();
    /// sizes.insert("chr1".to_string(), 250);
    /// sizes.insert("chr2".to_string(), 100);
    /// let index = BinIndex::from_chrom_sizes(&sizes, 100).unwrap();
    /// assert_eq!(index.len(), 4);
    /// assert_eq!(index.offset("chr2").unwrap(), 3);
    /// assert_eq!(index.resolve(2).unwrap(), ("chr1", 200, 250));
    /// ```
    pub fn from_chrom_sizes(sizes: &ChromSizes, resolution: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::malformed(
                Path::new("resolution"),
                None,
                "bin size must be positive",
            ));
        }
        let res = resolution as u64;

        let mut bins = vec![];
        for (chrom, &size) in sizes {
            let mut start = 0;
            while start < size {
                let end = (start + res).min(size);
                bins.push(Bin::new(chrom, start, end));
                start = end;
            }
        }

        Self::new(resolution, bins)
    }

    /// Reads `chrom<TAB>start<TAB>end[<TAB>...]` lines, e.g. the output of
    /// `cooler dump -t bins`.
    pub fn from_bins_file(path: &str, resolution: u32) -> Result<Self> {
        let reader = crate::reader(path)?;
        let bins = parse_bins(reader, Path::new(path))?;
        Self::new(resolution, bins)
    }

    /// Bin table of `resolution` in a `.mcool`/`.cool` container.
    pub fn from_cooler(path: &str, resolution: u32) -> Result<Self> {
        let cooler = crate::libs::cooler::Cooler::open(path)?;
        Self::new(resolution, cooler.bins(resolution)?)
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Total number of bins in the genome.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Chromosome names in genome order.
    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.spans.keys().map(|s| s.as_str())
    }

    /// Rank of the chromosome in genome order.
    pub fn chrom_rank(&self, chrom: &str) -> Option<usize> {
        self.spans.get_index_of(chrom)
    }

    pub fn n_bins(&self, chrom: &str) -> Result<usize> {
        self.span(chrom).map(|s| s.n_bins)
    }

    /// Genome-wide id of the first bin of `chrom`.
    pub fn offset(&self, chrom: &str) -> Result<usize> {
        self.span(chrom).map(|s| s.offset)
    }

    /// Chromosome and `[start, end)` of a genome-wide bin id.
    pub fn resolve(&self, id: usize) -> Result<(&str, u64, u64)> {
        if id >= self.len() {
            return Err(Error::malformed(
                Path::new("bin table"),
                None,
                format!("bin id {} is beyond the last bin ({})", id, self.len()),
            ));
        }
        let chrom = self
            .spans
            .get_index(self.chrom_of[id])
            .map(|(name, _)| name.as_str())
            .unwrap_or_default();
        Ok((chrom, self.starts[id], self.ends[id]))
    }

    fn span(&self, chrom: &str) -> Result<Span> {
        self.spans
            .get(chrom)
            .copied()
            .ok_or_else(|| Error::UnknownChromosome(chrom.to_string()))
    }
}

/// Parses a bin table, skipping a `chrom` header, blank lines and comments.
pub fn parse_bins<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Bin>> {
    let mut bins = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(e, origin))?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') || line.starts_with("chrom\t") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(Error::malformed(
                origin,
                Some(i + 1),
                format!("expected chrom, start and end, got {} field(s)", fields.len()),
            ));
        }
        let start = parse_coord(fields[1], origin, i + 1)?;
        let end = parse_coord(fields[2], origin, i + 1)?;
        bins.push(Bin::new(fields[0], start, end));
    }

    Ok(bins)
}

/// Reads a `chrom<TAB>size` file, keeping the file order.
pub fn read_sizes(path: &str) -> Result<ChromSizes> {
    let origin = Path::new(path);
    let reader = crate::reader(path)?;

    let mut sizes = ChromSizes::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(e, origin))?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(Error::malformed(
                origin,
                Some(i + 1),
                "expected chrom and size",
            ));
        }
        let size = parse_coord(fields[1], origin, i + 1)?;
        sizes.insert(fields[0].to_string(), size);
    }

    Ok(sizes)
}

fn parse_coord(field: &str, origin: &Path, line: usize) -> Result<u64> {
    field.trim().parse::<u64>().map_err(|_| {
        Error::malformed(
            origin,
            Some(line),
            format!("'{}' is not a genomic coordinate", field),
        )
    })
}
