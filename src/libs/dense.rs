use itertools::Itertools;
use std::io::Write;

/// Square contact matrix of one chromosome, as OnTAD reads it.
///
/// Missing and non-finite values are stored as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DenseMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Builds a symmetric matrix from `(bin1, bin2, balanced)` pixels with
    /// genome-wide bin ids. Pixels outside `[offset, offset + n)` are ignored.
    ///
    /// ```
    /// use tad2bedpe::libs::dense::DenseMatrix;
    /// let m = DenseMatrix::from_pixels(2, 10, vec![(10, 11, 0.5), (11, 11, f64::NAN)]);
    /// assert_eq!(m.get(1, 0), 0.5);
    /// assert_eq!(m.get(1, 1), 0.0);
    /// ```
    pub fn from_pixels<I>(n: usize, offset: usize, pixels: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut matrix = Self::new(n);
        for (bin1, bin2, value) in pixels {
            if bin1 < offset || bin2 < offset {
                continue;
            }
            let (i, j) = (bin1 - offset, bin2 - offset);
            if i >= n || j >= n {
                continue;
            }
            matrix.set(i, j, value);
            matrix.set(j, i, value);
        }
        matrix
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = if value.is_finite() { value } else { 0.0 };
    }

    /// Tab-separated rows, eight decimals.
    pub fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        for row in self.values.chunks(self.n.max(1)).take(self.n) {
            writeln!(writer, "{}", row.iter().map(|v| format!("{:.8}", v)).join("\t"))?;
        }
        writer.flush()
    }
}

/// Parses `bin1_id<TAB>bin2_id<TAB>count<TAB>balanced` lines from
/// `cooler dump -t pixels --balanced`. An empty or `nan` balanced value is NaN.
pub fn parse_pixel(line: &str) -> Option<(usize, usize, f64)> {
    let fields: Vec<&str> = line.trim_end().split('\t').collect();
    if fields.len() < 3 {
        return None;
    }
    let bin1 = fields[0].parse::<usize>().ok()?;
    let bin2 = fields[1].parse::<usize>().ok()?;
    let value = match fields.get(3) {
        Some(v) if !v.is_empty() => v.parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };
    Some((bin1, bin2, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_fill() {
        let m = DenseMatrix::from_pixels(
            3,
            5,
            vec![(5, 5, 1.0), (5, 7, 0.25), (6, 8, 9.0), (4, 5, 9.0), (6, 6, f64::INFINITY)],
        );
        assert_eq!(m.n(), 3);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 2), 0.25);
        assert_eq!(m.get(2, 0), 0.25);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn write_matrix() {
        let m = DenseMatrix::from_pixels(2, 0, vec![(0, 1, 0.5)]);
        let mut buf = vec![];
        m.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0.00000000\t0.50000000\n0.50000000\t0.00000000\n"
        );
    }

    #[test]
    fn pixels() {
        assert_eq!(parse_pixel("3\t4\t12\t0.125"), Some((3, 4, 0.125)));
        let (_, _, v) = parse_pixel("3\t4\t12\tnan").unwrap();
        assert!(v.is_nan());
        let (_, _, v) = parse_pixel("3\t4\t12\t").unwrap();
        assert!(v.is_nan());
        assert_eq!(parse_pixel("bin1_id\tbin2_id\tcount"), None);
    }
}
