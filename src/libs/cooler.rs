//! Access to `.cool`/`.mcool` containers through the `cooler` command line
//! tool.

use crate::libs::bins::{parse_bins, Bin};
use crate::libs::dense::{parse_pixel, DenseMatrix};
use crate::libs::error::{Error, Result};
use crate::libs::process;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct Cooler {
    path: PathBuf,
}

impl Cooler {
    /// Fails with `ResourceNotFound` when the container or `cooler` is missing.
    pub fn open(path: &str) -> Result<Self> {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(Error::ResourceNotFound(format!(
                "container {}",
                path.display()
            )));
        }
        process::require("cooler")?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// URIs of every group holding a contact matrix.
    pub fn groups(&self) -> Result<Vec<String>> {
        let stdout = process::run_captured(
            Command::new("cooler").arg("ls").arg(&self.path),
            &self.path.display().to_string(),
        )?;

        Ok(String::from_utf8_lossy(&stdout)
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    /// Resolutions stored in a multi-resolution container.
    pub fn resolutions(&self) -> Result<Vec<u32>> {
        let mut resolutions: Vec<u32> = self
            .groups()?
            .iter()
            .filter_map(|uri| resolution_of(uri))
            .collect();
        resolutions.sort_unstable();
        Ok(resolutions)
    }

    /// URI of the matrix at `resolution`.
    ///
    /// A single-resolution `.cool` is accepted when its bin size matches.
    pub fn uri(&self, resolution: u32) -> Result<String> {
        let groups = self.groups()?;

        if let Some(uri) = groups
            .iter()
            .find(|uri| resolution_of(uri) == Some(resolution))
        {
            return Ok(uri.clone());
        }

        if groups.len() == 1 && resolution_of(&groups[0]).is_none() {
            let stdout = process::run_captured(
                Command::new("cooler")
                    .args(["info", "--field", "bin-size"])
                    .arg(&groups[0]),
                &groups[0],
            )?;
            let bin_size = String::from_utf8_lossy(&stdout).trim().parse::<u32>().ok();
            if bin_size == Some(resolution) {
                return Ok(groups[0].clone());
            }
        }

        Err(Error::ResourceNotFound(format!(
            "resolution {} in {}",
            resolution,
            self.path.display()
        )))
    }

    /// Bin table at `resolution`, in genome order.
    pub fn bins(&self, resolution: u32) -> Result<Vec<Bin>> {
        let uri = self.uri(resolution)?;
        let stdout = process::run_captured(
            Command::new("cooler").args(["dump", "-t", "bins"]).arg(&uri),
            &uri,
        )?;

        parse_bins(stdout.as_slice(), Path::new(&uri))
    }

    /// Balanced contacts of `chrom` against itself as a dense matrix.
    ///
    /// `offset` and `n_bins` come from the bin table of the same resolution.
    pub fn dense_matrix(
        &self,
        resolution: u32,
        chrom: &str,
        offset: usize,
        n_bins: usize,
    ) -> Result<DenseMatrix> {
        let uri = self.uri(resolution)?;

        // pixels are streamed, the text dump of a large chromosome is big
        let mut child = Command::new("cooler")
            .args(["dump", "-t", "pixels", "--balanced", "--matrix", "--na-rep", "nan"])
            .args(["-r", chrom])
            .arg(&uri)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::io(e, "cooler"))?;

        // drained aside, a full stderr pipe would stall the stdout loop
        let stderr = child.stderr.take();
        let drain = std::thread::spawn(move || {
            let mut buf = vec![];
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut buf);
            }
            buf
        });

        let mut pixels = vec![];
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line.map_err(|e| Error::io(e, &uri))?;
                if let Some(pixel) = parse_pixel(&line) {
                    pixels.push(pixel);
                }
            }
        }

        let status = child.wait().map_err(|e| Error::io(e, "cooler"))?;
        let stderr = drain.join().unwrap_or_default();
        if !status.success() {
            return Err(Error::ChildProcessFailure {
                program: "cooler".to_string(),
                target: format!("{}::{}", uri, chrom),
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        Ok(DenseMatrix::from_pixels(n_bins, offset, pixels))
    }
}

/// `file.mcool::/resolutions/50000` -> `50000`
///
/// ```
/// use tad2bedpe::libs::cooler::resolution_of;
/// assert_eq!(resolution_of("a.mcool::/resolutions/50000"), Some(50000));
/// assert_eq!(resolution_of("a.cool::/"), None);
/// ```
pub fn resolution_of(uri: &str) -> Option<u32> {
    uri.rsplit_once("/resolutions/")
        .and_then(|(_, res)| res.trim_end_matches('/').parse::<u32>().ok())
}
