use std::path::{Path, PathBuf};

/// Errors raised while turning OnTAD calls into BEDPE records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A container, a resolution inside it, or a required executable is missing.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// The file name carries no `chrN`/`chrX` token.
    #[error("can't find a chromosome name (chrN or chrX) in file name {}", .0.display())]
    UnresolvableChromosome(PathBuf),

    /// The chromosome is absent from the bin table.
    #[error("chromosome {0} is absent from the bin table")]
    UnknownChromosome(String),

    /// A row has the wrong shape, or violates an ordering invariant.
    #[error("malformed input at {origin}: {message}")]
    MalformedInput { origin: String, message: String },

    /// No domains were called on any chromosome.
    #[error("no TADs were called on any chromosome, nothing to write")]
    EmptyResult,

    /// An external program exited with a non-zero status.
    #[error("{program} failed for {target} ({status}): {stderr}")]
    ChildProcessFailure {
        program: String,
        target: String,
        status: String,
        stderr: String,
    },

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl Error {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// `origin` is a file, and `line` is 1-based when known.
    pub fn malformed(origin: &Path, line: Option<usize>, message: impl Into<String>) -> Self {
        let origin = match line {
            Some(line) => format!("{}:{}", origin.display(), line),
            None => origin.display().to_string(),
        };
        Self::MalformedInput {
            origin,
            message: message.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_names_file_and_line() {
        let err = Error::malformed(Path::new("tads/s.chr1.tad"), Some(3), "expected 5 fields");
        assert!(err.is_malformed());
        assert_eq!(
            err.to_string(),
            "malformed input at tads/s.chr1.tad:3: expected 5 fields"
        );

        let err = Error::malformed(Path::new("s.bins"), None, "empty");
        assert_eq!(err.to_string(), "malformed input at s.bins: empty");
    }

    #[test]
    fn child_failure_message() {
        let err = Error::ChildProcessFailure {
            program: "OnTAD".to_string(),
            target: "chr2".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Segmentation fault".to_string(),
        };
        assert!(!err.is_malformed());
        assert!(err.to_string().starts_with("OnTAD failed for chr2"));
    }
}
