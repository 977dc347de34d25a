use crate::libs::error::Result;
use crate::libs::format_float;
use crate::libs::naming::RunParameters;
use crate::libs::process;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One OnTAD invocation: a dense matrix in, `<prefix>.tad` out.
#[derive(Debug, Clone, PartialEq)]
pub struct OnTadJob {
    pub chrom: String,
    pub matrix: PathBuf,
    pub out_prefix: PathBuf,
}

impl OnTadJob {
    /// `<base>.<chrom>.matrix` in `matrix_dir`, `<base>.<chrom>` in `tad_dir`
    pub fn new(base: &str, chrom: &str, matrix_dir: &Path, tad_dir: &Path) -> Self {
        let stem = format!("{}.{}", base, chrom);
        Self {
            chrom: chrom.to_string(),
            matrix: matrix_dir.join(format!("{}.matrix", stem)),
            out_prefix: tad_dir.join(stem),
        }
    }

    /// The call file OnTAD writes.
    pub fn tad_file(&self) -> PathBuf {
        let mut path = self.out_prefix.clone().into_os_string();
        path.push(".tad");
        PathBuf::from(path)
    }

    /// `OnTAD <matrix> -penalty .. -minsz .. -maxsz .. -ldiff .. -lsize .. -o <prefix>`
    pub fn args(&self, params: &RunParameters) -> Vec<OsString> {
        vec![
            self.matrix.clone().into_os_string(),
            "-penalty".into(),
            format_float(params.penalty).into(),
            "-minsz".into(),
            params.min_size.to_string().into(),
            "-maxsz".into(),
            params.max_size.to_string().into(),
            "-ldiff".into(),
            format_float(params.local_diff).into(),
            "-lsize".into(),
            params.local_window_size.to_string().into(),
            "-o".into(),
            self.out_prefix.clone().into_os_string(),
        ]
    }

    pub fn run(&self, program: &Path, params: &RunParameters) -> Result<()> {
        process::run_captured(Command::new(program).args(self.args(params)), &self.chrom)?;
        Ok(())
    }
}

/// Runs every job, `parallel` at a time, and waits for all of them.
///
/// Failures don't stop the siblings; they come back in job order.
pub fn run_all(
    jobs: &[OnTadJob],
    program: &Path,
    params: &RunParameters,
    parallel: usize,
) -> anyhow::Result<Vec<Result<()>>> {
    process::run_parallel(jobs, parallel, |job| {
        let outcome = job.run(program, params);
        if outcome.is_ok() {
            log::info!("Finished: {}", job.chrom);
        }
        outcome
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_paths() {
        let job = OnTadJob::new("sample", "chr2", Path::new("/m"), Path::new("/t"));
        assert_eq!(job.matrix, Path::new("/m/sample.chr2.matrix"));
        assert_eq!(job.out_prefix, Path::new("/t/sample.chr2"));
        assert_eq!(job.tad_file(), Path::new("/t/sample.chr2.tad"));
    }

    #[test]
    fn structured_args() {
        let job = OnTadJob::new("my sample", "chrX", Path::new("m"), Path::new("t"));
        let params = RunParameters {
            min_size: 4,
            ..Default::default()
        };
        let args: Vec<String> = job
            .args(&params)
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec![
                "m/my sample.chrX.matrix",
                "-penalty",
                "0.1",
                "-minsz",
                "4",
                "-maxsz",
                "200",
                "-ldiff",
                "1.96",
                "-lsize",
                "5",
                "-o",
                "t/my sample.chrX",
            ]
        );
    }
}
