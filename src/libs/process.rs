use crate::libs::error::{Error, Result};
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::Command;

/// Locates an executable in `PATH`.
pub fn require(program: &str) -> Result<PathBuf> {
    which::which(program)
        .map_err(|_| Error::ResourceNotFound(format!("{} not found in PATH", program)))
}

/// Runs a command to completion and returns its stdout.
///
/// Arguments are passed as a list, never through a shell. A non-zero exit
/// becomes `ChildProcessFailure` carrying the captured stderr.
pub fn run_captured(cmd: &mut Command, target: &str) -> Result<Vec<u8>> {
    let program = cmd.get_program().to_string_lossy().to_string();
    log::debug!("running {:?}", cmd);

    let output = cmd.output().map_err(|e| Error::io(e, &program))?;
    if !output.status.success() {
        return Err(Error::ChildProcessFailure {
            program,
            target: target.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Runs `f` on every job in a pool of `parallel` threads and waits for all of
/// them. Results keep the order of `jobs`.
pub fn run_parallel<T, R, F>(jobs: &[T], parallel: usize, f: F) -> anyhow::Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build()?;

    Ok(pool.install(|| jobs.par_iter().map(|job| f(job)).collect()))
}
