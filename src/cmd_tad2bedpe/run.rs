use crate::cmd_tad2bedpe::args::{parallel_arg, param_args, run_parameters};
use clap::*;
use std::path::{Path, PathBuf};
use tad2bedpe::libs::bedpe;
use tad2bedpe::libs::bins::{self, BinIndex};
use tad2bedpe::libs::cooler::Cooler;
use tad2bedpe::libs::error::Error;
use tad2bedpe::libs::naming;
use tad2bedpe::libs::ontad::{self, OnTadJob};
use tad2bedpe::libs::pipeline;
use tad2bedpe::libs::process;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("run")
        .about("Call TADs with OnTAD on a .mcool file and write them as BEDPE")
        .after_help(
            r###"
This command runs the whole pipeline on one contact-matrix container:

1. Dumps the balanced matrix of every chromosome with `cooler`, as the dense
   tab-separated matrix OnTAD reads (missing values become 0).
2. Runs `OnTAD` on every chromosome, --parallel at a time.
3. Converts all call files into one BEDPE file, as `tad2bedpe convert` does.

Both `cooler` and `OnTAD` must be in PATH. Intermediate files live in
temporary directories that are removed at the end.

Notes:
* --chrom-sizes restricts the run to the listed chromosomes, in file order.
  Every chromosome must exist in the container.
* A failing OnTAD run is logged and the other chromosomes go on.
  With --strict the command fails afterwards instead (the exit status then
  differs from the default behavior).
* --dense-matrix-only copies the matrices to `dense_matrices/`, next to
  --outfile or in the current directory, and stops.
* The output name is derived from the container, see `tad2bedpe name`.

Examples:
1. Default parameters:
   tad2bedpe run sample.mcool

2. 10 kb bins, a higher penalty, only non-default values in the name:
   tad2bedpe run sample.mcool --binsize 10000 --penalty 0.2 --short-name

3. Keep the dense matrices only:
   tad2bedpe run sample.mcool --dense-matrix-only -o results/sample.bedpe

"###,
        )
        .arg(
            Arg::new("container")
                .required(true)
                .index(1)
                .help("A .mcool/.cool container"),
        )
        .args(param_args())
        .arg(
            Arg::new("chrom_sizes")
                .long("chrom-sizes")
                .num_args(1)
                .help("Only process the chromosomes of this chrom.sizes file"),
        )
        .arg(
            Arg::new("dense_matrix_only")
                .long("dense-matrix-only")
                .action(ArgAction::SetTrue)
                .help("Save the dense matrices to dense_matrices/ and stop"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .action(ArgAction::SetTrue)
                .help("Sort rows by chromosome and position"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail when any OnTAD run fails"),
        )
        .arg(
            Arg::new("allow_empty")
                .long("allow-empty")
                .action(ArgAction::SetTrue)
                .help("Write an empty file when no TADs were called"),
        )
        .arg(parallel_arg())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let params = run_parameters(args);
    let container = args.get_one::<String>("container").unwrap();
    let opt_dense_only = args.get_flag("dense_matrix_only");
    let opt_sort = args.get_flag("sort");
    let opt_strict = args.get_flag("strict");
    let opt_allow_empty = args.get_flag("allow_empty");
    let opt_parallel = (*args.get_one::<usize>("parallel").unwrap()).max(1);

    //----------------------------
    // Resources
    //----------------------------
    let cooler = Cooler::open(container)?;
    let ontad_bin = if opt_dense_only {
        None
    } else {
        Some(process::require("OnTAD")?)
    };

    let index = BinIndex::new(params.resolution, cooler.bins(params.resolution)?)?;
    let chroms: Vec<String> = match args.get_one::<String>("chrom_sizes") {
        Some(path) => {
            let sizes = bins::read_sizes(path)?;
            for chrom in sizes.keys() {
                index.offset(chrom)?;
            }
            sizes.keys().cloned().collect()
        }
        None => index.chroms().map(|c| c.to_string()).collect(),
    };

    let base = naming::strip_container_suffix(container);
    let matrix_dir = tempfile::TempDir::new()?;
    let tad_dir = tempfile::TempDir::new()?;
    let jobs: Vec<OnTadJob> = chroms
        .iter()
        .map(|chrom| OnTadJob::new(&base, chrom, matrix_dir.path(), tad_dir.path()))
        .collect();

    //----------------------------
    // Dense matrices
    //----------------------------
    log::info!("Creating matrices ...");
    let outcomes = process::run_parallel(&jobs, opt_parallel, |job| {
        write_dense_matrix(&cooler, &index, job)
    })?;
    for outcome in outcomes {
        outcome?;
    }

    if opt_dense_only {
        let dest = dense_matrix_dir(params.output_path.as_deref());
        std::fs::create_dir_all(&dest)?;
        for job in &jobs {
            if let Some(name) = job.matrix.file_name() {
                std::fs::copy(&job.matrix, dest.join(name))?;
            }
        }
        log::info!("Saved {} matrices to {}", jobs.len(), dest.display());
        return Ok(());
    }

    //----------------------------
    // OnTAD
    //----------------------------
    log::info!("Running OnTAD ...");
    let mut n_failed = 0;
    if let Some(program) = &ontad_bin {
        for outcome in ontad::run_all(&jobs, program, &params, opt_parallel)? {
            if let Err(err) = outcome {
                n_failed += 1;
                log::error!("{}", err);
            }
        }
    }
    if opt_strict && n_failed > 0 {
        anyhow::bail!("OnTAD failed on {} chromosome(s)", n_failed);
    }

    //----------------------------
    // BEDPE
    //----------------------------
    log::info!("Creating BEDPE ...");
    // chromosome order; a failed run may have left no call file
    let calls: Vec<(String, PathBuf)> = jobs
        .iter()
        .map(|job| (job.chrom.clone(), job.tad_file()))
        .filter(|(_, path)| path.is_file())
        .collect();
    let mut rows = match pipeline::convert_calls(&calls, &index, false) {
        Err(Error::EmptyResult) if opt_allow_empty => {
            log::warn!("No TADs on any chromosome");
            vec![]
        }
        other => other?,
    };
    if opt_sort {
        bedpe::sort_rows(&mut rows, &index);
    }

    let outfile = naming::name(&params, container);
    let mut writer = tad2bedpe::writer(&outfile)?;
    bedpe::write_bedpe(&mut writer, &rows)?;
    log::info!("Wrote {} TAD(s) to {}", rows.len(), outfile);

    Ok(())
}

fn write_dense_matrix(
    cooler: &Cooler,
    index: &BinIndex,
    job: &OnTadJob,
) -> tad2bedpe::libs::error::Result<()> {
    let offset = index.offset(&job.chrom)?;
    let n_bins = index.n_bins(&job.chrom)?;
    let matrix = cooler.dense_matrix(index.resolution(), &job.chrom, offset, n_bins)?;

    let mut writer = tad2bedpe::writer(&job.matrix.to_string_lossy())?;
    matrix
        .write_to(&mut writer)
        .map_err(|e| Error::io(e, &job.matrix))?;
    log::debug!("{}: {} x {} matrix", job.chrom, n_bins, n_bins);

    Ok(())
}

/// `dense_matrices/` beside the output file, or in the current directory.
fn dense_matrix_dir(output: Option<&str>) -> PathBuf {
    output
        .and_then(|o| Path::new(o).parent())
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("dense_matrices")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_matrix_dir_next_to_output() {
        assert_eq!(
            dense_matrix_dir(Some("results/sample.bedpe")),
            Path::new("results/dense_matrices")
        );
        assert_eq!(
            dense_matrix_dir(Some("sample.bedpe")),
            Path::new("./dense_matrices")
        );
        assert_eq!(dense_matrix_dir(None), Path::new("./dense_matrices"));
    }
}
