use crate::cmd_tad2bedpe::args::{param_args, run_parameters};
use clap::*;
use tad2bedpe::libs::bedpe;
use tad2bedpe::libs::bins::{self, BinIndex};
use tad2bedpe::libs::error::Error;
use tad2bedpe::libs::naming;
use tad2bedpe::libs::pipeline;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("convert")
        .about("Convert OnTAD call files into one genome-wide BEDPE file")
        .after_help(
            r###"
Convert per-chromosome OnTAD output (`*.tad`) into a BEDPE file.

Each input file must carry its chromosome in the file name (`chr1`, `chr22`,
`chrX`, ...). Bin coordinates come from one of:
* --cooler: the bin table of a .mcool/.cool container (needs `cooler` in PATH)
* --bins: a `chrom start end` table, e.g. from `cooler dump -t bins`
* --chrom-sizes: a `chrom size` table, binned at --binsize

Notes:
* The first row of every file is the level 0 domain and is dropped.
* Bins are 1-based in OnTAD output and 0-based in the BEDPE file.
* Both anchors of a TAD are the midpoints of its first and last bins:
  chrom mid1 mid2 chrom mid1 mid2 level mean score
* Files without TADs only log a warning.
* Rows follow the input order; directories are read in file name order.
* Without --outfile, the name is derived from the --cooler container,
  or the rows go to stdout.

Examples:
1. Convert a directory of OnTAD results:
   tad2bedpe convert tads/ --cooler sample.mcool --binsize 10000

2. Without a container:
   tad2bedpe convert tads/*.tad --chrom-sizes hg38.chrom.sizes -b 50000 -o tads.bedpe

3. Sort by chromosome and position, skip broken files:
   tad2bedpe convert tads/ --bins bins.tsv --sort --skip-malformed
"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("OnTAD call files, or directories of *.tad files"),
        )
        .arg(
            Arg::new("cooler")
                .long("cooler")
                .num_args(1)
                .help("A .mcool/.cool container"),
        )
        .arg(
            Arg::new("bins")
                .long("bins")
                .num_args(1)
                .help("A bin table: chrom, start, end"),
        )
        .arg(
            Arg::new("chrom_sizes")
                .long("chrom-sizes")
                .num_args(1)
                .help("A chrom.sizes file"),
        )
        .group(
            ArgGroup::new("source")
                .args(["cooler", "bins", "chrom_sizes"])
                .required(true),
        )
        .args(param_args())
        .arg(
            Arg::new("sort")
                .long("sort")
                .action(ArgAction::SetTrue)
                .help("Sort rows by chromosome and position"),
        )
        .arg(
            Arg::new("skip_malformed")
                .long("skip-malformed")
                .action(ArgAction::SetTrue)
                .help("Skip malformed files with a warning instead of failing"),
        )
        .arg(
            Arg::new("allow_empty")
                .long("allow-empty")
                .action(ArgAction::SetTrue)
                .help("Write an empty file when no TADs were called"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let params = run_parameters(args);
    let inputs: Vec<String> = args
        .get_many::<String>("infiles")
        .unwrap()
        .cloned()
        .collect();
    let opt_sort = args.get_flag("sort");
    let opt_skip = args.get_flag("skip_malformed");
    let opt_allow_empty = args.get_flag("allow_empty");

    //----------------------------
    // Bins
    //----------------------------
    let index = if let Some(container) = args.get_one::<String>("cooler") {
        BinIndex::from_cooler(container, params.resolution)?
    } else if let Some(bins_file) = args.get_one::<String>("bins") {
        BinIndex::from_bins_file(bins_file, params.resolution)?
    } else {
        let sizes = bins::read_sizes(args.get_one::<String>("chrom_sizes").unwrap())?;
        BinIndex::from_chrom_sizes(&sizes, params.resolution)?
    };
    log::debug!(
        "{} bins on {} chromosomes",
        index.len(),
        index.chroms().count()
    );

    //----------------------------
    // Convert
    //----------------------------
    let files = pipeline::expand_inputs(&inputs)?;
    let mut rows = match pipeline::convert_files(&files, &index, opt_skip) {
        Err(Error::EmptyResult) if opt_allow_empty => {
            log::warn!("No TADs in any input file");
            vec![]
        }
        other => other?,
    };
    if opt_sort {
        bedpe::sort_rows(&mut rows, &index);
    }

    //----------------------------
    // Output
    //----------------------------
    let outfile = match (&params.output_path, args.get_one::<String>("cooler")) {
        (Some(outfile), _) => outfile.clone(),
        (None, Some(container)) => naming::name(&params, container),
        (None, None) => "stdout".to_string(),
    };
    let mut writer = tad2bedpe::writer(&outfile)?;
    bedpe::write_bedpe(&mut writer, &rows)?;
    if outfile != "stdout" {
        log::info!("Wrote {} TAD(s) to {}", rows.len(), outfile);
    }

    Ok(())
}
