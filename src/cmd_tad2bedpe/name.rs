use crate::cmd_tad2bedpe::args::{param_args, run_parameters};
use clap::*;
use tad2bedpe::libs::naming;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("name")
        .about("Print the BEDPE file name a run would write")
        .after_help(
            r###"
The container suffix (.mcool/.cool) is replaced by one `.<key>_<value>` token
per parameter, in the order binsize, penalty, minsz, maxsz, ldiff, lsize,
followed by `.bedpe`. With --short-name, parameters at their default values
are left out. An explicit --outfile is printed as is.

Examples:
1. All parameters:
   tad2bedpe name sample.mcool
   # sample.binsize_50000.penalty_0.1.minsz_3.maxsz_200.ldiff_1.96.lsize_5.bedpe

2. Only non-default parameters:
   tad2bedpe name sample.mcool --short-name --binsize 10000
   # sample.binsize_10000.bedpe
"###,
        )
        .arg(
            Arg::new("container")
                .required(true)
                .index(1)
                .help("A .mcool/.cool container"),
        )
        .args(param_args())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let params = run_parameters(args);
    let container = args.get_one::<String>("container").unwrap();

    println!("{}", naming::name(&params, container));

    Ok(())
}
