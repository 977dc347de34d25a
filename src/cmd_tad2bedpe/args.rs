use clap::*;
use tad2bedpe::libs::naming::RunParameters;

/// OnTAD parameters, and the options that name the output after them.
pub fn param_args() -> Vec<Arg> {
    vec![
        Arg::new("binsize")
            .long("binsize")
            .short('b')
            .num_args(1)
            .default_value("50000")
            .value_parser(value_parser!(u32).range(1..))
            .help("Resolution, the bin size in bp"),
        Arg::new("penalty")
            .long("penalty")
            .num_args(1)
            .default_value("0.1")
            .value_parser(value_parser!(f64))
            .help("Penalty of the OnTAD scoring function. Higher penalties give fewer TADs"),
        Arg::new("minsz")
            .long("minsz")
            .num_args(1)
            .default_value("3")
            .value_parser(value_parser!(u32))
            .help("Minimum TAD size, in bins"),
        Arg::new("maxsz")
            .long("maxsz")
            .num_args(1)
            .default_value("200")
            .value_parser(value_parser!(u32))
            .help("Maximum TAD size, in bins"),
        Arg::new("ldiff")
            .long("ldiff")
            .num_args(1)
            .default_value("1.96")
            .value_parser(value_parser!(f64))
            .help("Cut-off for local minima (local max - local min >= ldiff * std)"),
        Arg::new("lsize")
            .long("lsize")
            .num_args(1)
            .default_value("5")
            .value_parser(value_parser!(u32))
            .help("Size of the local region used to find local minima"),
        Arg::new("short_name")
            .long("short-name")
            .action(ArgAction::SetTrue)
            .help("Only add non-default parameters to the output name"),
        Arg::new("outfile")
            .long("outfile")
            .short('o')
            .num_args(1)
            .help("Output filename. Derived from the container name when omitted"),
    ]
}

pub fn run_parameters(args: &ArgMatches) -> RunParameters {
    RunParameters {
        resolution: *args.get_one::<u32>("binsize").unwrap(),
        penalty: *args.get_one::<f64>("penalty").unwrap(),
        min_size: *args.get_one::<u32>("minsz").unwrap(),
        max_size: *args.get_one::<u32>("maxsz").unwrap(),
        local_diff: *args.get_one::<f64>("ldiff").unwrap(),
        local_window_size: *args.get_one::<u32>("lsize").unwrap(),
        output_path: args.get_one::<String>("outfile").cloned(),
        compact_naming: args.get_flag("short_name"),
    }
}

pub fn parallel_arg() -> Arg {
    Arg::new("parallel")
        .long("parallel")
        .short('p')
        .num_args(1)
        .default_value("4")
        .value_parser(value_parser!(usize))
        .help("Number of child processes run at once")
}
