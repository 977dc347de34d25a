extern crate clap;
use clap::*;

mod cmd_tad2bedpe;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = Command::new("tad2bedpe")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`tad2bedpe` - OnTAD calls to genome-wide BEDPE")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_tad2bedpe::run::make_subcommand())
        .subcommand(cmd_tad2bedpe::convert::make_subcommand())
        .subcommand(cmd_tad2bedpe::name::make_subcommand())
        .after_help(
            r###"Subcommands:

* run     - .mcool -> dense matrices -> OnTAD -> BEDPE
* convert - existing OnTAD *.tad files -> BEDPE
* name    - print the output name of a run

Logging goes to stderr; set RUST_LOG=debug for details, RUST_LOG=warn to
silence progress messages.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("run", sub_matches)) => cmd_tad2bedpe::run::execute(sub_matches),
        Some(("convert", sub_matches)) => cmd_tad2bedpe::convert::execute(sub_matches),
        Some(("name", sub_matches)) => cmd_tad2bedpe::name::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
