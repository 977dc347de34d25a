//! Subcommand modules for the `tad2bedpe` binary.

pub mod args;
pub mod convert;
pub mod name;
pub mod run;
