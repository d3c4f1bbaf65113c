use std::path::PathBuf;

use clap::Parser;
use collections::MatchPolicy;
use log::trace;
use phonebook::{
    config::{self, Config},
    harness::Session,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Times linear, jump, binary and hash lookups over a phone directory",
    long_about = None
)]
struct Args {
    /// Directory file, one `<phone> <name>` record per line
    #[arg(short, long, default_value = config::DEFAULT_DIRECTORY)]
    directory: PathBuf,

    /// Names to look up, one per line
    #[arg(short, long, default_value = config::DEFAULT_FIND)]
    find: PathBuf,

    /// Where to save the directory after a completed sort
    #[arg(short, long, default_value = config::DEFAULT_SNAPSHOT)]
    snapshot: PathBuf,

    /// Do not save the sorted directory
    #[arg(long, default_value_t = false)]
    no_snapshot: bool,

    /// Bubble sort budget as a multiple of the linear search time
    #[arg(long, default_value_t = config::CALIBRATION_FACTOR)]
    factor: u32,

    /// Hash lookups match on the exact name instead of the raw key alone
    #[arg(long, default_value_t = false)]
    strict_names: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            directory: args.directory,
            find: args.find,
            snapshot: (!args.no_snapshot).then_some(args.snapshot),
            factor: args.factor,
            policy: if args.strict_names {
                MatchPolicy::Name
            } else {
                MatchPolicy::RawKey
            },
            ..Config::default()
        }
    }
}

fn main() {
    env_logger::builder().init();

    let args = Args::parse();
    trace!("{args:#?}");

    let session = Session::new(args.into());
    session.run(|report| println!("\n{report}"));
}
