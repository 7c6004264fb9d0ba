use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "cpumark", about = "Pull CPU data from cpubenchmark.net")]
pub struct Options {
    /// Input file containing a list of CPUs, one per line.
    #[structopt(short = "i", long = "input", default_value = "cpus.txt")]
    pub input: PathBuf,

    /// Output file to save data to. If it already exists, user-added
    /// columns are carried over by CPU name.
    #[structopt(short = "o", long = "output", default_value = "cpuData.csv")]
    pub output: PathBuf,

    /// Fetch pages in parallel with the given number of workers.
    /// With no value, uses all available CPUs.
    #[structopt(short = "p", long = "parallel")]
    pub parallel: Option<Option<usize>>,

    /// Print examples of how CPUs should be formatted and exit.
    #[structopt(short = "e", long = "examples")]
    pub examples: bool,
}
