use super::IntensityOperation;
use clap::Parser;

/// command line tool for aggregating commute routes into traffic intensity maps
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct IntensityApp {
    #[command(subcommand)]
    pub op: IntensityOperation,
}
