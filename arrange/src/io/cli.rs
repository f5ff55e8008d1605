use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    #[arg(short, long, value_name = "FOLDER")]
    pub output_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    /// Only move the instances that fit on the bed, leave the others where they are
    #[arg(long)]
    pub first_bin_only: bool,
    /// Also write one debug SVG per pack group
    #[arg(long)]
    pub svg: bool,
    /// Internal units per SVG pixel
    #[arg(long, value_name = "FACTOR", default_value_t = 1e6)]
    pub svg_downscale: f64,
}
