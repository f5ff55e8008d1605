use std::fs;

use anyhow::{Context, Result, ensure};
use arrange::io::cli::Cli;
use arrange::{arrange_ext_model, io, write_group_svgs};
use bednest::util::NestConfig;
use clap::Parser as ClapParser;
use log::{info, warn};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            NestConfig::default()
        }
        Some(config_file) => {
            io::read_json::<NestConfig>(&config_file).context("incorrect config file format")?
        }
    };
    info!("[MAIN] Successfully parsed NestConfig: {config:?}");

    ensure!(
        args.svg_downscale > 0.0,
        "svg downscale must be positive, got {}",
        args.svg_downscale
    );

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!(
                "could not create output folder: {}",
                args.output_folder.display()
            )
        })?;
    }

    let ext_model = io::read_ext_model(&args.input_file)?;
    let (output, report) = arrange_ext_model(&ext_model, &config, args.first_bin_only)?;

    match output.success {
        true => info!("[MAIN] every instance fits on the bed"),
        false => warn!(
            "[MAIN] arrangement needs {} bed(s), {} oversized instance(s)",
            output.n_groups, report.stats.n_oversized
        ),
    }

    let output_path = args
        .output_folder
        .join(format!("arranged_{input_file_stem}.json"));
    io::write_json(&output, &output_path)?;

    if args.svg {
        write_group_svgs(
            &report,
            &args.output_folder,
            &format!("arranged_{input_file_stem}_"),
            args.svg_downscale,
            &config,
        );
    }

    Ok(())
}
