use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use anyhow::Result;
use bednest::arrange::{ArrangeReport, arrange};
use bednest::entities::BoundingBoxf;
use bednest::io::svg::export_svg;
use bednest::util::NestConfig;
use itertools::Itertools;
use log::info;
use thousands::Separable;

use crate::io::ext_repr::{ExtArrangeOutput, ExtModel, export_model, import_model};

pub mod io;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Arranges an external scene and returns it with the updated placements,
/// along with the report of the underlying arrange pass.
pub fn arrange_ext_model(
    ext_model: &ExtModel,
    config: &NestConfig,
    first_bin_only: bool,
) -> Result<(ExtArrangeOutput, ArrangeReport)> {
    let start = Instant::now();
    let mut model = import_model(ext_model);
    let bed = ext_model.bed.as_ref().map(BoundingBoxf::from);

    let report = arrange(
        &mut model,
        ext_model.clearance,
        bed.as_ref(),
        first_bin_only,
        config,
    )?;
    let run_time_ms = start.elapsed().as_millis() as u64;

    info!(
        "[MAIN] {} group(s), {} candidate position(s) evaluated in {}ms",
        report.n_groups,
        report.stats.n_candidates.separate_with_commas(),
        run_time_ms.separate_with_commas()
    );

    let output = ExtArrangeOutput {
        model: export_model(ext_model, &model),
        success: report.success,
        n_groups: report.n_groups,
        groups: report.groups.iter().map(|g| g.indices()).collect_vec(),
        skipped: report.skipped.clone(),
        run_time_ms,
        config: *config,
    };
    Ok((output, report))
}

/// Writes one debug document per pack group of `report` to `<folder>/<prefix><index>.svg`.
pub fn write_group_svgs(
    report: &ArrangeReport,
    folder: &Path,
    prefix: &str,
    downscale: f64,
    config: &NestConfig,
) -> Vec<PathBuf> {
    match report.bin {
        Some(bin) => export_svg(
            &bin,
            &report.groups,
            downscale,
            &folder.join(prefix),
            &config.svg_draw_options,
        ),
        None => vec![],
    }
}
