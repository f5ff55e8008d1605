//! Top-level arrange pass: project, select a bin, nest and write the placements back.

use std::path::{Path, PathBuf};

use anyhow::{Result, ensure};
use log::{info, warn};

use crate::entities::{Bin, BoundingBoxf, Model, PackGroup, ShapeRegistry};
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Pointf;
use crate::geometry::{scale_, unscale};
use crate::io::svg::export_svg;
use crate::nesting::{NestStats, Nester};
use crate::projection::{SkippedInstance, project_model_from_top};
use crate::util::NestConfig;

/// Which pack groups are written back onto the model
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    /// Only the first group, instances in other groups stay where they are
    FirstBinOnly,
    /// Every group, overflow groups are shifted beside the bed
    AllBins,
}

/// Outcome of [`arrange`]
#[derive(Clone, Debug)]
pub struct ArrangeReport {
    /// Whether everything fit in the first group
    pub success: bool,
    pub n_groups: usize,
    /// Instances that could not be projected and were left untouched
    pub skipped: Vec<SkippedInstance>,
    pub stats: NestStats,
    /// The bin that was packed, `None` if there was nothing to arrange
    pub bin: Option<Bin>,
    pub groups: Vec<PackGroup>,
}

/// The explicit bed if it is well-defined, otherwise the bounding box of the largest silhouette.
///
/// Returns `None` when there is no usable bed and no silhouette to fall back on.
pub fn select_bin(bed: Option<&BoundingBoxf>, registry: &ShapeRegistry) -> Option<Bin> {
    match bed.map(|bb| (bb, Bin::from_bbox(bb))) {
        Some((_, Ok(bin))) => return Some(bin),
        Some((bb, Err(err))) => {
            warn!("[ARR] bed {bb:?} is not usable ({err}), falling back to the largest item")
        }
        None => {}
    }
    registry.largest_item().map(|item| Bin::new(item.shape.bbox()))
}

/// Accumulates the rotation and translation of every packed item onto its instance.
///
/// Group `g` is shifted by `2 * g * bin width` along x so overflow groups land beside the bed.
/// Bounding boxes of all objects are invalidated afterwards.
/// Returns whether all items were packed into a single group.
pub fn apply_arrangement(
    model: &mut Model,
    registry: &ShapeRegistry,
    groups: &[PackGroup],
    bin: &Bin,
    mode: ApplyMode,
) -> bool {
    let n_applied = match mode {
        ApplyMode::FirstBinOnly => groups.len().min(1),
        ApplyMode::AllBins => groups.len(),
    };

    for (g_idx, group) in groups.iter().take(n_applied).enumerate() {
        let lateral = 2 * bin.width() * g_idx as i64;
        for (idx, item) in group.entries.iter() {
            let Some(iref) = registry.instance_ref(*idx) else {
                warn!("[ARR] item {idx} is not in the registry, ignored");
                continue;
            };
            let Some(instance) = model.instance_mut(iref) else {
                warn!("[ARR] {iref} no longer exists, ignored");
                continue;
            };
            let (tx, ty) = item.d_transf.then_translate((lateral, 0)).translation();
            instance.rotation += item.rotation();
            instance.offset += Pointf(unscale(tx), unscale(ty));
        }
    }

    model.invalidate_bounding_boxes();

    groups.len() <= 1
}

/// Arranges all instances of `model` so their silhouettes do not overlap,
/// keeping at least `clearance` (real-world units) between any two of them.
///
/// Instances that do not fit on `bed` are moved beside it, unless `first_bin_only` is set,
/// in which case they are left untouched.
pub fn arrange(
    model: &mut Model,
    clearance: f64,
    bed: Option<&BoundingBoxf>,
    first_bin_only: bool,
    config: &NestConfig,
) -> Result<ArrangeReport> {
    ensure!(
        clearance.is_finite() && clearance >= 0.0,
        "clearance must be a non-negative number, got {clearance}"
    );

    let projection = project_model_from_top(model);
    let registry = projection.registry;

    let Some(bin) = select_bin(bed, &registry) else {
        info!("[ARR] nothing to arrange");
        return Ok(ArrangeReport {
            success: true,
            n_groups: 0,
            skipped: projection.skipped,
            stats: NestStats::default(),
            bin: None,
            groups: vec![],
        });
    };

    let nester = Nester::new(bin, scale_(clearance), *config);
    let result = nester.pack(registry.items())?;

    let mode = match first_bin_only {
        true => ApplyMode::FirstBinOnly,
        false => ApplyMode::AllBins,
    };
    let success = apply_arrangement(model, &registry, &result.groups, &bin, mode);

    info!(
        "[ARR] arranged {} instance(s) in {} group(s) on a {:.3} x {:.3} bin, {} skipped",
        registry.len(),
        result.groups.len(),
        unscale(bin.width()),
        unscale(bin.height()),
        projection.skipped.len()
    );
    if !success {
        warn!(
            "[ARR] not everything fits on the bed, {} overflow group(s)",
            result.groups.len() - 1
        );
    }

    Ok(ArrangeReport {
        success,
        n_groups: result.groups.len(),
        skipped: projection.skipped,
        stats: result.stats,
        bin: Some(bin),
        groups: result.groups,
    })
}

/// Nests the model against `bed` and writes one debug SVG per pack group to `<base_path><index>.svg`.
/// The model is not modified.
pub fn export_arrangement_svg(
    model: &Model,
    clearance: f64,
    bed: &BoundingBoxf,
    downscale: f64,
    base_path: &Path,
    config: &NestConfig,
) -> Result<Vec<PathBuf>> {
    ensure!(
        clearance.is_finite() && clearance >= 0.0,
        "clearance must be a non-negative number, got {clearance}"
    );
    ensure!(downscale > 0.0, "downscale must be positive, got {downscale}");

    let bin = Bin::from_bbox(bed)?;
    let registry = project_model_from_top(model).registry;
    let result = Nester::new(bin, scale_(clearance), *config).pack(registry.items())?;

    Ok(export_svg(
        &bin,
        &result.groups,
        downscale,
        base_path,
        &config.svg_draw_options,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{InstanceRef, Item, ModelInstance, ModelObject, TriangleMesh};
    use crate::geometry::DTransformation;
    use crate::geometry::primitives::{Rect, SPolygon};
    use float_cmp::approx_eq;

    fn square_mesh(w: f64) -> TriangleMesh {
        TriangleMesh::new(
            vec![[0.0, 0.0, 0.0], [w, 0.0, 0.0], [w, w, 0.0], [0.0, w, 0.0]],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn placements_accumulate_on_instances() {
        let mut model = Model::new();
        let mut obj = ModelObject::new("sq", Some(square_mesh(1.0)));
        obj.add_instance(ModelInstance::new(0.5, Pointf(3.0, 4.0)));
        obj.add_instance(ModelInstance::new(0.0, Pointf(0.0, 0.0)));
        model.add_object(obj);

        let mut registry = ShapeRegistry::default();
        let shape = SPolygon::from_rect(Rect::try_new(0, 0, 10, 10).unwrap());
        registry.register(InstanceRef::new(0, 0), shape.clone());
        registry.register(InstanceRef::new(0, 1), shape.clone());

        let bin = Bin::new(Rect::try_new(0, 0, 5_000_000, 5_000_000).unwrap());
        let mut g0 = PackGroup::new();
        g0.push(Item::new(0, shape.clone()).placed(DTransformation::new(0.25, (1_000_000, 2_000_000))));
        let mut g1 = PackGroup::new();
        g1.push(Item::new(1, shape).placed(DTransformation::from_translation((0, 0))));
        let groups = vec![g0, g1];

        model.object_mut(0).unwrap().bounding_box();
        let success = apply_arrangement(&mut model, &registry, &groups, &bin, ApplyMode::AllBins);
        assert!(!success);

        let i0 = model.instance(InstanceRef::new(0, 0)).unwrap();
        assert!(approx_eq!(f64, i0.rotation, 0.75, epsilon = 1e-12));
        assert!(approx_eq!(f64, i0.offset.0, 4.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, i0.offset.1, 6.0, epsilon = 1e-9));
        //second group is shifted by two bin widths
        let i1 = model.instance(InstanceRef::new(0, 1)).unwrap();
        assert!(approx_eq!(f64, i1.offset.0, 10.0, epsilon = 1e-9));
        assert!(model.object(0).unwrap().cached_bounding_box().is_none());
    }

    #[test]
    fn first_bin_only_leaves_overflow_untouched() {
        let mut model = Model::new();
        let mut obj = ModelObject::new("sq", Some(square_mesh(1.0)));
        obj.add_instance(ModelInstance::new(0.0, Pointf(7.0, 7.0)));
        model.add_object(obj);

        let mut registry = ShapeRegistry::default();
        let shape = SPolygon::from_rect(Rect::try_new(0, 0, 10, 10).unwrap());
        registry.register(InstanceRef::new(0, 0), shape.clone());

        let bin = Bin::new(Rect::try_new(0, 0, 100, 100).unwrap());
        let mut g1 = PackGroup::new();
        g1.push(Item::new(0, shape).placed(DTransformation::from_translation((50, 50))));
        let groups = vec![PackGroup::new(), g1];

        assert!(!apply_arrangement(&mut model, &registry, &groups, &bin, ApplyMode::FirstBinOnly));
        assert_eq!(
            model.instance(InstanceRef::new(0, 0)).unwrap().offset,
            Pointf(7.0, 7.0)
        );
    }

    #[test]
    fn undefined_bed_falls_back_to_largest_item() {
        let mut registry = ShapeRegistry::default();
        let small = SPolygon::from_rect(Rect::try_new(0, 0, 10, 10).unwrap());
        let large = SPolygon::from_rect(Rect::try_new(5, 5, 105, 55).unwrap());
        registry.register(InstanceRef::new(0, 0), small);
        registry.register(InstanceRef::new(1, 0), large.clone());

        let flat = BoundingBoxf::new(Pointf(0.0, 0.0), Pointf(0.0, 0.0));
        assert_eq!(select_bin(Some(&flat), &registry), Some(Bin::new(large.bbox())));
        assert_eq!(select_bin(None, &registry), Some(Bin::new(large.bbox())));
        assert_eq!(select_bin(None, &ShapeRegistry::default()), None);

        //defined, but smaller than a single grid unit
        let tiny = BoundingBoxf::new(Pointf(0.0, 0.0), Pointf(1e-7, 1e-7));
        assert!(tiny.is_defined());
        assert_eq!(select_bin(Some(&tiny), &registry), Some(Bin::new(large.bbox())));

        let bed = BoundingBoxf::new(Pointf(0.0, 0.0), Pointf(1.0, 2.0));
        assert_eq!(
            select_bin(Some(&bed), &registry),
            Some(Bin::new(Rect::try_new(0, 0, 1_000_000, 2_000_000).unwrap()))
        );
    }

    #[test]
    fn bed_below_grid_resolution_still_arranges_everything() {
        let mut model = Model::new();
        let mut obj = ModelObject::new("cube", Some(square_mesh(10.0)));
        obj.add_instance(ModelInstance::new(0.0, Pointf(40.0, 40.0)));
        model.add_object(obj);

        let tiny = BoundingBoxf::new(Pointf(0.0, 0.0), Pointf(1e-7, 1e-7));
        let report = arrange(&mut model, 2.0, Some(&tiny), false, &NestConfig::default()).unwrap();
        assert!(report.success);
        assert_eq!(report.n_groups, 1);
        assert_eq!(report.groups[0].indices(), vec![0]);
        assert_eq!(
            report.bin.map(|b| b.rect),
            Some(Rect::try_new(40_000_000, 40_000_000, 50_000_000, 50_000_000).unwrap())
        );
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bednest_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn arrangement_svg_has_one_file_per_group() {
        let mut model = Model::new();
        for x in [0.0, 100.0] {
            let mut obj = ModelObject::new("sq", Some(square_mesh(20.0)));
            obj.add_instance(ModelInstance::new(0.0, Pointf(x, 0.0)));
            model.add_object(obj);
        }
        let bed = BoundingBoxf::new(Pointf(0.0, 0.0), Pointf(25.0, 30.0));
        let dir = scratch_dir("arrangement_svg");
        let base = dir.join("bed_");

        let written =
            export_arrangement_svg(&model, 6.0, &bed, 1e6, &base, &NestConfig::default()).unwrap();
        assert_eq!(written, vec![dir.join("bed_0.svg"), dir.join("bed_1.svg")]);

        let bin_fill = NestConfig::default().svg_draw_options.theme.bin_fill.to_string();
        for path in written.iter() {
            let doc = std::fs::read_to_string(path).unwrap();
            assert_eq!(doc.matches("<path").count(), 2);
            //the bin outline is the first path
            let first_path = doc.split("<path").nth(1).unwrap();
            assert!(first_path.contains(bin_fill.as_str()));
        }
        //the model is left untouched
        assert_eq!(
            model.instance(InstanceRef::new(1, 0)).unwrap().offset,
            Pointf(100.0, 0.0)
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn negative_clearance_is_rejected() {
        let mut model = Model::new();
        assert!(arrange(&mut model, -1.0, None, false, &NestConfig::default()).is_err());
    }
}
