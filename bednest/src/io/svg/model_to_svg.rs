use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use svg::Document;

use crate::entities::Model;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Rect;
use crate::geometry::unscale;
use crate::io::svg::SvgDrawOptions;
use crate::io::svg::svg_util::{data_to_path, polygon_data};
use crate::projection::project_model_from_top;

/// File name used by [`write_model_svg`] when no destination is given
pub const MODEL_SVG_FILE_NAME: &str = "bednest_model.svg";

/// Draws the top-down silhouette of every instance in `model` into a single document, in real-world units.
pub fn svg_from_model(model: &Model, options: &SvgDrawOptions) -> Document {
    let registry = project_model_from_top(model).registry;
    let theme = &options.theme;

    let shapes = registry.iter().map(|(_, item)| &item.shape).collect::<Vec<_>>();
    let extent = shapes
        .iter()
        .map(|s| s.bbox())
        .reduce(Rect::bounding_rect);

    let mut doc = Document::new().set("xmlns:xlink", "http://www.w3.org/1999/xlink");
    let Some(extent) = extent else {
        return doc;
    };

    //y is flipped so the document shows the bed as seen from above
    let (w, h) = (unscale(extent.width()), unscale(extent.height()));
    let margin = f64::max(w, h) * 0.025;
    doc = doc.set(
        "viewBox",
        (
            unscale(extent.x_min) - margin,
            -unscale(extent.y_max) - margin,
            w + 2.0 * margin,
            h + 2.0 * margin,
        ),
    );
    let stroke_width = f64::min(w, h) * 0.002 * theme.stroke_width_multiplier as f64;
    let stroke_width = stroke_width.to_string();
    let item_fill = theme.item_fill.to_string();

    for shape in shapes {
        let data = polygon_data(
            shape
                .vertices()
                .iter()
                .map(|p| (unscale(p.0), -unscale(p.1))),
        );
        doc = doc.add(data_to_path(
            data,
            &[
                ("fill", item_fill.as_str()),
                ("stroke", "black"),
                ("stroke-width", stroke_width.as_str()),
            ],
        ));
    }
    doc
}

/// `path`, or [`MODEL_SVG_FILE_NAME`] in the system's temporary directory if none is given
pub fn model_svg_path(path: Option<&Path>) -> PathBuf {
    match path {
        Some(p) => p.to_path_buf(),
        None => std::env::temp_dir().join(MODEL_SVG_FILE_NAME),
    }
}

/// Saves [`svg_from_model`] to [`model_svg_path`].
pub fn write_model_svg(model: &Model, path: Option<&Path>, options: &SvgDrawOptions) -> Result<PathBuf> {
    let path = model_svg_path(path);
    let doc = svg_from_model(model, options);
    svg::save(&path, &doc)
        .with_context(|| format!("could not write model svg to {}", path.display()))?;
    info!("[SVG] model silhouettes written to {}", path.display());
    Ok(path)
}
