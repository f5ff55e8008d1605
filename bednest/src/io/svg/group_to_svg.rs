use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::entities::{Bin, PackGroup};
use crate::geometry::primitives::{Point, SPolygon};
use crate::io::svg::svg_util::{data_to_path, polygon_data};
use crate::io::svg::SvgDrawOptions;

/// Height (and width) of the canvas of a pack group document
pub const CANVAS_HEIGHT: f64 = 500.0;

const SVG_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.0//EN" "http://www.w3.org/TR/2001/REC-SVG-20010904/DTD/svg10.dtd">
<svg height="500" width="500" xmlns="http://www.w3.org/2000/svg" xmlns:svg="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
"#;

const SVG_FOOTER: &str = "\n</svg>\n";

/// Maps a point from the nesting frame (y up) onto the canvas (y down)
pub fn to_canvas(Point(x, y): Point, downscale: f64) -> (f64, f64) {
    (x as f64 / downscale, -(y as f64) / downscale + CANVAS_HEIGHT)
}

/// Renders a single pack group: the bin outline first, then every placed item.
pub fn group_to_svg(bin: &Bin, group: &PackGroup, downscale: f64, options: &SvgDrawOptions) -> String {
    let theme = &options.theme;
    let stroke_width = format!("{}", 0.5 * theme.stroke_width_multiplier);
    let bin_fill = theme.bin_fill.to_string();
    let item_fill = theme.item_fill.to_string();
    let item_fill_opacity = theme.item_fill_opacity.to_string();
    let inflated_stroke = theme.inflated_stroke.to_string();

    let mut paths = vec![canvas_path(
        &bin.outline(),
        downscale,
        &[
            ("fill", bin_fill.as_str()),
            ("stroke", "black"),
            ("stroke-width", stroke_width.as_str()),
        ],
    )];

    for item in group.items() {
        if options.draw_inflated {
            paths.push(canvas_path(
                &item.transformed_inflated(),
                downscale,
                &[
                    ("fill", "none"),
                    ("stroke", inflated_stroke.as_str()),
                    ("stroke-width", stroke_width.as_str()),
                    ("stroke-dasharray", "2 2"),
                ],
            ));
        }
        paths.push(canvas_path(
            &item.transformed_shape(),
            downscale,
            &[
                ("fill", item_fill.as_str()),
                ("fill-opacity", item_fill_opacity.as_str()),
                ("stroke", "black"),
                ("stroke-width", stroke_width.as_str()),
            ],
        ));
    }

    let mut doc = String::from(SVG_HEADER);
    for path in paths {
        doc.push_str(&path);
        doc.push('\n');
    }
    doc.push_str(SVG_FOOTER);
    doc
}

fn canvas_path(shape: &SPolygon, downscale: f64, params: &[(&str, &str)]) -> String {
    let data = polygon_data(shape.vertices().iter().map(|p| to_canvas(*p, downscale)));
    data_to_path(data, params).to_string()
}

/// Path of the document for group `index`: `<base_path><index>.svg`
pub fn group_svg_path(base_path: &Path, index: usize) -> PathBuf {
    let mut name = base_path.as_os_str().to_owned();
    name.push(format!("{index}.svg"));
    PathBuf::from(name)
}

/// Writes one document per pack group.
///
/// Groups whose file cannot be written are skipped with a warning.
/// Returns the paths of the files that were written, in group order.
pub fn export_svg(
    bin: &Bin,
    groups: &[PackGroup],
    downscale: f64,
    base_path: &Path,
    options: &SvgDrawOptions,
) -> Vec<PathBuf> {
    let written = groups
        .iter()
        .enumerate()
        .filter_map(|(i, group)| {
            let path = group_svg_path(base_path, i);
            let doc = group_to_svg(bin, group, downscale, options);
            match fs::write(&path, doc) {
                Ok(()) => Some(path),
                Err(err) => {
                    warn!("[SVG] could not write {}: {err}", path.display());
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    info!(
        "[SVG] {}/{} pack group(s) written to {}*.svg",
        written.len(),
        groups.len(),
        base_path.display()
    );
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Item;
    use crate::geometry::DTransformation;
    use crate::geometry::primitives::Rect;
    use float_cmp::approx_eq;

    fn group_with_square() -> PackGroup {
        let square = SPolygon::from_rect(Rect::try_new(0, 0, 10, 10).unwrap());
        let mut group = PackGroup::new();
        group.push(Item::new(0, square).placed(DTransformation::from_translation((20, 0))));
        group
    }

    #[test]
    fn canvas_mapping_flips_the_y_axis() {
        let (x, y) = to_canvas(Point(2_000_000, 3_000_000), 1e6);
        assert!(approx_eq!(f64, x, 2.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, y, 497.0, epsilon = 1e-9));
    }

    #[test]
    fn document_has_fixed_frame_and_one_path_per_polygon() {
        let bin = Bin::new(Rect::try_new(0, 0, 100, 100).unwrap());
        let doc = group_to_svg(&bin, &group_with_square(), 1.0, &SvgDrawOptions::default());
        assert!(doc.starts_with("<?xml version=\"1.0\""));
        assert!(doc.contains("<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.0//EN\""));
        assert!(doc.contains("<svg height=\"500\" width=\"500\""));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert_eq!(doc.matches("<path").count(), 2);
        //bin outline comes first
        let bin_fill = SvgDrawOptions::default().theme.bin_fill.to_string();
        assert!(doc.find(bin_fill.as_str()).unwrap() < doc.rfind("<path").unwrap());

        let opts = SvgDrawOptions {
            draw_inflated: true,
            ..SvgDrawOptions::default()
        };
        let doc = group_to_svg(&bin, &group_with_square(), 1.0, &opts);
        assert_eq!(doc.matches("<path").count(), 3);
    }

    #[test]
    fn unwritable_destination_is_skipped() {
        let bin = Bin::new(Rect::try_new(0, 0, 100, 100).unwrap());
        let base = std::env::temp_dir()
            .join(format!("bednest_missing_{}", std::process::id()))
            .join("nested")
            .join("group_");
        let written = export_svg(
            &bin,
            &[group_with_square()],
            1.0,
            &base,
            &SvgDrawOptions::default(),
        );
        assert!(written.is_empty());
        assert!(!group_svg_path(&base, 0).exists());
    }

    #[test]
    fn group_files_are_suffixed_by_index() {
        let p = group_svg_path(Path::new("/tmp/out/arranged_"), 3);
        assert_eq!(p, PathBuf::from("/tmp/out/arranged_3.svg"));
    }
}
