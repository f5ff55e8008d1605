use anyhow::{Result, bail};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::primitives::{Point, SPolygon};

/// Whether to strictly inflate or deflate when making any modifications to shape.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeModifyMode {
    /// Modify the shape to be strictly larger than the original (superset).
    Inflate,
    /// Modify the shape to be strictly smaller than the original (subset).
    Deflate,
}

/// Offsets a convex [`SPolygon`] by `distance` (internal units) either outwards or inwards depending on the [`ShapeModifyMode`].
/// Relies on the [`geo_buffer`](https://crates.io/crates/geo-buffer) crate.
///
/// The offset ring is snapped back onto the integer grid and re-hulled,
/// so the result is again a convex, clockwise polygon.
pub fn offset_shape(sp: &SPolygon, mode: ShapeModifyMode, distance: i64) -> Result<SPolygon> {
    if distance == 0 {
        return Ok(sp.clone());
    }
    let offset = match mode {
        ShapeModifyMode::Deflate => -distance as f64,
        ShapeModifyMode::Inflate => distance as f64,
    };

    // geo expects the exterior counterclockwise, our rings are clockwise
    let exterior = sp
        .ring()
        .iter()
        .rev()
        .map(|p| (p.0 as f64, p.1 as f64))
        .collect_vec();
    let geo_poly = geo_types::Polygon::new(geo_types::LineString::from(exterior), vec![]);

    let geo_poly_offset = geo_buffer::buffer_polygon(&geo_poly, offset);

    let points_offset = geo_poly_offset
        .0
        .iter()
        .flat_map(|p| p.exterior().coords())
        .map(|c| Point(c.x.round() as i64, c.y.round() as i64))
        .collect_vec();

    if points_offset.is_empty() {
        bail!("offsetting polygon by {offset} yielded an empty shape");
    }

    let hull = convex_hull_from_points(points_offset);
    let offset_shape = SPolygon::new(hull)?;

    debug!(
        "[SM] offset polygon by {offset}: {} -> {} vertices",
        sp.n_vertices(),
        offset_shape.n_vertices()
    );

    Ok(offset_shape)
}
