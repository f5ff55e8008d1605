use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, SPolygon};

/// Axis-aligned direction in which a shape can be slid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    /// Towards negative y
    Down,
    /// Towards negative x
    Left,
}

impl SlideDirection {
    /// Maps a point into a frame where the slide direction points down
    fn to_frame(self, p: Point) -> (f64, f64) {
        match self {
            SlideDirection::Down => (p.0 as f64, p.1 as f64),
            SlideDirection::Left => (p.1 as f64, p.0 as f64),
        }
    }

    /// Translation vector for sliding `distance` units
    pub fn translation(self, distance: i64) -> (i64, i64) {
        match self {
            SlideDirection::Down => (0, -distance),
            SlideDirection::Left => (-distance, 0),
        }
    }
}

/// Distance `moving` can travel in `dir` before its boundary meets `obstacle`.
///
/// Returns `None` if the obstacle is never met. The shapes must not overlap at the start.
/// The result is floored onto the integer grid, so sliding by it never creates an overlap,
/// but shapes that only graze each other's corners may be reported as blocking.
pub fn slide_distance(moving: &SPolygon, obstacle: &SPolygon, dir: SlideDirection) -> Option<i64> {
    let (m_bbox, o_bbox) = (moving.bbox(), obstacle.bbox());
    let (m_lo, m_hi, o_lo, o_hi, o_start, m_end) = match dir {
        SlideDirection::Down => (
            m_bbox.x_min,
            m_bbox.x_max,
            o_bbox.x_min,
            o_bbox.x_max,
            o_bbox.y_min,
            m_bbox.y_max,
        ),
        SlideDirection::Left => (
            m_bbox.y_min,
            m_bbox.y_max,
            o_bbox.y_min,
            o_bbox.y_max,
            o_bbox.x_min,
            m_bbox.x_max,
        ),
    };
    //no shared extent perpendicular to the slide, or obstacle lies fully behind
    if m_hi < o_lo || o_hi < m_lo || o_start >= m_end {
        return None;
    }

    let m_pts = moving.ring().iter().map(|p| dir.to_frame(*p)).collect_vec();
    let o_pts = obstacle.ring().iter().map(|p| dir.to_frame(*p)).collect_vec();

    //vertices of the moving shape falling onto the obstacle's edges
    let falling = vertical_gaps(&m_pts, &o_pts);
    //vertices of the obstacle rising into the moving shape's edges
    let rising = vertical_gaps(&o_pts, &m_pts).map(|d| -d);

    falling
        .chain(rising)
        .filter(|d| *d >= 0.0)
        .min_by_key(|d| OrderedFloat(*d))
        .map(|d| d.floor() as i64)
}

/// For every vertex in `from` vertically aligned with an edge of `to_ring`,
/// the signed vertical gap `vertex.y - edge.y`.
fn vertical_gaps<'a>(
    from: &'a [(f64, f64)],
    to_ring: &'a [(f64, f64)],
) -> impl Iterator<Item = f64> + 'a {
    let vertices = &from[..from.len() - 1];
    vertices.iter().flat_map(move |&(vx, vy)| {
        to_ring
            .iter()
            .tuple_windows()
            .filter_map(move |(&(ax, ay), &(bx, by))| {
                //edges parallel to the slide direction never block a vertex head-on
                if ax == bx || vx < ax.min(bx) || vx > ax.max(bx) {
                    return None;
                }
                let ey = ay + (by - ay) * (vx - ax) / (bx - ax);
                Some(vy - ey)
            })
    })
}
