use anyhow::{Context, Result, ensure};
use itertools::Itertools;

use crate::geometry::d_transformation::DTransformation;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable};
use crate::geometry::primitives::{Point, Rect};

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
///
/// The boundary is stored as a closed ring (the first point is repeated as the last one)
/// and is always oriented clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct SPolygon {
    /// Closed ring of vertices, clockwise
    points: Vec<Point>,
    /// Bounding box
    bbox: Rect,
    /// Twice the (unsigned) area, exact on the integer grid
    area2: i128,
}

impl SPolygon {
    /// Creates a new simple polygon from a set of points.
    /// Closing points and consecutive duplicates are stripped, the winding is normalized to clockwise.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let mut points = points.into_iter().dedup().collect_vec();
        //Strip the last vertex if it is the same as the first one
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        ensure!(
            points.len() >= 3,
            "simple polygon must have at least 3 distinct points, got {}",
            points.len()
        );

        let area2 = match SPolygon::calculate_signed_area2(&points) {
            0 => anyhow::bail!("simple polygon has no area: {:?}", points),
            a if a > 0 => {
                //counterclockwise, flip it
                points.reverse();
                a
            }
            a => -a,
        };

        let bbox = Rect::bounding(points.iter().copied())
            .with_context(|| format!("simple polygon has a degenerate bounding box: {points:?}"))?;

        points.push(points[0]);

        Ok(SPolygon {
            points,
            bbox,
            area2,
        })
    }

    /// Builds a rectangular polygon covering `rect`
    pub fn from_rect(rect: Rect) -> Self {
        SPolygon::new(rect.corners().to_vec()).expect("rectangles always form a valid polygon")
    }

    /// The vertices without the closing point
    pub fn vertices(&self) -> &[Point] {
        &self.points[..self.points.len() - 1]
    }

    /// The closed ring, first point repeated as the last one
    pub fn ring(&self) -> &[Point] {
        &self.points
    }

    pub fn n_vertices(&self) -> usize {
        self.points.len() - 1
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().copied().tuple_windows()
    }

    pub fn is_clockwise(&self) -> bool {
        SPolygon::calculate_signed_area2(self.vertices()) < 0
    }

    /// Whether every corner turns in the same (clockwise) direction
    pub fn is_convex(&self) -> bool {
        let vs = self.vertices();
        let n = vs.len();
        (0..n).all(|i| vs[i].cross(vs[(i + 1) % n], vs[(i + 2) % n]) <= 0)
    }

    pub fn translate(&mut self, (dx, dy): (i64, i64)) -> &mut Self {
        self.points.iter_mut().for_each(|p| {
            p.0 += dx;
            p.1 += dy;
        });
        self.bbox = self.bbox.translate((dx, dy));
        self
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_signed_area2(points: &[Point]) -> i128 {
        points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.0 as i128 * b.1 as i128 - b.0 as i128 * a.1 as i128)
            .sum()
    }

    /// Projects all vertices on the axis `n`, returns the (min, max) interval
    fn project(&self, n: (i128, i128)) -> (i128, i128) {
        self.vertices()
            .iter()
            .map(|p| p.dot(n))
            .minmax()
            .into_option()
            .expect("polygon has vertices")
    }

    fn has_separating_axis(&self, other: &SPolygon) -> bool {
        self.edge_iter().any(|(a, b)| {
            let normal = (-((b.1 - a.1) as i128), (b.0 - a.0) as i128);
            let (s_min, s_max) = self.project(normal);
            let (o_min, o_max) = other.project(normal);
            s_max <= o_min || o_max <= s_min
        })
    }
}

impl Shape for SPolygon {
    fn area(&self) -> i128 {
        self.area2 / 2
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        if t.rotation() == 0.0 {
            return self.translate(t.translation());
        }
        //rounding a rotated ring can shift vertices slightly, rebuild the derived data
        let rotated = self
            .vertices()
            .iter()
            .map(|p| {
                let mut p = *p;
                p.transform(t);
                p
            })
            .collect_vec();
        *self = SPolygon::new(rotated).expect("rotation preserves a non-degenerate polygon");
        self
    }
}

impl CollidesWith<SPolygon> for SPolygon {
    /// Separating axis test, both polygons are expected to be convex.
    /// Polygons that only touch along their boundary do not collide.
    fn collides_with(&self, other: &SPolygon) -> bool {
        debug_assert!(self.is_convex() && other.is_convex());
        self.bbox.collides_with(&other.bbox)
            && !self.has_separating_axis(other)
            && !other.has_separating_axis(self)
    }
}
