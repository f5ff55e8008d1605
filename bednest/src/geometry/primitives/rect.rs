use anyhow::Result;
use anyhow::ensure;

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

///Axis-aligned rectangle on the internal integer grid
#[derive(Clone, Debug, PartialEq, Eq, Copy, Hash)]
pub struct Rect {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl Rect {
    pub fn try_new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    pub fn from_diagonal_corners(c1: Point, c2: Point) -> Result<Self> {
        let x_min = i64::min(c1.x(), c2.x());
        let y_min = i64::min(c1.y(), c2.y());
        let x_max = i64::max(c1.x(), c2.x());
        let y_max = i64::max(c1.y(), c2.y());
        Rect::try_new(x_min, y_min, x_max, y_max)
    }

    /// Smallest rectangle containing all `points`, `None` if they do not span a 2D area.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        let (mut x_min, mut y_min) = (i64::MAX, i64::MAX);
        let (mut x_max, mut y_max) = (i64::MIN, i64::MIN);
        for Point(x, y) in points {
            x_min = x_min.min(x);
            y_min = y_min.min(y);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
        Rect::try_new(x_min, y_min, x_max, y_max).ok()
    }

    /// Returns the four corners of `self`, counterclockwise starting from the lower left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn width(&self) -> i64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> i128 {
        self.width() as i128 * self.height() as i128
    }

    pub fn lower_left(&self) -> Point {
        Point(self.x_min, self.y_min)
    }

    /// Whether `other` lies entirely inside `self` (shared boundaries allowed)
    pub fn contains(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    pub fn translate(mut self, (dx, dy): (i64, i64)) -> Self {
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
        self
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: i64::min(a.x_min, b.x_min),
            y_min: i64::min(a.y_min, b.y_min),
            x_max: i64::max(a.x_max, b.x_max),
            y_max: i64::max(a.y_max, b.y_max),
        }
    }
}

impl CollidesWith<Rect> for Rect {
    /// Interiors overlap. Rectangles that only share an edge or corner do not collide.
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        i64::max(self.x_min, other.x_min) < i64::min(self.x_max, other.x_max)
            && i64::max(self.y_min, other.y_min) < i64::min(self.y_max, other.y_max)
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}
