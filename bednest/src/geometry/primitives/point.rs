use std::fmt::Display;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::d_transformation::DTransformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::scale_;

/// Geometric primitive representing a point on the internal integer grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point(pub i64, pub i64);

impl Point {
    pub fn x(&self) -> i64 {
        self.0
    }

    pub fn y(&self) -> i64 {
        self.1
    }

    /// 2D cross product of `(a - self)` and `(b - self)`.
    /// Positive when `self -> a -> b` turns counterclockwise.
    pub fn cross(&self, a: Point, b: Point) -> i128 {
        let (ax, ay) = ((a.0 - self.0) as i128, (a.1 - self.1) as i128);
        let (bx, by) = ((b.0 - self.0) as i128, (b.1 - self.1) as i128);
        ax * by - ay * bx
    }

    /// Dot product with a direction vector, widened to avoid overflow
    pub fn dot(&self, (dx, dy): (i128, i128)) -> i128 {
        self.0 as i128 * dx + self.1 as i128 * dy
    }
}

impl Transformable for Point {
    fn transform(&mut self, dt: &DTransformation) -> &mut Self {
        let (tx, ty) = dt.translation();
        let (x, y) = match dt.rotation() {
            r if r == 0.0 => (self.0, self.1),
            r => {
                let (sin, cos) = r.sin_cos();
                let (x, y) = (self.0 as f64, self.1 as f64);
                (
                    (cos * x - sin * y).round() as i64,
                    (sin * x + cos * y).round() as i64,
                )
            }
        };
        self.0 = x + tx;
        self.1 = y + ty;
        self
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl From<(i64, i64)> for Point {
    fn from(p: (i64, i64)) -> Self {
        Point(p.0, p.1)
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Point in real-world units (millimetres), as used by the host model
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointf(pub f64, pub f64);

impl Pointf {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    /// Snaps the point onto the internal integer grid
    pub fn scaled(&self) -> Point {
        Point(scale_(self.0), scale_(self.1))
    }
}

impl Add for Pointf {
    type Output = Pointf;

    fn add(self, rhs: Pointf) -> Pointf {
        Pointf(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl std::ops::AddAssign for Pointf {
    fn add_assign(&mut self, rhs: Pointf) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl From<(f64, f64)> for Pointf {
    fn from(p: (f64, f64)) -> Self {
        Pointf(p.0, p.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn cross_sign_follows_turn_direction() {
        let o = Point(0, 0);
        assert!(o.cross(Point(10, 0), Point(10, 10)) > 0);
        assert!(o.cross(Point(10, 0), Point(10, -10)) < 0);
        assert_eq!(o.cross(Point(10, 0), Point(20, 0)), 0);
    }

    #[test]
    fn transform_rotates_then_translates() {
        let mut p = Point(100, 0);
        p.transform(&DTransformation::new(FRAC_PI_2, (5, 7)));
        assert_eq!(p, Point(5, 107));
    }
}
