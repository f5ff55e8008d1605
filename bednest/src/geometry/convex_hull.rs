use itertools::Itertools;

use crate::geometry::primitives::Point;

/// Filters a set of points to only include those that are part of the convex hull.
///
/// The hull is returned counterclockwise, without repeating the first point.
/// Collinear points on the hull boundary are dropped.
pub fn convex_hull_from_points(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    //https://en.wikibooks.org/wiki/Algorithm_Implementation/Geometry/Convex_hull/Monotone_chain

    //sort lexicographically, duplicates carry no information
    let points = points.into_iter().sorted().dedup().collect_vec();
    if points.len() < 3 {
        return points;
    }

    let mut lower_hull = points
        .iter()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));
    let mut upper_hull = points
        .iter()
        .rev()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));

    //First and last element of both hull parts are the same point
    upper_hull.pop();
    lower_hull.pop();

    lower_hull.append(&mut upper_hull);
    lower_hull
}

fn grow_convex_hull(mut h: Vec<Point>, next: Point) -> Vec<Point> {
    //pop all points from the hull which will be made irrelevant due to the new point
    while h.len() >= 2 && h[h.len() - 2].cross(h[h.len() - 1], next) <= 0 {
        h.pop();
    }
    h.push(next);
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_and_collinear_points_are_removed() {
        let points = vec![
            Point(0, 0),
            Point(5, 0),
            Point(10, 0),
            Point(10, 10),
            Point(3, 4),
            Point(0, 10),
            Point(0, 10),
        ];
        let hull = convex_hull_from_points(points);
        assert_eq!(
            hull,
            vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)]
        );
    }

    #[test]
    fn collinear_input_collapses() {
        let hull = convex_hull_from_points([Point(0, 0), Point(1, 1), Point(2, 2)]);
        assert!(hull.len() < 3);
    }
}
