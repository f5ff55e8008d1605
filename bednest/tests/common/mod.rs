#![allow(dead_code)]

use std::f64::consts::TAU;

use bednest::entities::{Item, Model, ModelInstance, ModelObject, TriangleMesh};
use bednest::geometry::primitives::{Point, Pointf, SPolygon};

/// Vertical prism with `base` (real-world units) as its footprint
pub fn prism_mesh(base: &[(f64, f64)], height: f64) -> TriangleMesh {
    let n = base.len() as u32;
    let vertices = base
        .iter()
        .map(|&(x, y)| [x, y, 0.0])
        .chain(base.iter().map(|&(x, y)| [x, y, height]))
        .collect();
    let facets = (1..n - 1)
        .flat_map(|i| [[0, i + 1, i], [n, n + i, n + i + 1]])
        .chain((0..n).flat_map(|i| {
            let j = (i + 1) % n;
            [[i, j, n + j], [i, n + j, n + i]]
        }))
        .collect();
    TriangleMesh::new(vertices, facets)
}

pub fn rect_mesh(w: f64, h: f64) -> TriangleMesh {
    prism_mesh(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)], 5.0)
}

/// Adds an object with a single instance at `offset`
pub fn add_single(model: &mut Model, name: &str, mesh: TriangleMesh, offset: (f64, f64)) -> usize {
    let mut obj = ModelObject::new(name, Some(mesh));
    obj.add_instance(ModelInstance::new(0.0, Pointf(offset.0, offset.1)));
    model.add_object(obj)
}

/// Regular polygon with `n_sides` vertices and circumradius `radius` (internal units), centered at `center`
pub fn regular_polygon(n_sides: usize, radius: f64, center: Point) -> SPolygon {
    let points = (0..n_sides)
        .map(|i| {
            let angle = TAU * i as f64 / n_sides as f64;
            Point(
                center.0 + (radius * angle.cos()).round() as i64,
                center.1 + (radius * angle.sin()).round() as i64,
            )
        })
        .collect();
    SPolygon::new(points).unwrap()
}

/// A deterministic mix of convex items of varying size and vertex count
pub fn item_mix(n_items: usize) -> Vec<Item> {
    (0..n_items)
        .map(|i| {
            let n_sides = 3 + i % 6;
            let radius = 4_000_000.0 + 1_500_000.0 * ((i * 7) % 5) as f64;
            let center = Point(i as i64 * 13_000_000, (i as i64 % 3) * 9_000_000);
            Item::new(i, regular_polygon(n_sides, radius, center))
        })
        .collect()
}

/// Many small convex hulls, at most 11 mm across
pub fn small_hulls(n_items: usize) -> Vec<Item> {
    (0..n_items)
        .map(|i| {
            let n_sides = 3 + i % 6;
            let radius = 3_000_000.0 + 500_000.0 * ((i * 7) % 6) as f64;
            let center = Point((i % 20) as i64 * 15_000_000, (i / 20) as i64 * 15_000_000);
            Item::new(i, regular_polygon(n_sides, radius, center))
        })
        .collect()
}
